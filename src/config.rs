use std::collections::HashMap;

use config::{Config as ConfigLib, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::crl::ExtensionRegistry;
use crate::crypto::{self, HashAlg};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub signing: SigningConfig,
    pub output: OutputConfig,
    pub extensions: ExtensionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Hash used when signing, e.g. "SHA-256"
    pub hash: String,
}

impl SigningConfig {
    pub fn hash_alg(&self) -> Result<HashAlg, crypto::Error> {
        self.hash.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    /// Interpret the standard CRL extensions while decoding
    pub understood: bool,
}

impl ExtensionsConfig {
    pub fn registry(&self) -> ExtensionRegistry {
        if self.understood {
            ExtensionRegistry::standard()
        } else {
            ExtensionRegistry::default()
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLib::builder()
            .set_default("signing.hash", "SHA-256")?
            .set_default("output.pretty", true)?
            .set_default("extensions.understood", false)?
            .add_source(File::with_name("config/crl-tool").required(false));

        // If env_vars is provided, we use it instead of system environment
        // This is to avoid systems variables pollution across tests
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // Should be in the format CRL_SIGNING__HASH or CRL_OUTPUT__PRETTY
            builder = builder.add_source(
                Environment::with_prefix("CRL")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }
}
