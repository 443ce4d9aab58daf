use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use pkix_crl::{
    CertificateList, OpenSslEngine, SigningKey, VerificationSource, armor, config::Config,
    crl::PEM_LABEL, telemetry,
};
use rasn_pkix::Certificate;

/// Inspect, check, verify and sign X.509 certificate revocation lists
#[derive(Parser, Debug)]
#[command(name = "crl-tool", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a CRL as JSON
    Inspect {
        /// CRL file (PEM or DER)
        #[arg(value_name = "CRL")]
        crl: PathBuf,
    },

    /// Check whether a certificate is revoked by a CRL
    Check {
        #[arg(value_name = "CRL")]
        crl: PathBuf,
        /// Certificate file (PEM or DER)
        #[arg(value_name = "CERT")]
        cert: PathBuf,
    },

    /// Verify a CRL signature against the issuer certificate
    Verify {
        #[arg(value_name = "CRL")]
        crl: PathBuf,
        #[arg(value_name = "ISSUER")]
        issuer: PathBuf,
    },

    /// Re-sign a CRL with a PKCS#8 private key
    Sign {
        #[arg(value_name = "CRL")]
        crl: PathBuf,
        /// PKCS#8 private key (PEM or DER)
        #[arg(long, value_name = "FILE")]
        key: PathBuf,
        /// Hash algorithm, defaults to signing.hash from the configuration
        #[arg(long, value_name = "HASH")]
        hash: Option<String>,
        /// Use RSASSA-PSS with an RSA key
        #[arg(long)]
        pss: bool,
        /// Output file, stdout when omitted
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn read_crl(path: &Path, config: &Config) -> Result<CertificateList> {
    let bytes = fs::read(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let der = armor::decode_or_der(PEM_LABEL, &bytes)?;
    Ok(CertificateList::from_der_with(
        der,
        &config.extensions.registry(),
    )?)
}

fn read_certificate(path: &Path) -> Result<Certificate> {
    let bytes = fs::read(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let der = armor::decode_or_der("CERTIFICATE", &bytes)?;
    rasn::der::decode(&der).map_err(|e| color_eyre::eyre::eyre!("invalid certificate: {e}"))
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Command::Inspect { crl } => {
            let crl = read_crl(&crl, &config)?;
            let json = crl.to_json()?;
            let rendered = if config.output.pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            };
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { crl, cert } => {
            let crl = read_crl(&crl, &config)?;
            let cert = read_certificate(&cert)?;
            if crl.is_revoked(&cert) {
                println!("revoked");
                Ok(ExitCode::FAILURE)
            } else {
                println!("not revoked");
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Verify { crl, issuer } => {
            let crl = read_crl(&crl, &config)?;
            let issuer = read_certificate(&issuer)?;
            let verified =
                crl.verify(&OpenSslEngine::new(), VerificationSource::IssuerCertificate(&issuer))?;
            if verified {
                println!("signature valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("signature invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Sign {
            crl,
            key,
            hash,
            pss,
            out,
        } => {
            let mut crl = read_crl(&crl, &config)?;

            let key_bytes = fs::read(&key).wrap_err_with(|| format!("reading {}", key.display()))?;
            let mut signing_key =
                SigningKey::from_pkcs8_der(armor::decode_or_der("PRIVATE KEY", &key_bytes)?)?;
            if pss {
                signing_key = signing_key.with_pss()?;
            }

            let hash = match hash {
                Some(name) => name.parse()?,
                None => config.signing.hash_alg()?,
            };

            crl.sign(&OpenSslEngine::new(), &signing_key, hash)?;
            let pem = crl.to_pem(false)?;
            match out {
                Some(path) => {
                    fs::write(&path, pem).wrap_err_with(|| format!("writing {}", path.display()))?
                }
                None => print!("{pem}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
