pub mod oid;
pub mod schema;
