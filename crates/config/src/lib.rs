//! Configuration for xldm
//!
//! Values are looked up in the process environment first and then in a
//! local `.env` defaults file.
//!
//! ```
//! use xldm_config::{ConfigSource, DatabaseConfig};
//!
//! let source = ConfigSource::from_parts([("DB_HOST", "db")], Some("DB_NAME=sheets\n"));
//! let db = DatabaseConfig::from_source(&source).unwrap();
//!
//! assert_eq!(db.host, "db");
//! assert_eq!(db.name, "sheets");
//! assert_eq!(db.port, 3306);
//! ```

mod database;
mod dotenv;
mod error;
mod source;

pub use database::{DatabaseConfig, REQUIRED_KEYS};
pub use error::{ConfigError, Result};
pub use source::{ConfigSource, DEFAULT_ENV_FILE};
