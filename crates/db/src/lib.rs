//! Database tooling for xldm
//!
//! Creates the MySQL database and its two fixed tables (`employees` and
//! `excel_data`), and smoke-tests connectivity with remediation hints.
//! All operations are sequential and use one connection at a time.

mod bootstrap;
mod error;
mod probe;
mod schema;

pub use bootstrap::{
    bootstrap, connect_database, connect_server, create_database, create_tables,
    database_exists, list_tables, target, BootstrapOutcome,
};
pub use error::{DbError, Result};
pub use probe::{probe, remediation_hints, ProbeReport, StepOutcome};
pub use schema::{create_database_sql, quote_identifier, EMPLOYEES_DDL, EXCEL_DATA_DDL, TABLES};
