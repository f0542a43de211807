//! Connection smoke test.

use crate::bootstrap::{connect_database, connect_server, list_tables, target};
use serde::Serialize;
use sqlx::Connection;
use tracing::warn;
use xldm_config::DatabaseConfig;

/// Outcome of one probe step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum StepOutcome {
    Ok,
    Failed(String),
    /// Not attempted because an earlier step failed
    Skipped,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Error message of a failed step
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What the smoke test found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// `user@host:port`
    pub server_target: String,
    /// `user@host:port/database`
    pub database_target: String,
    pub server: StepOutcome,
    pub database: StepOutcome,
    /// Tables in the database, sorted; empty unless `database` is ok
    pub tables: Vec<String>,
}

impl ProbeReport {
    pub fn is_ok(&self) -> bool {
        self.server.is_ok() && self.database.is_ok()
    }

    /// First failure message, if any
    pub fn failure(&self) -> Option<&str> {
        self.server.failure().or_else(|| self.database.failure())
    }
}

/// Try a server-level connection, then a database-level one, and list
/// the tables. Failures are recorded in the report, never returned.
pub async fn probe(config: &DatabaseConfig) -> ProbeReport {
    let mut report = ProbeReport {
        server_target: target(config, false),
        database_target: target(config, true),
        server: StepOutcome::Skipped,
        database: StepOutcome::Skipped,
        tables: Vec::new(),
    };

    match connect_server(config).await {
        Ok(conn) => {
            let _ = conn.close().await;
            report.server = StepOutcome::Ok;
        }
        Err(e) => {
            warn!(error = %e, "server connection failed");
            report.server = StepOutcome::Failed(e.to_string());
            return report;
        }
    }

    let mut conn = match connect_database(config).await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "database connection failed");
            report.database = StepOutcome::Failed(e.to_string());
            return report;
        }
    };

    match list_tables(&mut conn).await {
        Ok(tables) => {
            report.database = StepOutcome::Ok;
            report.tables = tables;
        }
        Err(e) => report.database = StepOutcome::Failed(e.to_string()),
    }
    let _ = conn.close().await;

    report
}

/// Suggested fixes for a connection error message.
///
/// Matches the messages MySQL servers and the driver produce; anything
/// unrecognised yields no hints.
pub fn remediation_hints(message: &str, database: &str) -> Vec<String> {
    if message.contains("Access denied") {
        vec![
            "Check that DB_USER and DB_PASSWORD are correct".to_string(),
            "Make sure the user has privileges on the database".to_string(),
        ]
    } else if message.contains("Unknown database") {
        vec![
            format!("Create the database '{database}' first"),
            "Run `xldm setup-db` to create it".to_string(),
        ]
    } else if ["Can't connect", "Connection refused", "error communicating"]
        .iter()
        .any(|needle| message.contains(needle))
    {
        vec![
            "Make sure the MySQL server is running".to_string(),
            "Check that DB_HOST and DB_PORT are correct".to_string(),
        ]
    } else {
        Vec::new()
    }
}
