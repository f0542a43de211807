use crate::error::{DbError, Result};
use crate::schema::{create_database_sql, TABLES};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};
use xldm_config::DatabaseConfig;

/// Result of [`bootstrap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// `false` when the database already existed
    pub database_created: bool,
}

/// Human-readable connection target, e.g. `root@localhost:3306/sheets`.
pub fn target(config: &DatabaseConfig, with_database: bool) -> String {
    let server = format!("{}@{}:{}", config.user, config.host, config.port);
    if with_database {
        format!("{server}/{}", config.name)
    } else {
        server
    }
}

fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
}

/// Connect to the server without selecting a database.
pub async fn connect_server(config: &DatabaseConfig) -> Result<MySqlConnection> {
    let target = target(config, false);
    debug!(%target, "connecting");
    connect_options(config)
        .connect()
        .await
        .map_err(|source| DbError::Connection { target, source })
}

/// Connect with `config.name` as the default database.
pub async fn connect_database(config: &DatabaseConfig) -> Result<MySqlConnection> {
    let target = target(config, true);
    debug!(%target, "connecting");
    connect_options(config)
        .database(&config.name)
        .connect()
        .await
        .map_err(|source| DbError::Connection { target, source })
}

/// Whether a database with exactly this name exists.
pub async fn database_exists(conn: &mut MySqlConnection, name: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM information_schema.SCHEMATA WHERE SCHEMA_NAME = ?")
            .bind(name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|source| DbError::Query {
                operation: "database lookup".to_string(),
                source,
            })?;
    Ok(count > 0)
}

/// Create a database with the utf8mb4 character set.
pub async fn create_database(conn: &mut MySqlConnection, name: &str) -> Result<()> {
    let sql = create_database_sql(name)?;
    sqlx::query(&sql)
        .execute(&mut *conn)
        .await
        .map_err(|source| DbError::Schema {
            object: format!("database '{name}'"),
            source,
        })?;
    info!(database = name, "created database");
    Ok(())
}

/// Create the fixed tables if they do not exist yet.
pub async fn create_tables(conn: &mut MySqlConnection) -> Result<()> {
    for (table, ddl) in TABLES {
        sqlx::query(ddl)
            .execute(&mut *conn)
            .await
            .map_err(|source| DbError::Schema {
                object: format!("table '{table}'"),
                source,
            })?;
        debug!(table, "table ready");
    }
    Ok(())
}

/// Names of the tables in the connection's default database, sorted.
pub async fn list_tables(conn: &mut MySqlConnection) -> Result<Vec<String>> {
    sqlx::query_scalar(
        "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.TABLES \
         WHERE TABLE_SCHEMA = DATABASE() ORDER BY TABLE_NAME",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(|source| DbError::Query {
        operation: "list tables".to_string(),
        source,
    })
}

/// Create the database if it is missing, then its tables.
///
/// Each connection is closed before the next step starts.
pub async fn bootstrap(config: &DatabaseConfig) -> Result<BootstrapOutcome> {
    let mut server = connect_server(config).await?;
    let database_created = if database_exists(&mut server, &config.name).await? {
        info!(database = %config.name, "database already exists");
        false
    } else {
        create_database(&mut server, &config.name).await?;
        true
    };
    // Close errors are not fatal
    let _ = server.close().await;

    let mut conn = connect_database(config).await?;
    create_tables(&mut conn).await?;
    let _ = conn.close().await;

    info!(database = %config.name, "schema ready");
    Ok(BootstrapOutcome { database_created })
}
