//! Fixed schema of the data manager database.

use crate::error::{DbError, Result};

/// Longest identifier MySQL accepts
const MAX_IDENTIFIER_LEN: usize = 64;

/// Employee records
pub const EMPLOYEES_DDL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    department VARCHAR(100),
    position VARCHAR(100),
    hire_date DATE,
    salary DECIMAL(10,2),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Imported spreadsheet rows as JSON, keyed by source file and sheet
pub const EXCEL_DATA_DDL: &str = "CREATE TABLE IF NOT EXISTS excel_data (
    id INT AUTO_INCREMENT PRIMARY KEY,
    file_name VARCHAR(255) NOT NULL,
    sheet_name VARCHAR(100) NOT NULL,
    row_data JSON,
    imported_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Table name and DDL, in creation order
pub const TABLES: &[(&str, &str)] = &[("employees", EMPLOYEES_DDL), ("excel_data", EXCEL_DATA_DDL)];

/// Quote a MySQL identifier with backticks, doubling embedded backticks.
///
/// # Errors
///
/// Returns [`DbError::InvalidIdentifier`] for empty names, names longer
/// than 64 characters and names containing NUL.
pub fn quote_identifier(name: &str) -> Result<String> {
    let reason = if name.is_empty() {
        Some("empty")
    } else if name.chars().count() > MAX_IDENTIFIER_LEN {
        Some("longer than 64 characters")
    } else if name.contains('\0') {
        Some("contains NUL")
    } else {
        None
    };

    if let Some(reason) = reason {
        return Err(DbError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        });
    }

    Ok(format!("`{}`", name.replace('`', "``")))
}

/// `CREATE DATABASE` statement with the utf8mb4 character set.
pub fn create_database_sql(name: &str) -> Result<String> {
    Ok(format!(
        "CREATE DATABASE {} CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
        quote_identifier(name)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("excel_data_manager").unwrap(), "`excel_data_manager`");
        assert_eq!(quote_identifier("my-db").unwrap(), "`my-db`");
        assert_eq!(quote_identifier("a`b").unwrap(), "`a``b`");
    }

    #[test]
    fn test_quote_identifier_rejects() {
        assert!(matches!(
            quote_identifier(""),
            Err(DbError::InvalidIdentifier { reason: "empty", .. })
        ));
        assert!(quote_identifier(&"x".repeat(65)).is_err());
        assert!(quote_identifier(&"x".repeat(64)).is_ok());
        assert!(quote_identifier("a\0b").is_err());
    }

    #[test]
    fn test_create_database_sql() {
        assert_eq!(
            create_database_sql("sheets").unwrap(),
            "CREATE DATABASE `sheets` CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci"
        );
        // Injection attempts stay inside the identifier
        assert_eq!(
            create_database_sql("x`; DROP DATABASE y; --").unwrap(),
            "CREATE DATABASE `x``; DROP DATABASE y; --` CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci"
        );
    }

    #[test]
    fn test_tables_are_idempotent_ddl() {
        let names: Vec<&str> = TABLES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["employees", "excel_data"]);

        for (name, ddl) in TABLES {
            assert!(ddl.starts_with(&format!("CREATE TABLE IF NOT EXISTS {name} (")));
        }
        assert!(EXCEL_DATA_DDL.contains("row_data JSON"));
        assert!(EMPLOYEES_DDL.contains("salary DECIMAL(10,2)"));
    }
}
