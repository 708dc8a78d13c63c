use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::errors::StoreError;

pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    let tx = conn
        .transaction()
        .map_err(StoreError::from)
        .context("Failed to begin schema transaction")?;

    for (idx, statement) in statements.iter().enumerate() {
        tx.execute(statement, [])
            .map_err(StoreError::from)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    tx.commit()
        .map_err(StoreError::from)
        .context("Failed to commit schema")?;

    log::info!("Database schema reset successfully");
    Ok(())
}

/// Create the schema unless the players table already exists.
pub fn ensure_schema(conn: &mut DbConn) -> Result<bool> {
    if schema_exists(conn)? {
        log::debug!("Database schema already present");
        return Ok(false);
    }

    reset_database(conn)?;
    Ok(true)
}

fn schema_exists(conn: &mut DbConn) -> Result<bool> {
    let sql = "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

    let count: i64 = conn
        .query_row(sql, params!["players"], |row| row.get(0))
        .map_err(StoreError::from)
        .context("Failed to inspect database schema")?;

    Ok(count > 0)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};

    #[test]
    fn test_split_skips_blank_statements() {
        let statements = split_sql_statements("CREATE TABLE a (x);\n\n;CREATE TABLE b (y);  ");
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }

    #[test]
    fn test_ensure_schema_only_creates_once() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        assert!(ensure_schema(&mut conn).unwrap());
        assert!(!ensure_schema(&mut conn).unwrap());
    }
}
