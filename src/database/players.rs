use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{Player, PlayerId};
use crate::errors::StoreError;

pub fn insert_player(conn: &mut DbConn, name: &str) -> Result<Player> {
    let sql = "INSERT INTO players (name) VALUES (?1) RETURNING id, name, registered_at";

    conn.query_row(sql, params![name], parse_player_row)
        .map_err(StoreError::from)
        .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        registered_at: row.get(2)?,
    })
}

pub fn count_players(conn: &mut DbConn) -> Result<i64> {
    let sql = "SELECT count(*) FROM players";

    conn.query_row(sql, [], |row| row.get(0))
        .map_err(StoreError::from)
        .context("Failed to count players")
}

/// Remove every player. Fails while matches still reference players.
pub fn delete_all_players(conn: &mut DbConn) -> Result<usize> {
    conn.execute("DELETE FROM players", [])
        .map_err(StoreError::from)
        .context("Failed to delete players")
}

pub fn find_by_id(conn: &mut DbConn, id: PlayerId) -> Result<Option<Player>> {
    let sql = "SELECT id, name, registered_at FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .map_err(StoreError::from)
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = "SELECT id, name, registered_at FROM players ORDER BY id";

    let mut stmt = conn.prepare(sql).map_err(StoreError::from)?;
    let rows = stmt
        .query_map([], parse_player_row)
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(StoreError::from)
        .context("Failed to list players")?;

    Ok(rows)
}
