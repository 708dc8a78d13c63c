use anyhow::{Context, Result};

use super::connection::DbConn;
use super::models::StandingRow;
use crate::errors::StoreError;

/// Aggregate wins and matches played for every registered player.
///
/// Rows come back in registration order; players without matches are
/// included with zero counts. Each count is its own sub-select so a
/// player's wins are never multiplied by their match rows.
pub fn load(conn: &mut DbConn) -> Result<Vec<StandingRow>> {
    let sql = "
        SELECT
            p.id,
            p.name,
            (SELECT count(*) FROM match_results r WHERE r.winner_id = p.id) AS wins,
            (SELECT count(*) FROM matches m WHERE m.player_one_id = p.id OR m.player_two_id = p.id) AS matches
        FROM players p
        ORDER BY p.id
    ";

    let mut stmt = conn.prepare(sql).map_err(StoreError::from)?;
    let rows = stmt
        .query_map([], parse_standing_row)
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(StoreError::from)
        .context("Failed to load standings")?;

    Ok(rows)
}

fn parse_standing_row(row: &rusqlite::Row) -> rusqlite::Result<StandingRow> {
    Ok(StandingRow {
        id: row.get(0)?,
        name: row.get(1)?,
        wins: row.get(2)?,
        matches: row.get(3)?,
    })
}
