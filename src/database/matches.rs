use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, Transaction};

use super::connection::DbConn;
use super::models::{Match, MatchId, MatchResult, PlayerId};
use crate::errors::StoreError;

/// Record a played match and its result in one transaction.
///
/// Either both the match and its result rows are written or neither is.
/// Player existence and distinctness are enforced by the store's
/// constraints, not checked here.
pub fn record_match(conn: &mut DbConn, winner_id: PlayerId, loser_id: PlayerId) -> Result<Match> {
    let tx = conn
        .transaction()
        .map_err(StoreError::from)
        .context("Failed to begin match transaction")?;

    let played = insert_match(&tx, winner_id, loser_id)?;
    let result = insert_result(&tx, played.id, winner_id)?;
    debug!("Result {} stored for match {}", result.id, result.match_id);

    tx.commit()
        .map_err(StoreError::from)
        .context("Failed to commit match")?;

    Ok(played)
}

fn insert_match(tx: &Transaction, winner_id: PlayerId, loser_id: PlayerId) -> Result<Match> {
    let sql = "INSERT INTO matches (player_one_id, player_two_id) VALUES (?1, ?2) RETURNING id, player_one_id, player_two_id, played_at";

    tx.query_row(sql, params![winner_id, loser_id], parse_match_row)
        .map_err(StoreError::from)
        .with_context(|| format!("Failed to insert match {winner_id} vs {loser_id}"))
}

fn insert_result(tx: &Transaction, match_id: MatchId, winner_id: PlayerId) -> Result<MatchResult> {
    let sql = "INSERT INTO match_results (match_id, winner_id) VALUES (?1, ?2) RETURNING id, match_id, winner_id";

    tx.query_row(sql, params![match_id, winner_id], parse_result_row)
        .map_err(StoreError::from)
        .with_context(|| format!("Failed to insert result for match {match_id}"))
}

fn parse_result_row(row: &rusqlite::Row) -> rusqlite::Result<MatchResult> {
    Ok(MatchResult {
        id: row.get(0)?,
        match_id: row.get(1)?,
        winner_id: row.get(2)?,
    })
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        player_one_id: row.get(1)?,
        player_two_id: row.get(2)?,
        played_at: row.get(3)?,
    })
}

/// Remove every match together with its result.
pub fn delete_all_matches(conn: &mut DbConn) -> Result<usize> {
    let tx = conn
        .transaction()
        .map_err(StoreError::from)
        .context("Failed to begin delete transaction")?;

    tx.execute("DELETE FROM match_results", [])
        .map_err(StoreError::from)
        .context("Failed to delete match results")?;
    let removed = tx
        .execute("DELETE FROM matches", [])
        .map_err(StoreError::from)
        .context("Failed to delete matches")?;

    tx.commit()
        .map_err(StoreError::from)
        .context("Failed to commit match deletion")?;

    Ok(removed)
}

pub fn count_matches(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT count(*) FROM matches", [], |row| row.get(0))
        .map_err(StoreError::from)
        .context("Failed to count matches")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Match>> {
    let sql = "SELECT id, player_one_id, player_two_id, played_at FROM matches ORDER BY id";

    let mut stmt = conn.prepare(sql).map_err(StoreError::from)?;
    let rows = stmt
        .query_map([], parse_match_row)
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(StoreError::from)
        .context("Failed to list matches")?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};
    use crate::database::{players, setup};

    #[test]
    fn test_result_row_points_at_its_match() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&mut conn).unwrap();
        let winner = players::insert_player(&mut conn, "A").unwrap();
        let loser = players::insert_player(&mut conn, "B").unwrap();

        let tx = conn.transaction().unwrap();
        let played = insert_match(&tx, winner.id, loser.id).unwrap();
        let result = insert_result(&tx, played.id, winner.id).unwrap();
        tx.commit().unwrap();

        assert_eq!(result.match_id, played.id);
        assert_eq!(result.winner_id, winner.id);
    }

    #[test]
    fn test_result_for_the_loser_is_rejected() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&mut conn).unwrap();
        let winner = players::insert_player(&mut conn, "A").unwrap();
        let loser = players::insert_player(&mut conn, "B").unwrap();

        let tx = conn.transaction().unwrap();
        let played = insert_match(&tx, winner.id, loser.id).unwrap();
        let err = insert_result(&tx, played.id, loser.id).unwrap_err();

        assert!(err.downcast_ref::<StoreError>().unwrap().is_constraint_violation());
    }

    #[test]
    fn test_list_all_in_report_order() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&mut conn).unwrap();
        let a = players::insert_player(&mut conn, "A").unwrap();
        let b = players::insert_player(&mut conn, "B").unwrap();

        let first = record_match(&mut conn, a.id, b.id).unwrap();
        let second = record_match(&mut conn, b.id, a.id).unwrap();

        assert_eq!(list_all(&mut conn).unwrap(), vec![first, second]);
        assert_eq!(count_matches(&mut conn).unwrap(), 2);
    }
}
