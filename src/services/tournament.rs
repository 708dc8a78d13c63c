use anyhow::Result;
use log::{debug, info};

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, DbPool, Match, PairingRow, Player, PlayerId, StandingRow};
use crate::domain::{self, StandingsOrder};

/// Operations on a single tournament's registry and match ledger.
///
/// Each call takes one connection from the injected pool for its
/// duration; the connection goes back to the pool on every exit path.
pub struct TournamentService {
    pool: DbPool,
}

impl TournamentService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.database)?;
        Ok(Self::new(pool))
    }

    fn connection(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }

    /// Create the schema if the database is empty.
    pub fn initialize(&self) -> Result<()> {
        let mut conn = self.connection()?;
        if database::setup::ensure_schema(&mut conn)? {
            info!("Created tournament schema");
        }
        Ok(())
    }

    /// Drop and recreate every table.
    pub fn reset(&self) -> Result<()> {
        let mut conn = self.connection()?;
        database::setup::reset_database(&mut conn)
    }

    pub fn delete_matches(&self) -> Result<usize> {
        let mut conn = self.connection()?;
        let removed = database::matches::delete_all_matches(&mut conn)?;
        info!("Deleted {} matches", removed);
        Ok(removed)
    }

    pub fn delete_players(&self) -> Result<usize> {
        let mut conn = self.connection()?;
        let removed = database::players::delete_all_players(&mut conn)?;
        info!("Deleted {} players", removed);
        Ok(removed)
    }

    pub fn count_players(&self) -> Result<i64> {
        let mut conn = self.connection()?;
        database::players::count_players(&mut conn)
    }

    pub fn register_player(&self, name: &str) -> Result<Player> {
        let mut conn = self.connection()?;
        let player = database::players::insert_player(&mut conn, name)?;
        info!("Registered player {} with id {}", player.name, player.id);
        Ok(player)
    }

    pub fn players(&self) -> Result<Vec<Player>> {
        let mut conn = self.connection()?;
        database::players::list_all(&mut conn)
    }

    pub fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        let mut conn = self.connection()?;
        database::players::find_by_id(&mut conn, id)
    }

    /// Every recorded match in reporting order, winner as player one.
    pub fn matches(&self) -> Result<Vec<Match>> {
        let mut conn = self.connection()?;
        database::matches::list_all(&mut conn)
    }

    pub fn standings(&self, order: StandingsOrder) -> Result<Vec<StandingRow>> {
        let mut conn = self.connection()?;
        let mut rows = database::standings::load(&mut conn)?;
        domain::standings::order(&mut rows, order);
        debug!("Loaded {} standings ordered by {}", rows.len(), order);
        Ok(rows)
    }

    /// Record that `winner_id` beat `loser_id`.
    pub fn report_match(&self, winner_id: PlayerId, loser_id: PlayerId) -> Result<Match> {
        let mut conn = self.connection()?;
        let played = database::matches::record_match(&mut conn, winner_id, loser_id)?;
        info!(
            "Recorded match {}: {} beat {}",
            played.id, winner_id, loser_id
        );
        Ok(played)
    }

    /// Pairings for the next round, by adjacent rank on wins.
    pub fn swiss_pairings(&self) -> Result<Vec<PairingRow>> {
        let ranked = self.standings(StandingsOrder::Wins)?;
        let pairings = domain::pair_adjacent(&ranked);
        debug!(
            "Paired {} of {} players",
            pairings.len() * 2,
            ranked.len()
        );
        Ok(pairings)
    }
}
