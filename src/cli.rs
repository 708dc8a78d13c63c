use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::database::PlayerId;
use crate::domain::StandingsOrder;

#[derive(Parser, Debug)]
#[command(author, version, about = "Swiss-system tournament manager")]
pub struct Cli {
    /// SQLite database file (defaults to $DATABASE_PATH, then tournament.db)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Create the tournament tables if they do not exist (every command does this first)
    Init,
    /// Drop and recreate all tournament tables
    Reset,
    /// Register a new player
    Register {
        /// Player's full name (need not be unique)
        name: String,
    },
    /// Print the number of registered players
    Count,
    /// List registered players in registration order
    Players,
    /// Show one registered player
    Player {
        /// Player id
        id: PlayerId,
    },
    /// Show current standings
    Standings {
        /// Row order: "wins" (most wins first) or "name"
        #[arg(long, default_value = "wins")]
        order: StandingsOrder,
    },
    /// List recorded matches in reporting order
    Matches,
    /// Record the outcome of a match
    Report {
        /// Id of the player who won
        winner: PlayerId,
        /// Id of the player who lost
        loser: PlayerId,
    },
    /// Show pairings for the next round
    Pairings,
    /// Remove all match records
    DeleteMatches,
    /// Remove all player records
    DeletePlayers,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
