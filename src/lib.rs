pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod output;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, OutputFormat};
use crate::config::settings::AppConfig;
use crate::database::PlayerId;
use crate::domain::StandingsOrder;
use crate::services::TournamentService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn build_config(cli: &Cli) -> AppConfig {
    AppConfig::from_env().with_database_path(cli.database.as_deref())
}

pub fn handle_command(cli: &Cli) -> Result<()> {
    match cli.command {
        Command::Completions { shell } => handle_completions(shell),
        _ => handle_tournament_command(cli),
    }
}

fn handle_tournament_command(cli: &Cli) -> Result<()> {
    let config = build_config(cli);
    let service = TournamentService::from_config(&config)?;
    let format = cli.format;
    service.initialize()?;

    match &cli.command {
        Command::Init => Ok(()),
        Command::Reset => service.reset(),
        Command::Register { name } => handle_register(&service, name, format),
        Command::Count => handle_count(&service, format),
        Command::Players => handle_players(&service, format),
        Command::Player { id } => handle_player(&service, *id, format),
        Command::Standings { order } => handle_standings(&service, *order, format),
        Command::Matches => handle_matches(&service, format),
        Command::Report { winner, loser } => handle_report(&service, *winner, *loser, format),
        Command::Pairings => handle_pairings(&service, format),
        Command::DeleteMatches => service.delete_matches().map(|_| ()),
        Command::DeletePlayers => service.delete_players().map(|_| ()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

pub fn handle_register(service: &TournamentService, name: &str, format: OutputFormat) -> Result<()> {
    let player = service.register_player(name)?;
    println!("{}", output::render_player(&player, format)?);
    Ok(())
}

pub fn handle_count(service: &TournamentService, format: OutputFormat) -> Result<()> {
    let count = service.count_players()?;
    match format {
        OutputFormat::Json => println!("{}", output::render_json(&count)?),
        OutputFormat::Table => println!("{count}"),
    }
    Ok(())
}

pub fn handle_players(service: &TournamentService, format: OutputFormat) -> Result<()> {
    let players = service.players()?;
    println!("{}", output::render_players(&players, format)?);
    Ok(())
}

pub fn handle_player(service: &TournamentService, id: PlayerId, format: OutputFormat) -> Result<()> {
    let player = service
        .player(id)?
        .ok_or_else(|| anyhow::anyhow!("No player with id {id}"))?;
    println!("{}", output::render_players(std::slice::from_ref(&player), format)?);
    Ok(())
}

pub fn handle_standings(
    service: &TournamentService,
    order: StandingsOrder,
    format: OutputFormat,
) -> Result<()> {
    let rows = service.standings(order)?;
    println!("{}", output::render_standings(&rows, order, format)?);
    Ok(())
}

pub fn handle_matches(service: &TournamentService, format: OutputFormat) -> Result<()> {
    let matches = service.matches()?;
    println!("{}", output::render_matches(&matches, format)?);
    Ok(())
}

pub fn handle_report(
    service: &TournamentService,
    winner: PlayerId,
    loser: PlayerId,
    format: OutputFormat,
) -> Result<()> {
    let played = service.report_match(winner, loser)?;
    println!("{}", output::render_match(&played, format)?);
    Ok(())
}

pub fn handle_pairings(service: &TournamentService, format: OutputFormat) -> Result<()> {
    let pairings = service.swiss_pairings()?;
    println!("{}", output::render_pairings(&pairings, format)?);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
