use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::database::{Match, PairingRow, Player, StandingRow};
use crate::domain::StandingsOrder;

pub fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize output")
}

pub fn render_standings(
    rows: &[StandingRow],
    order: StandingsOrder,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return render_json(rows);
    }

    let mut out = format!("Standings by {}\n", order.as_str());
    out += &header(&format!("{:>5}  {:<30} {:>5} {:>7}", "ID", "NAME", "WINS", "MATCHES"));
    for row in rows {
        out.push_str(&format!(
            "\n{:>5}  {:<30} {:>5} {:>7}",
            row.id, row.name, row.wins, row.matches
        ));
    }
    Ok(out)
}

pub fn render_pairings(pairings: &[PairingRow], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return render_json(pairings);
    }

    let mut out = header(&format!("{:>5}  {:<25} {:>5}  {:<25}", "ID1", "NAME1", "ID2", "NAME2"));
    for pair in pairings {
        out.push_str(&format!(
            "\n{:>5}  {:<25} {:>5}  {:<25}",
            pair.id1, pair.name1, pair.id2, pair.name2
        ));
    }
    Ok(out)
}

pub fn render_players(players: &[Player], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return render_json(players);
    }

    let mut out = header(&format!("{:>5}  {:<30} {}", "ID", "NAME", "REGISTERED"));
    for player in players {
        out.push_str(&format!(
            "\n{:>5}  {:<30} {}",
            player.id, player.name, player.registered_at
        ));
    }
    Ok(out)
}

pub fn render_matches(matches: &[Match], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return render_json(matches);
    }

    let mut out = header(&format!("{:>5}  {:>7} {:>7}  {}", "ID", "WINNER", "LOSER", "PLAYED"));
    for played in matches {
        out.push_str(&format!(
            "\n{:>5}  {:>7} {:>7}  {}",
            played.id, played.player_one_id, played.player_two_id, played.played_at
        ));
    }
    Ok(out)
}

pub fn render_player(player: &Player, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(player),
        OutputFormat::Table => Ok(format!("Registered {} with id {}", player.name, player.id)),
    }
}

pub fn render_match(played: &Match, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(played),
        OutputFormat::Table => Ok(format!(
            "Recorded match {}: {} beat {}",
            played.id, played.player_one_id, played.player_two_id
        )),
    }
}

fn header(line: &str) -> String {
    line.bold().to_string()
}
