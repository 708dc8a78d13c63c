use std::fmt;
use std::str::FromStr;

use crate::database::models::StandingRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandingsOrder {
    /// Most wins first. Equal win counts keep the incoming order.
    #[default]
    Wins,
    /// Alphabetical by name, ties broken by player id.
    Name,
}

impl StandingsOrder {
    pub fn as_str(&self) -> &str {
        match self {
            StandingsOrder::Wins => "wins",
            StandingsOrder::Name => "name",
        }
    }
}

impl fmt::Display for StandingsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandingsOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(StandingsOrder::Wins),
            "name" => Ok(StandingsOrder::Name),
            other => Err(format!("unknown standings order: {other}")),
        }
    }
}

/// Sort standings in place.
///
/// Both orderings are stable. Rows loaded from the store arrive in
/// registration order, so players tied on wins stay in the order they
/// registered; no opponent-strength or rating tie-break is applied.
pub fn order(rows: &mut [StandingRow], by: StandingsOrder) {
    match by {
        StandingsOrder::Wins => rows.sort_by(|a, b| b.wins.cmp(&a.wins)),
        StandingsOrder::Name => rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, wins: i64, matches: i64) -> StandingRow {
        StandingRow {
            id,
            name: name.to_string(),
            wins,
            matches,
        }
    }

    fn ids(rows: &[StandingRow]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_wins_descending() {
        let mut rows = vec![row(1, "Ann", 0, 2), row(2, "Bob", 2, 2), row(3, "Cid", 1, 2)];
        order(&mut rows, StandingsOrder::Wins);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_wins_ties_keep_registration_order() {
        let mut rows = vec![
            row(1, "Zed", 1, 1),
            row(2, "Amy", 0, 1),
            row(3, "Max", 1, 1),
            row(4, "Bea", 0, 1),
        ];
        order(&mut rows, StandingsOrder::Wins);
        assert_eq!(ids(&rows), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_name_order_breaks_ties_by_id() {
        let mut rows = vec![row(3, "Bob", 0, 0), row(1, "Bob", 2, 2), row(2, "Al", 1, 1)];
        order(&mut rows, StandingsOrder::Name);
        assert_eq!(ids(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_parse_order() {
        assert_eq!("wins".parse::<StandingsOrder>(), Ok(StandingsOrder::Wins));
        assert_eq!("name".parse::<StandingsOrder>(), Ok(StandingsOrder::Name));
        assert!("rating".parse::<StandingsOrder>().is_err());
    }
}
