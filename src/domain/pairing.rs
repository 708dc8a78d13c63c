use log::debug;

use crate::database::models::{PairingRow, StandingRow};

/// Pair adjacent entries of an already ranked standings list.
///
/// Entries are grouped (0, 1), (2, 3), ... in the given order. With an odd
/// number of entries the last one is left out; it is not given a bye.
pub fn pair_adjacent(ranked: &[StandingRow]) -> Vec<PairingRow> {
    let chunks = ranked.chunks_exact(2);

    if let [unpaired] = chunks.remainder() {
        debug!(
            "Odd player count, {} (id {}) is not paired this round",
            unpaired.name, unpaired.id
        );
    }

    chunks.map(|pair| to_pairing(&pair[0], &pair[1])).collect()
}

fn to_pairing(first: &StandingRow, second: &StandingRow) -> PairingRow {
    PairingRow {
        id1: first.id,
        name1: first.name.clone(),
        id2: second.id,
        name2: second.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn players(n: i64) -> Vec<StandingRow> {
        (1..=n)
            .map(|id| StandingRow {
                id,
                name: format!("Player {id}"),
                wins: 0,
                matches: 0,
            })
            .collect()
    }

    #[test]
    fn test_empty_standings() {
        assert!(pair_adjacent(&[]).is_empty());
    }

    #[test]
    fn test_single_player_is_not_paired() {
        assert!(pair_adjacent(&players(1)).is_empty());
    }

    #[test]
    fn test_pairs_follow_given_order() {
        let pairs = pair_adjacent(&players(4));

        assert_eq!(
            pairs,
            vec![
                PairingRow {
                    id1: 1,
                    name1: "Player 1".to_string(),
                    id2: 2,
                    name2: "Player 2".to_string(),
                },
                PairingRow {
                    id1: 3,
                    name1: "Player 3".to_string(),
                    id2: 4,
                    name2: "Player 4".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_odd_count_drops_last() {
        let pairs = pair_adjacent(&players(5));

        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.id1 != 5 && p.id2 != 5));
    }

    #[test]
    fn test_each_player_paired_at_most_once() {
        for n in 0..12 {
            let pairs = pair_adjacent(&players(n));
            assert_eq!(pairs.len() as i64, n / 2);

            let mut seen = HashSet::new();
            for pair in &pairs {
                assert_ne!(pair.id1, pair.id2);
                assert!(seen.insert(pair.id1));
                assert!(seen.insert(pair.id2));
            }
        }
    }
}
