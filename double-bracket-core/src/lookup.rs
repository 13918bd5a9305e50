use std::collections::BTreeMap;

use crate::utils::NumExt;
use crate::{Bracket, Match};

type Rounds<'a> = BTreeMap<u32, BTreeMap<u32, &'a Match>>;

/// An index of the matches of a tournament by bracket, round and position within the round.
///
/// The lookup borrows the matches it was built from and is meant to be rebuilt whenever the
/// matches change. If two matches share the same bracket, round and position the one that comes
/// last wins.
#[derive(Clone, Debug, Default)]
pub struct BracketLookup<'a> {
    upper: Rounds<'a>,
    lower: Rounds<'a>,
}

impl<'a> BracketLookup<'a> {
    /// Creates a new `BracketLookup` from `matches`.
    pub fn new<I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let mut this = Self::default();

        for m in matches {
            this.rounds_mut(m.bracket())
                .entry(m.round)
                .or_default()
                .insert(m.round_match_index, m);
        }

        log::debug!(
            "Built bracket lookup with {} upper and {} lower rounds",
            this.upper.len(),
            this.lower.len()
        );

        this
    }

    fn rounds(&self, bracket: Bracket) -> &Rounds<'a> {
        match bracket {
            Bracket::Upper => &self.upper,
            Bracket::Lower => &self.lower,
        }
    }

    fn rounds_mut(&mut self, bracket: Bracket) -> &mut Rounds<'a> {
        match bracket {
            Bracket::Upper => &mut self.upper,
            Bracket::Lower => &mut self.lower,
        }
    }

    /// Returns the match at the 1-based `index` of `round` in `bracket`.
    #[inline]
    pub fn get(&self, bracket: Bracket, round: u32, index: u32) -> Option<&'a Match> {
        self.rounds(bracket)
            .get(&round)
            .and_then(|matches| matches.get(&index))
            .copied()
    }

    /// Returns the number of matches in `round` of `bracket`.
    #[inline]
    pub fn round_len(&self, bracket: Bracket, round: u32) -> usize {
        self.rounds(bracket).get(&round).map_or(0, BTreeMap::len)
    }

    /// Returns the highest round number in `bracket`, `None` if the bracket has no matches.
    #[inline]
    pub fn last_round(&self, bracket: Bracket) -> Option<u32> {
        self.rounds(bracket).keys().next_back().copied()
    }

    /// Returns the match the winner of `m` advances to.
    ///
    /// The winner of the last lower bracket round advances to the single match in the last upper
    /// bracket round, which is the final. The final itself has no next match.
    pub fn next_match(&self, m: &Match) -> Option<&'a Match> {
        match m.bracket() {
            Bracket::Upper => self.get(
                Bracket::Upper,
                m.round + 1,
                m.round_match_index.half_ceil(),
            ),
            Bracket::Lower => {
                let index = if m.round % 2 == 0 {
                    m.round_match_index.half_ceil()
                } else {
                    m.round_match_index
                };

                self.get(Bracket::Lower, m.round + 1, index).or_else(|| {
                    let round = self.last_round(Bracket::Upper)?;
                    self.get(Bracket::Upper, round, 1)
                })
            }
        }
    }

    /// Returns the lower bracket match the loser of `m` drops to.
    ///
    /// Only upper bracket matches other than the final have a loser match. Losers of the first
    /// round fill the first lower round in pairs. Losers of every later upper round enter an even
    /// lower round: in reverse order when coming from an even upper round, in order otherwise.
    pub fn next_loser_match(&self, m: &Match) -> Option<&'a Match> {
        if !m.is_upper_bracket || m.match_number.is_final() {
            return None;
        }

        let round = (2 * m.round.saturating_sub(1)).max(1);

        let index = match m.round {
            1 => m.round_match_index.half_ceil(),
            r if r % 2 == 0 => {
                let len = self.round_len(Bracket::Lower, round) as u32;
                (len + 1).checked_sub(m.round_match_index)?
            }
            _ => m.round_match_index,
        };

        self.get(Bracket::Lower, round, index)
    }

    /// Returns both the winner and loser match of `m`.
    #[inline]
    pub fn next_matches(&self, m: &Match) -> NextMatches<'a> {
        NextMatches {
            winner: self.next_match(m),
            loser: self.next_loser_match(m),
        }
    }
}

/// The matches the winner and loser of a match advance to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NextMatches<'a> {
    pub winner: Option<&'a Match>,
    pub loser: Option<&'a Match>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{build_bracket, Match, MatchId, Pairing, PlayerId};

    /// Builds a bracket for `k` first round matches and assigns every match its label as id.
    pub fn bracket(k: usize) -> Vec<Match> {
        let pairings: Vec<Pairing> = (0..k)
            .map(|i| {
                (
                    PlayerId::new(format!("p{}", i * 2 + 1)),
                    Some(PlayerId::new(format!("p{}", i * 2 + 2))),
                )
            })
            .collect();

        build_bracket(&pairings)
            .into_iter()
            .map(|d| {
                let id = MatchId::new(d.match_number.to_string());
                d.into_match(id)
            })
            .collect()
    }

    fn find<'a>(matches: &'a [Match], id: &str) -> &'a Match {
        matches.iter().find(|m| m.id == id).unwrap()
    }

    fn links(lookup: &BracketLookup<'_>, m: &Match) -> (Option<String>, Option<String>) {
        let next = lookup.next_matches(m);
        (
            next.winner.map(|m| m.id.to_string()),
            next.loser.map(|m| m.id.to_string()),
        )
    }

    fn link(winner: Option<&str>, loser: Option<&str>) -> (Option<String>, Option<String>) {
        (winner.map(str::to_owned), loser.map(str::to_owned))
    }

    #[test]
    fn test_lookup_get() {
        let matches = bracket(4);
        let lookup = BracketLookup::new(&matches);

        assert_eq!(lookup.get(Bracket::Upper, 2, 2).unwrap().id, "UB 2.2");
        assert_eq!(lookup.get(Bracket::Lower, 4, 1).unwrap().id, "LB 4.1");
        assert_eq!(lookup.get(Bracket::Upper, 4, 1).unwrap().id, "Final");
        assert!(lookup.get(Bracket::Lower, 5, 1).is_none());
        assert!(lookup.get(Bracket::Upper, 1, 5).is_none());

        assert_eq!(lookup.round_len(Bracket::Upper, 1), 4);
        assert_eq!(lookup.round_len(Bracket::Lower, 2), 2);
        assert_eq!(lookup.round_len(Bracket::Lower, 9), 0);
        assert_eq!(lookup.last_round(Bracket::Upper), Some(4));
        assert_eq!(lookup.last_round(Bracket::Lower), Some(4));
    }

    #[test]
    fn test_lookup_last_write_wins() {
        let mut matches = bracket(2);
        let mut duplicate = matches[0].clone();
        duplicate.id = MatchId::new("duplicate");
        matches.push(duplicate);

        let lookup = BracketLookup::new(&matches);
        assert_eq!(lookup.get(Bracket::Upper, 1, 1).unwrap().id, "duplicate");
    }

    #[test]
    fn test_lookup_empty() {
        let matches: Vec<Match> = Vec::new();
        let lookup = BracketLookup::new(&matches);
        assert_eq!(lookup.last_round(Bracket::Upper), None);
        assert!(lookup.get(Bracket::Upper, 1, 1).is_none());

        let matches = bracket(1);
        let lookup = BracketLookup::new(&matches);
        assert_eq!(lookup.last_round(Bracket::Lower), None);
    }

    #[test]
    fn test_next_matches_two_players() {
        let matches = bracket(1);
        let lookup = BracketLookup::new(&matches);

        assert_eq!(
            links(&lookup, find(&matches, "UB 1.1")),
            link(Some("Final"), None)
        );
        assert_eq!(links(&lookup, find(&matches, "Final")), link(None, None));
    }

    #[test]
    fn test_next_matches_four_players() {
        let matches = bracket(2);
        let lookup = BracketLookup::new(&matches);

        let expected = [
            ("UB 1.1", Some("UB 2.1"), Some("LB 1.1")),
            ("UB 1.2", Some("UB 2.1"), Some("LB 1.1")),
            ("UB 2.1", Some("Final"), Some("LB 2.1")),
            ("LB 1.1", Some("LB 2.1"), None),
            ("LB 2.1", Some("Final"), None),
            ("Final", None, None),
        ];

        for (id, winner, loser) in expected {
            assert_eq!(
                links(&lookup, find(&matches, id)),
                link(winner, loser),
                "{}",
                id
            );
        }
    }

    #[test]
    fn test_next_matches_eight_players() {
        let matches = bracket(4);
        let lookup = BracketLookup::new(&matches);

        let expected = [
            ("UB 1.1", Some("UB 2.1"), Some("LB 1.1")),
            ("UB 1.2", Some("UB 2.1"), Some("LB 1.1")),
            ("UB 1.3", Some("UB 2.2"), Some("LB 1.2")),
            ("UB 1.4", Some("UB 2.2"), Some("LB 1.2")),
            ("UB 2.1", Some("UB 3.1"), Some("LB 2.2")),
            ("UB 2.2", Some("UB 3.1"), Some("LB 2.1")),
            ("UB 3.1", Some("Final"), Some("LB 4.1")),
            ("LB 1.1", Some("LB 2.1"), None),
            ("LB 1.2", Some("LB 2.2"), None),
            ("LB 2.1", Some("LB 3.1"), None),
            ("LB 2.2", Some("LB 3.1"), None),
            ("LB 3.1", Some("LB 4.1"), None),
            ("LB 4.1", Some("Final"), None),
            ("Final", None, None),
        ];

        for (id, winner, loser) in expected {
            assert_eq!(
                links(&lookup, find(&matches, id)),
                link(winner, loser),
                "{}",
                id
            );
        }
    }

    #[test]
    fn test_next_matches_sixteen_players() {
        let matches = bracket(8);
        let lookup = BracketLookup::new(&matches);

        // Losers of the third upper round keep their order.
        assert_eq!(
            links(&lookup, find(&matches, "UB 3.1")),
            link(Some("UB 4.1"), Some("LB 4.1"))
        );
        assert_eq!(
            links(&lookup, find(&matches, "UB 3.2")),
            link(Some("UB 4.1"), Some("LB 4.2"))
        );
        // Losers of the second upper round enter in reverse order.
        assert_eq!(
            links(&lookup, find(&matches, "UB 2.1")),
            link(Some("UB 3.1"), Some("LB 2.4"))
        );
        assert_eq!(
            links(&lookup, find(&matches, "UB 2.4")),
            link(Some("UB 3.2"), Some("LB 2.1"))
        );
        assert_eq!(
            links(&lookup, find(&matches, "UB 4.1")),
            link(Some("Final"), Some("LB 6.1"))
        );
        assert_eq!(
            links(&lookup, find(&matches, "LB 5.1")),
            link(Some("LB 6.1"), None)
        );
        assert_eq!(
            links(&lookup, find(&matches, "LB 6.1")),
            link(Some("Final"), None)
        );
    }

    /// Every non-final upper match follows the winner-advance and loser-drop rules.
    #[test]
    fn test_next_matches_properties() {
        for k in [1, 2, 4, 8, 16, 32] {
            let matches = bracket(k);
            let lookup = BracketLookup::new(&matches);

            for m in matches
                .iter()
                .filter(|m| m.is_upper_bracket && !m.match_number.is_final())
            {
                let winner = lookup.next_match(m).unwrap();
                assert_eq!(winner.round, m.round + 1);
                assert_eq!(winner.round_match_index, (m.round_match_index + 1) / 2);

                if k == 1 {
                    assert!(lookup.next_loser_match(m).is_none());
                    continue;
                }

                let loser = lookup.next_loser_match(m).unwrap();
                assert!(!loser.is_upper_bracket);
                assert_eq!(loser.round, std::cmp::max(1, 2 * (m.round - 1)));
            }

            // Every lower match except the last one feeds a lower match.
            let last_lower = lookup.last_round(Bracket::Lower);
            for m in matches.iter().filter(|m| !m.is_upper_bracket) {
                let next = lookup.next_match(m).unwrap();
                if Some(m.round) == last_lower {
                    assert!(next.match_number.is_final());
                } else {
                    assert_eq!(next.round, m.round + 1);
                    assert!(!next.is_upper_bracket);
                }
            }
        }
    }
}
