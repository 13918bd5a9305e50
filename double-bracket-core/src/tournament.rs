use crate::{Error, Match, MatchId, Player, PlayerId, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tournament record. It only holds the ids of its players and matches, the records
/// themselves are stored separately.
///
/// The order of `matches` is the source of truth for which matches belong to the tournament.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tournament {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub players: Vec<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub matches: Vec<MatchId>,
}

impl Tournament {
    #[inline]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            players: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Returns `true` if the match with `id` belongs to the tournament.
    #[inline]
    pub fn contains_match(&self, id: &MatchId) -> bool {
        self.matches.contains(id)
    }

    /// Picks the match records of this tournament out of `records`, in tournament order.
    /// Records not belonging to the tournament are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMatch`] if the tournament lists a match that is missing from
    /// `records`.
    pub fn resolve_matches<'a>(&self, records: &'a [Match]) -> Result<Vec<&'a Match>> {
        self.matches
            .iter()
            .map(|id| {
                records
                    .iter()
                    .find(|m| m.id == *id)
                    .ok_or_else(|| Error::UnknownMatch { id: id.clone() })
            })
            .collect()
    }

    /// Picks the player records of this tournament out of `records`, in tournament order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPlayer`] if the tournament lists a player that is missing from
    /// `records`.
    pub fn resolve_players<'a>(&self, records: &'a [Player]) -> Result<Vec<&'a Player>> {
        self.players
            .iter()
            .map(|id| {
                records
                    .iter()
                    .find(|p| p.id == *id)
                    .ok_or_else(|| Error::UnknownPlayer { id: id.clone() })
            })
            .collect()
    }
}
