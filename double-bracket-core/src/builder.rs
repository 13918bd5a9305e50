use crate::utils::NumExt;
use crate::{Bracket, Match, MatchId, MatchNumber, Pairing, PlayerId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The skeleton of a match proposed by [`build_bracket`]. It becomes a [`Match`] once the
/// record store assigned it an id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchDescriptor {
    pub match_number: MatchNumber,
    pub is_upper_bracket: bool,
    pub round: u32,
    pub round_match_index: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub player1: Option<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub player2: Option<PlayerId>,
}

impl MatchDescriptor {
    fn empty(bracket: Bracket, round: u32, index: u32) -> Self {
        Self {
            match_number: MatchNumber::new(bracket, round, index),
            is_upper_bracket: bracket.is_upper(),
            round,
            round_match_index: index,
            player1: None,
            player2: None,
        }
    }

    /// Converts the descriptor into an undecided [`Match`] record with the given `id`.
    pub fn into_match(self, id: MatchId) -> Match {
        Match {
            id,
            match_number: self.match_number,
            is_upper_bracket: self.is_upper_bracket,
            round: self.round,
            round_match_index: self.round_match_index,
            player1: self.player1,
            player2: self.player2,
            result_set1: None,
            result_set2: None,
            result_set3: None,
            winner: None,
        }
    }
}

/// The dimensions of a double elimination bracket with a given number of first round matches.
///
/// All values assume that `first_round_matches * 2` is a power of two.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BracketSize {
    first_round_matches: u32,
}

impl BracketSize {
    #[inline]
    pub fn new(first_round_matches: u32) -> Self {
        Self {
            first_round_matches,
        }
    }

    /// Returns the number of first round matches in the upper bracket.
    #[inline]
    pub fn first_round_matches(&self) -> u32 {
        self.first_round_matches
    }

    /// Returns the assumed number of players, including byes.
    #[inline]
    pub fn players(&self) -> u32 {
        self.first_round_matches * 2
    }

    /// Returns the number of rounds in the upper bracket, excluding the final.
    #[inline]
    pub fn upper_rounds(&self) -> u32 {
        self.players().ilog2_floor()
    }

    /// Returns the number of rounds in the lower bracket.
    #[inline]
    pub fn lower_rounds(&self) -> u32 {
        (2 * self.upper_rounds()).saturating_sub(2)
    }

    /// Returns the number of matches in the upper bracket, excluding the final.
    #[inline]
    pub fn upper_matches(&self) -> u32 {
        self.players().saturating_sub(1)
    }

    #[inline]
    pub fn lower_matches(&self) -> u32 {
        self.players().saturating_sub(2)
    }

    /// Returns the number of matches in the complete bracket, including the final.
    #[inline]
    pub fn total_matches(&self) -> u32 {
        match self.first_round_matches {
            0 => 0,
            _ => self.upper_matches() + self.lower_matches() + 1,
        }
    }

    /// Returns the round of the final match.
    #[inline]
    pub fn final_round(&self) -> u32 {
        self.upper_rounds() + 1
    }

    /// Returns the number of matches in the upper bracket `round`.
    #[inline]
    pub fn upper_round_capacity(&self, round: u32) -> u32 {
        1_u32 << self.upper_rounds().saturating_sub(round)
    }

    /// Returns the number of matches in the lower bracket `round`. Two consecutive lower rounds
    /// always share the same number of matches.
    #[inline]
    pub fn lower_round_capacity(&self, round: u32) -> u32 {
        1_u32 << (self.lower_rounds() / 2).saturating_sub(round.half_ceil())
    }
}

/// Builds the complete list of matches for a double elimination bracket from the first round
/// `pairings`.
///
/// The matches are returned in a fixed order: the first round of the upper bracket in pairing
/// order, the remaining upper bracket rounds, all lower bracket rounds and the final. Only first
/// round matches have players assigned.
///
/// The length of `pairings` must be a power of two, the caller is responsible for padding the
/// players with byes (see [`pair_players`]).
///
/// [`pair_players`]: crate::pair_players
pub fn build_bracket(pairings: &[Pairing]) -> Vec<MatchDescriptor> {
    if pairings.is_empty() {
        return Vec::new();
    }

    let size = BracketSize::new(pairings.len() as u32);

    log::debug!(
        "Building a new double elimination bracket for {} players ({} upper rounds, {} lower rounds)",
        size.players(),
        size.upper_rounds(),
        size.lower_rounds(),
    );

    let mut matches = Vec::with_capacity(size.total_matches() as usize);

    for (index, (player1, player2)) in pairings.iter().enumerate() {
        let mut descriptor = MatchDescriptor::empty(Bracket::Upper, 1, index as u32 + 1);
        descriptor.player1 = Some(player1.clone());
        descriptor.player2 = player2.clone();

        matches.push(descriptor);
    }

    // Remaining upper bracket rounds.
    let mut round = 2;
    let mut index = 1;
    for _ in size.first_round_matches()..size.upper_matches() {
        matches.push(MatchDescriptor::empty(Bracket::Upper, round, index));

        index += 1;
        if index > size.upper_round_capacity(round) {
            round += 1;
            index = 1;
        }
    }

    let mut round = 1;
    let mut index = 1;
    for _ in 0..size.lower_matches() {
        matches.push(MatchDescriptor::empty(Bracket::Lower, round, index));

        index += 1;
        if index > size.lower_round_capacity(round) {
            round += 1;
            index = 1;
        }
    }

    matches.push(MatchDescriptor {
        match_number: MatchNumber::Final,
        is_upper_bracket: true,
        round: size.final_round(),
        round_match_index: 1,
        player1: None,
        player2: None,
    });

    log::debug!("Built bracket with {} matches", matches.len());

    matches
}
