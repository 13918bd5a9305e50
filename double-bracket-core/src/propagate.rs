use crate::{Bracket, BracketLookup, Match, MatchId, PlayerId, Slot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A write the record store has to make after a match was decided: put `player` into `slot` of
/// the match with `match_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SlotUpdate {
    pub match_id: MatchId,
    pub slot: Slot,
    pub player: PlayerId,
}

impl SlotUpdate {
    /// Applies the update to `m`. Returns `false` without changing anything if `m` is not the
    /// target of this update.
    pub fn apply(&self, m: &mut Match) -> bool {
        if m.id != self.match_id {
            return false;
        }

        *m.player_mut(self.slot) = Some(self.player.clone());
        true
    }
}

/// Computes where the winner and loser of the decided match `m` advance to.
///
/// Returns no updates if `m` is undecided. A side without a player (the loser of a bye) or
/// without a next match produces no update either.
pub fn propagate(m: &Match, lookup: &BracketLookup<'_>) -> Vec<SlotUpdate> {
    let Some(winner) = m.winner_slot() else {
        return Vec::new();
    };

    let next = lookup.next_matches(m);
    let mut updates = Vec::with_capacity(2);

    if let (Some(player), Some(target)) = (m.player(winner), next.winner) {
        updates.push(SlotUpdate {
            match_id: target.id.clone(),
            slot: winner_slot(m, target),
            player: player.clone(),
        });
    }

    if let (Some(player), Some(target)) = (m.player(winner.opponent()), next.loser) {
        updates.push(SlotUpdate {
            match_id: target.id.clone(),
            slot: loser_slot(m),
            player: player.clone(),
        });
    }

    log::debug!(
        "Match {} ({}) propagates {} updates",
        m.id,
        m.match_number,
        updates.len()
    );

    updates
}

fn winner_slot(m: &Match, target: &Match) -> Slot {
    match m.bracket() {
        Bracket::Upper if target.match_number.is_final() => Slot::Player1,
        Bracket::Upper => Slot::from_parity(m.round_match_index),
        // Winner of the lower bracket takes the second spot of the final.
        Bracket::Lower if target.is_upper_bracket => Slot::Player2,
        Bracket::Lower if m.round % 2 == 0 => Slot::from_parity(m.round_match_index),
        // The second spot of even lower rounds is reserved for upper bracket losers.
        Bracket::Lower => Slot::Player1,
    }
}

fn loser_slot(m: &Match) -> Slot {
    match m.round {
        1 => Slot::from_parity(m.round_match_index),
        _ => Slot::Player2,
    }
}
