use crate::{
    BracketLookup, Error, Match, MatchId, Player, PlayerId, Result, Slot, Tournament,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The display state of a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MatchState {
    /// The winner is decided and both players were present.
    Done,
    /// The winner is decided but one player was missing (a bye).
    WalkOver,
    /// The winner is not decided yet.
    NoParty,
}

impl MatchState {
    pub fn of(m: &Match) -> Self {
        match m.winner {
            Some(_) if m.has_both_players() => Self::Done,
            Some(_) => Self::WalkOver,
            None => Self::NoParty,
        }
    }
}

/// A player as shown within a [`VisualMatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
    /// `None` while the match is undecided.
    pub is_winner: Option<bool>,
    /// The number of sets won.
    pub result_text: String,
}

/// A presentation ready projection of a [`Match`]. It is never stored and recomputed on every
/// view.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VisualMatch {
    pub id: MatchId,
    pub name: String,
    pub next_match_id: Option<MatchId>,
    pub next_looser_match_id: Option<MatchId>,
    pub tournament_round_text: String,
    pub state: MatchState,
    pub participants: Vec<Participant>,
}

/// Projects `m` into a [`VisualMatch`] using the `players` records and the `lookup` built from
/// the matches of the same tournament.
///
/// # Errors
///
/// Returns [`Error::UnknownPlayer`] if `m` refers to a player missing from `players`.
pub fn project(m: &Match, players: &[Player], lookup: &BracketLookup<'_>) -> Result<VisualMatch> {
    let next = lookup.next_matches(m);
    let (sets1, sets2) = m.sets_won();

    let mut participants = Vec::with_capacity(2);
    for (slot, sets) in [(Slot::Player1, sets1), (Slot::Player2, sets2)] {
        let Some(id) = m.player(slot) else {
            continue;
        };

        let player = players
            .iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| Error::UnknownPlayer { id: id.clone() })?;

        participants.push(Participant {
            id: player.id.clone(),
            name: player.name.clone(),
            is_winner: m.winner_slot().map(|winner| winner == slot),
            result_text: sets.to_string(),
        });
    }

    Ok(VisualMatch {
        id: m.id.clone(),
        name: m.match_number.to_string(),
        next_match_id: next.winner.map(|m| m.id.clone()),
        next_looser_match_id: next.loser.map(|m| m.id.clone()),
        tournament_round_text: m.round.to_string(),
        state: MatchState::of(m),
        participants,
    })
}

/// The complete bracket of a tournament as handed to the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BracketView {
    /// The upper bracket matches, including the final.
    pub upper: Vec<VisualMatch>,
    pub lower: Vec<VisualMatch>,
}

impl BracketView {
    /// Projects all matches of `tournament`. `matches` and `players` are the records fetched for
    /// the tournament; records not listed in the tournament are ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`enum@Error`] if the tournament lists a match missing from `matches` or if a
    /// match refers to a player missing from `players`.
    pub fn new(tournament: &Tournament, matches: &[Match], players: &[Player]) -> Result<Self> {
        let matches = tournament.resolve_matches(matches)?;
        let lookup = BracketLookup::new(matches.iter().copied());

        let mut this = Self::default();
        for m in matches {
            let visual = project(m, players, &lookup)?;

            if m.is_upper_bracket {
                this.upper.push(visual);
            } else {
                this.lower.push(visual);
            }
        }

        Ok(this)
    }
}
