//! # double-bracket-core
//!
//! This crate contains the bracket math of a double elimination tournament. It derives every
//! match of the upper (winners) and lower (losers) bracket from the first round pairings and
//! computes where winners and losers of each match advance to.
//!
//! Everything in here is pure: inputs are fully materialized records, outputs are new values.
//! Storing and rendering the records is left to the caller.
//!
//! Important types and functions:
//! - [`pair_players`]: Reduces a player list to first round [`Pairing`]s padded with byes.
//! - [`build_bracket`]: Builds the [`MatchDescriptor`]s of a complete bracket from the pairings.
//! - [`BracketLookup`]: Indexes persisted [`Match`]es by bracket, round and position.
//! - [`project`] and [`BracketView`]: Compute the presentation ready [`VisualMatch`]es.
//! - [`propagate`]: Computes the [`SlotUpdate`]s after the winner of a match was recorded.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to all record and view types.
//!
mod builder;
mod id;
mod lookup;
mod match_number;
mod propagate;
mod seeding;
pub mod tournament;
mod utils;
mod view;

pub use builder::{build_bracket, BracketSize, MatchDescriptor};
pub use id::{MatchId, PlayerId, TournamentId};
pub use lookup::{BracketLookup, NextMatches};
pub use match_number::{Bracket, MatchNumber};
pub use propagate::{propagate, SlotUpdate};
pub use seeding::{pair_players, SeedingPolicy};
pub use tournament::Tournament;
pub use view::{project, BracketView, MatchState, Participant, VisualMatch};

use thiserror::Error;

use std::result;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A first round pairing. A `None` opponent is a bye.
pub type Pairing = (PlayerId, Option<PlayerId>);

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("not enough players: at least 2 are required, found {found}")]
    NotEnoughPlayers { found: usize },
    #[error("unknown player: match refers to player {id} which was not supplied")]
    UnknownPlayer { id: PlayerId },
    #[error("unknown match: tournament refers to match {id} which was not supplied")]
    UnknownMatch { id: MatchId },
    #[error("invalid match number: {0:?}")]
    InvalidMatchNumber(String),
    #[error("invalid set score: {0:?}")]
    InvalidSetScore(String),
}

/// A player taking part in tournaments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    #[inline]
    pub fn new<I, N>(id: I, name: N) -> Self
    where
        I: Into<PlayerId>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One of the two player spots of a [`Match`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Slot {
    Player1,
    Player2,
}

impl Slot {
    /// Returns the slot fed by the match at the 1-based `index` of the previous round: odd
    /// positions feed `Player1`, even positions feed `Player2`.
    #[inline]
    pub fn from_parity(index: u32) -> Self {
        if index % 2 == 1 {
            Self::Player1
        } else {
            Self::Player2
        }
    }

    /// Returns the slot that won when the `winner` flag of a [`Match`] is `winner`.
    #[inline]
    pub fn from_winner(winner: bool) -> Self {
        if winner {
            Self::Player1
        } else {
            Self::Player2
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }
}

/// A persisted match record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Match {
    pub id: MatchId,
    pub match_number: MatchNumber,
    pub is_upper_bracket: bool,
    pub round: u32,
    pub round_match_index: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub player1: Option<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub player2: Option<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub result_set1: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub result_set2: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub result_set3: Option<String>,
    /// `true` if `player1` won, `false` if `player2` won, `None` while undecided.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub winner: Option<bool>,
}

impl Match {
    #[inline]
    pub fn bracket(&self) -> Bracket {
        if self.is_upper_bracket {
            Bracket::Upper
        } else {
            Bracket::Lower
        }
    }

    /// Returns the player in `slot`.
    #[inline]
    pub fn player(&self, slot: Slot) -> Option<&PlayerId> {
        match slot {
            Slot::Player1 => self.player1.as_ref(),
            Slot::Player2 => self.player2.as_ref(),
        }
    }

    /// Returns a mutable reference to the player in `slot`.
    #[inline]
    pub fn player_mut(&mut self, slot: Slot) -> &mut Option<PlayerId> {
        match slot {
            Slot::Player1 => &mut self.player1,
            Slot::Player2 => &mut self.player2,
        }
    }

    /// Returns `true` if both player slots are filled.
    #[inline]
    pub fn has_both_players(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }

    /// Returns the slot of the winner, `None` if the match is undecided.
    #[inline]
    pub fn winner_slot(&self) -> Option<Slot> {
        self.winner.map(Slot::from_winner)
    }

    /// Returns the raw result set strings in order, skipping missing ones.
    pub fn result_sets(&self) -> impl Iterator<Item = &str> + '_ {
        [&self.result_set1, &self.result_set2, &self.result_set3]
            .into_iter()
            .filter_map(|set| set.as_deref())
    }

    /// Returns the number of sets won by `player1` and `player2`.
    ///
    /// Sets which fail to parse, contain a zero score or are tied do not count for either side.
    pub fn sets_won(&self) -> (u32, u32) {
        self.result_sets()
            .filter_map(|set| set.parse::<SetScore>().ok())
            .filter_map(|set| set.winner())
            .fold((0, 0), |(p1, p2), slot| match slot {
                Slot::Player1 => (p1 + 1, p2),
                Slot::Player2 => (p1, p2 + 1),
            })
    }
}

/// The score of a single set, written as `"<player1> - <player2>"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SetScore {
    pub player1: u32,
    pub player2: u32,
}

impl SetScore {
    /// Returns the slot that won the set. Sets with a zero score or a tie have no winner.
    pub fn winner(&self) -> Option<Slot> {
        if self.player1 == 0 || self.player2 == 0 {
            return None;
        }

        match self.player1.cmp(&self.player2) {
            std::cmp::Ordering::Greater => Some(Slot::Player1),
            std::cmp::Ordering::Less => Some(Slot::Player2),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl FromStr for SetScore {
    type Err = Error;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        let err = || Error::InvalidSetScore(s.to_owned());

        let (player1, player2) = s.split_once('-').ok_or_else(err)?;

        Ok(Self {
            player1: player1.trim().parse().map_err(|_| err())?,
            player2: player2.trim().parse().map_err(|_| err())?,
        })
    }
}
