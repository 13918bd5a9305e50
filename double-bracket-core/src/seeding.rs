use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::utils::NumExt;
use crate::{Error, Pairing, PlayerId, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decides which players meet in the first round and which players receive a bye.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", tag = "kind"))]
pub enum SeedingPolicy {
    /// Keep the given order: players are paired in order, the last players get the byes.
    Ordered,
    /// Shuffle the players before pairing. A fixed `seed` makes the shuffle reproducible.
    Shuffled {
        #[cfg_attr(feature = "serde", serde(default))]
        seed: Option<u64>,
    },
}

impl Default for SeedingPolicy {
    #[inline]
    fn default() -> Self {
        Self::Shuffled { seed: None }
    }
}

/// Reduces `players` to the first round pairings of a bracket.
///
/// The number of first round matches is the power of two directly below the number of players.
/// Players that don't fit into a full match receive a bye, which is a pairing without opponent.
/// The returned pairings can be passed directly to [`build_bracket`].
///
/// # Errors
///
/// Returns [`Error::NotEnoughPlayers`] if less than 2 players are given.
///
/// # Examples
///
/// ```
/// # use double_bracket_core::{pair_players, PlayerId, SeedingPolicy};
/// let players: Vec<PlayerId> = ["a", "b", "c"].into_iter().map(PlayerId::from).collect();
/// let pairings = pair_players(&players, SeedingPolicy::Ordered).unwrap();
///
/// assert_eq!(pairings.len(), 2);
/// assert_eq!(pairings[1], (PlayerId::from("c"), None));
/// ```
///
/// [`build_bracket`]: crate::build_bracket
pub fn pair_players(players: &[PlayerId], policy: SeedingPolicy) -> Result<Vec<Pairing>> {
    if players.len() < 2 {
        return Err(Error::NotEnoughPlayers {
            found: players.len(),
        });
    }

    let mut players = players.to_vec();
    match policy {
        SeedingPolicy::Ordered => (),
        SeedingPolicy::Shuffled { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            players.shuffle(&mut rng);
        }
    }

    let first_round = players.len().previous_power_of_two();
    let byes = first_round * 2 - players.len();
    let active = players.len() - byes;

    log::debug!(
        "Pairing {} players into {} first round matches with {} byes",
        players.len(),
        first_round,
        byes
    );

    let mut pairings = Vec::with_capacity(first_round);
    let mut players = players.into_iter();

    for _ in 0..active / 2 {
        // `active` is even, both players always exist.
        if let (Some(player1), Some(player2)) = (players.next(), players.next()) {
            pairings.push((player1, Some(player2)));
        }
    }

    pairings.extend(players.map(|player| (player, None)));

    Ok(pairings)
}
