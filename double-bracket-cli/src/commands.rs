use std::path::PathBuf;

use clap::Subcommand;
use double_bracket_core::{
    build_bracket, pair_players, propagate, BracketLookup, BracketView, MatchId, Pairing,
    PlayerId, SeedingPolicy,
};

use crate::config::Config;
use crate::document::{read_json, write_json, TournamentDocument};
use crate::{Error, Result};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pair players for the first round, giving byes to the players that don't fit.
    Pair {
        /// The player ids.
        #[arg(required = true, num_args = 2..)]
        players: Vec<PlayerId>,
        /// Keep the given player order instead of shuffling.
        #[arg(long)]
        ordered: bool,
        /// Seed for a reproducible shuffle.
        #[arg(long, conflicts_with = "ordered")]
        seed: Option<u64>,
    },
    /// Build all matches of a bracket from a JSON file of first round pairings.
    Build {
        /// The pairings file, `-` for stdin.
        input: PathBuf,
    },
    /// Compute the bracket view of a tournament document.
    View {
        /// The tournament document, `-` for stdin.
        input: PathBuf,
    },
    /// Compute the player updates after the winner of a match was recorded.
    Advance {
        /// The tournament document, `-` for stdin.
        input: PathBuf,
        /// The id of the decided match.
        #[arg(value_name = "MATCH")]
        match_id: MatchId,
    },
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Pair {
                players,
                ordered,
                seed,
            } => {
                let policy = match (ordered, seed) {
                    (true, _) => SeedingPolicy::Ordered,
                    (false, Some(seed)) => SeedingPolicy::Shuffled { seed: Some(*seed) },
                    (false, None) => config.seeding_policy(),
                };

                log::info!("Pairing {} players using {:?}", players.len(), policy);

                let pairings = pair_players(players, policy)?;
                write_json(&pairings, config.pretty)?;
            }
            Self::Build { input } => {
                let pairings: Vec<Pairing> = read_json(input)?;
                let matches = build_bracket(&pairings);

                write_json(&matches, config.pretty)?;
            }
            Self::View { input } => {
                let doc: TournamentDocument = read_json(input)?;
                let view = BracketView::new(&doc.tournament, &doc.matches, &doc.players)?;

                write_json(&view, config.pretty)?;
            }
            Self::Advance { input, match_id } => {
                let doc: TournamentDocument = read_json(input)?;

                let matches = doc.tournament.resolve_matches(&doc.matches)?;
                let lookup = BracketLookup::new(matches.iter().copied());

                let m = matches
                    .iter()
                    .find(|m| m.id == *match_id)
                    .ok_or_else(|| Error::NotInTournament(match_id.clone()))?;

                if m.winner.is_none() {
                    log::info!("Match {} is not decided yet", m.match_number);
                }

                let updates = propagate(m, &lookup);
                write_json(&updates, config.pretty)?;
            }
        }

        Ok(())
    }
}
