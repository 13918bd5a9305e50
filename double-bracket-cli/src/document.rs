use std::fs;
use std::io::{self, Write};
use std::path::Path;

use double_bracket_core::{Match, Player, Tournament};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A tournament together with the match and player records fetched for it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TournamentDocument {
    pub tournament: Tournament,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// Reads a JSON value from the file at `path`. A path of `-` reads from stdin.
pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::debug!("Reading {}", path.display());

    let value = if path == Path::new("-") {
        serde_json::from_reader(io::stdin().lock())?
    } else {
        let buf = fs::read(path)?;
        serde_json::from_slice(&buf)?
    };

    Ok(value)
}

/// Writes `value` as JSON to stdout.
pub fn write_json<T>(value: &T, pretty: bool) -> Result<()>
where
    T: Serialize,
{
    let mut stdout = io::stdout().lock();

    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }

    stdout.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use double_bracket_core::{MatchNumber, PlayerId};

    use super::TournamentDocument;

    #[test]
    fn test_document_deserialize() {
        let input = r#"{
            "tournament": {
                "name": "Cup",
                "players": ["a", "b"],
                "matches": ["m1", "m2"]
            },
            "matches": [
                {
                    "id": "m1",
                    "matchNumber": "UB 1.1",
                    "isUpperBracket": true,
                    "round": 1,
                    "roundMatchIndex": 1,
                    "player1": "a",
                    "player2": "b",
                    "resultSet1": "11 - 9",
                    "winner": true
                },
                {
                    "id": "m2",
                    "matchNumber": "Final",
                    "isUpperBracket": true,
                    "round": 2,
                    "roundMatchIndex": 1
                }
            ],
            "players": [
                { "id": "a", "name": "Alice" },
                { "id": "b", "name": "Bob" }
            ]
        }"#;

        let doc: TournamentDocument = serde_json::from_str(input).unwrap();

        assert_eq!(doc.tournament.name, "Cup");
        assert_eq!(doc.matches.len(), 2);
        assert_eq!(doc.matches[0].player2, Some(PlayerId::from("b")));
        assert_eq!(doc.matches[0].result_set1.as_deref(), Some("11 - 9"));
        assert_eq!(doc.matches[0].winner, Some(true));
        assert_eq!(doc.matches[1].match_number, MatchNumber::Final);
        assert_eq!(doc.matches[1].player1, None);
        assert_eq!(doc.players[1].name, "Bob");
    }
}
