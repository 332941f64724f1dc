use crate::domain::session::SessionId;
use crate::domain::wager::RawWagers;
use crate::error::Result;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};

/// One requested round: whose session, and what was wagered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundRequest {
    #[serde(default)]
    pub session: SessionId,
    #[serde(default)]
    pub bets: RawWagers,
}

/// Reads round requests from a JSON Lines source.
///
/// Each non-blank line is one JSON object. A line that fails to parse yields an
/// error for that line only, so a caller can report it and keep going. A read
/// failure is yielded once and ends the stream.
pub struct RoundReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> RoundReader<R> {
    /// Creates a new `RoundReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes rounds.
    pub fn rounds(self) -> impl Iterator<Item = Result<RoundRequest>> {
        self.reader
            .lines()
            .scan(false, |failed, line| {
                if *failed {
                    return None;
                }
                *failed = line.is_err();
                Some(line)
            })
            .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
            .map(|line| -> Result<RoundRequest> { Ok(serde_json::from_str(&line?)?) })
    }
}
