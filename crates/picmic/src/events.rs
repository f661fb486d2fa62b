//! Event-file reader.
//!
//! One event per line: the declared hit count followed by `row col` pairs,
//! all whitespace-separated. Blank lines and `#` comments are skipped.

use log::warn;
use picmic_core::Hit;
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

/// One parsed event line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    /// 1-based index among the events of the file.
    pub number: usize,
    /// 1-based line in the file.
    pub line: usize,
    /// Hit count written at the start of the line.
    pub declared: usize,
    pub hits: Vec<Hit>,
}

#[derive(thiserror::Error, Debug)]
pub enum EventParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid token {token:?}, expected a non-negative integer")]
    InvalidToken { line: usize, token: String },
}

/// Streams [`EventRecord`]s out of a buffered reader.
pub struct EventReader<R> {
    lines: Lines<R>,
    line: usize,
    number: usize,
}

impl EventReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EventParseError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            number: 0,
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<EventRecord, EventParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(err.into())),
            };
            self.line += 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.number += 1;
            return Some(parse_record(self.number, self.line, trimmed));
        }
    }
}

fn parse_record(number: usize, line: usize, text: &str) -> Result<EventRecord, EventParseError> {
    let values = text
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| EventParseError::InvalidToken {
                    line,
                    token: token.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (declared, coords) = values
        .split_first()
        .map_or((0, &[][..]), |(&declared, rest)| (declared, rest));
    let pairs = coords.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        warn!("line {line}: odd number of coordinates, trailing value ignored");
    }
    let hits: Vec<Hit> = pairs.map(|p| Hit::new(p[0], p[1])).collect();
    if hits.len() != declared {
        warn!(
            "line {line}: event declares {declared} hits but lists {}",
            hits.len()
        );
    }

    Ok(EventRecord {
        number,
        line,
        declared,
        hits,
    })
}

/// Parse every event of an in-memory event file.
pub fn parse_events(text: &str) -> Result<Vec<EventRecord>, EventParseError> {
    EventReader::new(text.as_bytes()).collect()
}
