//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including transitions, head directions and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::Rule;

/// The symbol read at any position outside the tape's current bounds.
pub const BLANK_SYMBOL: &str = "?";

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Keep the head in the same position.
    Stay,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Maps a move character from a rules-file (`<`, `-` or `>`) to a `Direction`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Direction::Left),
            '-' => Some(Direction::Stay),
            '>' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns the move character used for this direction in rules-files and traces.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Stay => '-',
            Direction::Right => '>',
        }
    }

    /// Parses a whole move token; anything but a single `<`, `-` or `>` is rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Returns how far the head moves in this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Stay => 0,
            Direction::Right => 1,
        }
    }
}

/// Represents a single transition rule for a Turing Machine.
///
/// A transition applies when the machine is in `state` and reads `read` under its head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this transition checks for.
    pub state: String,
    /// The symbol that must be under the head.
    pub read: String,
    /// The symbol written at the head position.
    pub write: String,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: String,
}

impl Transition {
    /// Creates a transition from its five rules-file fields.
    pub fn new(
        state: impl Into<String>,
        read: impl Into<String>,
        write: impl Into<String>,
        direction: Direction,
        next_state: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            read: read.into(),
            write: write.into(),
            direction,
            next_state: next_state.into(),
        }
    }

    /// Returns `true` if this transition applies to the given state and symbol.
    pub fn matches(&self, state: &str, symbol: &str) -> bool {
        self.state == state && self.read == symbol
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.state,
            self.read,
            self.write,
            self.direction.as_char(),
            self.next_state
        )
    }
}

/// Identifies which input file an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The rules-file holding the transition table.
    Rules,
    /// The tape-file holding the initial tape.
    Tape,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Rules => f.write_str("rules-file"),
            InputKind::Tape => f.write_str("tape-file"),
        }
    }
}

/// Represents the errors that can occur while preparing or tracing a Turing Machine run.
///
/// The execution engine itself never fails; only input handling and the output sink do.
#[derive(Debug, Error)]
pub enum TuringMachineError {
    /// The command line did not name both input files.
    #[error("{0}")]
    Usage(String),
    /// A rules-file or tape-file could not be opened.
    #[error("could not open {kind} '{}'", .path.display())]
    FileOpen {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A rules-file ends in the middle of a tuple.
    #[error("failed reading rules-file.\n{0}")]
    RuleParse(Box<pest::error::Error<Rule>>),
    /// A rules-file tuple whose move token is not one of `<`, `-` or `>`.
    #[error("failed reading rules-file (direction).\n  --> {line}:{column}: '{token}' is not one of < - >")]
    InvalidDirection {
        token: String,
        line: usize,
        column: usize,
    },
    /// A rules-file could not be read as text.
    #[error("failed reading rules-file ({0}).")]
    RuleParseMessage(String),
    /// A tape-file could not be read as text.
    ///
    /// Any text tokenizes into a tape, so this only covers unreadable content such as
    /// invalid UTF-8.
    #[error("failed reading tape-file ({0}).")]
    TapeParseMessage(String),
    /// A rules-file without any transition; the start state is taken from the first rule.
    #[error("rules-file contains no rules.")]
    EmptyRuleTable,
    /// Writing the trace failed.
    #[error("failed writing trace: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_chars() {
        for c in ['<', '-', '>'] {
            let direction = Direction::from_char(c).unwrap();
            assert_eq!(direction.as_char(), c);
        }

        assert_eq!(Direction::from_char('x'), None);
        assert_eq!(Direction::from_char('R'), None);
    }

    #[test]
    fn test_direction_from_token() {
        assert_eq!(Direction::from_token(">"), Some(Direction::Right));
        assert_eq!(Direction::from_token("-"), Some(Direction::Stay));
        assert_eq!(Direction::from_token(">>"), None);
        assert_eq!(Direction::from_token("<q1"), None);
        assert_eq!(Direction::from_token(""), None);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Stay.offset(), 0);
        assert_eq!(Direction::Right.offset(), 1);
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"Left\"");

        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::Left);
    }

    #[test]
    fn test_transition_display() {
        let transition = Transition::new("q0", "?", "1", Direction::Stay, "qH");
        assert_eq!(transition.to_string(), "q0 ? 1 - qH");
    }

    #[test]
    fn test_transition_matches() {
        let transition = Transition::new("q0", "0", "1", Direction::Right, "q0");

        assert!(transition.matches("q0", "0"));
        assert!(!transition.matches("q0", "1"));
        assert!(!transition.matches("q1", "0"));
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::FileOpen {
            kind: InputKind::Tape,
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "could not open tape-file 'missing.txt'");

        let error =
            TuringMachineError::RuleParseMessage("stream did not contain valid UTF-8".into());
        assert!(error.to_string().starts_with("failed reading rules-file"));

        let error = TuringMachineError::InvalidDirection {
            token: "R".into(),
            line: 1,
            column: 8,
        };
        assert_eq!(
            error.to_string(),
            "failed reading rules-file (direction).\n  --> 1:8: 'R' is not one of < - >"
        );
    }
}
