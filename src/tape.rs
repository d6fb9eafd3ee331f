//! The tape: a sequence of symbols that only ever grows at its right boundary.
//!
//! Any position left of `0` or at/after `len()` reads as [`BLANK_SYMBOL`]. Writes at exactly
//! `len()` append a cell; writes anywhere else outside the tape are dropped.

use serde::{Deserialize, Serialize};

use crate::types::BLANK_SYMBOL;

/// How the cell under the head is highlighted when a tape is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// Terminal underline escape sequences.
    #[default]
    Ansi,
    /// Angle brackets around the symbol, e.g. `a <b> c ?`.
    Brackets,
}

impl Emphasis {
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            Emphasis::Ansi => ("\x1b[4m", "\x1b[0m"),
            Emphasis::Brackets => ("<", ">"),
        }
    }
}

/// The result of a [`Tape::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// An existing cell was replaced.
    Overwritten,
    /// The tape grew by one cell.
    Appended,
    /// The position was outside the writable range; the tape is unchanged.
    Dropped,
}

/// The read/write medium of the machine, serialized as a plain list of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tape {
    cells: Vec<String>,
}

impl Tape {
    /// Creates a tape holding `cells`, cell `0` first.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Returns the number of written cells; the blank placeholder is not counted.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell has been written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the written cells in order.
    pub fn symbols(&self) -> &[String] {
        &self.cells
    }

    /// Returns the index of `pos` if it addresses an existing cell.
    fn index(&self, pos: isize) -> Option<usize> {
        usize::try_from(pos).ok().filter(|&i| i < self.cells.len())
    }

    /// Returns the symbol at `pos`, or the blank symbol outside `0..len()`.
    pub fn read(&self, pos: isize) -> &str {
        match self.index(pos) {
            Some(i) => &self.cells[i],
            None => BLANK_SYMBOL,
        }
    }

    /// Writes `symbol` at `pos`.
    ///
    /// Only `pos == len()` grows the tape; negative positions and positions past
    /// `len()` are silently dropped.
    pub fn write(&mut self, pos: isize, symbol: &str) -> WriteOutcome {
        if let Some(i) = self.index(pos) {
            self.cells[i] = symbol.to_string();
            WriteOutcome::Overwritten
        } else if usize::try_from(pos).is_ok_and(|i| i == self.cells.len()) {
            self.cells.push(symbol.to_string());
            WriteOutcome::Appended
        } else {
            WriteOutcome::Dropped
        }
    }

    /// Renders all symbols followed by a trailing blank placeholder, separated by single spaces.
    ///
    /// The symbol at `head` (or the placeholder when `head == len()`) is wrapped in the
    /// `emphasis` markers. A head outside `0..=len()` marks nothing.
    ///
    /// ```
    /// use turtrace::{Emphasis, Tape};
    ///
    /// let tape: Tape = ["a", "b", "c"].into_iter().collect();
    /// assert_eq!(tape.render(1, Emphasis::Brackets), "a <b> c ?");
    /// assert_eq!(tape.render(3, Emphasis::Brackets), "a b c <?>");
    /// ```
    pub fn render(&self, head: isize, emphasis: Emphasis) -> String {
        let (start, end) = emphasis.markers();
        let head = usize::try_from(head).ok();

        self.cells
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(BLANK_SYMBOL))
            .enumerate()
            .map(|(i, symbol)| {
                if head == Some(i) {
                    format!("{start}{symbol}{end}")
                } else {
                    symbol.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for Tape {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
