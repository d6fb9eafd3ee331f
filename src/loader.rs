//! This module provides the `ProgramLoader` struct, responsible for loading rule tables and
//! tapes from files and strings.

use crate::parser::{parse_rules, parse_tape};
use crate::rules::RuleTable;
use crate::tape::Tape;
use crate::types::{InputKind, TuringMachineError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `ProgramLoader` is a utility struct for loading the two inputs of a run.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Opens both input files, then reads and parses them.
    ///
    /// Both files are opened before either is parsed, so a missing tape-file is reported
    /// even when the rules-file is malformed.
    ///
    /// # Returns
    ///
    /// * `Ok((RuleTable, Tape))` if both files are opened and parsed.
    /// * `Err(TuringMachineError::FileOpen)` for the first file that cannot be opened.
    /// * Any error of [`ProgramLoader::load_rules`] or [`ProgramLoader::load_tape`] otherwise.
    pub fn load_inputs(
        rules_path: &Path,
        tape_path: &Path,
    ) -> Result<(RuleTable, Tape), TuringMachineError> {
        let rules = Self::open(rules_path, InputKind::Rules)?;
        let tape = Self::open(tape_path, InputKind::Tape)?;

        Ok((rules.into_rules()?, tape.into_tape()?))
    }

    /// Loads a rule table from the rules-file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleTable)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileOpen)` if the file cannot be opened.
    /// * `Err(TuringMachineError::RuleParseMessage)` if the file is not readable text.
    /// * `Err(TuringMachineError::RuleParse)` or `InvalidDirection` if the content is not a
    ///   valid rule table.
    pub fn load_rules(path: &Path) -> Result<RuleTable, TuringMachineError> {
        Self::open(path, InputKind::Rules)?.into_rules()
    }

    /// Loads the initial tape from the tape-file at `path`.
    pub fn load_tape(path: &Path) -> Result<Tape, TuringMachineError> {
        Self::open(path, InputKind::Tape)?.into_tape()
    }

    /// Opens an input file without reading it.
    pub fn open(path: &Path, kind: InputKind) -> Result<InputFile, TuringMachineError> {
        let file = File::open(path).map_err(|source| TuringMachineError::FileOpen {
            kind,
            path: path.to_path_buf(),
            source,
        })?;

        Ok(InputFile {
            kind,
            path: path.to_path_buf(),
            file,
        })
    }

    /// Loads a rule table from the provided string content.
    pub fn load_rules_from_string(content: &str) -> Result<RuleTable, TuringMachineError> {
        parse_rules(content)
    }

    /// Loads a tape from the provided string content.
    pub fn load_tape_from_string(content: &str) -> Result<Tape, TuringMachineError> {
        parse_tape(content)
    }
}

/// An input file that has been opened but not read yet.
#[derive(Debug)]
pub struct InputFile {
    kind: InputKind,
    path: PathBuf,
    file: File,
}

impl InputFile {
    /// Which input this file was opened as.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Reads the file and parses it as a rules-file.
    pub fn into_rules(self) -> Result<RuleTable, TuringMachineError> {
        parse_rules(&self.read_to_string()?)
    }

    /// Reads the file and parses it as a tape-file.
    pub fn into_tape(self) -> Result<Tape, TuringMachineError> {
        parse_tape(&self.read_to_string()?)
    }

    fn read_to_string(mut self) -> Result<String, TuringMachineError> {
        let mut content = String::new();

        self.file
            .read_to_string(&mut content)
            .map_err(|e| match self.kind {
                InputKind::Rules => TuringMachineError::RuleParseMessage(e.to_string()),
                InputKind::Tape => TuringMachineError::TapeParseMessage(e.to_string()),
            })?;

        debug!(
            kind = %self.kind,
            path = %self.path.display(),
            bytes = content.len(),
            "loaded input"
        );

        Ok(content)
    }
}
