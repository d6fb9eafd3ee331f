//! This crate provides the core logic for a deterministic Turing Machine simulator.
//! It includes modules for parsing rules-files and tape-files, modelling the tape, executing
//! the rule table step by step, and rendering the resulting trace.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod rules;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the `ProgramLoader` struct and opened `InputFile`s from the loader module.
pub use loader::{InputFile, ProgramLoader};
/// Re-exports the machine and the results of stepping or running it.
pub use machine::{Outcome, Step, TuringMachine};
/// Re-exports the parser entry points.
pub use parser::{parse_rules, parse_tape};
pub use rules::RuleTable;
pub use tape::{Emphasis, Tape, WriteOutcome};
/// Re-exports the trace entry type and its sinks.
pub use trace::{
    EntryKind, JsonTraceWriter, TextTraceWriter, TraceEntry, TraceFormat, TraceSink, VecSink,
};
/// Re-exports the core types from the types module.
pub use types::{Direction, InputKind, Transition, TuringMachineError, BLANK_SYMBOL};
