//! This module defines the `TuringMachine` struct, which executes a rule table against a tape.
//! It owns the tape, the head position and the current state for the duration of a run, and
//! reports every configuration it passes through as a [`TraceEntry`].

use tracing::{debug, trace, warn};

use crate::rules::RuleTable;
use crate::tape::{Tape, WriteOutcome};
use crate::trace::{EntryKind, TraceEntry, TraceSink};
use crate::types::{Transition, TuringMachineError};

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A transition was applied; the entry shows the configuration after it.
    Continue(TraceEntry),
    /// No transition matches; the entry shows the final configuration.
    Halt(TraceEntry),
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No rule matched after `steps` transitions.
    Halted { steps: usize },
    /// The caller's step limit was reached before the machine halted.
    StepLimit { steps: usize },
}

impl Outcome {
    /// Returns the number of transitions applied during the run.
    pub fn steps(&self) -> usize {
        match *self {
            Outcome::Halted { steps } | Outcome::StepLimit { steps } => steps,
        }
    }
}

/// A deterministic single-tape Turing Machine.
///
/// The machine starts in the state of the table's first rule with the head on cell `0`.
/// There is no accepting state: it halts as soon as no rule matches the current state and
/// the symbol under the head. Nothing bounds the number of steps; use
/// [`TuringMachine::run_with_limit`] or drive [`TuringMachine::step`] directly to stop early.
pub struct TuringMachine<'a> {
    rules: &'a RuleTable,
    tape: Tape,
    head: isize,
    state: String,
    step_count: usize,
}

impl<'a> TuringMachine<'a> {
    /// Creates a machine in the table's initial state with the head on cell `0` of `tape`.
    pub fn new(rules: &'a RuleTable, tape: Tape) -> Self {
        Self {
            state: rules.initial_state().to_string(),
            rules,
            tape,
            head: 0,
            step_count: 0,
        }
    }

    /// Returns the entry describing the initial configuration.
    pub fn start(&self) -> TraceEntry {
        self.entry(EntryKind::Start)
    }

    /// Executes a single transition.
    ///
    /// The symbol under the head is read (blank outside the tape), the first matching rule
    /// writes its symbol, moves the head and switches state. Writes at `head == len` grow the
    /// tape; writes further out are dropped while the rule still fires.
    pub fn step(&mut self) -> Step {
        let transition = match self.transition().cloned() {
            Some(t) => t,
            None => {
                debug!(
                    state = %self.state,
                    head = self.head,
                    steps = self.step_count,
                    "machine halted"
                );
                return Step::Halt(self.entry(EntryKind::Halt));
            }
        };

        if self.tape.write(self.head, &transition.write) == WriteOutcome::Dropped {
            trace!(head = self.head, len = self.tape.len(), "write outside tape dropped");
        }

        self.head += transition.direction.offset();
        self.state.clone_from(&transition.next_state);
        self.step_count += 1;

        trace!(step = self.step_count, rule = %transition, head = self.head, "applied");

        Step::Continue(self.entry(EntryKind::Step(transition)))
    }

    /// Runs until the machine halts, streaming every entry to `sink`.
    ///
    /// This never returns if the rule table loops forever.
    pub fn run<S: TraceSink>(&mut self, sink: &mut S) -> Result<Outcome, TuringMachineError> {
        self.run_until(sink, None)
    }

    /// Runs until the machine halts or `max_steps` transitions have been applied.
    ///
    /// When the limit is hit, the final entry is an [`EntryKind::Stopped`] entry showing the
    /// configuration at that point.
    pub fn run_with_limit<S: TraceSink>(
        &mut self,
        sink: &mut S,
        max_steps: usize,
    ) -> Result<Outcome, TuringMachineError> {
        self.run_until(sink, Some(max_steps))
    }

    fn run_until<S: TraceSink>(
        &mut self,
        sink: &mut S,
        max_steps: Option<usize>,
    ) -> Result<Outcome, TuringMachineError> {
        sink.emit(&self.start())?;

        let mut steps = 0;
        loop {
            if max_steps.is_some_and(|max| steps >= max) && !self.is_halted() {
                warn!(steps, state = %self.state, "step limit reached before halting");
                sink.emit(&self.entry(EntryKind::Stopped))?;
                return Ok(Outcome::StepLimit { steps });
            }

            match self.step() {
                Step::Continue(entry) => {
                    steps += 1;
                    sink.emit(&entry)?;
                }
                Step::Halt(entry) => {
                    sink.emit(&entry)?;
                    return Ok(Outcome::Halted { steps });
                }
            }
        }
    }

    /// Finds the transition for the current state and the symbol under the head.
    pub fn transition(&self) -> Option<&'a Transition> {
        self.rules.find_first_match(&self.state, self.symbol())
    }

    /// A machine is halted when no transition applies to its current configuration.
    pub fn is_halted(&self) -> bool {
        self.transition().is_none()
    }

    /// Returns the symbol under the head, blank outside the tape.
    pub fn symbol(&self) -> &str {
        self.tape.read(self.head)
    }

    /// Returns the current state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the head position; it may be negative after moving left of cell `0`.
    pub fn head(&self) -> isize {
        self.head
    }

    /// Returns the tape as it is now.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the total number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    fn entry(&self, kind: EntryKind) -> TraceEntry {
        TraceEntry {
            kind,
            state: self.state.clone(),
            tape: self.tape.clone(),
            head: self.head,
        }
    }
}
