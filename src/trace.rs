//! Trace entries produced by the machine and the sinks that consume them.

use serde::Serialize;
use std::io::{self, Write};

use crate::tape::{Emphasis, Tape};
use crate::types::Transition;

/// Which part of a run a [`TraceEntry`] describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "transition", rename_all = "lowercase")]
pub enum EntryKind {
    /// The configuration before the first step.
    Start,
    /// The configuration after applying a transition.
    Step(Transition),
    /// The configuration the machine halted in.
    Halt,
    /// The configuration at which a step limit ended the run before the machine halted.
    Stopped,
}

/// A snapshot of the machine taken at the start, after each step, or at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    #[serde(flatten)]
    pub kind: EntryKind,
    /// The machine state after the entry's transition, if any.
    pub state: String,
    /// A copy of the whole tape.
    pub tape: Tape,
    /// The head position, possibly negative.
    pub head: isize,
}

impl TraceEntry {
    /// The transition applied to reach this entry, if any.
    pub fn transition(&self) -> Option<&Transition> {
        match &self.kind {
            EntryKind::Step(transition) => Some(transition),
            EntryKind::Start | EntryKind::Halt | EntryKind::Stopped => None,
        }
    }

    /// Renders the tape snapshot with the head cell marked.
    pub fn render_tape(&self, emphasis: Emphasis) -> String {
        self.tape.render(self.head, emphasis)
    }
}

/// Receives trace entries as the machine produces them.
pub trait TraceSink {
    /// Consumes one entry; entries arrive in execution order.
    fn emit(&mut self, entry: &TraceEntry) -> io::Result<()>;
}

/// The output format of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    /// The tab separated layout written by [`TextTraceWriter`].
    #[default]
    Text,
    /// JSON lines written by [`JsonTraceWriter`].
    Json,
}

/// Writes the human readable trace.
///
/// Start and final entries use two tabs and a blank line of separation; step entries are
/// prefixed with the applied rule and a single tab. A run cut short by a step limit ends
/// with the same layout as a halted one.
pub struct TextTraceWriter<W: Write> {
    out: W,
    emphasis: Emphasis,
}

impl<W: Write> TextTraceWriter<W> {
    /// Creates a writer marking the head cell with `emphasis`.
    pub fn new(out: W, emphasis: Emphasis) -> Self {
        Self { out, emphasis }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for TextTraceWriter<W> {
    fn emit(&mut self, entry: &TraceEntry) -> io::Result<()> {
        let tape = entry.render_tape(self.emphasis);

        match &entry.kind {
            EntryKind::Start => write!(self.out, "{}:\t\t{}\n\n", entry.state, tape)?,
            EntryKind::Step(transition) => writeln!(self.out, "{}:\t{}", transition, tape)?,
            EntryKind::Halt | EntryKind::Stopped => {
                write!(self.out, "\n{}:\t\t{}\n", entry.state, tape)?
            }
        }

        self.out.flush()
    }
}

/// Writes one JSON object per line for every entry.
pub struct JsonTraceWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonTraceWriter<W> {
    /// Creates a writer emitting one JSON object per line.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for JsonTraceWriter<W> {
    fn emit(&mut self, entry: &TraceEntry) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Every entry received so far, in order.
    pub entries: Vec<TraceEntry>,
}

impl TraceSink for VecSink {
    fn emit(&mut self, entry: &TraceEntry) -> io::Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn emit(&mut self, entry: &TraceEntry) -> io::Result<()> {
        (**self).emit(entry)
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn emit(&mut self, entry: &TraceEntry) -> io::Result<()> {
        (**self).emit(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn entry(kind: EntryKind, state: &str, head: isize) -> TraceEntry {
        TraceEntry {
            kind,
            state: state.to_string(),
            tape: ["1", "0"].into_iter().collect(),
            head,
        }
    }

    fn render(entries: &[TraceEntry]) -> String {
        let mut writer = TextTraceWriter::new(Vec::new(), Emphasis::Brackets);
        for e in entries {
            writer.emit(e).unwrap();
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_text_layout() {
        let step = Transition::new("q0", "0", "1", Direction::Right, "q0");
        let output = render(&[
            entry(EntryKind::Start, "q0", 0),
            entry(EntryKind::Step(step), "q0", 1),
            entry(EntryKind::Halt, "q0", 1),
        ]);

        assert_eq!(
            output,
            "q0:\t\t<1> 0 ?\n\nq0 0 1 > q0:\t1 <0> ?\n\nq0:\t\t1 <0> ?\n"
        );
    }

    #[test]
    fn test_stopped_uses_final_layout() {
        let output = render(&[entry(EntryKind::Stopped, "loop", 0)]);
        assert_eq!(output, "\nloop:\t\t<1> 0 ?\n");

        let mut writer = JsonTraceWriter::new(Vec::new());
        writer.emit(&entry(EntryKind::Stopped, "loop", 0)).unwrap();
        let line: serde_json::Value =
            serde_json::from_slice(&writer.into_inner()).unwrap();
        assert_eq!(line["kind"], "stopped");
    }

    #[test]
    fn test_json_lines() {
        let step = Transition::new("q0", "?", "1", Direction::Stay, "qH");
        let mut writer = JsonTraceWriter::new(Vec::new());
        writer.emit(&entry(EntryKind::Start, "q0", 0)).unwrap();
        writer.emit(&entry(EntryKind::Step(step), "qH", 2)).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "start");
        assert_eq!(lines[0]["tape"], serde_json::json!(["1", "0"]));
        assert_eq!(lines[1]["kind"], "step");
        assert_eq!(lines[1]["transition"]["read"], "?");
        assert_eq!(lines[1]["transition"]["direction"], "Stay");
        assert_eq!(lines[1]["head"], 2);
    }

    #[test]
    fn test_transition_accessor() {
        let step = Transition::new("q0", "0", "1", Direction::Right, "q0");
        assert!(entry(EntryKind::Start, "q0", 0).transition().is_none());
        assert_eq!(
            entry(EntryKind::Step(step.clone()), "q0", 1).transition(),
            Some(&step)
        );
    }
}
