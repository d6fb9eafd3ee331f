//! This module inspects a rule table for rules that can never behave the way they read.
//! Findings are warnings only: every non-empty table is executable.

use std::collections::hash_map::{Entry, HashMap};
use std::fmt;

use crate::rules::RuleTable;
use crate::types::BLANK_SYMBOL;

/// Represents a questionable rule found during analysis. Indices are zero-based table positions.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// A rule with the same `(state, read)` pair as an earlier one; first-match means it never fires.
    ShadowedRule { index: usize, shadowed_by: usize },
    /// A rule that writes the blank symbol as a literal tape cell.
    WritesBlank { index: usize },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::ShadowedRule { index, shadowed_by } => write!(
                f,
                "rule {} is unreachable, rule {} matches the same state and symbol",
                index + 1,
                shadowed_by + 1
            ),
            AnalysisWarning::WritesBlank { index } => write!(
                f,
                "rule {} writes '{}' onto the tape as a regular symbol",
                index + 1,
                BLANK_SYMBOL
            ),
        }
    }
}

/// Analyzes a rule table and returns every warning in table order.
pub fn analyze(rules: &RuleTable) -> Vec<AnalysisWarning> {
    let mut first_seen: HashMap<(&str, &str), usize> = HashMap::new();
    let mut warnings = Vec::new();

    for (index, t) in rules.iter().enumerate() {
        match first_seen.entry((t.state.as_str(), t.read.as_str())) {
            Entry::Occupied(first) => warnings.push(AnalysisWarning::ShadowedRule {
                index,
                shadowed_by: *first.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }

        if t.write == BLANK_SYMBOL && t.read != BLANK_SYMBOL {
            warnings.push(AnalysisWarning::WritesBlank { index });
        }
    }

    warnings
}
