//! The rule table: transitions kept in the order they were defined.

use crate::types::{Transition, TuringMachineError};

/// An ordered, non-empty list of transitions.
///
/// Lookups scan in table order and stop at the first match, so a later rule with the same
/// `(state, read)` pair as an earlier one can never fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    transitions: Vec<Transition>,
}

impl RuleTable {
    /// Creates a table from transitions in rules-file order.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleTable)` if there is at least one transition.
    /// * `Err(TuringMachineError::EmptyRuleTable)` otherwise; a run needs the first rule's state.
    pub fn new(transitions: Vec<Transition>) -> Result<Self, TuringMachineError> {
        if transitions.is_empty() {
            return Err(TuringMachineError::EmptyRuleTable);
        }

        Ok(Self { transitions })
    }

    /// The state of the first rule, which is where every run starts.
    pub fn initial_state(&self) -> &str {
        &self.transitions[0].state
    }

    /// Finds the first transition for `state` reading `symbol`.
    pub fn find_first_match(&self, state: &str, symbol: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.matches(state, symbol))
    }

    /// Returns all transitions in table order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Iterates over the transitions in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    /// Returns the number of transitions, shadowed ones included.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Always `false` for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            RuleTable::new(Vec::new()),
            Err(TuringMachineError::EmptyRuleTable)
        ));
    }

    #[test]
    fn test_initial_state_is_first_rule() {
        let table = RuleTable::new(vec![
            Transition::new("b", "0", "0", Direction::Stay, "a"),
            Transition::new("a", "0", "0", Direction::Stay, "b"),
        ])
        .unwrap();

        assert_eq!(table.initial_state(), "b");
    }

    #[test]
    fn test_first_match_wins() {
        let table = RuleTable::new(vec![
            Transition::new("q0", "1", "x", Direction::Left, "q1"),
            Transition::new("q0", "0", "a", Direction::Right, "q1"),
            Transition::new("q0", "0", "b", Direction::Left, "q2"),
        ])
        .unwrap();

        let found = table.find_first_match("q0", "0").unwrap();
        assert_eq!(found.write, "a");
        assert_eq!(found.next_state, "q1");
    }

    #[test]
    fn test_no_match() {
        let table =
            RuleTable::new(vec![Transition::new("q0", "0", "1", Direction::Right, "q0")]).unwrap();

        assert!(table.find_first_match("q0", "1").is_none());
        assert!(table.find_first_match("q1", "0").is_none());
    }
}
