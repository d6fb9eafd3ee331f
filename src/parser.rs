//! This module provides the parsers for rules-files and tape-files, utilizing the `pest` crate.
//! Both formats are flat streams of whitespace separated tokens; the grammar lives in
//! `grammar.pest`.

use pest::{
    iterators::{Pair, Pairs},
    Parser as PestParser,
};
use pest_derive::Parser as PestParser;
use tracing::debug;

use crate::{
    rules::RuleTable,
    tape::Tape,
    types::{Direction, Transition, TuringMachineError},
};

/// Derives a `PestParser` for the rule and tape grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses a rules-file into a `RuleTable`.
///
/// The input is a sequence of `CheckState ReadSymbol WriteSymbol MoveChar NextState` tuples
/// where `MoveChar` is one of `<`, `-` or `>`.
///
/// # Returns
///
/// * `Ok(RuleTable)` holding the transitions in file order.
/// * `Err(TuringMachineError::RuleParse)` if the input ends in the middle of a tuple.
/// * `Err(TuringMachineError::InvalidDirection)` if a move token is not `<`, `-` or `>`.
/// * `Err(TuringMachineError::EmptyRuleTable)` if the input holds no tuple at all.
pub fn parse_rules(input: &str) -> Result<RuleTable, TuringMachineError> {
    let root = TuringMachineParser::parse(Rule::rules, input)
        .map_err(|e| TuringMachineError::RuleParse(Box::new(e)))?;

    let transitions = root
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() == Rule::transition)
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = transitions.len(), "parsed rules");

    RuleTable::new(transitions)
}

/// Parses a tape-file into a `Tape`. An empty input yields an empty tape.
///
/// Every string tokenizes, so in practice this only fails on inputs the loader already
/// rejected as unreadable.
pub fn parse_tape(input: &str) -> Result<Tape, TuringMachineError> {
    let root = TuringMachineParser::parse(Rule::tape, input)
        .map_err(|e| TuringMachineError::TapeParseMessage(e.to_string()))?;

    let tape: Tape = root
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() == Rule::token)
        .map(|p| p.as_str())
        .collect();

    debug!(len = tape.len(), "parsed tape");

    Ok(tape)
}

/// Parses a single `Pair<Rule::transition>` into a `Transition`.
///
/// The grammar guarantees five tokens; the move token is validated here so that a bad
/// direction is reported as such rather than as a generic syntax error.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let mut pairs = pair.into_inner();

    let state = parse_string(&mut pairs);
    let read = parse_string(&mut pairs);
    let write = parse_string(&mut pairs);
    let direction = parse_direction(pairs.next().unwrap())?;
    let next_state = parse_string(&mut pairs);

    Ok(Transition::new(state, read, write, direction, next_state))
}

/// Parses a move token from a `Pair<Rule::token>`.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, TuringMachineError> {
    Direction::from_token(pair.as_str()).ok_or_else(|| {
        let (line, column) = pair.as_span().start_pos().line_col();
        TuringMachineError::InvalidDirection {
            token: pair.as_str().to_string(),
            line,
            column,
        }
    })
}

/// Returns the next token as an owned `String`.
fn parse_string(pairs: &mut Pairs<Rule>) -> String {
    pairs.next().unwrap().as_str().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLANK_SYMBOL;

    #[test]
    fn test_parse_rules() {
        let table = parse_rules("q0 0 1 > q0\nq0 ? 1 - qH\n").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.initial_state(), "q0");
        assert_eq!(
            table.transitions()[0],
            Transition::new("q0", "0", "1", Direction::Right, "q0")
        );
        assert_eq!(
            table.transitions()[1],
            Transition::new("q0", BLANK_SYMBOL, "1", Direction::Stay, "qH")
        );
    }

    #[test]
    fn test_parse_rules_ignores_layout() {
        let table = parse_rules("  q0 a\tb < q1   q1\r\nb b\n\n- q0").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.transitions()[0].direction, Direction::Left);
        assert_eq!(table.transitions()[1].direction, Direction::Stay);
        assert_eq!(table.transitions()[1].next_state, "q0");
    }

    #[test]
    fn test_parse_rules_multichar_symbols() {
        let table = parse_rules("start blank# mark-1 > end").unwrap();
        let t = &table.transitions()[0];

        assert_eq!(t.read, "blank#");
        assert_eq!(t.write, "mark-1");
    }

    #[test]
    fn test_parse_rules_invalid_direction() {
        for input in ["q0 0 1 R q0", "q0 0 1 >> q0", "q0 0 1 <q1 q1"] {
            let result = parse_rules(input);
            assert!(
                matches!(result, Err(TuringMachineError::InvalidDirection { .. })),
                "expected direction error for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_invalid_direction_location() {
        let error = parse_rules("q0 0 1 > q0\nq0 1 0 R q1").unwrap_err();

        match &error {
            TuringMachineError::InvalidDirection {
                token,
                line,
                column,
            } => {
                assert_eq!(token, "R");
                assert_eq!((*line, *column), (2, 8));
            }
            other => panic!("expected InvalidDirection, got {other:?}"),
        }
        assert!(error
            .to_string()
            .starts_with("failed reading rules-file (direction)."));
    }

    #[test]
    fn test_parse_rules_incomplete_tuple() {
        let result = parse_rules("q0 0 1 > q0\nq1 0 1 >");
        assert!(matches!(result, Err(TuringMachineError::RuleParse(_))));

        let error = result.unwrap_err().to_string();
        assert!(error.starts_with("failed reading rules-file."));
    }

    #[test]
    fn test_parse_rules_empty() {
        assert!(matches!(
            parse_rules(""),
            Err(TuringMachineError::EmptyRuleTable)
        ));
        assert!(matches!(
            parse_rules(" \n\t "),
            Err(TuringMachineError::EmptyRuleTable)
        ));
    }

    #[test]
    fn test_parse_tape() {
        let tape = parse_tape("0 0\n1\t? x\n").unwrap();
        assert_eq!(tape.symbols(), &["0", "0", "1", "?", "x"]);
    }

    #[test]
    fn test_parse_tape_accepts_any_tokens() {
        let tape = parse_tape("<q1> >> - \u{00e9}t\u{00e9} ??").unwrap();
        assert_eq!(tape.symbols(), &["<q1>", ">>", "-", "\u{00e9}t\u{00e9}", "??"]);
    }

    #[test]
    fn test_parse_empty_tape() {
        assert!(parse_tape("").unwrap().is_empty());
        assert!(parse_tape("\n  \n").unwrap().is_empty());
    }
}
