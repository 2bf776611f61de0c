//! This module defines `MachineDefinition`, the validated and immutable description of a
//! single-tape Turing machine: its states, alphabets, distinguished states, and rules.

use crate::analyzer::analyze;
use crate::types::{StateId, Symbol, TraceError, TransitionRule, BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A validated description of a (possibly nondeterministic) single-tape Turing machine.
///
/// Rules are kept in their declaration order, which is the order successors are
/// enumerated in during exploration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// The name of the machine, as given on the first line of the definition file.
    pub name: String,
    /// All declared states, in declaration order.
    pub states: Vec<StateId>,
    /// Symbols allowed in the input string.
    pub input_alphabet: Vec<Symbol>,
    /// Symbols allowed on the tape, including the blank.
    pub tape_alphabet: Vec<Symbol>,
    /// The state the machine starts in.
    pub start: StateId,
    /// The accepting state.
    pub accept: StateId,
    /// The rejecting state.
    pub reject: StateId,
    /// The transition rules, in declaration order.
    pub rules: Vec<TransitionRule>,
}

impl MachineDefinition {
    /// Creates a new definition and checks its invariants once, up front.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if every invariant holds.
    /// * `Err(TraceError::ValidationError)` describing the first violated invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        states: Vec<StateId>,
        input_alphabet: Vec<Symbol>,
        tape_alphabet: Vec<Symbol>,
        start: impl Into<StateId>,
        accept: impl Into<StateId>,
        reject: impl Into<StateId>,
        rules: Vec<TransitionRule>,
    ) -> Result<Self, TraceError> {
        let definition = Self {
            name: name.into(),
            states,
            input_alphabet,
            tape_alphabet,
            start: start.into(),
            accept: accept.into(),
            reject: reject.into(),
            rules,
        };

        analyze(&definition)?;

        Ok(definition)
    }

    /// Returns the blank symbol used to pad the tape.
    pub fn blank(&self) -> Symbol {
        BLANK_SYMBOL
    }

    /// Checks whether some `(from_state, read_symbol)` pair is shared by more than one rule.
    pub fn is_nondeterministic(&self) -> bool {
        let mut seen = HashSet::new();

        !self
            .rules
            .iter()
            .all(|rule| seen.insert((rule.from_state.as_str(), rule.read_symbol)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn rule(from: &str, read: char, to: &str, write: char, direction: Direction) -> TransitionRule {
        TransitionRule {
            from_state: from.to_string(),
            read_symbol: read,
            to_state: to.to_string(),
            write_symbol: write,
            direction,
        }
    }

    fn states() -> Vec<StateId> {
        vec!["q0".to_string(), "qa".to_string(), "qr".to_string()]
    }

    #[test]
    fn test_new_accepts_valid_definition() {
        let definition = MachineDefinition::new(
            "Valid",
            states(),
            vec!['a'],
            vec!['a', '_'],
            "q0",
            "qa",
            "qr",
            vec![rule("q0", 'a', "qa", 'a', Direction::Right)],
        )
        .unwrap();

        assert_eq!(definition.start, "q0");
        assert_eq!(definition.blank(), '_');
        assert!(!definition.is_nondeterministic());
    }

    #[test]
    fn test_new_rejects_equal_accept_and_reject() {
        let result = MachineDefinition::new(
            "Broken",
            states(),
            vec!['a'],
            vec!['a', '_'],
            "q0",
            "qa",
            "qa",
            vec![],
        );

        assert!(matches!(result, Err(TraceError::ValidationError(_))));
    }

    #[test]
    fn test_is_nondeterministic_detects_shared_pairs() {
        let definition = MachineDefinition::new(
            "Branching",
            states(),
            vec!['a'],
            vec!['a', '_'],
            "q0",
            "qa",
            "qr",
            vec![
                rule("q0", 'a', "qa", 'a', Direction::Right),
                rule("q0", 'a', "qr", 'a', Direction::Left),
            ],
        )
        .unwrap();

        assert!(definition.is_nondeterministic());
    }

    #[test]
    fn test_same_symbol_in_different_states_is_deterministic() {
        let definition = MachineDefinition::new(
            "Linear",
            states(),
            vec!['a'],
            vec!['a', '_'],
            "q0",
            "qa",
            "qr",
            vec![
                rule("q0", 'a', "qa", 'a', Direction::Right),
                rule("qa", 'a', "qr", 'a', Direction::Left),
            ],
        )
        .unwrap();

        assert!(!definition.is_nondeterministic());
    }
}
