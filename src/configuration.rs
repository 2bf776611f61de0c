//! This module defines `Configuration`, an immutable snapshot of the machine: the tape split
//! around the head, the current state, and an exact handle to the configuration it was
//! derived from.

use crate::types::{Direction, StateId, Symbol, TransitionRule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable reference to a configuration inside an `ExecutionTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentHandle {
    /// Index of the level holding the parent.
    pub level: usize,
    /// Position of the parent within its level.
    pub slot: usize,
}

/// A complete snapshot of the machine at one instant.
///
/// The tape is modeled as two growable sequences around the head:
///
/// ```text
///   left        right
/// | a | b | [c] | d |   head on 'c'
/// ```
///
/// `right` starts with the head symbol. Anything beyond the materialized cells is blank,
/// so an empty `right` means the head sits on a blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Tape strictly left of the head, in order.
    pub left: Vec<Symbol>,
    /// The current state.
    pub state: StateId,
    /// The head symbol followed by the tape strictly right of the head.
    pub right: Vec<Symbol>,
    /// The state this configuration was produced from, if any.
    pub parent_state: Option<StateId>,
    /// The exact configuration this one was produced from, if any.
    pub parent: Option<ParentHandle>,
}

impl Configuration {
    /// Creates the root configuration for a run: head on the first input symbol.
    ///
    /// An empty input places the head on a single blank cell.
    pub fn initial(state: impl Into<StateId>, input: &[Symbol], blank: Symbol) -> Self {
        let right = if input.is_empty() {
            vec![blank]
        } else {
            input.to_vec()
        };

        Self {
            left: Vec::new(),
            state: state.into(),
            right,
            parent_state: None,
            parent: None,
        }
    }

    /// Returns the symbol under the head, or `blank` when the head is past the
    /// materialized tape.
    pub fn head(&self, blank: Symbol) -> Symbol {
        self.right.first().copied().unwrap_or(blank)
    }

    /// Applies `rule` to this configuration and returns the successor.
    ///
    /// The head cell is overwritten with the rule's write symbol before the head moves.
    /// Moving left from the leftmost materialized cell grows the tape with a blank, so the
    /// head position never goes negative.
    pub fn apply(&self, rule: &TransitionRule, blank: Symbol, parent: ParentHandle) -> Self {
        let mut left = self.left.clone();
        // Tape strictly right of the head; the head cell itself is replaced below.
        let rest = self.right.get(1..).unwrap_or_default();

        let right = match rule.direction {
            Direction::Right => {
                left.push(rule.write_symbol);
                rest.to_vec()
            }
            Direction::Left => {
                let mut right = Vec::with_capacity(rest.len() + 2);
                right.push(left.pop().unwrap_or(blank));
                right.push(rule.write_symbol);
                right.extend_from_slice(rest);
                right
            }
        };

        Self {
            left,
            state: rule.to_state.clone(),
            right,
            parent_state: Some(self.state.clone()),
            parent: Some(parent),
        }
    }

    /// Returns the tape contents with the head position, e.g. `(['a', 'b'], 2)`.
    pub fn tape(&self) -> (Vec<Symbol>, usize) {
        let head = self.left.len();
        let tape = self.left.iter().chain(self.right.iter()).copied().collect();

        (tape, head)
    }
}

impl fmt::Display for Configuration {
    /// Renders the configuration as `left state right`, e.g. `01q1x1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: String = self.left.iter().collect();
        let right: String = self.right.iter().collect();

        write!(f, "{}{}{}", left, self.state, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: ParentHandle = ParentHandle { level: 0, slot: 0 };

    fn rule(read: char, write: char, direction: Direction) -> TransitionRule {
        TransitionRule {
            from_state: "q0".to_string(),
            read_symbol: read,
            to_state: "q1".to_string(),
            write_symbol: write,
            direction,
        }
    }

    #[test]
    fn test_initial_configuration() {
        let config = Configuration::initial("q0", &['a', 'b'], '_');

        assert!(config.left.is_empty());
        assert_eq!(config.right, vec!['a', 'b']);
        assert_eq!(config.head('_'), 'a');
        assert_eq!(config.parent_state, None);
        assert_eq!(config.parent, None);
    }

    #[test]
    fn test_initial_configuration_with_empty_input() {
        let config = Configuration::initial("q0", &[], '_');

        assert_eq!(config.right, vec!['_']);
        assert_eq!(config.head('_'), '_');
    }

    #[test]
    fn test_move_right() {
        let config = Configuration::initial("q0", &['a', 'b'], '_');
        let next = config.apply(&rule('a', 'X', Direction::Right), '_', ROOT);

        assert_eq!(next.left, vec!['X']);
        assert_eq!(next.right, vec!['b']);
        assert_eq!(next.state, "q1");
        assert_eq!(next.parent_state.as_deref(), Some("q0"));
        assert_eq!(next.parent, Some(ROOT));
    }

    #[test]
    fn test_move_right_past_the_end_reads_blank() {
        let config = Configuration::initial("q0", &['a'], '_');
        let next = config.apply(&rule('a', 'X', Direction::Right), '_', ROOT);

        assert!(next.right.is_empty());
        assert_eq!(next.head('_'), '_');

        // Writing on the implicit blank materializes it
        let after = next.apply(&rule('_', 'Y', Direction::Right), '_', ROOT);
        assert_eq!(after.left, vec!['X', 'Y']);
        assert!(after.right.is_empty());
    }

    #[test]
    fn test_move_left() {
        let config = Configuration {
            left: vec!['a', 'b'],
            state: "q0".to_string(),
            right: vec!['c', 'd'],
            parent_state: None,
            parent: None,
        };
        let next = config.apply(&rule('c', 'X', Direction::Left), '_', ROOT);

        assert_eq!(next.left, vec!['a']);
        assert_eq!(next.right, vec!['b', 'X', 'd']);
        assert_eq!(next.head('_'), 'b');
    }

    #[test]
    fn test_move_left_at_tape_start_grows_blank() {
        let config = Configuration::initial("q0", &['a'], '_');
        let next = config.apply(&rule('a', 'X', Direction::Left), '_', ROOT);

        assert!(next.left.is_empty());
        assert_eq!(next.right, vec!['_', 'X']);
        assert_eq!(next.head('_'), '_');
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let config = Configuration::initial("q0", &['a', 'b'], '_');
        let snapshot = config.clone();
        let _ = config.apply(&rule('a', 'X', Direction::Right), '_', ROOT);

        assert_eq!(config, snapshot);
    }

    #[test]
    fn test_tape_and_display() {
        let config = Configuration {
            left: vec!['0', '1'],
            state: "q1".to_string(),
            right: vec!['x', '1'],
            parent_state: None,
            parent: None,
        };

        assert_eq!(config.tape(), (vec!['0', '1', 'x', '1'], 2));
        assert_eq!(config.to_string(), "01q1x1");
    }
}
