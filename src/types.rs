//! This module defines the core data structures and types shared by the tracer, including
//! symbols, states, transition rules, terminal statuses, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// A single tape symbol.
pub type Symbol = char;
/// The identifier of a machine state.
pub type StateId = String;

/// The blank symbol used to pad the tape on demand.
pub const BLANK_SYMBOL: Symbol = '_';
/// The maximum allowed size for a machine definition file in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB
/// The step budget used when the caller does not supply one.
pub const DEFAULT_STEP_BUDGET: usize = 10000;

/// Represents the possible directions the head can move after a rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "L"),
            Direction::Right => write!(f, "R"),
        }
    }
}

/// A single transition rule: `(from_state, read_symbol) -> (to_state, write_symbol, direction)`.
///
/// Several rules may share the same `(from_state, read_symbol)` pair; that is exactly
/// where nondeterminism enters the machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionRule {
    /// The state the rule applies in.
    pub from_state: StateId,
    /// The symbol that must be under the head.
    pub read_symbol: Symbol,
    /// The state the machine moves to.
    pub to_state: StateId,
    /// The symbol written over the head cell.
    pub write_symbol: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.from_state, self.read_symbol, self.to_state, self.write_symbol, self.direction
        )
    }
}

/// The terminal status of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Some branch reached the accept state.
    Accepted,
    /// Every branch died before the budget ran out.
    Rejected,
    /// The step budget ran out before acceptance or rejection was decided.
    BudgetExceeded,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Accepted => write!(f, "accepted"),
            Status::Rejected => write!(f, "rejected"),
            Status::BudgetExceeded => write!(f, "budget exceeded"),
        }
    }
}

/// Represents the outcome of exploring a single level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A new level was appended and exploration can continue.
    Continue,
    /// Exploration has finished with the given status.
    Halt(Status),
}

/// Represents the errors that can occur while loading definitions or inspecting results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// Indicates an operation that requires a different simulation outcome,
    /// such as a backtrace on a run that never accepted.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Indicates an error during the parsing of a machine definition.
    #[error("Definition parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a definition that breaks one of its structural invariants.
    #[error("Definition validation error: {0}")]
    ValidationError(String),
    /// Indicates an input string with symbols outside the input alphabet.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates a metric computed over a tree with no levels.
    #[error("Division by zero: the execution tree has no levels")]
    DivisionByZero,
    /// Indicates a failure while rendering a report.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_rule_display_matches_file_format() {
        let rule = TransitionRule {
            from_state: "q0".to_string(),
            read_symbol: 'a',
            to_state: "q1".to_string(),
            write_symbol: 'X',
            direction: Direction::Right,
        };

        assert_eq!(rule.to_string(), "q0,a,q1,X,R");
    }

    #[test]
    fn test_error_display() {
        let error = TraceError::InvalidState("run was rejected".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid state"));
        assert!(error_msg.contains("rejected"));
        assert_eq!(
            TraceError::DivisionByZero.to_string(),
            "Division by zero: the execution tree has no levels"
        );
    }
}
