//! This crate traces the execution of (possibly nondeterministic) single-tape Turing machines.
//! It includes modules for parsing and validating machine definitions, exploring every
//! computation branch breadth-first under a step budget, reconstructing the accepting path,
//! and summarizing how much the machine branched.

pub mod analyzer;
pub mod backtrace;
pub mod configuration;
pub mod definition;
pub mod loader;
pub mod machine;
pub mod matcher;
pub mod metrics;
pub mod parser;
pub mod programs;
pub mod report;
pub mod tree;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` and `validate_input` functions and the `AnalysisError` enum.
pub use analyzer::{analyze, validate_input, AnalysisError};
/// Re-exports the backtrace entry point and the `Path` it produces.
pub use backtrace::{backtrace, Path};
/// Re-exports the `Configuration` snapshot and its parent handle.
pub use configuration::{Configuration, ParentHandle};
/// Re-exports the `MachineDefinition` struct.
pub use definition::MachineDefinition;
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the exploration engine.
pub use machine::{simulate, TuringMachine};
/// Re-exports the `TransitionMatcher` struct.
pub use matcher::TransitionMatcher;
/// Re-exports the branching metrics.
pub use metrics::{branching_factors, degree_of_nondeterminism};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `MachineCatalog` and `MACHINES` from the programs module.
pub use programs::{MachineCatalog, MACHINES};
/// Re-exports the `Report` struct.
pub use report::Report;
/// Re-exports the execution tree types.
pub use tree::{ExecutionTree, Level, SimulationResult};
/// Re-exports the shared types and constants.
pub use types::{
    Direction, StateId, Status, Step, Symbol, TraceError, TransitionRule, BLANK_SYMBOL,
    DEFAULT_STEP_BUDGET, MAX_DEFINITION_SIZE,
};
