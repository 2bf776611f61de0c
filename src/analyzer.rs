//! This module provides functions for checking machine definitions against their structural
//! invariants before any exploration happens, and for validating input strings against the
//! input alphabet.

use crate::definition::MachineDefinition;
use crate::types::{Symbol, TraceError, BLANK_SYMBOL};
use std::collections::HashSet;

/// Represents the invariant violations that can be found in a machine definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The tape alphabet does not contain the blank symbol.
    MissingBlank,
    /// The input alphabet contains symbols that are not in the tape alphabet.
    InputNotInTapeAlphabet(Vec<Symbol>),
    /// The input alphabet contains the blank symbol.
    BlankInInputAlphabet,
    /// A distinguished state (start, accept or reject) is not a declared state.
    UndeclaredState(String),
    /// The accept and reject states are the same.
    AcceptEqualsReject(String),
    /// Rules reference states that are not declared.
    UndeclaredRuleStates(Vec<String>),
    /// Rules read or write symbols that are not in the tape alphabet.
    UndeclaredRuleSymbols(Vec<Symbol>),
}

impl From<AnalysisError> for TraceError {
    /// Converts an `AnalysisError` into a `TraceError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::MissingBlank => TraceError::ValidationError(format!(
                "Tape alphabet must contain the blank symbol '{}'",
                BLANK_SYMBOL
            )),
            AnalysisError::InputNotInTapeAlphabet(symbols) => TraceError::ValidationError(
                format!("Input symbols missing from tape alphabet: {:?}", symbols),
            ),
            AnalysisError::BlankInInputAlphabet => TraceError::ValidationError(format!(
                "Input alphabet must not contain the blank symbol '{}'",
                BLANK_SYMBOL
            )),
            AnalysisError::UndeclaredState(state) => {
                TraceError::ValidationError(format!("Undeclared state: {}", state))
            }
            AnalysisError::AcceptEqualsReject(state) => TraceError::ValidationError(format!(
                "Accept and reject states must differ: {}",
                state
            )),
            AnalysisError::UndeclaredRuleStates(states) => TraceError::ValidationError(
                format!("Rules reference undeclared states: {:?}", states),
            ),
            AnalysisError::UndeclaredRuleSymbols(symbols) => TraceError::ValidationError(
                format!("Rules reference symbols outside the tape alphabet: {:?}", symbols),
            ),
        }
    }
}

/// Analyzes a `MachineDefinition` for invariant violations.
///
/// The checks run in a fixed order and the first violation found is reported.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TraceError::ValidationError)` if any invariant is violated.
pub fn analyze(definition: &MachineDefinition) -> Result<(), TraceError> {
    let errors = [
        check_blank,
        check_input_alphabet,
        check_distinguished_states,
        check_rule_states,
        check_rule_symbols,
    ]
    .iter()
    .filter_map(|f| f(definition).err())
    .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(first_error) => Err(first_error.into()),
        None => Ok(()),
    }
}

/// Validates an input string against the definition's input alphabet.
///
/// The blank symbol is also accepted so that inputs may carry explicit padding.
///
/// # Returns
///
/// * `Ok(Vec<Symbol>)` with the input as a symbol sequence.
/// * `Err(TraceError::InvalidInput)` naming the first offending symbol.
pub fn validate_input(
    definition: &MachineDefinition,
    input: &str,
) -> Result<Vec<Symbol>, TraceError> {
    input
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if c == BLANK_SYMBOL || definition.input_alphabet.contains(&c) {
                Ok(c)
            } else {
                Err(TraceError::InvalidInput(format!(
                    "Symbol '{}' at position {} is not in the input alphabet {:?}",
                    c, i, definition.input_alphabet
                )))
            }
        })
        .collect()
}

/// Checks that the blank symbol is part of the tape alphabet.
fn check_blank(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    if !definition.tape_alphabet.contains(&BLANK_SYMBOL) {
        return Err(AnalysisError::MissingBlank);
    }

    Ok(())
}

/// Checks that the input alphabet is a blank-free subset of the tape alphabet.
fn check_input_alphabet(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    if definition.input_alphabet.contains(&BLANK_SYMBOL) {
        return Err(AnalysisError::BlankInInputAlphabet);
    }

    let missing: Vec<Symbol> = definition
        .input_alphabet
        .iter()
        .filter(|symbol| !definition.tape_alphabet.contains(symbol))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::InputNotInTapeAlphabet(missing));
    }

    Ok(())
}

/// Checks that start, accept and reject are declared, and that accept differs from reject.
fn check_distinguished_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    for state in [&definition.start, &definition.accept, &definition.reject] {
        if !definition.states.contains(state) {
            return Err(AnalysisError::UndeclaredState(state.clone()));
        }
    }

    if definition.accept == definition.reject {
        return Err(AnalysisError::AcceptEqualsReject(definition.accept.clone()));
    }

    Ok(())
}

/// Checks that every rule's source and target states are declared.
fn check_rule_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let declared: HashSet<&str> = definition.states.iter().map(String::as_str).collect();

    let mut undeclared: Vec<String> = definition
        .rules
        .iter()
        .flat_map(|rule| [rule.from_state.as_str(), rule.to_state.as_str()])
        .filter(|state| !declared.contains(state))
        .map(str::to_string)
        .collect();

    if !undeclared.is_empty() {
        undeclared.sort(); // Sort for deterministic output
        undeclared.dedup();
        return Err(AnalysisError::UndeclaredRuleStates(undeclared));
    }

    Ok(())
}

/// Checks that every rule's read and write symbols are in the tape alphabet.
fn check_rule_symbols(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut undeclared: Vec<Symbol> = definition
        .rules
        .iter()
        .flat_map(|rule| [rule.read_symbol, rule.write_symbol])
        .filter(|symbol| !definition.tape_alphabet.contains(symbol))
        .collect();

    if !undeclared.is_empty() {
        undeclared.sort();
        undeclared.dedup();
        return Err(AnalysisError::UndeclaredRuleSymbols(undeclared));
    }

    Ok(())
}
