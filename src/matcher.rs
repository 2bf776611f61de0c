//! This module provides `TransitionMatcher`, which finds the rules applicable to a given
//! state and head symbol.

use crate::definition::MachineDefinition;
use crate::types::{Symbol, TransitionRule};
use std::collections::HashMap;

/// Indexes a definition's rules by `(from_state, read_symbol)`.
///
/// Each bucket keeps the rules in their declaration order, so enumeration is reproducible.
pub struct TransitionMatcher<'a> {
    index: HashMap<&'a str, HashMap<Symbol, Vec<&'a TransitionRule>>>,
}

impl<'a> TransitionMatcher<'a> {
    /// Builds the index for `definition`.
    pub fn new(definition: &'a MachineDefinition) -> Self {
        let mut index: HashMap<&'a str, HashMap<Symbol, Vec<&'a TransitionRule>>> =
            HashMap::new();

        for rule in &definition.rules {
            index
                .entry(rule.from_state.as_str())
                .or_default()
                .entry(rule.read_symbol)
                .or_default()
                .push(rule);
        }

        Self { index }
    }

    /// Returns the rules with `from_state == state` and `read_symbol == symbol`.
    ///
    /// An empty slice means no rule applies; the caller treats that as an implicit
    /// transition to the reject state.
    pub fn matches(&self, state: &str, symbol: Symbol) -> &[&'a TransitionRule] {
        self.index
            .get(state)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
