//! This module defines the execution tree produced by exploration: an ordered sequence of
//! levels, each owning the configurations reachable in exactly `k` rule applications.

use crate::configuration::{Configuration, ParentHandle};
use crate::types::Status;
use serde::{Deserialize, Serialize};

/// The configurations reachable in exactly `k` rule applications, `k` being the level index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    configurations: Vec<Configuration>,
    /// Number of successors generated while expanding this level.
    generated: usize,
}

impl Level {
    pub fn new(configurations: Vec<Configuration>) -> Self {
        Self {
            configurations,
            generated: 0,
        }
    }

    pub fn singleton(configuration: Configuration) -> Self {
        Self::new(vec![configuration])
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn get(&self, slot: usize) -> Option<&Configuration> {
        self.configurations.get(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Configuration> {
        self.configurations.iter()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Returns how many successors were generated from this level, including any that
    /// were dropped by the accept short-circuit.
    pub fn generated(&self) -> usize {
        self.generated
    }

    pub(crate) fn set_generated(&mut self, generated: usize) {
        self.generated = generated;
    }
}

impl<'a> IntoIterator for &'a Level {
    type Item = &'a Configuration;
    type IntoIter = std::slice::Iter<'a, Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.iter()
    }
}

/// The ordered sequence of explored levels. Level 0 holds the start configuration.
///
/// Empty levels are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTree {
    levels: Vec<Level>,
}

impl ExecutionTree {
    /// Creates a tree whose level 0 is the given root configuration.
    pub fn new(root: Configuration) -> Self {
        Self {
            levels: vec![Level::singleton(root)],
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn last(&self) -> Option<&Level> {
        self.levels.last()
    }

    /// Returns the number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the total number of configurations across all levels.
    pub fn total_configurations(&self) -> usize {
        self.levels.iter().map(Level::len).sum()
    }

    /// Resolves a parent handle to the configuration it points at.
    pub fn get(&self, handle: ParentHandle) -> Option<&Configuration> {
        self.levels
            .get(handle.level)
            .and_then(|level| level.get(handle.slot))
    }

    /// Checks whether every level holds exactly one configuration.
    pub fn is_linear(&self) -> bool {
        self.levels.iter().all(|level| level.len() == 1)
    }

    /// Appends a level. Empty levels are ignored.
    pub(crate) fn push(&mut self, level: Level) {
        if !level.is_empty() {
            self.levels.push(level);
        }
    }

    /// Replaces the last level, used when a terminal configuration supersedes its siblings.
    pub(crate) fn replace_last(&mut self, level: Level) {
        if let Some(last) = self.levels.last_mut() {
            *last = level;
        }
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Level> {
        self.levels.last_mut()
    }
}

/// The outcome of a run: terminal status, step count and the explored tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub status: Status,
    /// Number of individual rule applications performed.
    pub steps_simulated: usize,
    pub tree: ExecutionTree,
}

impl SimulationResult {
    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accepted
    }

    /// Returns the depth of the explored tree in rule applications.
    pub fn depth(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }
}
