//! This module reconstructs the accepting computation from an explored tree.

use crate::configuration::Configuration;
use crate::tree::SimulationResult;
use crate::types::{Status, TraceError};
use serde::{Deserialize, Serialize};

/// The configurations of one computation, from the start configuration to acceptance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    configurations: Vec<Configuration>,
}

impl Path {
    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Configuration> {
        self.configurations.iter()
    }

    pub fn first(&self) -> Option<&Configuration> {
        self.configurations.first()
    }

    pub fn last(&self) -> Option<&Configuration> {
        self.configurations.last()
    }

    /// Returns the number of configurations on the path.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Returns the number of rule applications on the path.
    pub fn steps(&self) -> usize {
        self.configurations.len().saturating_sub(1)
    }
}

impl From<Vec<Configuration>> for Path {
    fn from(configurations: Vec<Configuration>) -> Self {
        Self { configurations }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Configuration;
    type IntoIter = std::slice::Iter<'a, Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.iter()
    }
}

/// Reconstructs the path from the start configuration to the accepting one.
///
/// When every level holds a single configuration the levels already are the path. Otherwise
/// the parent handles are followed back from the accepting configuration to level 0.
///
/// # Returns
///
/// * `Ok(Path)` running start to accept, with one configuration per level.
/// * `Err(TraceError::InvalidState)` if the run did not accept, or a parent handle
///   does not resolve.
pub fn backtrace(result: &SimulationResult) -> Result<Path, TraceError> {
    if result.status != Status::Accepted {
        return Err(TraceError::InvalidState(format!(
            "backtrace requires an accepted run, but the run was {}",
            result.status
        )));
    }

    let tree = &result.tree;

    if tree.is_linear() {
        let configurations = tree
            .levels()
            .iter()
            .filter_map(|level| level.configurations().first())
            .cloned()
            .collect::<Vec<_>>();

        return Ok(Path::from(configurations));
    }

    let terminal = tree
        .last()
        .and_then(|level| level.configurations().first())
        .ok_or_else(|| TraceError::InvalidState("accepted run has no terminal level".into()))?;

    let mut configurations = vec![terminal.clone()];
    let mut parent = terminal.parent;

    while let Some(handle) = parent {
        let config = tree.get(handle).ok_or_else(|| {
            TraceError::InvalidState(format!(
                "parent handle {}:{} does not resolve",
                handle.level, handle.slot
            ))
        })?;

        configurations.push(config.clone());
        parent = config.parent;
    }

    if configurations.len() != tree.len() {
        return Err(TraceError::InvalidState(format!(
            "backtrace covered {} of {} levels",
            configurations.len(),
            tree.len()
        )));
    }

    configurations.reverse();

    Ok(Path::from(configurations))
}
