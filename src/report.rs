//! This module assembles the summary of a run for display, either in the fixed-width text
//! layout or as JSON.

use crate::backtrace::backtrace;
use crate::definition::MachineDefinition;
use crate::metrics::degree_of_nondeterminism;
use crate::tree::SimulationResult;
use crate::types::{Status, TraceError};
use serde::Serialize;
use std::fmt;

/// Everything needed to print the outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub name: String,
    pub nondeterministic: bool,
    pub input: String,
    pub status: Status,
    pub transitions_simulated: usize,
    pub degree_of_nondeterminism: f64,
    /// Number of rule applications from the start to the last explored level.
    pub depth: usize,
    /// The accepting computation, one `left state right` string per configuration.
    pub path: Option<Vec<String>>,
}

impl Report {
    /// Builds a report for `result`, reconstructing the accepting path when there is one.
    pub fn new(
        definition: &MachineDefinition,
        input: &str,
        result: &SimulationResult,
    ) -> Result<Self, TraceError> {
        let path = if result.is_accepted() {
            Some(
                backtrace(result)?
                    .iter()
                    .map(|config| config.to_string())
                    .collect(),
            )
        } else {
            None
        };

        Ok(Self {
            name: definition.name.clone(),
            nondeterministic: definition.is_nondeterministic(),
            input: input.to_string(),
            status: result.status,
            transitions_simulated: result.steps_simulated,
            degree_of_nondeterminism: degree_of_nondeterminism(&result.tree)?,
            depth: result.depth(),
            path,
        })
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TraceError> {
        serde_json::to_string_pretty(self).map_err(|e| TraceError::SerializationError(e.to_string()))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<25}: {}", "Name", self.name)?;
        writeln!(f, "{:<25}: {}", "Nondeterministic?", self.nondeterministic)?;
        writeln!(f, "{:<25}: {}", "String", self.input)?;
        writeln!(f, "{:<25}: {}", "Transitions Simulated", self.transitions_simulated)?;
        writeln!(
            f,
            "{:<25}: {:.3}",
            "Degree of Nondeterminism", self.degree_of_nondeterminism
        )?;

        match self.status {
            Status::Accepted => {
                writeln!(f, "{:<25}: {} steps", "Path to accept", self.depth)?;
                writeln!(f)?;
                writeln!(f, "Path:")?;
                for line in self.path.iter().flatten() {
                    writeln!(f, "{}", line)?;
                }
            }
            Status::BudgetExceeded => {
                writeln!(
                    f,
                    "{:<25}: {} transitions",
                    "Execution stopped after", self.transitions_simulated
                )?;
            }
            Status::Rejected => {
                writeln!(f, "{:<25}: {} steps", "Path to reject", self.depth)?;
            }
        }

        Ok(())
    }
}
