//! This module defines the `TuringMachine` struct, which explores the configurations of a
//! (possibly nondeterministic) single-tape Turing machine breadth-first, one level at a time,
//! under a step budget.

use crate::configuration::{Configuration, ParentHandle};
use crate::definition::MachineDefinition;
use crate::matcher::TransitionMatcher;
use crate::tree::{ExecutionTree, Level, SimulationResult};
use crate::types::{Status, Step, Symbol};
use tracing::{debug, trace};

/// Explores every computation branch of a machine on one input.
///
/// Each call to [`step`](TuringMachine::step) expands the whole current level before the next
/// one is started, so level `k` always holds exactly the configurations reachable in `k` rule
/// applications.
pub struct TuringMachine<'a> {
    definition: &'a MachineDefinition,
    matcher: TransitionMatcher<'a>,
    tree: ExecutionTree,
    budget: usize,
    step_count: usize,
    status: Option<Status>,
}

impl<'a> TuringMachine<'a> {
    /// Creates a new `TuringMachine` positioned at level 0.
    ///
    /// # Arguments
    ///
    /// * `definition` - The validated machine definition.
    /// * `input` - The input string, already checked against the input alphabet.
    /// * `budget` - The maximum number of rule applications to perform.
    pub fn new(definition: &'a MachineDefinition, input: &[Symbol], budget: usize) -> Self {
        let root = Configuration::initial(definition.start.as_str(), input, definition.blank());

        Self {
            definition,
            matcher: TransitionMatcher::new(definition),
            tree: ExecutionTree::new(root),
            budget,
            step_count: 0,
            status: None,
        }
    }

    /// Expands the current level into the next one.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a new level was appended.
    /// * `Step::Halt(status)` once the run is decided; later calls return the same status.
    pub fn step(&mut self) -> Step {
        if let Some(status) = self.status {
            return Step::Halt(status);
        }

        if self.step_count >= self.budget {
            return self.halt(Status::BudgetExceeded);
        }

        let blank = self.definition.blank();
        let level_index = self.tree.len() - 1;
        let Some(current) = self.tree.last() else {
            return self.halt(Status::Rejected);
        };

        // Accept is absorbing: it is checked before any rule is tried.
        if let Some(config) = current
            .iter()
            .find(|config| config.state == self.definition.accept)
        {
            let terminal = Level::singleton(config.clone());
            self.tree.replace_last(terminal);
            return self.halt(Status::Accepted);
        }

        debug!(
            level = level_index,
            width = current.len(),
            steps = self.step_count,
            "expanding level"
        );

        let mut next = Vec::new();
        let mut exhausted = false;

        'level: for (slot, config) in current.iter().enumerate() {
            if config.state == self.definition.reject {
                continue;
            }

            let parent = ParentHandle {
                level: level_index,
                slot,
            };

            for rule in self.matcher.matches(&config.state, config.head(blank)) {
                if self.step_count >= self.budget {
                    exhausted = true;
                    break 'level;
                }

                let successor = config.apply(rule, blank, parent);
                trace!(from = %config, rule = %rule, to = %successor, "applied rule");

                next.push(successor);
                self.step_count += 1;
            }
        }

        if let Some(level) = self.tree.last_mut() {
            level.set_generated(next.len());
        }

        let accepted = next
            .iter()
            .position(|config| config.state == self.definition.accept);

        if let Some(position) = accepted {
            let terminal = next.swap_remove(position);
            self.tree.push(Level::singleton(terminal));
            return self.halt(Status::Accepted);
        }

        if next.is_empty() {
            // Unexpanded branches may remain when the budget ran out mid-level.
            let status = if exhausted {
                Status::BudgetExceeded
            } else {
                Status::Rejected
            };
            return self.halt(status);
        }

        self.tree.push(Level::new(next));

        Step::Continue
    }

    /// Runs the machine until it accepts, rejects, or exhausts its budget.
    pub fn run(mut self) -> SimulationResult {
        let status = loop {
            match self.step() {
                Step::Continue => continue,
                Step::Halt(status) => break status,
            }
        };

        SimulationResult {
            status,
            steps_simulated: self.step_count,
            tree: self.tree,
        }
    }

    /// Returns the terminal status, or `None` while exploration is still running.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Returns the total number of rule applications performed so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the levels explored so far.
    pub fn tree(&self) -> &ExecutionTree {
        &self.tree
    }

    /// Returns the step budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    fn halt(&mut self, status: Status) -> Step {
        debug!(
            %status,
            steps = self.step_count,
            levels = self.tree.len(),
            "exploration finished"
        );

        self.status = Some(status);
        Step::Halt(status)
    }
}

/// Explores `definition` on `input` with the given step budget.
pub fn simulate(definition: &MachineDefinition, input: &[Symbol], budget: usize) -> SimulationResult {
    TuringMachine::new(definition, input, budget).run()
}
