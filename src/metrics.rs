//! Branching metrics computed over an explored tree.

use crate::tree::ExecutionTree;
use crate::types::TraceError;

/// Returns the average number of configurations per level.
///
/// A fully deterministic trace scores exactly `1.0`.
///
/// # Returns
///
/// * `Ok(f64)` with the average.
/// * `Err(TraceError::DivisionByZero)` if the tree has no levels.
pub fn degree_of_nondeterminism(tree: &ExecutionTree) -> Result<f64, TraceError> {
    if tree.is_empty() {
        return Err(TraceError::DivisionByZero);
    }

    Ok(tree.total_configurations() as f64 / tree.len() as f64)
}

/// Returns the branching factor of every level transition `k -> k + 1`, measured as the
/// successors generated from level `k` divided by its width.
///
/// Successors dropped by the accept short-circuit still count, so a level that forked
/// into two branches reports `2.0` even when only the accepting one was stored.
pub fn branching_factors(tree: &ExecutionTree) -> Vec<f64> {
    let expanded = tree.len().saturating_sub(1);

    tree.levels()
        .iter()
        .take(expanded)
        .map(|level| level.generated() as f64 / level.len() as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::tree::Level;

    fn config(state: &str) -> Configuration {
        Configuration::initial(state, &['a'], '_')
    }

    #[test]
    fn test_degree_of_linear_tree_is_one() {
        let mut tree = ExecutionTree::new(config("q0"));
        tree.push(Level::singleton(config("q1")));
        tree.push(Level::singleton(config("q2")));

        assert_eq!(degree_of_nondeterminism(&tree).unwrap(), 1.0);
    }

    #[test]
    fn test_degree_averages_level_widths() {
        let mut tree = ExecutionTree::new(config("q0"));
        tree.push(Level::new(vec![config("q1"), config("q2")]));
        tree.push(Level::new(vec![config("q1"), config("q2"), config("q3")]));

        assert_eq!(degree_of_nondeterminism(&tree).unwrap(), 2.0);
    }

    #[test]
    fn test_degree_of_empty_tree() {
        assert_eq!(
            degree_of_nondeterminism(&ExecutionTree::default()),
            Err(TraceError::DivisionByZero)
        );
    }

    #[test]
    fn test_branching_factors() {
        let mut tree = ExecutionTree::new(config("q0"));
        tree.last_mut().unwrap().set_generated(2);

        let mut level = Level::new(vec![config("q1"), config("q2")]);
        level.set_generated(3);
        tree.push(level);
        tree.push(Level::singleton(config("q3")));

        assert_eq!(branching_factors(&tree), vec![2.0, 1.5]);
        assert!(branching_factors(&ExecutionTree::default()).is_empty());
    }
}
