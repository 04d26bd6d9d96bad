use crate::label::{Label, Value};
use std::ops::AddAssign;

/// Solver parameters.
#[derive(Clone, Debug, Default)]
pub struct SolverParameters {
    /// Maximum number of augmentation iterations.
    ///
    /// Defaults to the number of nodes in the reduced graph plus one,
    /// which is enough for the visit-once set to cover every node.
    pub max_iterations: Option<usize>,
    /// Time limit in seconds, checked between augmentation iterations.
    pub time_limit: Option<f64>,
    /// Whether to suppress output.
    pub quiet: bool,
    /// Whether to print label-level events in addition to iteration summaries.
    pub verbose: bool,
    /// Initial capacity of the label registry.
    pub initial_registry_capacity: Option<usize>,
}

/// Counters of a label-setting search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Number of labels selected for extension.
    pub expanded: usize,
    /// Number of labels inserted, including the root.
    pub generated: usize,
    /// Number of candidates rejected by dominance plus labels removed by dominance.
    pub dominated: usize,
    /// Number of candidates rejected by the resource budget or a repeated visit-once node.
    pub pruned: usize,
}

impl AddAssign for SearchStatistics {
    fn add_assign(&mut self, other: Self) {
        self.expanded += other.expanded;
        self.generated += other.generated;
        self.dominated += other.dominated;
        self.pruned += other.pruned;
    }
}

/// Solution information.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<N, T> {
    /// Elementary path from the source to the target.
    pub path: Vec<N>,
    /// Label of the path.
    ///
    /// The first `n_res` resources are the physical consumption.
    /// The remaining entries are visit indicators of `visit_once`.
    pub label: Label<T>,
    /// Nodes promoted to the visit-once set, in promotion order.
    pub visit_once: Vec<N>,
    /// Number of label-setting searches run.
    pub iterations: usize,
    /// Cost of the path returned by each label-setting search.
    pub relaxation_costs: Vec<T>,
    /// Counters summed over all iterations.
    pub statistics: SearchStatistics,
    /// Elapsed time in seconds.
    pub time: f64,
}

impl<N, T> Solution<N, T>
where
    T: Value,
{
    /// Returns the cost of the path.
    #[inline]
    pub fn cost(&self) -> T {
        self.label.cost
    }

    /// Returns the physical resource consumption of the path.
    #[inline]
    pub fn resources(&self, n_res: usize) -> &[T] {
        self.label.physical_resources(n_res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_add_assign() {
        let mut total = SearchStatistics {
            expanded: 1,
            generated: 2,
            dominated: 3,
            pruned: 4,
        };
        total += SearchStatistics {
            expanded: 10,
            generated: 20,
            dominated: 30,
            pruned: 40,
        };

        assert_eq!(
            total,
            SearchStatistics {
                expanded: 11,
                generated: 22,
                dominated: 33,
                pruned: 44,
            }
        );
    }

    #[test]
    fn test_solution_accessors() {
        let solution = Solution {
            path: vec!['a', 'b'],
            label: Label::new(4, [2, 3, 1]),
            visit_once: vec!['b'],
            iterations: 2,
            relaxation_costs: vec![1, 4],
            statistics: SearchStatistics::default(),
            time: 0.0,
        };

        assert_eq!(solution.cost(), 4);
        assert_eq!(solution.resources(2), &[2, 3]);
    }

    #[test]
    fn test_default_parameters() {
        let parameters = SolverParameters::default();
        assert_eq!(parameters.max_iterations, None);
        assert_eq!(parameters.time_limit, None);
        assert!(!parameters.quiet);
        assert!(!parameters.verbose);
    }
}
