use super::label_setting::LabelSettingSearch;
use super::search::{SearchStatistics, Solution, SolverParameters};
use crate::error::EspprcError;
use crate::graph::{NodeId, ResourceGraph};
use crate::label::Value;
use crate::monitor::{LogMonitor, NoOpMonitor, SearchMonitor};
use crate::preprocess::{check_endpoints, check_zero_resource_cycles, reduce, ResourceBounds};
use crate::timer::Timer;
use crate::visit_once::VisitOnceSet;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

/// Solver for the elementary shortest path problem with resource constraints.
///
/// The graph is reduced and the least-resource bounds are computed once in [`Espprc::new`].
/// Each solve then runs label-setting searches, adding the most repeated node of a
/// non-elementary result to the visit-once set, until the returned path is elementary.
///
/// # Examples
///
/// ```
/// use espprc::prelude::*;
///
/// let mut graph = ResourceGraph::new(1);
/// graph.add_edge("A", "B", 1, vec![1]).unwrap();
/// graph.add_edge("B", "C", 1, vec![1]).unwrap();
/// graph.add_edge("A", "C", 5, vec![1]).unwrap();
/// graph.add_edge("C", "D", 1, vec![1]).unwrap();
///
/// let parameters = SolverParameters {
///     quiet: true,
///     ..Default::default()
/// };
/// let mut solver = Espprc::new(&graph, &"A", &"D", &[10], parameters).unwrap();
///
/// let solution = solver.solve().unwrap();
/// assert_eq!(solution.path, vec!["A", "B", "C", "D"]);
/// assert_eq!(solution.cost(), 3);
///
/// // Costs can change between solves, e.g., with new duals in column generation.
/// assert!(solver.set_weight(&"B", &"C", 10));
/// let solution = solver.solve().unwrap();
/// assert_eq!(solution.path, vec!["A", "C", "D"]);
/// assert_eq!(solution.cost(), 6);
/// ```
pub struct Espprc<N, T> {
    graph: ResourceGraph<N, T>,
    bounds: ResourceBounds<T>,
    source: NodeIndex,
    target: NodeIndex,
    max_res: Vec<T>,
    parameters: SolverParameters,
}

impl<N, T> Espprc<N, T>
where
    N: NodeId,
    T: Value,
{
    /// Preprocesses `graph` for paths from `source` to `target` within `max_res`.
    ///
    /// Fails with `ZeroResourceCycle` if the reduced graph has a cycle of arcs that consume
    /// no resource, since the label-setting search would not terminate on it.
    pub fn new(
        graph: &ResourceGraph<N, T>,
        source: &N,
        target: &N,
        max_res: &[T],
        parameters: SolverParameters,
    ) -> Result<Self, EspprcError> {
        let graph = reduce(graph, source, target, max_res)?;
        check_zero_resource_cycles(&graph)?;
        let bounds = ResourceBounds::build(&graph);
        let (source, target) = check_endpoints(&graph, source, target)?;

        Ok(Self {
            graph,
            bounds,
            source,
            target,
            max_res: max_res.to_vec(),
            parameters,
        })
    }

    /// Returns the reduced graph.
    pub fn get_graph(&self) -> &ResourceGraph<N, T> {
        &self.graph
    }

    /// Returns the least-resource bounds of the reduced graph.
    pub fn get_bounds(&self) -> &ResourceBounds<T> {
        &self.bounds
    }

    /// Sets the cost of the edges from `from` to `to`.
    ///
    /// Returns `false` if there is no such edge in the reduced graph,
    /// either because it was never added or because the reduction removed it.
    pub fn set_weight(&mut self, from: &N, to: &N, weight: T) -> bool {
        self.graph.set_weight(from, to, weight).is_ok()
    }

    /// Solves the problem, printing progress unless `quiet` is set.
    pub fn solve(&self) -> Result<Solution<N, T>, EspprcError> {
        if self.parameters.quiet {
            self.solve_with_monitor(&mut NoOpMonitor)
        } else {
            self.solve_with_monitor(&mut LogMonitor::new(self.parameters.verbose))
        }
    }

    /// Solves the problem, reporting events to `monitor`.
    pub fn solve_with_monitor(
        &self,
        monitor: &mut impl SearchMonitor<N, T>,
    ) -> Result<Solution<N, T>, EspprcError> {
        let timer = self
            .parameters
            .time_limit
            .map(Timer::with_time_limit)
            .unwrap_or_default();
        let limit = self
            .parameters
            .max_iterations
            .unwrap_or(self.graph.node_count() + 1);
        let mut visit_once = VisitOnceSet::default();
        let mut relaxation_costs = Vec::new();
        let mut statistics = SearchStatistics::default();

        monitor.on_enter_search(&self.graph);

        for iteration in 1..=limit {
            if timer.check_time_limit() {
                return Err(EspprcError::TimeLimitReached {
                    iterations: iteration - 1,
                });
            }

            monitor.on_iteration_start(iteration, visit_once.len());

            let outcome = LabelSettingSearch::new(
                &self.graph,
                &self.bounds,
                &visit_once,
                self.source,
                self.target,
                &self.max_res,
            )
            .with_registry_capacity(self.parameters.initial_registry_capacity)
            .search(monitor)?;

            statistics += outcome.statistics;
            relaxation_costs.push(outcome.label.cost);

            let path = self.to_node_ids(&outcome.path);
            monitor.on_relaxation_solved(iteration, &path, &outcome.label);

            let (node, multiplicity) = self.most_repeated_node(&outcome.path);

            if multiplicity <= 1 {
                let solution = Solution {
                    path,
                    label: outcome.label,
                    visit_once: self.to_node_ids(visit_once.nodes()),
                    iterations: iteration,
                    relaxation_costs,
                    statistics,
                    time: timer.get_elapsed_time(),
                };
                monitor.on_exit_search(&solution);

                return Ok(solution);
            }

            if !visit_once.push(node) {
                return Err(EspprcError::AugmentationStalled {
                    node: format!("{:?}", self.graph.node_id(node)),
                });
            }

            monitor.on_node_promoted(self.graph.node_id(node), multiplicity);
        }

        Err(EspprcError::IterationLimit { limit })
    }

    /// Returns the node visited most often on `path` with its multiplicity.
    ///
    /// Ties are broken by the smallest node identifier.
    fn most_repeated_node(&self, path: &[NodeIndex]) -> (NodeIndex, usize) {
        path.iter()
            .copied()
            .counts()
            .into_iter()
            .max_by(|(a, a_count), (b, b_count)| {
                a_count
                    .cmp(b_count)
                    .then_with(|| self.graph.node_id(*b).cmp(self.graph.node_id(*a)))
            })
            .unwrap_or((self.source, 0))
    }

    fn to_node_ids(&self, path: &[NodeIndex]) -> Vec<N> {
        path.iter()
            .map(|&index| self.graph.node_id(index).clone())
            .collect()
    }
}

/// Solves the elementary shortest path problem with resource constraints.
///
/// Shorthand for [`Espprc::new`] followed by [`Espprc::solve`].
///
/// # Examples
///
/// ```
/// use espprc::prelude::*;
///
/// let mut graph = ResourceGraph::new(2);
/// graph.add_edge(0, 1, 2.0, vec![1.0, 0.5]).unwrap();
/// graph.add_edge(1, 2, -1.0, vec![1.0, 0.5]).unwrap();
/// graph.add_edge(0, 2, 0.5, vec![3.0, 0.0]).unwrap();
///
/// let parameters = SolverParameters {
///     quiet: true,
///     ..Default::default()
/// };
/// let solution = espprc::solve(&graph, &0, &2, &[2.0, 2.0], parameters).unwrap();
/// assert_eq!(solution.path, vec![0, 1, 2]);
/// assert_eq!(solution.resources(2), &[2.0, 1.0]);
/// ```
pub fn solve<N, T>(
    graph: &ResourceGraph<N, T>,
    source: &N,
    target: &N,
    max_res: &[T],
    parameters: SolverParameters,
) -> Result<Solution<N, T>, EspprcError>
where
    N: NodeId,
    T: Value,
{
    Espprc::new(graph, source, target, max_res, parameters)?.solve()
}
