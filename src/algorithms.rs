//! Graph algorithms used for preprocessing.

use fixedbitset::FixedBitSet;
use petgraph::algo::{dijkstra, Measure};
use petgraph::visit::{IntoEdges, NodeIndexable, Visitable};
use std::hash::Hash;

/// Collects the nodes whose shortest distance from `start` is at most `budget`.
///
/// Edge lengths are given by `length` and must be non-negative.
/// The result is indexed by `NodeIndexable::to_index`.
///
/// # Examples
///
/// ```
/// use espprc::algorithms;
/// use petgraph::graph::DiGraph;
/// use petgraph::visit::{EdgeRef, Reversed};
///
/// let mut graph = DiGraph::<(), [u32; 2]>::new();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// let c = graph.add_node(());
/// graph.add_edge(a, b, [1, 5]);
/// graph.add_edge(b, c, [1, 1]);
///
/// let forward = algorithms::collect_nodes_within_budget(&graph, a, 2, |e| e.weight()[0]);
/// assert_eq!(forward.ones().collect::<Vec<_>>(), vec![0, 1, 2]);
///
/// let forward = algorithms::collect_nodes_within_budget(&graph, a, 2, |e| e.weight()[1]);
/// assert_eq!(forward.ones().collect::<Vec<_>>(), vec![0]);
///
/// let backward =
///     algorithms::collect_nodes_within_budget(Reversed(&graph), c, 1, |e| e.weight()[0]);
/// assert_eq!(backward.ones().collect::<Vec<_>>(), vec![1, 2]);
/// ```
pub fn collect_nodes_within_budget<G, F, T>(
    graph: G,
    start: G::NodeId,
    budget: T,
    length: F,
) -> FixedBitSet
where
    G: IntoEdges + Visitable + NodeIndexable,
    G::NodeId: Eq + Hash,
    F: FnMut(G::EdgeRef) -> T,
    T: Measure + Copy,
{
    let mut reachable = FixedBitSet::with_capacity(graph.node_bound());

    for (node, distance) in dijkstra(graph, start, None, length) {
        if distance <= budget {
            reachable.insert(graph.to_index(node));
        }
    }

    reachable
}

/// Computes the least cost from `start` to every node.
///
/// Edge lengths are given by `length` and must be non-negative.
/// The result is indexed by `NodeIndexable::to_index`, with `None` for nodes not reachable from `start`.
///
/// # Examples
///
/// ```
/// use espprc::algorithms;
/// use petgraph::graph::DiGraph;
/// use petgraph::visit::EdgeRef;
///
/// let mut graph = DiGraph::<(), u32>::new();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// let c = graph.add_node(());
/// let d = graph.add_node(());
/// graph.add_edge(a, b, 2);
/// graph.add_edge(b, c, 3);
/// graph.add_edge(a, c, 9);
/// graph.add_edge(d, a, 1);
///
/// let costs = algorithms::compute_least_costs_from(&graph, a, |e| *e.weight());
/// assert_eq!(costs, vec![Some(0), Some(2), Some(5), None]);
/// ```
pub fn compute_least_costs_from<G, F, T>(graph: G, start: G::NodeId, length: F) -> Vec<Option<T>>
where
    G: IntoEdges + Visitable + NodeIndexable,
    G::NodeId: Eq + Hash,
    F: FnMut(G::EdgeRef) -> T,
    T: Measure + Copy,
{
    let mut costs = vec![None; graph.node_bound()];

    for (node, cost) in dijkstra(graph, start, None, length) {
        costs[graph.to_index(node)] = Some(cost);
    }

    costs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use petgraph::graph::DiGraph;
    use petgraph::visit::{EdgeRef, Reversed};

    #[test]
    fn test_collect_nodes_within_budget_excludes_unreachable() {
        let mut graph = DiGraph::<(), f64>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let d = graph.add_node(());
        graph.add_edge(a, b, 0.5);
        graph.add_edge(b, c, 0.75);
        graph.add_edge(d, a, 0.0);

        let reachable = collect_nodes_within_budget(&graph, a, 1.0, |e| *e.weight());
        assert!(reachable.contains(a.index()));
        assert!(reachable.contains(b.index()));
        assert!(!reachable.contains(c.index()));
        assert!(!reachable.contains(d.index()));
        assert_eq!(reachable.len(), 4);
    }

    #[test]
    fn test_collect_nodes_within_budget_reversed() {
        let mut graph = DiGraph::<(), u32>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 2);
        graph.add_edge(b, c, 2);

        let reachable = collect_nodes_within_budget(Reversed(&graph), c, 3, |e| *e.weight());
        assert_eq!(reachable.ones().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_compute_least_costs_from_takes_cheapest_parallel_edge() {
        let mut graph = DiGraph::<(), u32>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, 5);
        graph.add_edge(a, b, 2);
        graph.add_edge(b, a, 0);

        let costs = compute_least_costs_from(&graph, a, |e| *e.weight());
        assert_eq!(costs, vec![Some(0), Some(2)]);
        let costs = compute_least_costs_from(&graph, b, |e| *e.weight());
        assert_eq!(costs, vec![Some(0), Some(0)]);
    }

    #[test]
    fn test_compute_least_costs_from_float() {
        let mut graph = DiGraph::<(), f64>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 0.5);
        graph.add_edge(b, c, 0.25);
        graph.add_edge(a, c, 2.0);

        let costs = compute_least_costs_from(Reversed(&graph), c, |e| *e.weight());
        assert_relative_eq!(costs[0].unwrap(), 0.75);
        assert_relative_eq!(costs[1].unwrap(), 0.25);
        assert_relative_eq!(costs[2].unwrap(), 0.0);
    }
}
