//! Graph reduction and least-resource bounds.
//!
//! Both steps only depend on resource consumptions, so their results stay valid when edge costs change.

use crate::algorithms::{collect_nodes_within_budget, compute_least_costs_from};
use crate::error::EspprcError;
use crate::graph::{NodeId, ResourceGraph};
use crate::label::Value;
use fixedbitset::FixedBitSet;
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::visit::{EdgeRef, Reversed};

/// Removes every node that cannot lie on a path from `source` to `target` within the budget.
///
/// A node survives if, for every resource, it is reachable from `source` and reaches `target`
/// within that resource's budget. `source` and `target` always survive.
/// The result is the subgraph induced by the surviving nodes.
///
/// # Examples
///
/// ```
/// use espprc::{reduce, ResourceGraph};
///
/// let mut graph = ResourceGraph::new(1);
/// graph.add_edge("s", "a", 1, vec![1]).unwrap();
/// graph.add_edge("a", "t", 1, vec![1]).unwrap();
/// graph.add_edge("s", "b", 1, vec![5]).unwrap();
/// graph.add_edge("b", "t", 1, vec![1]).unwrap();
///
/// let reduced = reduce(&graph, &"s", &"t", &[3]).unwrap();
/// assert_eq!(reduced.node_count(), 3);
/// assert!(reduced.index_of(&"b").is_none());
/// assert!(reduced.contains_edge(&"s", &"a"));
/// ```
pub fn reduce<N, T>(
    graph: &ResourceGraph<N, T>,
    source: &N,
    target: &N,
    max_res: &[T],
) -> Result<ResourceGraph<N, T>, EspprcError>
where
    N: NodeId,
    T: Value,
{
    let (source, target) = check_endpoints(graph, source, target)?;
    check_budget(graph, max_res)?;

    let inner = graph.inner();
    let mut reachable = FixedBitSet::with_capacity(inner.node_count());
    reachable.insert_range(..);

    for (r, &budget) in max_res.iter().enumerate() {
        let forward =
            collect_nodes_within_budget(inner, source, budget, |e| e.weight().res_cost[r]);
        reachable.intersect_with(&forward);

        let backward =
            collect_nodes_within_budget(Reversed(inner), target, budget, |e| {
                e.weight().res_cost[r]
            });
        reachable.intersect_with(&backward);
    }

    reachable.insert(source.index());
    reachable.insert(target.index());

    let reduced = inner.filter_map(
        |index, node| reachable.contains(index.index()).then(|| node.clone()),
        |_, edge| Some(edge.clone()),
    );

    Ok(ResourceGraph::from_graph(reduced, graph.n_res()))
}

pub(crate) fn check_endpoints<N, T>(
    graph: &ResourceGraph<N, T>,
    source: &N,
    target: &N,
) -> Result<(NodeIndex, NodeIndex), EspprcError>
where
    N: NodeId,
    T: Value,
{
    if source == target {
        return Err(EspprcError::InvalidEndpoints {
            node: format!("{source:?}"),
        });
    }

    Ok((graph.require(source)?, graph.require(target)?))
}

pub(crate) fn check_budget<N, T>(
    graph: &ResourceGraph<N, T>,
    max_res: &[T],
) -> Result<(), EspprcError>
where
    N: NodeId,
    T: Value,
{
    if max_res.len() != graph.n_res() {
        return Err(EspprcError::DimensionMismatch {
            expected: graph.n_res(),
            found: max_res.len(),
        });
    }

    Ok(())
}

/// Fails if `graph` has a cycle whose arcs consume nothing in every resource.
///
/// Only consumptions are inspected, so the check stays valid when costs change.
pub(crate) fn check_zero_resource_cycles<N, T>(graph: &ResourceGraph<N, T>) -> Result<(), EspprcError>
where
    N: NodeId,
    T: Value,
{
    let free = graph.inner().filter_map(
        |_, _| Some(()),
        |_, edge| edge.res_cost.iter().all(|&r| r == T::zero()).then_some(()),
    );

    toposort(&free, None)
        .map(|_| ())
        .map_err(|cycle| EspprcError::ZeroResourceCycle {
            node: format!("{:?}", graph.node_id(cycle.node_id())),
        })
}

/// Least resource consumption between all pairs of nodes, one table per resource.
///
/// Missing entries (no path) and the diagonal read as zero, so every value is an admissible
/// lower bound on the consumption of the remaining path.
#[derive(Clone, Debug)]
pub struct ResourceBounds<T> {
    tables: Vec<Vec<Vec<Option<T>>>>,
}

impl<T> ResourceBounds<T>
where
    T: Value,
{
    /// Solves the all-pairs least-resource problem for each resource of `graph`.
    ///
    /// Consumptions are non-negative, so one Dijkstra run per node and resource suffices.
    ///
    /// # Examples
    ///
    /// ```
    /// use espprc::{ResourceBounds, ResourceGraph};
    ///
    /// let mut graph = ResourceGraph::new(2);
    /// graph.add_edge("a", "b", 0, vec![1, 4]).unwrap();
    /// graph.add_edge("b", "c", 0, vec![1, 4]).unwrap();
    /// graph.add_edge("a", "c", 0, vec![3, 1]).unwrap();
    ///
    /// let bounds = ResourceBounds::build(&graph);
    /// let a = graph.index_of(&"a").unwrap();
    /// let c = graph.index_of(&"c").unwrap();
    ///
    /// assert_eq!(bounds.lower_bound(0, a, c), 2);
    /// assert_eq!(bounds.lower_bound(1, a, c), 1);
    /// assert_eq!(bounds.get(0, c, a), None);
    /// assert_eq!(bounds.lower_bound(0, c, a), 0);
    /// ```
    pub fn build<N>(graph: &ResourceGraph<N, T>) -> Self
    where
        N: NodeId,
    {
        let inner = graph.inner();
        let tables = (0..graph.n_res())
            .map(|r| {
                inner
                    .node_indices()
                    .map(|u| compute_least_costs_from(inner, u, |e| e.weight().res_cost[r]))
                    .collect()
            })
            .collect();

        Self { tables }
    }

    #[inline]
    pub fn n_res(&self) -> usize {
        self.tables.len()
    }

    /// Returns the least consumption of `resource` from `from` to `to`, or `None` if there is no path.
    #[inline]
    pub fn get(&self, resource: usize, from: NodeIndex, to: NodeIndex) -> Option<T> {
        self.tables[resource][from.index()][to.index()]
    }

    /// Returns the lower bound on the consumption of `resource` from `from` to `to`.
    #[inline]
    pub fn lower_bound(&self, resource: usize, from: NodeIndex, to: NodeIndex) -> T {
        if from == to {
            return T::zero();
        }

        self.get(resource, from, to).unwrap_or_else(T::zero)
    }
}
