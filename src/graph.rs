use crate::error::EspprcError;
use crate::label::Value;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for node identifiers.
///
/// Identifiers are opaque to the solver. `Ord` is only used to break ties deterministically.
pub trait NodeId: Clone + Eq + Hash + Ord + Debug {}

impl<N> NodeId for N where N: Clone + Eq + Hash + Ord + Debug {}

/// Data attached to an edge: its cost and its resource consumption.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    /// Cost of traversing the edge.
    pub weight: T,
    /// Consumption of each resource, of length `n_res`.
    pub res_cost: Vec<T>,
}

/// Directed graph whose edges carry a cost and a resource consumption vector.
///
/// # Examples
///
/// ```
/// use espprc::ResourceGraph;
///
/// let mut graph = ResourceGraph::new(1);
/// graph.add_edge("A", "B", 1, vec![1]).unwrap();
/// graph.add_edge("B", "C", 2, vec![3]).unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.contains_edge(&"A", &"B"));
/// assert!(!graph.contains_edge(&"B", &"A"));
/// assert!(graph.add_edge("C", "A", 1, vec![1, 2]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ResourceGraph<N, T> {
    graph: DiGraph<N, Edge<T>>,
    indices: FxHashMap<N, NodeIndex>,
    n_res: usize,
}

impl<N, T> ResourceGraph<N, T> {
    /// Returns the number of resources.
    #[inline]
    pub fn n_res(&self) -> usize {
        self.n_res
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the identifier of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a node of this graph.
    #[inline]
    pub fn node_id(&self, index: NodeIndex) -> &N {
        &self.graph[index]
    }

    /// Returns the identifiers of all nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Returns the underlying `petgraph` graph.
    #[inline]
    pub fn inner(&self) -> &DiGraph<N, Edge<T>> {
        &self.graph
    }
}

impl<N, T> ResourceGraph<N, T>
where
    N: NodeId,
    T: Value,
{
    /// Creates an empty graph with `n_res` resources.
    pub fn new(n_res: usize) -> Self {
        Self {
            graph: DiGraph::new(),
            indices: FxHashMap::default(),
            n_res,
        }
    }

    /// Creates an empty graph with preallocated space for nodes and edges.
    pub fn with_capacity(n_res: usize, nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            indices: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            n_res,
        }
    }

    pub(crate) fn from_graph(graph: DiGraph<N, Edge<T>>, n_res: usize) -> Self {
        let indices = graph
            .node_indices()
            .map(|index| (graph[index].clone(), index))
            .collect();

        Self {
            graph,
            indices,
            n_res,
        }
    }

    /// Adds a node and returns its index. Adding an existing node returns the existing index.
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&index) = self.indices.get(&node) {
            return index;
        }

        let index = self.graph.add_node(node.clone());
        self.indices.insert(node, index);

        index
    }

    /// Adds an edge, adding its endpoints if they are not in the graph yet.
    ///
    /// Parallel edges are kept as separate arcs rather than replacing each other, and the search
    /// may use any of them. A solution path lists nodes only, so it does not tell which of
    /// several parallel arcs was taken; compare its cost and resources to find out.
    ///
    /// Fails if `res_cost` does not have `n_res` entries or if one of them is negative.
    pub fn add_edge(
        &mut self,
        from: N,
        to: N,
        weight: T,
        res_cost: Vec<T>,
    ) -> Result<EdgeIndex, EspprcError> {
        if res_cost.len() != self.n_res {
            return Err(EspprcError::DimensionMismatch {
                expected: self.n_res,
                found: res_cost.len(),
            });
        }

        if let Some(index) = res_cost.iter().position(|&r| r < T::zero()) {
            return Err(EspprcError::NegativeResource { index });
        }

        let from = self.add_node(from);
        let to = self.add_node(to);

        Ok(self.graph.add_edge(from, to, Edge { weight, res_cost }))
    }

    /// Sets the cost of every edge from `from` to `to`.
    pub fn set_weight(&mut self, from: &N, to: &N, weight: T) -> Result<(), EspprcError> {
        let a = self.require(from)?;
        let b = self.require(to)?;
        let edges = self
            .graph
            .edges_connecting(a, b)
            .map(|edge| edge.id())
            .collect::<SmallVec<[EdgeIndex; 1]>>();

        if edges.is_empty() {
            return Err(EspprcError::UnknownArc {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            });
        }

        for edge in edges {
            self.graph[edge].weight = weight;
        }

        Ok(())
    }

    /// Returns the index of a node.
    #[inline]
    pub fn index_of(&self, node: &N) -> Option<NodeIndex> {
        self.indices.get(node).copied()
    }

    /// Returns the index of a node or an unknown-node error.
    pub fn require(&self, node: &N) -> Result<NodeIndex, EspprcError> {
        self.index_of(node).ok_or_else(|| EspprcError::UnknownNode {
            node: format!("{node:?}"),
        })
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = ResourceGraph::<_, i32>::new(1);
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        assert_ne!(a, b);
        assert_eq!(graph.add_node('a'), a);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.index_of(&'b'), Some(b));
        assert_eq!(graph.node_id(b), &'b');
    }

    #[test]
    fn test_add_edge_dimension_mismatch() {
        let mut graph = ResourceGraph::new(2);
        let result = graph.add_edge('a', 'b', 1, vec![1]);
        assert_eq!(
            result,
            Err(EspprcError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_negative_resource() {
        let mut graph = ResourceGraph::new(2);
        let result = graph.add_edge('a', 'b', 1, vec![0, -1]);
        assert_eq!(result, Err(EspprcError::NegativeResource { index: 1 }));
    }

    #[test]
    fn test_negative_weight_is_allowed() {
        let mut graph = ResourceGraph::new(1);
        assert!(graph.add_edge('a', 'b', -10, vec![1]).is_ok());
    }

    #[test]
    fn test_set_weight() {
        let mut graph = ResourceGraph::new(1);
        let edge = graph.add_edge('a', 'b', 1, vec![1]).unwrap();
        graph.set_weight(&'a', &'b', 7).unwrap();
        assert_eq!(graph.inner()[edge].weight, 7);
    }

    #[test]
    fn test_set_weight_unknown() {
        let mut graph = ResourceGraph::new(1);
        graph.add_edge('a', 'b', 1, vec![1]).unwrap();
        assert_eq!(
            graph.set_weight(&'b', &'a', 7),
            Err(EspprcError::UnknownArc {
                from: String::from("'b'"),
                to: String::from("'a'")
            })
        );
        assert_eq!(
            graph.set_weight(&'a', &'z', 7),
            Err(EspprcError::UnknownNode {
                node: String::from("'z'")
            })
        );
    }

    #[test]
    fn test_from_graph_rebuilds_indices() {
        let mut graph = ResourceGraph::new(1);
        graph.add_edge('a', 'b', 1, vec![1]).unwrap();
        graph.add_edge('b', 'c', 1, vec![1]).unwrap();

        let filtered = graph.inner().filter_map(
            |_, &node| (node != 'b').then_some(node),
            |_, edge| Some(edge.clone()),
        );
        let reduced = ResourceGraph::from_graph(filtered, 1);

        assert_eq!(reduced.node_count(), 2);
        assert_eq!(reduced.edge_count(), 0);
        assert!(reduced.index_of(&'a').is_some());
        assert!(reduced.index_of(&'b').is_none());
        assert_eq!(reduced.node_id(reduced.index_of(&'c').unwrap()), &'c');
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = ResourceGraph::new(1);
        let first = graph.add_edge('a', 'b', 5, vec![1]).unwrap();
        let second = graph.add_edge('a', 'b', 1, vec![3]).unwrap();
        assert_ne!(first, second);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.inner()[first].res_cost, vec![1]);
        assert_eq!(graph.inner()[second].res_cost, vec![3]);

        graph.set_weight(&'a', &'b', 2).unwrap();
        assert_eq!(graph.inner()[first].weight, 2);
        assert_eq!(graph.inner()[second].weight, 2);
    }
}
