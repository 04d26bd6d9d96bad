use super::label_registry::{LabelId, LabelRegistry};
use super::search::SearchStatistics;
use crate::error::EspprcError;
use crate::graph::{Edge, NodeId, ResourceGraph};
use crate::label::{compare_lexicographically, Label, Resources, Value};
use crate::monitor::SearchMonitor;
use crate::preprocess::ResourceBounds;
use crate::visit_once::VisitOnceSet;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Label waiting for extension.
///
/// The heap pops the lexicographically smallest resource vector first, then the oldest label.
struct PendingLabel<T> {
    resources: Resources<T>,
    id: LabelId,
}

impl<T: PartialOrd> PartialEq for PendingLabel<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: PartialOrd> Eq for PendingLabel<T> {}

impl<T: PartialOrd> Ord for PendingLabel<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lexicographically(&other.resources, &self.resources)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<T: PartialOrd> PartialOrd for PendingLabel<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path found by a label-setting search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<T> {
    /// Nodes of the path, which may repeat nodes outside the visit-once set.
    pub path: Vec<NodeIndex>,
    /// Label of the path at the target.
    pub label: Label<T>,
    pub statistics: SearchStatistics,
}

/// Label-setting search for the resource constrained shortest path problem.
///
/// Labels are selected in lexicographic order of their resource vectors.
/// Only nodes in the visit-once set are forbidden from repeating,
/// so the returned path is elementary only if no other node is worth revisiting.
pub struct LabelSettingSearch<'a, N, T> {
    graph: &'a ResourceGraph<N, T>,
    bounds: &'a ResourceBounds<T>,
    visit_once: &'a VisitOnceSet,
    source: NodeIndex,
    target: NodeIndex,
    max_res: &'a [T],
    initial_registry_capacity: Option<usize>,
}

impl<'a, N, T> LabelSettingSearch<'a, N, T>
where
    N: NodeId,
    T: Value,
{
    /// Creates a new search.
    ///
    /// `bounds` must be built on `graph`, and `max_res` must have `graph.n_res()` entries.
    /// The search only terminates if every cycle of `graph` consumes some resource.
    pub fn new(
        graph: &'a ResourceGraph<N, T>,
        bounds: &'a ResourceBounds<T>,
        visit_once: &'a VisitOnceSet,
        source: NodeIndex,
        target: NodeIndex,
        max_res: &'a [T],
    ) -> Self {
        Self {
            graph,
            bounds,
            visit_once,
            source,
            target,
            max_res,
            initial_registry_capacity: None,
        }
    }

    /// Sets the initial capacity of the label registry.
    pub fn with_registry_capacity(mut self, capacity: Option<usize>) -> Self {
        self.initial_registry_capacity = capacity;
        self
    }

    /// Runs the search and returns the cheapest label at the target with its path.
    ///
    /// Fails with `SourceReentered` if an edge into the source is relaxed
    /// and with `Infeasible` if no label reaches the target.
    pub fn search(
        &self,
        monitor: &mut impl SearchMonitor<N, T>,
    ) -> Result<SearchOutcome<T>, EspprcError> {
        let n_res = self.graph.n_res();
        let dimension = n_res + self.visit_once.len();
        let mut registry = self
            .initial_registry_capacity
            .map(LabelRegistry::with_capacity)
            .unwrap_or_default();
        let mut statistics = SearchStatistics::default();
        let mut open = BinaryHeap::new();

        let root = registry.insert_root(self.source, Label::zero(dimension));
        statistics.generated += 1;
        open.push(PendingLabel {
            resources: registry.get(root).label.resources.clone(),
            id: root,
        });

        while let Some(PendingLabel { id, .. }) = open.pop() {
            let entry = registry.get(id);

            if entry.is_closed() {
                continue;
            }

            statistics.expanded += 1;
            let u = entry.node;
            let parent = entry.label.clone();

            for edge in self.graph.inner().edges(u) {
                let v = edge.target();

                if v == self.source {
                    return Err(EspprcError::SourceReentered {
                        node: format!("{:?}", self.graph.node_id(v)),
                    });
                }

                let Some(candidate) = self.extend(&parent, v, edge.weight()) else {
                    statistics.pruned += 1;
                    continue;
                };

                let result = registry.insert_with_if_not_dominated(v, candidate, id, |label| {
                    self.mark_unreachable(label, v)
                });

                for &dominated in result.dominated.iter() {
                    let label = &registry.get(dominated).label;
                    monitor.on_label_dominated(self.graph.node_id(v), label);
                }

                statistics.dominated += result.dominated.len();

                if let Some(inserted) = result.inserted {
                    let label = &registry.get(inserted).label;
                    monitor.on_label_extended(
                        self.graph.node_id(u),
                        self.graph.node_id(v),
                        label,
                    );
                    statistics.generated += 1;
                    open.push(PendingLabel {
                        resources: label.resources.clone(),
                        id: inserted,
                    });
                } else {
                    statistics.dominated += 1;
                }
            }
        }

        let best = registry
            .labels_at(self.target)
            .reduce(|best, id| {
                if registry.get(id).label.cost < registry.get(best).label.cost {
                    id
                } else {
                    best
                }
            })
            .ok_or(EspprcError::Infeasible)?;

        Ok(SearchOutcome {
            path: registry.get_path(best),
            label: registry.get(best).label.clone(),
            statistics,
        })
    }

    /// Extends `parent` along an edge into `v`.
    ///
    /// Returns `None` if the target cannot be reached within the budget or a visit-once node repeats.
    fn extend(&self, parent: &Label<T>, v: NodeIndex, edge: &Edge<T>) -> Option<Label<T>> {
        let n_res = self.graph.n_res();
        let mut candidate = parent.clone();
        candidate.cost = candidate.cost + edge.weight;

        for (r, &consumption) in edge.res_cost.iter().enumerate() {
            candidate.resources[r] = candidate.resources[r] + consumption;
            let remaining = self.bounds.lower_bound(r, v, self.target);

            if candidate.resources[r] + remaining > self.max_res[r] {
                return None;
            }
        }

        if let Some(d) = self.visit_once.dimension(v) {
            let visits = candidate.resources[n_res + d] + T::one();

            if visits > T::one() {
                return None;
            }

            candidate.resources[n_res + d] = visits;
        }

        Some(candidate)
    }

    /// Marks every visit-once node that can no longer be reached within the budget as visited.
    fn mark_unreachable(&self, label: &mut Label<T>, v: NodeIndex) {
        let n_res = self.graph.n_res();

        for (d, &n) in self.visit_once.nodes().iter().enumerate() {
            let slot = n_res + d;

            if label.resources[slot] != T::zero() {
                continue;
            }

            let unreachable = (0..n_res).any(|r| {
                label.resources[r] + self.bounds.lower_bound(r, v, n) > self.max_res[r]
            });

            if unreachable {
                label.resources[slot] = T::one();
            }
        }
    }
}
