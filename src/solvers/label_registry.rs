use crate::label::{Label, Value};
use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Permanent handle of a label in a registry.
pub type LabelId = usize;

/// Label stored in the registry together with its position in the search tree.
#[derive(Clone, Debug)]
pub struct LabelNode<T> {
    /// Node the label is attached to.
    pub node: NodeIndex,
    /// Cost and resources.
    pub label: Label<T>,
    parent: Option<LabelId>,
    closed: bool,
}

impl<T> LabelNode<T> {
    /// Returns the label this label was extended from.
    #[inline]
    pub fn parent(&self) -> Option<LabelId> {
        self.parent
    }

    /// Returns whether the label was removed by dominance.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Data structure to store labels per node and remove dominated labels.
///
/// Labels live in an arena and are never moved, so a `LabelId` stays valid after the label is
/// removed from its node. Removed labels are closed and remain reachable as parents of other labels.
pub struct LabelRegistry<T> {
    arena: Vec<LabelNode<T>>,
    lists: FxHashMap<NodeIndex, SmallVec<[LabelId; 4]>>,
}

impl<T> Default for LabelRegistry<T> {
    fn default() -> Self {
        Self {
            arena: Vec::new(),
            lists: FxHashMap::default(),
        }
    }
}

/// Result of inserting a label into the registry.
#[derive(Debug, Default)]
pub struct InsertionResult {
    /// The inserted label.
    pub inserted: Option<LabelId>,
    /// The labels that were dominated by the inserted label.
    pub dominated: SmallVec<[LabelId; 1]>,
}

impl<T> LabelRegistry<T>
where
    T: Value,
{
    /// Creates a new registry with room for `capacity` labels.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            lists: FxHashMap::default(),
        }
    }

    /// Inserts a label without a parent and without dominance checks.
    pub fn insert_root(&mut self, node: NodeIndex, label: Label<T>) -> LabelId {
        let id = self.arena.len();
        self.arena.push(LabelNode {
            node,
            label,
            parent: None,
            closed: false,
        });
        self.lists.entry(node).or_default().push(id);

        id
    }

    /// Inserts a label extended from `parent` if it is not dominated by any label at `node`.
    ///
    /// `refine` is applied to the label after the dominance check and before the label is
    /// compared against the existing labels for removal.
    /// Labels at `node` dominated by the refined label are removed and closed.
    pub fn insert_with_if_not_dominated(
        &mut self,
        node: NodeIndex,
        mut label: Label<T>,
        parent: LabelId,
        refine: impl FnOnce(&mut Label<T>),
    ) -> InsertionResult {
        let Self { arena, lists } = self;
        let list = lists.entry(node).or_default();

        if list
            .iter()
            .any(|&id| label.is_dominated_by(&arena[id].label))
        {
            return InsertionResult::default();
        }

        refine(&mut label);

        let mut dominated = SmallVec::<[LabelId; 1]>::new();
        list.retain(|id| {
            if arena[*id].label.is_dominated_by(&label) {
                dominated.push(*id);
                false
            } else {
                true
            }
        });

        for &id in dominated.iter() {
            arena[id].closed = true;
        }

        let id = arena.len();
        arena.push(LabelNode {
            node,
            label,
            parent: Some(parent),
            closed: false,
        });
        list.push(id);

        InsertionResult {
            inserted: Some(id),
            dominated,
        }
    }

    /// Returns the label with the given handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by this registry.
    #[inline]
    pub fn get(&self, id: LabelId) -> &LabelNode<T> {
        &self.arena[id]
    }

    /// Returns the open labels at `node` in insertion order.
    pub fn labels_at(&self, node: NodeIndex) -> impl Iterator<Item = LabelId> + '_ {
        self.lists
            .get(&node)
            .into_iter()
            .flat_map(|list| list.iter().copied())
    }

    /// Returns the nodes from the root to the label.
    pub fn get_path(&self, id: LabelId) -> Vec<NodeIndex> {
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(id) = current {
            let entry = &self.arena[id];
            path.push(entry.node);
            current = entry.parent;
        }

        path.reverse();

        path
    }

    /// Returns the number of labels ever inserted.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
