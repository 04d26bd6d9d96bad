use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;

/// Ordered set of nodes that may be visited at most once.
///
/// Each member owns one synthetic resource dimension.
/// The dimension of the `i`-th member is `n_res + i` in a label's resource vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitOnceSet {
    nodes: Vec<NodeIndex>,
    dimensions: FxHashMap<NodeIndex, usize>,
}

impl VisitOnceSet {
    /// Appends a node. Returns `false` if it is already a member.
    ///
    /// # Examples
    ///
    /// ```
    /// use espprc::VisitOnceSet;
    /// use petgraph::graph::NodeIndex;
    ///
    /// let mut set = VisitOnceSet::default();
    /// assert!(set.push(NodeIndex::new(4)));
    /// assert!(set.push(NodeIndex::new(2)));
    /// assert!(!set.push(NodeIndex::new(4)));
    ///
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.dimension(NodeIndex::new(2)), Some(1));
    /// assert_eq!(set.dimension(NodeIndex::new(3)), None);
    /// ```
    pub fn push(&mut self, node: NodeIndex) -> bool {
        if self.dimensions.contains_key(&node) {
            return false;
        }

        self.dimensions.insert(node, self.nodes.len());
        self.nodes.push(node);

        true
    }

    /// Returns the offset of the node's dimension among the synthetic dimensions.
    #[inline]
    pub fn dimension(&self, node: NodeIndex) -> Option<usize> {
        self.dimensions.get(&node).copied()
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.dimensions.contains_key(&node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the members in insertion order.
    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_follow_insertion_order() {
        let mut set = VisitOnceSet::default();
        assert!(set.is_empty());

        for i in [7, 3, 5] {
            assert!(set.push(NodeIndex::new(i)));
        }

        assert_eq!(set.dimension(NodeIndex::new(7)), Some(0));
        assert_eq!(set.dimension(NodeIndex::new(3)), Some(1));
        assert_eq!(set.dimension(NodeIndex::new(5)), Some(2));
        assert_eq!(
            set.nodes(),
            &[NodeIndex::new(7), NodeIndex::new(3), NodeIndex::new(5)]
        );
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut set = VisitOnceSet::default();
        assert!(set.push(NodeIndex::new(1)));
        assert!(!set.push(NodeIndex::new(1)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(NodeIndex::new(1)));
        assert!(!set.contains(NodeIndex::new(0)));
    }
}
