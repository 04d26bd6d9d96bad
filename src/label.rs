use num_traits::Num;
use petgraph::algo::Measure;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt::{self, Display};

/// Trait for numeric values used as costs and resource consumptions.
///
/// Implemented for every primitive integer and float type.
pub trait Value: Measure + Num + Copy + Display {}

impl<T> Value for T where T: Measure + Num + Copy + Display {}

/// Resource vector of a label.
///
/// The first `n_res` entries are physical resources, followed by one 0/1 entry per visit-once node.
pub type Resources<T> = SmallVec<[T; 4]>;

/// Cost and resource consumption of a partial path.
#[derive(Clone, Debug, PartialEq)]
pub struct Label<T> {
    /// Accumulated cost.
    pub cost: T,
    /// Accumulated resources.
    pub resources: Resources<T>,
}

impl<T> Label<T>
where
    T: Value,
{
    /// Creates a label.
    pub fn new(cost: T, resources: impl IntoIterator<Item = T>) -> Self {
        Self {
            cost,
            resources: resources.into_iter().collect(),
        }
    }

    /// Creates a zero-cost label with `dimension` zero resources.
    pub fn zero(dimension: usize) -> Self {
        Self {
            cost: T::zero(),
            resources: SmallVec::from_elem(T::zero(), dimension),
        }
    }

    /// Returns the first `n_res` resources.
    #[inline]
    pub fn physical_resources(&self, n_res: usize) -> &[T] {
        &self.resources[..n_res]
    }

    /// Returns whether this label is dominated by `other`.
    ///
    /// `self` is dominated if the two labels are not identical, `other` is not more expensive,
    /// and `self` is not strictly better on any resource.
    /// Identical labels never dominate each other, so both are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use espprc::Label;
    ///
    /// let a = Label::new(3, [2, 1]);
    /// let b = Label::new(2, [2, 1]);
    /// let c = Label::new(1, [3, 0]);
    ///
    /// assert!(a.is_dominated_by(&b));
    /// assert!(!b.is_dominated_by(&a));
    /// assert!(!a.is_dominated_by(&c));
    /// assert!(!a.is_dominated_by(&a.clone()));
    /// ```
    pub fn is_dominated_by(&self, other: &Self) -> bool {
        if self == other || self.cost < other.cost {
            return false;
        }

        !self
            .resources
            .iter()
            .zip(other.resources.iter())
            .any(|(a, b)| a < b)
    }

    /// Compares the resource vectors lexicographically.
    ///
    /// Incomparable entries (e.g., NaN) are treated as equal.
    pub fn compare_resources(&self, other: &Self) -> Ordering {
        compare_lexicographically(&self.resources, &other.resources)
    }
}

pub(crate) fn compare_lexicographically<T: PartialOrd>(a: &[T], b: &[T]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

impl<T> Display for Label<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(C {} | R [", self.cost)?;

        for (i, r) in self.resources.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{r}")?;
        }

        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        let label = Label::<i32>::zero(3);
        assert_eq!(label.cost, 0);
        assert_eq!(label.resources.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_physical_resources() {
        let label = Label::new(1, [4, 5, 1, 0]);
        assert_eq!(label.physical_resources(2), &[4, 5]);
    }

    #[test]
    fn test_dominated_by_cheaper_equal_resources() {
        let a = Label::new(5, [1, 1]);
        let b = Label::new(4, [1, 1]);
        assert!(a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));
    }

    #[test]
    fn test_dominated_by_same_cost_fewer_resources() {
        let a = Label::new(5, [2, 1]);
        let b = Label::new(5, [1, 1]);
        assert!(a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));
    }

    #[test]
    fn test_not_dominated_when_cheaper() {
        let a = Label::new(1, [3, 3]);
        let b = Label::new(2, [1, 1]);
        assert!(!a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));
    }

    #[test]
    fn test_not_dominated_when_one_resource_is_better() {
        let a = Label::new(5, [0, 9]);
        let b = Label::new(1, [1, 1]);
        assert!(!a.is_dominated_by(&b));
    }

    #[test]
    fn test_identical_labels_are_incomparable() {
        let a = Label::new(2.5, [1.0, 0.0]);
        let b = a.clone();
        assert!(!a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));
    }

    #[test]
    fn test_dominance_is_transitive_and_asymmetric() {
        let labels = [
            Label::new(0, [0, 0]),
            Label::new(1, [0, 1]),
            Label::new(1, [1, 0]),
            Label::new(2, [1, 1]),
            Label::new(2, [0, 2]),
            Label::new(3, [2, 2]),
            Label::new(-1, [3, 3]),
        ];

        for a in &labels {
            assert!(!a.is_dominated_by(a));

            for b in &labels {
                if a.is_dominated_by(b) {
                    assert!(!b.is_dominated_by(a));

                    for c in &labels {
                        if b.is_dominated_by(c) {
                            assert!(a.is_dominated_by(c));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_compare_resources() {
        let a = Label::new(9, [1, 2, 3]);
        let b = Label::new(0, [1, 3, 0]);
        assert_eq!(a.compare_resources(&b), Ordering::Less);
        assert_eq!(b.compare_resources(&a), Ordering::Greater);
        assert_eq!(a.compare_resources(&a), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        let label = Label::new(-3, [2, 1]);
        assert_eq!(label.to_string(), "(C -3 | R [2, 1])");
    }
}
