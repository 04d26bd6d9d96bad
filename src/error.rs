use thiserror::Error;

/// Errors raised while preprocessing a graph or solving an instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EspprcError {
    /// An arc entering the source was considered for relaxation.
    ///
    /// In-arcs of the source must be split off from its out-arcs before solving.
    #[error("arc into the source node {node} was considered for relaxation")]
    SourceReentered { node: String },

    /// No label reached the target.
    #[error("no feasible path from source to target within the resource budget")]
    Infeasible,

    /// The augmentation loop did not return an elementary path within the iteration cap.
    #[error("augmentation loop exceeded {limit} iterations")]
    IterationLimit { limit: usize },

    /// The time limit was reached between two augmentation iterations.
    #[error("time limit reached after {iterations} augmentation iterations")]
    TimeLimitReached { iterations: usize },

    /// The node selected for promotion is already in the visit-once set.
    #[error("node {node} is already in the visit-once set but was repeated")]
    AugmentationStalled { node: String },

    /// The reduced graph has a cycle whose arcs consume no resource.
    ///
    /// The budget does not bound how often such a cycle is traversed, so labels would never settle.
    #[error("node {node} lies on a cycle of arcs that consume no resource")]
    ZeroResourceCycle { node: String },

    #[error("node {node} is not in the graph")]
    UnknownNode { node: String },

    #[error("no arc from {from} to {to}")]
    UnknownArc { from: String, to: String },

    #[error("source and target must be distinct, both are {node}")]
    InvalidEndpoints { node: String },

    #[error("expected {expected} resource values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("resource {index} has a negative consumption")]
    NegativeResource { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let error = EspprcError::DimensionMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(error.to_string(), "expected 2 resource values, found 3");

        let error = EspprcError::SourceReentered {
            node: String::from("\"A\""),
        };
        assert_eq!(
            error.to_string(),
            "arc into the source node \"A\" was considered for relaxation"
        );
    }
}
