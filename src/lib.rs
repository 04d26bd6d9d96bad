//! Elementary shortest path problem with resource constraints (ESPPRC).
//!
//! Given a directed graph whose edges carry a cost (possibly negative) and a vector of
//! non-negative resource consumptions, find a minimum-cost elementary path from a source
//! to a target whose accumulated consumption stays within a budget for every resource.
//! This is the pricing problem of column generation for vehicle routing.
//!
//! The solver reduces the graph to the nodes that can lie on a feasible path, computes
//! least-resource bounds between all pairs of nodes, and then runs label-setting searches
//! in which only the nodes of a visit-once set must not repeat. The set starts empty and
//! grows by the most repeated node of each non-elementary result until the cheapest path
//! is elementary.
//!
//! # Examples
//!
//! ```
//! use espprc::prelude::*;
//!
//! let mut graph = ResourceGraph::new(1);
//! graph.add_edge("A", "B", 1, vec![1]).unwrap();
//! graph.add_edge("B", "C", 1, vec![1]).unwrap();
//! graph.add_edge("A", "C", 5, vec![1]).unwrap();
//! graph.add_edge("C", "D", 1, vec![1]).unwrap();
//! graph.add_edge("C", "B", -10, vec![1]).unwrap();
//!
//! let parameters = SolverParameters {
//!     quiet: true,
//!     ..Default::default()
//! };
//! let solution = solve(&graph, &"A", &"D", &[100], parameters).unwrap();
//!
//! assert_eq!(solution.path, vec!["A", "B", "C", "D"]);
//! assert_eq!(solution.cost(), 3);
//! assert_eq!(solution.visit_once, vec!["C"]);
//! ```

pub mod algorithms;
mod error;
mod graph;
mod label;
pub mod monitor;
mod preprocess;
pub mod solvers;
pub mod timer;
mod visit_once;

pub use error::EspprcError;
pub use graph::{Edge, NodeId, ResourceGraph};
pub use label::{Label, Resources, Value};
pub use preprocess::{reduce, ResourceBounds};
pub use solvers::{solve, Espprc, Solution, SolverParameters};
pub use visit_once::VisitOnceSet;

pub mod prelude {
    pub use super::monitor::{LogMonitor, NoOpMonitor, SearchMonitor};
    pub use super::{
        solve, Espprc, EspprcError, Label, ResourceGraph, Solution, SolverParameters,
    };
}
