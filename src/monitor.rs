//! Observers of the solving process.
//!
//! Monitors receive events from the augmentation loop and the label-setting search.
//! They never influence the result.

use crate::graph::ResourceGraph;
use crate::label::Label;
use crate::solvers::Solution;
use itertools::Itertools;
use std::fmt::{Debug, Display};
use std::time::Instant;

/// Trait for observing a solve.
///
/// Every hook has an empty default implementation.
pub trait SearchMonitor<N, T> {
    /// Called once before the first iteration with the reduced graph.
    fn on_enter_search(&mut self, _graph: &ResourceGraph<N, T>) {}

    /// Called before each label-setting search with the size of the visit-once set.
    fn on_iteration_start(&mut self, _iteration: usize, _visit_once: usize) {}

    /// Called when a label extended along an edge is inserted at `to`.
    fn on_label_extended(&mut self, _from: &N, _to: &N, _label: &Label<T>) {}

    /// Called when an existing label at `node` is removed by dominance.
    fn on_label_dominated(&mut self, _node: &N, _label: &Label<T>) {}

    /// Called with the cheapest path found by a label-setting search.
    fn on_relaxation_solved(&mut self, _iteration: usize, _path: &[N], _label: &Label<T>) {}

    /// Called when a repeated node is added to the visit-once set.
    fn on_node_promoted(&mut self, _node: &N, _multiplicity: usize) {}

    /// Called once with the elementary solution.
    fn on_exit_search(&mut self, _solution: &Solution<N, T>) {}

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

/// Monitor that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMonitor;

impl<N, T> SearchMonitor<N, T> for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

/// Monitor printing one line per augmentation iteration to stdout.
///
/// In verbose mode, label extensions and dominance eliminations are printed as well.
#[derive(Clone, Debug)]
pub struct LogMonitor {
    start_time: Instant,
    verbose: bool,
    max_path_len: usize,
    visit_once: usize,
}

impl LogMonitor {
    pub fn new(verbose: bool) -> Self {
        Self {
            start_time: Instant::now(),
            verbose,
            max_path_len: 12,
            visit_once: 0,
        }
    }

    fn print_header(&self) {
        println!(
            "{:<9} | {:<9} | {:<5} | {:<14} | {}",
            "Elapsed", "Iteration", "|S|", "Cost", "Path"
        );
        println!("{}", "-".repeat(80));
    }

    fn elapsed(&self) -> String {
        format!("{:.3}s", self.start_time.elapsed().as_secs_f64())
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<N, T> SearchMonitor<N, T> for LogMonitor
where
    N: Debug,
    T: Display,
{
    fn on_enter_search(&mut self, graph: &ResourceGraph<N, T>) {
        self.start_time = Instant::now();
        println!(
            "Reduced graph: {} nodes, {} edges, {} resources.",
            graph.inner().node_count(),
            graph.inner().edge_count(),
            graph.n_res()
        );
        self.print_header();
    }

    fn on_iteration_start(&mut self, _iteration: usize, visit_once: usize) {
        self.visit_once = visit_once;
    }

    fn on_label_extended(&mut self, from: &N, to: &N, label: &Label<T>) {
        if self.verbose {
            println!("    extend {from:?} -> {to:?}: {label}");
        }
    }

    fn on_label_dominated(&mut self, node: &N, label: &Label<T>) {
        if self.verbose {
            println!("    remove dominated label at {node:?}: {label}");
        }
    }

    fn on_relaxation_solved(&mut self, iteration: usize, path: &[N], label: &Label<T>) {
        println!(
            "{:<9} | {:<9} | {:<5} | {:<14} | {}",
            self.elapsed(),
            iteration,
            self.visit_once,
            label.cost.to_string(),
            format_path(path, self.max_path_len)
        );
    }

    fn on_node_promoted(&mut self, node: &N, multiplicity: usize) {
        println!("{:<9} | promote {node:?} (visited {multiplicity} times)", "");
    }

    fn on_exit_search(&mut self, solution: &Solution<N, T>) {
        println!("{}", "-".repeat(80));
        println!(
            "Elementary path found after {} iterations, cost: {}, search time: {}s.",
            solution.iterations,
            solution.label.cost,
            solution.time
        );
    }

    fn name(&self) -> &str {
        "LogMonitor"
    }
}

/// Formats a path as `a -> b -> c`.
///
/// Paths longer than `max_len` nodes are shortened to their first and last nodes.
///
/// # Examples
///
/// ```
/// use espprc::monitor::format_path;
///
/// assert_eq!(format_path(&["s", "a", "t"], 5), "\"s\" -> \"a\" -> \"t\"");
/// assert_eq!(format_path(&[1, 2, 3, 4, 5, 6], 4), "1 -> 2 -> ... -> 5 -> 6 (6 nodes)");
/// ```
pub fn format_path<N: Debug>(path: &[N], max_len: usize) -> String {
    if path.len() <= max_len {
        return path.iter().map(|node| format!("{node:?}")).join(" -> ");
    }

    let half = max_len.div_ceil(2);
    let head = path[..half].iter().map(|node| format!("{node:?}"));
    let tail = path[path.len() - half..]
        .iter()
        .map(|node| format!("{node:?}"));

    format!(
        "{} ({} nodes)",
        head.chain(std::iter::once(String::from("...")))
            .chain(tail)
            .join(" -> "),
        path.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_path_short() {
        assert_eq!(format_path(&['a', 'b'], 2), "'a' -> 'b'");
        assert_eq!(format_path::<u8>(&[], 2), "");
    }

    #[test]
    fn test_format_path_long() {
        let path = (0..20).collect::<Vec<_>>();
        assert_eq!(format_path(&path, 3), "0 -> 1 -> ... -> 18 -> 19 (20 nodes)");
    }

    #[test]
    fn test_monitor_names() {
        assert_eq!(SearchMonitor::<char, i32>::name(&NoOpMonitor), "NoOpMonitor");
        assert_eq!(
            SearchMonitor::<char, i32>::name(&LogMonitor::default()),
            "LogMonitor"
        );
    }
}
