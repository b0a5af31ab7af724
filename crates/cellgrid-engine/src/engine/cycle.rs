//! Circular dependency detection for formula cells.
//!
//! When a formula is entered, we must verify it doesn't close a cycle
//! (e.g., A1 references B1, B1 references C1, C1 references A1).
//! This walks precedents depth-first from the edited cell and reports the
//! path back to it, if there is one.

use std::collections::HashSet;

use super::{CellRef, DependencyGraph};

/// Detect a circular dependency that passes through `start`.
/// Returns Some(cycle_path) if `start` can reach itself, None otherwise.
pub fn detect_cycle(start: &CellRef, graph: &DependencyGraph) -> Option<Vec<CellRef>> {
    let mut visited = HashSet::new();
    let mut path = vec![*start];

    if detect_cycle_dfs(start, start, graph, &mut visited, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn detect_cycle_dfs(
    start: &CellRef,
    current: &CellRef,
    graph: &DependencyGraph,
    visited: &mut HashSet<CellRef>,
    path: &mut Vec<CellRef>,
) -> bool {
    for precedent in graph.precedents_of(current) {
        if precedent == *start {
            path.push(precedent);
            return true;
        }
        // Nodes already explored without finding `start` cannot lead back to it.
        if !visited.insert(precedent) {
            continue;
        }
        path.push(precedent);
        if detect_cycle_dfs(start, &precedent, graph, visited, path) {
            return true;
        }
        path.pop();
    }
    false
}
