//! Dependency extraction and the dependency graph.
//!
//! Each formula is parsed for its exact operand references; those become
//! edges in a [`DependencyGraph`]. The graph is an arena indexed by a cell's
//! row-major position and keeps both directions:
//! - precedents: cells a formula reads
//! - dependents: formula cells that read a given cell
//!
//! Plain text never creates edges, so "see A1" does not depend on A1 and a
//! formula over A10 does not depend on A1.

use log::trace;
use std::collections::{BTreeSet, VecDeque};
use thiserror::Error;

use super::cell::is_formula;
use super::cell_ref::{CellRef, Dimensions};
use super::formula::Formula;

/// Extract the cell references a raw input depends on.
///
/// Only well-formed formulas have references; anything else yields none.
pub fn extract_references(raw: &str) -> Vec<CellRef> {
    if !is_formula(raw) {
        return Vec::new();
    }
    match Formula::parse(raw) {
        Ok(formula) => {
            let mut refs = formula.operands().to_vec();
            refs.dedup();
            refs
        }
        Err(_) => Vec::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular reference through {}", format_cells(.cells))]
pub struct CircularReference {
    pub cells: Vec<CellRef>,
}

fn format_cells(cells: &[CellRef]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recalculation order for everything downstream of a changed cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcPlan {
    /// Dependents in an order where every cell comes after its precedents.
    pub order: Vec<CellRef>,
    /// Dependents that lie on a cycle. They evaluate to an error and are
    /// settled before anything in `order`.
    pub cyclic: Vec<CellRef>,
}

impl RecalcPlan {
    pub fn is_acyclic(&self) -> bool {
        self.cyclic.is_empty()
    }
}

/// Explicit dependency graph over a fixed grid.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    dims: Dimensions,
    /// index -> indices this cell's formula reads
    precedents: Vec<Vec<usize>>,
    /// index -> indices of formulas reading this cell
    dependents: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    pub fn new(dims: Dimensions) -> DependencyGraph {
        DependencyGraph {
            dims,
            precedents: vec![Vec::new(); dims.len()],
            dependents: vec![BTreeSet::new(); dims.len()],
        }
    }

    /// Replace the outgoing edges of `cell`. References outside the grid are dropped.
    pub fn set_precedents(&mut self, cell: &CellRef, refs: &[CellRef]) {
        let Some(index) = self.dims.index_of(cell) else {
            return;
        };

        for old in std::mem::take(&mut self.precedents[index]) {
            self.dependents[old].remove(&index);
        }

        let mut new_edges: Vec<usize> = refs
            .iter()
            .filter_map(|r| self.dims.index_of(r))
            .collect();
        new_edges.sort_unstable();
        new_edges.dedup();

        for &precedent in &new_edges {
            self.dependents[precedent].insert(index);
        }
        trace!("{} now reads {}", cell, format_cells(refs));
        self.precedents[index] = new_edges;
    }

    /// Cells whose formula reads `cell` directly, in row-major order.
    pub fn dependents_of(&self, cell: &CellRef) -> Vec<CellRef> {
        self.dims
            .index_of(cell)
            .map(|index| {
                self.dependents[index]
                    .iter()
                    .map(|&i| self.dims.cell_at(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cells that the formula at `cell` reads, in row-major order.
    pub fn precedents_of(&self, cell: &CellRef) -> Vec<CellRef> {
        self.dims
            .index_of(cell)
            .map(|index| {
                self.precedents[index]
                    .iter()
                    .map(|&i| self.dims.cell_at(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Order every transitive dependent of `changed` for recalculation.
    ///
    /// The changed cell itself is treated as settled, so edges into it are
    /// ignored. Cells that lie on a cycle among the reachable dependents
    /// (a strongly connected component of two or more cells, or a formula
    /// reading itself) go to [`RecalcPlan::cyclic`]. They are settled too:
    /// the caller commits them first, and everything else is ordered by
    /// Kahn's algorithm with ready cells taken in row-major order.
    pub fn recalc_plan(&self, changed: &CellRef) -> RecalcPlan {
        let Some(start) = self.dims.index_of(changed) else {
            return RecalcPlan::default();
        };

        // Reachable dependents, excluding the start cell.
        let mut reachable = vec![false; self.dims.len()];
        let mut queue: VecDeque<usize> = VecDeque::from([start]);
        while let Some(index) = queue.pop_front() {
            for &dependent in &self.dependents[index] {
                if dependent != start && !reachable[dependent] {
                    reachable[dependent] = true;
                    queue.push_back(dependent);
                }
            }
        }

        let on_cycle = self.cycle_members(&reachable);
        let pending: Vec<bool> = (0..self.dims.len())
            .map(|i| reachable[i] && !on_cycle[i])
            .collect();

        // In-degree counts only edges coming from other pending cells.
        let mut in_degree = vec![0usize; self.dims.len()];
        let mut ready = BTreeSet::new();
        for index in (0..self.dims.len()).filter(|&i| pending[i]) {
            in_degree[index] = self.precedents[index]
                .iter()
                .filter(|&&p| pending[p])
                .count();
            if in_degree[index] == 0 {
                ready.insert(index);
            }
        }

        let mut plan = RecalcPlan::default();
        while let Some(index) = ready.pop_first() {
            plan.order.push(self.dims.cell_at(index));
            for &dependent in &self.dependents[index] {
                if !pending[dependent] {
                    continue;
                }
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        plan.cyclic = (0..self.dims.len())
            .filter(|&i| on_cycle[i])
            .map(|i| self.dims.cell_at(i))
            .collect();
        plan
    }

    /// Flag the cells of `members` that lie on a cycle within `members`.
    ///
    /// Iterative Tarjan over dependent edges. A component counts when it has
    /// more than one cell or its only cell reads itself.
    fn cycle_members(&self, members: &[bool]) -> Vec<bool> {
        const UNVISITED: usize = usize::MAX;
        let len = self.dims.len();
        let mut order = vec![UNVISITED; len];
        let mut low = vec![0usize; len];
        let mut on_stack = vec![false; len];
        let mut stack: Vec<usize> = Vec::new();
        let mut on_cycle = vec![false; len];
        let mut next = 0;

        for root in (0..len).filter(|&i| members[i]) {
            if order[root] != UNVISITED {
                continue;
            }
            order[root] = next;
            low[root] = next;
            next += 1;
            stack.push(root);
            on_stack[root] = true;
            let mut work = vec![(root, self.dependents[root].iter())];

            while let Some((node, edges)) = work.last_mut() {
                let node = *node;
                if let Some(&next_node) = edges.next() {
                    if !members[next_node] {
                        continue;
                    }
                    if order[next_node] == UNVISITED {
                        order[next_node] = next;
                        low[next_node] = next;
                        next += 1;
                        stack.push(next_node);
                        on_stack[next_node] = true;
                        work.push((next_node, self.dependents[next_node].iter()));
                    } else if on_stack[next_node] {
                        low[node] = low[node].min(order[next_node]);
                    }
                    continue;
                }

                work.pop();
                if let Some((parent, _)) = work.last() {
                    low[*parent] = low[*parent].min(low[node]);
                }
                if low[node] != order[node] {
                    continue;
                }
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                if component.len() > 1 || self.dependents[node].contains(&node) {
                    for member in component {
                        on_cycle[member] = true;
                    }
                }
            }
        }
        on_cycle
    }

    /// Ordered transitive dependents of `changed`, failing if any lie on a cycle.
    pub fn find_dependents(&self, changed: &CellRef) -> Result<Vec<CellRef>, CircularReference> {
        let plan = self.recalc_plan(changed);
        if plan.is_acyclic() {
            Ok(plan.order)
        } else {
            Err(CircularReference { cells: plan.cyclic })
        }
    }

    /// Drop every edge.
    pub fn clear(&mut self) {
        self.precedents.iter_mut().for_each(Vec::clear);
        self.dependents.iter_mut().for_each(BTreeSet::clear);
    }
}
