//! Undo/Redo command stack.
//!
//! The stack holds whole graph snapshots. Every graph mutation produces a
//! new snapshot; whether that snapshot becomes a new undo step or replaces
//! the present one is decided by the mutation's [`Grouping`]. A drag that
//! emits hundreds of samples therefore undoes in one step.

use crate::mutation::{GraphMutation, Grouping, UndoGroup};
use arrows_core::Graph;
use std::mem;

/// One undo (or redo) step: the graph to restore and what produced it.
#[derive(Debug, Clone)]
struct Step {
    graph: Graph,
    description: &'static str,
}

pub struct CommandStack {
    present: Graph,
    undo_stack: Vec<Step>,
    redo_stack: Vec<Step>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Group the top undo step belongs to while samples may still join it.
    open_group: Option<UndoGroup>,
    /// Bumped whenever the present graph is replaced wholesale.
    epoch: u64,
}

impl CommandStack {
    pub fn new(graph: Graph, max_depth: usize) -> Self {
        Self {
            present: graph,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            open_group: None,
            epoch: 0,
        }
    }

    pub fn present(&self) -> &Graph {
        &self.present
    }

    /// Changes on each undo, redo and reset. Gestures started under an
    /// older epoch are stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Apply a mutation. Returns whether the graph changed.
    pub fn execute(&mut self, mutation: &GraphMutation) -> bool {
        let Some(next) = mutation.apply(&self.present) else {
            log::trace!("no-op {}", mutation.description());
            return false;
        };

        match mutation.grouping() {
            Grouping::Joins(group) if self.open_group == Some(group) => self.coalesce(next),
            Grouping::Closes(group) if self.open_group == Some(group) => {
                self.coalesce(next);
                self.open_group = None;
            }
            Grouping::Joins(group) | Grouping::Opens(group) => {
                self.push(next, mutation.description());
                self.open_group = Some(group);
            }
            Grouping::Closes(_) | Grouping::Standalone => {
                self.push(next, mutation.description());
                self.open_group = None;
            }
        }
        true
    }

    /// End the open group so the next sample starts a new undo step.
    pub fn seal(&mut self) {
        self.open_group = None;
    }

    pub fn undo(&mut self) -> Option<&'static str> {
        let step = self.undo_stack.pop()?;
        let after = mem::replace(&mut self.present, step.graph);
        self.redo_stack.push(Step {
            graph: after,
            description: step.description,
        });
        self.open_group = None;
        self.epoch += 1;
        log::debug!("undo {}", step.description);
        Some(step.description)
    }

    pub fn redo(&mut self) -> Option<&'static str> {
        let step = self.redo_stack.pop()?;
        let before = mem::replace(&mut self.present, step.graph);
        self.undo_stack.push(Step {
            graph: before,
            description: step.description,
        });
        self.open_group = None;
        self.epoch += 1;
        log::debug!("redo {}", step.description);
        Some(step.description)
    }

    /// Replace the graph and forget all history.
    pub fn reset(&mut self, graph: Graph) {
        self.present = graph;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
        self.epoch += 1;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    fn push(&mut self, next: Graph, description: &'static str) {
        let before = mem::replace(&mut self.present, next);
        self.undo_stack.push(Step {
            graph: before,
            description,
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        log::debug!("history step: {description} (depth {})", self.undo_stack.len());
    }

    /// Fold `next` into the top step. A group that ends where it started
    /// leaves no step behind.
    fn coalesce(&mut self, next: Graph) {
        self.present = next;
        self.redo_stack.clear();
        if self
            .undo_stack
            .last()
            .is_some_and(|top| top.graph == self.present)
        {
            self.undo_stack.pop();
            self.open_group = None;
        }
    }
}
