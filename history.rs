/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Undo log for structural graph edits.
//!
//! The log holds only node keys. Replaying it in order against an empty
//! graph reproduces the current graph; undone entries are popped, never
//! marked.

use std::collections::HashMap;

use euclid::default::Point2D;
use log::debug;

use crate::app::SelectionState;
use crate::graph::{Graph, NodeKey};

/// One recorded, reversible structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    AddNode { key: NodeKey },
    Connect { a: NodeKey, b: NodeKey },
}

#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    operations: Vec<EditOperation>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation. Call only after the matching graph edit succeeded.
    pub fn record(&mut self, operation: EditOperation) {
        debug!("history: record {operation:?}");
        self.operations.push(operation);
    }

    /// Pop the most recent operation and apply its inverse.
    ///
    /// Undoing an `AddNode` also drops the node from `selection`. Returns the
    /// undone operation, or `None` when the log is empty.
    pub fn undo(
        &mut self,
        graph: &mut Graph,
        selection: &mut SelectionState,
    ) -> Option<EditOperation> {
        let operation = self.operations.pop()?;
        match operation {
            EditOperation::AddNode { key } => {
                selection.remove(key);
                graph.remove_node(key);
            },
            EditOperation::Connect { a, b } => {
                graph.disconnect(a, b);
            },
        }
        debug!("history: undo {operation:?} ({} left)", self.operations.len());
        Some(operation)
    }

    /// Forget every recorded operation. The graph is left untouched.
    pub fn reset(&mut self) {
        self.operations.clear();
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn last(&self) -> Option<&EditOperation> {
        self.operations.last()
    }

    /// Recorded operations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EditOperation> + '_ {
        self.operations.iter()
    }

    /// Rebuild a graph by replaying the log against an empty graph.
    ///
    /// Positions are not part of the log, so replayed nodes sit at the
    /// origin. The returned map translates recorded keys to the fresh ones.
    pub fn replay(&self) -> (Graph, HashMap<NodeKey, NodeKey>) {
        let mut graph = Graph::new();
        let mut key_map = HashMap::new();
        for operation in &self.operations {
            match *operation {
                EditOperation::AddNode { key } => {
                    key_map.insert(key, graph.add_node(Point2D::origin()));
                },
                EditOperation::Connect { a, b } => {
                    let (Some(&fresh_a), Some(&fresh_b)) = (key_map.get(&a), key_map.get(&b))
                    else {
                        debug!("replay: link {a:?}-{b:?} names an unrecorded node");
                        continue;
                    };
                    match graph.connect(fresh_a, fresh_b) {
                        Ok(true) => {},
                        Ok(false) => debug!("replay: {a:?}-{b:?} recorded twice"),
                        Err(err) => debug!("replay: skipping link: {err}"),
                    }
                },
            }
        }
        (graph, key_map)
    }
}
