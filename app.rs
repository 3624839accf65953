/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application state for the point editor.
//!
//! `GraphEditorApp` is the only entry point for the input layer. Every
//! intent runs to completion before the next one; renderers read the graph
//! and selection between intents.

use euclid::default::Point2D;
use log::{debug, trace};

use crate::graph::{Graph, Node, NodeKey};
use crate::history::{EditHistory, EditOperation};
use crate::prefs::EditorPrefs;

/// Nodes armed for the next connect gesture.
///
/// Insertion order is kept: fan-out links pairs in the order nodes were
/// picked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    order: Vec<NodeKey>,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic revision incremented whenever the selection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Deselect `key` if selected, otherwise append it.
    pub fn toggle(&mut self, key: NodeKey) {
        if self.contains(key) {
            self.order.retain(|existing| *existing != key);
        } else {
            self.order.push(key);
        }
        self.revision = self.revision.saturating_add(1);
    }

    /// Drop `key` from the selection. Returns `false` if it was not selected.
    pub fn remove(&mut self, key: NodeKey) -> bool {
        let before = self.order.len();
        self.order.retain(|existing| *existing != key);
        if self.order.len() == before {
            return false;
        }
        self.revision = self.revision.saturating_add(1);
        true
    }

    pub fn clear(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.order.clear();
        self.revision = self.revision.saturating_add(1);
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.order.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected keys in the order they were picked.
    pub fn iter(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.order.iter().copied()
    }

    /// Every unordered pair `(i, j)` with `i` picked before `j`.
    pub fn pairs(&self) -> Vec<(NodeKey, NodeKey)> {
        let count = self.order.len();
        let mut pairs = Vec::with_capacity(count * count.saturating_sub(1) / 2);
        for (index, a) in self.order.iter().enumerate() {
            for b in &self.order[index + 1..] {
                pairs.push((*a, *b));
            }
        }
        pairs
    }

    /// First node, in iteration order, within `radius` of `position`.
    ///
    /// Pure query; ties go to the node that comes first in `nodes`.
    pub fn find_node_near<'a>(
        position: Point2D<f32>,
        radius: f32,
        nodes: impl IntoIterator<Item = (NodeKey, &'a Node)>,
    ) -> Option<NodeKey> {
        nodes
            .into_iter()
            .find(|(_, node)| (node.position() - position).length() <= radius)
            .map(|(key, _)| key)
    }
}

/// Deterministic mutation intent boundary for graph state updates.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphIntent {
    /// Primary click: place a node.
    CreateNodeAt { position: Point2D<f32> },
    /// Secondary click: toggle the nearest node, then link the selection.
    SelectAndConnectAt { position: Point2D<f32> },
    /// Double click: toggle the nearest node without linking.
    ToggleSelectionAt { position: Point2D<f32> },
    Undo,
    ClearGraph,
}

/// What a secondary click did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// Node toggled by the click, if any was in range.
    pub picked: Option<NodeKey>,
    /// Links created by the fan-out, in the order they were recorded.
    pub linked: Vec<(NodeKey, NodeKey)>,
}

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct GraphEditorApp {
    graph: Graph,
    selection: SelectionState,
    history: EditHistory,
    prefs: EditorPrefs,
}

impl GraphEditorApp {
    pub fn new(prefs: EditorPrefs) -> Self {
        Self {
            prefs,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn prefs(&self) -> &EditorPrefs {
        &self.prefs
    }

    pub fn is_selected(&self, key: NodeKey) -> bool {
        self.selection.contains(key)
    }

    /// Apply a batch of intents deterministically in insertion order.
    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = GraphIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    pub fn apply_intent(&mut self, intent: GraphIntent) {
        debug!("apply intent {intent:?}");
        match intent {
            GraphIntent::CreateNodeAt { position } => {
                self.create_node_at(position);
            },
            GraphIntent::SelectAndConnectAt { position } => {
                self.select_and_connect_at(position);
            },
            GraphIntent::ToggleSelectionAt { position } => {
                self.toggle_selection_at(position);
            },
            GraphIntent::Undo => {
                self.undo();
            },
            GraphIntent::ClearGraph => self.clear_graph(),
        }
    }

    /// Place a node and record it.
    pub fn create_node_at(&mut self, position: Point2D<f32>) -> NodeKey {
        let key = self.graph.add_node(position);
        self.history.record(EditOperation::AddNode { key });
        key
    }

    /// Toggle the node under `position`, then link every selected pair once
    /// two or more nodes are selected.
    ///
    /// The fan-out runs whenever the selection holds at least two nodes after
    /// the pick, even if the click itself missed. Each new link is its own
    /// undo step. The selection is cleared after a fan-out.
    pub fn select_and_connect_at(&mut self, position: Point2D<f32>) -> ConnectOutcome {
        let mut outcome = ConnectOutcome {
            picked: self.toggle_selection_at(position),
            linked: Vec::new(),
        };
        if self.selection.len() < 2 {
            return outcome;
        }

        for (a, b) in self.selection.pairs() {
            match self.graph.connect(a, b) {
                Ok(true) => {
                    self.history.record(EditOperation::Connect { a, b });
                    outcome.linked.push((a, b));
                },
                Ok(false) => debug!("{a:?} and {b:?} already linked; nothing recorded"),
                Err(err) => debug!("skipping link: {err}"),
            }
        }
        self.selection.clear();
        outcome
    }

    /// Toggle the node under `position`. Returns the toggled node.
    pub fn toggle_selection_at(&mut self, position: Point2D<f32>) -> Option<NodeKey> {
        let Some(key) =
            SelectionState::find_node_near(position, self.prefs.pick_radius, self.graph.nodes())
        else {
            trace!("no node within {} of {position:?}", self.prefs.pick_radius);
            return None;
        };
        self.selection.toggle(key);
        Some(key)
    }

    /// Undo the most recent structural edit.
    pub fn undo(&mut self) -> Option<EditOperation> {
        let undone = self.history.undo(&mut self.graph, &mut self.selection);
        if undone.is_none() {
            trace!("undo requested with empty history");
        }
        undone
    }

    /// Delete every node, clear the selection, and forget the history.
    pub fn clear_graph(&mut self) {
        self.graph.clear();
        self.selection.clear();
        self.history.reset();
    }
}
