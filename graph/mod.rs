/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the point editor.
//!
//! Core structures:
//! - `Graph`: node arena backed by `slotmap::SlotMap`, iterated in insertion order
//! - `Node`: a placed point with its undirected neighbor set
//! - `EdgeView`: read-only view of one undirected link
//!
//! Boundary: neighbor mutation on `Node` is `pub(crate)`. Only `Graph` may
//! change adjacency, which keeps links symmetric.

use euclid::default::Point2D;
use slotmap::{SlotMap, new_key_type};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

new_key_type! {
    /// Stable node handle (generational slot key; never reused after removal)
    pub struct NodeKey;
}

/// A placed point in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: NodeKey,
    position: Point2D<f32>,
    neighbors: BTreeSet<NodeKey>,
}

impl Node {
    fn new(key: NodeKey, position: Point2D<f32>) -> Self {
        Self {
            key,
            position,
            neighbors: BTreeSet::new(),
        }
    }

    /// Handle assigned when the node was created.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Position in canvas space. Fixed at creation.
    pub fn position(&self) -> Point2D<f32> {
        self.position
    }

    pub fn has_neighbor(&self, key: NodeKey) -> bool {
        self.neighbors.contains(&key)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns `true` if the link was not already present.
    pub(crate) fn add_neighbor(&mut self, key: NodeKey) -> bool {
        self.neighbors.insert(key)
    }

    /// Idempotent: removing an absent neighbor is a no-op returning `false`.
    pub(crate) fn remove_neighbor(&mut self, key: NodeKey) -> bool {
        self.neighbors.remove(&key)
    }
}

/// Read-only view of an undirected edge.
///
/// `a` is the endpoint inserted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView {
    pub a: NodeKey,
    pub b: NodeKey,
}

/// Rejected structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    /// Both endpoints are the same node.
    SelfLoop(NodeKey),
    /// An endpoint is not in the graph.
    MissingNode(NodeKey),
}

impl fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidOperation::SelfLoop(key) => write!(f, "cannot link node {key:?} to itself"),
            InvalidOperation::MissingNode(key) => write!(f, "node {key:?} is not in the graph"),
        }
    }
}

impl std::error::Error for InvalidOperation {}

/// Main graph structure: owns every node and all adjacency.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: SlotMap<NodeKey, Node>,

    /// Insertion order, for deterministic iteration and painting.
    order: Vec<NodeKey>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node at `position`. Always succeeds.
    pub fn add_node(&mut self, position: Point2D<f32>) -> NodeKey {
        let key = self.nodes.insert_with_key(|key| Node::new(key, position));
        self.order.push(key);
        key
    }

    /// Remove a node and every link that points at it.
    ///
    /// Returns `false` (and changes nothing) if the key is absent.
    pub fn remove_node(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.remove(key) else {
            return false;
        };
        for neighbor in node.neighbors() {
            if let Some(other) = self.nodes.get_mut(neighbor) {
                other.remove_neighbor(key);
            }
        }
        self.order.retain(|candidate| *candidate != key);
        self.debug_assert_symmetric();
        true
    }

    /// Link `a` and `b`.
    ///
    /// Returns `Ok(true)` when a new link was made and `Ok(false)` when the
    /// link already existed.
    pub fn connect(&mut self, a: NodeKey, b: NodeKey) -> Result<bool, InvalidOperation> {
        if a == b {
            return Err(InvalidOperation::SelfLoop(a));
        }
        for key in [a, b] {
            if !self.nodes.contains_key(key) {
                return Err(InvalidOperation::MissingNode(key));
            }
        }
        let added = self
            .nodes
            .get_mut(a)
            .is_some_and(|node| node.add_neighbor(b));
        if let Some(node) = self.nodes.get_mut(b) {
            node.add_neighbor(a);
        }
        self.debug_assert_symmetric();
        Ok(added)
    }

    /// Remove the link between `a` and `b`. Returns `false` if there was none.
    pub fn disconnect(&mut self, a: NodeKey, b: NodeKey) -> bool {
        let removed_ab = self
            .nodes
            .get_mut(a)
            .is_some_and(|node| node.remove_neighbor(b));
        let removed_ba = self
            .nodes
            .get_mut(b)
            .is_some_and(|node| node.remove_neighbor(a));
        self.debug_assert_symmetric();
        removed_ab || removed_ba
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
    }

    /// Get a node by key
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterate over all nodes as (key, node) pairs, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.nodes.get(*key).map(|node| (*key, node)))
    }

    /// Iterate neighbor keys for a node (empty if the node is absent)
    pub fn neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.get(key).into_iter().flat_map(|node| node.neighbors())
    }

    /// Iterate every undirected edge once, ordered by its earlier endpoint
    pub fn edges(&self) -> impl Iterator<Item = EdgeView> + '_ {
        let mut visited: HashSet<NodeKey> = HashSet::with_capacity(self.order.len());
        self.nodes().flat_map(move |(key, node)| {
            visited.insert(key);
            node.neighbors()
                .filter(|neighbor| !visited.contains(neighbor))
                .map(move |b| EdgeView { a: key, b })
                .collect::<Vec<_>>()
        })
    }

    /// Check if `a` and `b` are linked
    pub fn has_edge_between(&self, a: NodeKey, b: NodeKey) -> bool {
        self.nodes.get(a).is_some_and(|node| node.has_neighbor(b))
    }

    /// Count of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of undirected edges in the graph
    pub fn edge_count(&self) -> usize {
        let endpoints: usize = self.nodes.values().map(Node::degree).sum();
        endpoints / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First one-sided link found, as `(holder, missing_back_link)`.
    ///
    /// Also reports links to keys that are no longer in the graph.
    pub fn find_asymmetric_link(&self) -> Option<(NodeKey, NodeKey)> {
        self.nodes().find_map(|(key, node)| {
            node.neighbors()
                .find(|neighbor| !self.has_edge_between(*neighbor, key))
                .map(|neighbor| (key, neighbor))
        })
    }

    fn debug_assert_symmetric(&self) {
        #[cfg(debug_assertions)]
        if let Some((holder, missing)) = self.find_asymmetric_link() {
            panic!("asymmetric adjacency: {holder:?} lists {missing:?} without a back link");
        }
    }
}
