/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Render-packet derivation.
//!
//! The painter is outside this crate. Once per paint pass it asks for a
//! `RenderPacket`: one circle per node (selected ones flagged) and one
//! segment per undirected edge.

use std::fmt;

use euclid::default::{Point2D, Size2D};

use crate::app::GraphEditorApp;
use crate::graph::NodeKey;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeCircle {
    pub key: NodeKey,
    pub center: Point2D<f32>,
    pub radius: f32,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub from: NodeKey,
    pub to: NodeKey,
    pub start: Point2D<f32>,
    pub end: Point2D<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPacket {
    pub canvas: Size2D<u32>,
    /// Insertion order.
    pub circles: Vec<NodeCircle>,
    pub segments: Vec<EdgeSegment>,
}

/// Snapshot the editor state for painting.
pub fn derive_render_packet(app: &GraphEditorApp) -> RenderPacket {
    let graph = app.graph();
    let prefs = app.prefs();

    let circles = graph
        .nodes()
        .map(|(key, node)| NodeCircle {
            key,
            center: node.position(),
            radius: prefs.node_radius,
            selected: app.is_selected(key),
        })
        .collect();

    let segments = graph
        .edges()
        .filter_map(|edge| {
            let start = graph.get_node(edge.a)?.position();
            let end = graph.get_node(edge.b)?.position();
            Some(EdgeSegment {
                from: edge.a,
                to: edge.b,
                start,
                end,
            })
        })
        .collect();

    RenderPacket {
        canvas: Size2D::new(prefs.canvas_width, prefs.canvas_height),
        circles,
        segments,
    }
}

impl fmt::Display for RenderPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "canvas {}x{}: {} nodes, {} edges",
            self.canvas.width,
            self.canvas.height,
            self.circles.len(),
            self.segments.len()
        )?;
        for (index, circle) in self.circles.iter().enumerate() {
            let marker = if circle.selected { "*" } else { " " };
            writeln!(
                f,
                "{marker} node {index} at ({}, {})",
                circle.center.x, circle.center.y
            )?;
        }
        for segment in &self.segments {
            writeln!(
                f,
                "  edge ({}, {}) -- ({}, {})",
                segment.start.x, segment.start.y, segment.end.x, segment.end.y
            )?;
        }
        Ok(())
    }
}
