/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Point-and-graph editor core.
//!
//! Nodes are placed with pointer clicks, linked into an undirected graph by
//! selecting them, and every structural edit can be undone one step at a
//! time. Windowing and painting live outside this crate: the input layer
//! feeds [`app::GraphIntent`]s to [`app::GraphEditorApp`], and the painter
//! pulls a [`render::RenderPacket`] between events.

pub mod app;
pub mod graph;
pub mod history;
pub mod input;
pub mod prefs;
pub mod render;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
