/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use euclid::default::Point2D;
use pointgraph::VERSION;
use pointgraph::app::{GraphEditorApp, GraphIntent};
use pointgraph::graph::NodeKey;
use pointgraph::history::EditOperation;
use pointgraph::input::{ShellLine, intent_for_event, parse_line};
use pointgraph::render::derive_render_packet;
use proptest::prelude::*;

fn point(x: f32, y: f32) -> Point2D<f32> {
    Point2D::new(x, y)
}

/// Three nodes at (0,0), (10,0), (100,100).
fn three_node_app() -> (GraphEditorApp, Vec<NodeKey>) {
    let mut app = GraphEditorApp::default();
    let keys = [point(0.0, 0.0), point(10.0, 0.0), point(100.0, 100.0)]
        .into_iter()
        .map(|p| app.create_node_at(p))
        .collect();
    (app, keys)
}

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}

#[test]
fn secondary_clicks_link_two_nearby_nodes() {
    let (mut app, keys) = three_node_app();

    app.apply_intent(GraphIntent::SelectAndConnectAt {
        position: point(1.0, 1.0),
    });
    assert_eq!(app.selection().len(), 1);
    app.apply_intent(GraphIntent::SelectAndConnectAt {
        position: point(15.0, 0.0),
    });

    assert!(app.selection().is_empty());
    assert_eq!(app.graph().node_count(), 3);
    assert_eq!(app.graph().edge_count(), 1);
    assert!(app.graph().has_edge_between(keys[0], keys[1]));
    assert_eq!(app.graph().get_node(keys[2]).unwrap().degree(), 0);
}

#[test]
fn undo_after_link_removes_only_the_edge() {
    let (mut app, keys) = three_node_app();
    app.select_and_connect_at(point(1.0, 1.0));
    app.select_and_connect_at(point(15.0, 0.0));

    assert_eq!(
        app.undo(),
        Some(EditOperation::Connect {
            a: keys[0],
            b: keys[1]
        })
    );
    assert_eq!(app.graph().node_count(), 3);
    assert_eq!(app.graph().edge_count(), 0);
}

#[test]
fn click_on_later_node_within_reach_of_earlier_one_picks_the_earlier() {
    let (mut app, keys) = three_node_app();

    // (10,0) is 10 away from the node at the origin, inside the pick radius.
    let first = app.select_and_connect_at(point(0.0, 0.0));
    let second = app.select_and_connect_at(point(10.0, 0.0));

    assert_eq!(first.picked, Some(keys[0]));
    assert_eq!(second.picked, Some(keys[0]));
    assert!(second.linked.is_empty());
    assert!(app.selection().is_empty());
    assert_eq!(app.graph().edge_count(), 0);
}

#[test]
fn third_secondary_click_starts_a_new_selection() {
    let (mut app, keys) = three_node_app();
    let mut trigger_sizes = Vec::new();
    for position in [point(0.0, 0.0), point(15.0, 0.0), point(100.0, 100.0)] {
        let before = app.selection().len();
        let outcome = app.select_and_connect_at(position);
        if !outcome.linked.is_empty() {
            trigger_sizes.push(before + 1);
        }
    }

    // Fan-out fired once, when the selection reached two nodes.
    assert_eq!(trigger_sizes, vec![2]);
    let expected: usize = trigger_sizes.iter().map(|n| n * (n - 1) / 2).sum();
    assert_eq!(app.graph().edge_count(), expected);
    assert_eq!(app.selection().iter().collect::<Vec<_>>(), vec![keys[2]]);
}

#[test]
fn double_clicks_arm_a_full_fan_out() {
    let mut app = GraphEditorApp::default();
    let positions = [
        point(0.0, 0.0),
        point(100.0, 0.0),
        point(200.0, 0.0),
        point(300.0, 0.0),
    ];
    for position in positions {
        app.create_node_at(position);
    }
    for position in &positions[..3] {
        app.toggle_selection_at(*position);
    }

    let outcome = app.select_and_connect_at(positions[3]);
    assert_eq!(outcome.linked.len(), 4 * 3 / 2);
    assert_eq!(app.graph().edge_count(), 6);

    // Each link is its own undo step.
    for remaining in (0..6).rev() {
        app.undo();
        assert_eq!(app.graph().edge_count(), remaining);
        assert_eq!(app.graph().node_count(), 4);
    }
}

#[test]
fn fan_out_over_three_armed_nodes_links_every_pair() {
    let (mut app, keys) = three_node_app();
    app.toggle_selection_at(point(0.0, 0.0));
    app.toggle_selection_at(point(15.0, 0.0));
    assert_eq!(app.selection().len(), 2);

    let outcome = app.select_and_connect_at(point(100.0, 100.0));
    let expected = vec![(keys[0], keys[1]), (keys[0], keys[2]), (keys[1], keys[2])];
    assert_eq!(outcome.picked, Some(keys[2]));
    assert_eq!(outcome.linked, expected);
    assert_eq!(app.graph().edge_count(), 3 * 2 / 2);
    assert!(app.selection().is_empty());

    // Links come back off the log newest first, one per undo.
    for (remaining, &(a, b)) in expected.iter().enumerate().rev() {
        assert_eq!(app.undo(), Some(EditOperation::Connect { a, b }));
        assert_eq!(app.graph().edge_count(), remaining);
        assert!(!app.graph().has_edge_between(a, b));
    }
    assert_eq!(app.graph().node_count(), 3);
}

#[test]
fn clear_all_leaves_nothing_to_undo() {
    let (mut app, _) = three_node_app();
    app.select_and_connect_at(point(0.0, 0.0));
    app.select_and_connect_at(point(15.0, 0.0));
    app.toggle_selection_at(point(100.0, 100.0));

    app.apply_intent(GraphIntent::ClearGraph);
    assert_eq!(app.graph().node_count(), 0);
    assert!(app.selection().is_empty());
    assert!(app.history().is_empty());

    app.apply_intent(GraphIntent::Undo);
    assert_eq!(app.graph().node_count(), 0);
    assert!(app.history().is_empty());
}

#[test]
fn undo_k_times_empties_graph_and_extra_undo_is_noop() {
    let (mut app, _) = three_node_app();
    app.select_and_connect_at(point(0.0, 0.0));
    app.select_and_connect_at(point(15.0, 0.0));
    let recorded = app.history().len();
    assert_eq!(recorded, 4);

    for _ in 0..recorded {
        assert!(app.undo().is_some());
    }
    assert!(app.graph().is_empty());
    assert_eq!(app.undo(), None);
    assert!(app.graph().is_empty());
}

#[test]
fn shell_lines_drive_the_editor() {
    let script = "\
        click 0 0\n\
        click 10 0\n\
        # link them\n\
        select 0 0\n\
        select 15 0\n\
        show\n";
    let mut app = GraphEditorApp::default();
    for line in script.lines() {
        if let Ok(ShellLine::Event(event)) = parse_line(line) {
            app.apply_intent(intent_for_event(event));
        }
    }

    let packet = derive_render_packet(&app);
    assert_eq!(packet.circles.len(), 2);
    assert_eq!(packet.segments.len(), 1);
    assert!(packet.circles.iter().all(|circle| !circle.selected));
}

fn grid_point() -> impl Strategy<Value = Point2D<f32>> {
    (0u8..6, 0u8..6).prop_map(|(x, y)| point(f32::from(x) * 20.0, f32::from(y) * 20.0))
}

fn intent_strategy() -> impl Strategy<Value = GraphIntent> {
    prop_oneof![
        4 => grid_point().prop_map(|position| GraphIntent::CreateNodeAt { position }),
        4 => grid_point().prop_map(|position| GraphIntent::SelectAndConnectAt { position }),
        2 => grid_point().prop_map(|position| GraphIntent::ToggleSelectionAt { position }),
        2 => Just(GraphIntent::Undo),
        1 => Just(GraphIntent::ClearGraph),
    ]
}

fn assert_invariants(app: &GraphEditorApp) {
    let graph = app.graph();
    assert_eq!(graph.find_asymmetric_link(), None);
    for (key, node) in graph.nodes() {
        assert!(!node.has_neighbor(key), "self-loop on {key:?}");
    }
    for key in app.selection().iter() {
        assert!(graph.contains_node(key), "selected {key:?} is gone");
    }

    let (replayed, key_map) = app.history().replay();
    assert_eq!(replayed.node_count(), graph.node_count());
    assert_eq!(replayed.edge_count(), graph.edge_count());
    for edge in graph.edges() {
        assert!(replayed.has_edge_between(key_map[&edge.a], key_map[&edge.b]));
    }
}

proptest! {
    #[test]
    fn random_edits_keep_graph_consistent(
        intents in prop::collection::vec(intent_strategy(), 0..60),
    ) {
        let mut app = GraphEditorApp::default();
        for intent in intents {
            app.apply_intent(intent);
            assert_invariants(&app);
        }

        let recorded = app.history().len();
        for _ in 0..recorded {
            prop_assert!(app.undo().is_some());
            assert_invariants(&app);
        }
        prop_assert!(app.graph().is_empty());
        prop_assert_eq!(app.graph().edge_count(), 0);
        prop_assert_eq!(app.undo(), None);
    }

    #[test]
    fn connect_is_idempotent_and_self_links_are_rejected(
        count in 2usize..8,
        a in 0usize..8,
        b in 0usize..8,
    ) {
        let mut app = GraphEditorApp::default();
        for index in 0..count {
            app.create_node_at(point(index as f32 * 100.0, 0.0));
        }
        let keys: Vec<NodeKey> = app.graph().nodes().map(|(key, _)| key).collect();
        let (a, b) = (keys[a % count], keys[b % count]);

        let mut graph = app.graph().clone();
        if a == b {
            prop_assert!(graph.connect(a, b).is_err());
            prop_assert_eq!(graph.edge_count(), 0);
        } else {
            prop_assert_eq!(graph.connect(a, b), Ok(true));
            let once = graph.clone();
            prop_assert_eq!(graph.connect(a, b), Ok(false));
            prop_assert_eq!(graph.edge_count(), once.edge_count());
            prop_assert!(graph.disconnect(a, b));
            prop_assert!(!graph.disconnect(a, b));
        }
        prop_assert_eq!(graph.find_asymmetric_link(), None);
    }
}
