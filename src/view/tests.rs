// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Columns, ListView, Modifiers, ViewEvent, MIN_COLUMN_WIDTH};
use crate::model::{BookmarkNode, NodeId, SYNTHETIC_PARENT_INDEX};

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).expect("node id")
}

fn file(raw_id: &str, title: &str, index: i32) -> BookmarkNode {
    BookmarkNode {
        id: id(raw_id),
        parent_id: None,
        title: title.to_owned(),
        url: Some(format!("https://{raw_id}.example")),
        index,
        date_added: None,
        date_group_modified: None,
        readonly: false,
    }
}

fn parent_row(raw_id: &str) -> BookmarkNode {
    BookmarkNode {
        id: id(raw_id),
        parent_id: None,
        title: "..".to_owned(),
        url: None,
        index: SYNTHETIC_PARENT_INDEX,
        date_added: None,
        date_group_modified: None,
        readonly: false,
    }
}

fn four_rows() -> Vec<BookmarkNode> {
    vec![
        file("r0", "alpha", 0),
        file("r1", "beta", 1),
        file("r2", "gamma", 2),
        file("r3", "delta", 3),
    ]
}

fn selected_ids(view: &ListView) -> Vec<String> {
    view.entries(true).iter().map(|node| node.id.to_string()).collect()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ctrl: false, meta: false }
}

fn ctrl() -> Modifiers {
    Modifiers { shift: false, ctrl: true, meta: false }
}

#[test]
fn build_renders_all_rows_in_order_and_selects_the_first() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);

    assert_eq!(view.rows().len(), 4);
    let order: Vec<String> = view.rows().iter().map(|row| row.node.id.to_string()).collect();
    assert_eq!(order, vec!["r0", "r1", "r2", "r3"]);
    assert_eq!(selected_ids(&view), vec!["r0"]);
    assert_eq!(view.take_events(), vec![ViewEvent::SelectionChanged]);
}

#[test]
fn build_with_empty_nodes_selects_nothing() {
    let mut view = ListView::new();
    view.build(Vec::new(), None, &[]);
    assert!(view.rows().is_empty());
    assert!(selected_ids(&view).is_empty());
    assert_eq!(view.take_events(), vec![ViewEvent::SelectionChanged]);
}

#[test]
fn build_drops_unknown_preserved_ids_before_selecting() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[id("r2"), id("gone")]);
    assert_eq!(selected_ids(&view), vec!["r2"]);
}

#[test]
fn build_with_error_renders_the_error_row_only() {
    let mut view = ListView::new();
    view.build(four_rows(), Some("store unavailable".to_owned()), &[]);
    assert!(view.rows().is_empty());
    assert_eq!(view.error(), Some("store unavailable"));
    assert!(view.entries(false).is_empty());
    assert_eq!(view.take_events(), vec![ViewEvent::SelectionChanged]);
}

#[test]
fn update_preserves_the_intersection_of_selection_and_fresh_nodes() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(1, Modifiers::default());
    view.select(3, ctrl());
    assert_eq!(selected_ids(&view), vec!["r1", "r3"]);

    // r3 disappears; selection collapses to the surviving id.
    view.update(vec![file("r0", "alpha", 0), file("r1", "beta", 1)], None);
    assert_eq!(selected_ids(&view), vec!["r1"]);
}

#[test]
fn update_falls_back_to_first_row_when_nothing_survives() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(3, Modifiers::default());

    view.update(vec![file("x0", "new", 0), file("x1", "newer", 1)], None);
    assert_eq!(selected_ids(&view), vec!["x0"]);
}

#[test]
fn shift_click_extends_the_range_from_the_anchor_inclusive() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(0, Modifiers::default());
    view.select(3, shift());
    assert_eq!(selected_ids(&view), vec!["r0", "r1", "r2", "r3"]);
}

#[test]
fn shift_click_upwards_also_covers_the_range() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(2, Modifiers::default());
    view.select(0, shift());
    assert_eq!(selected_ids(&view), vec!["r0", "r1", "r2"]);
}

#[test]
fn ctrl_click_toggles_only_the_clicked_row() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(0, Modifiers::default());
    view.select(2, ctrl());
    assert_eq!(selected_ids(&view), vec!["r0", "r2"]);

    view.select(0, ctrl());
    assert_eq!(selected_ids(&view), vec!["r2"]);
}

#[test]
fn plain_click_replaces_the_selection() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(0, Modifiers::default());
    view.select(2, ctrl());
    view.select(1, Modifiers::default());
    assert_eq!(selected_ids(&view), vec!["r1"]);
}

#[test]
fn next_moves_the_single_selection_down() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.next(false, false);
    assert_eq!(selected_ids(&view), vec!["r1"]);
    view.next(false, false);
    assert_eq!(selected_ids(&view), vec!["r2"]);
}

#[test]
fn next_with_extend_grows_the_selection_downwards() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.next(true, false);
    view.next(true, false);
    assert_eq!(selected_ids(&view), vec!["r0", "r1", "r2"]);
}

#[test]
fn next_with_shrink_drops_the_bottom_endpoint() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.next(true, false);
    view.next(true, false);
    view.next(false, true);
    assert_eq!(selected_ids(&view), vec!["r0", "r1"]);
}

#[test]
fn previous_with_shrink_drops_the_top_endpoint() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.next(true, false);
    view.next(true, false);
    view.previous(false, true);
    assert_eq!(selected_ids(&view), vec!["r1", "r2"]);
}

#[test]
fn shrink_on_a_single_selection_is_a_no_op() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.next(false, true);
    view.previous(false, true);
    assert_eq!(selected_ids(&view), vec!["r0"]);
}

#[test]
fn previous_stops_at_the_first_row() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.previous(false, false);
    assert_eq!(selected_ids(&view), vec!["r0"]);
}

#[test]
fn enter_submits_the_whole_selection_with_modifiers() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(3, ctrl());
    view.take_events();

    let modifiers = Modifiers { shift: false, ctrl: true, meta: false };
    view.submit(modifiers);
    let events = view.take_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        ViewEvent::Submit { entries, modifiers: got } => {
            assert_eq!(entries.len(), 2);
            assert_eq!(*got, modifiers);
        }
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn enter_with_empty_selection_submits_nothing() {
    let mut view = ListView::new();
    view.build(Vec::new(), None, &[]);
    view.take_events();
    view.submit(Modifiers::default());
    assert!(view.take_events().is_empty());
}

#[test]
fn double_click_submits_only_the_clicked_row() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.select(0, Modifiers::default());
    view.select(2, ctrl());
    view.take_events();

    view.double_click(1, Modifiers::default());
    let events = view.take_events();
    match &events[..] {
        [ViewEvent::Submit { entries, .. }] => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].id, id("r1"));
        }
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn type_ahead_jumps_to_the_next_match_then_wraps_to_the_top() {
    let mut view = ListView::new();
    view.build(
        vec![
            file("r0", "alpha", 0),
            file("r1", "beta", 1),
            file("r2", "avocado", 2),
            file("r3", "almond", 3),
        ],
        None,
        &[],
    );

    view.type_ahead('a');
    assert_eq!(selected_ids(&view), vec!["r2"]);
    view.type_ahead('a');
    assert_eq!(selected_ids(&view), vec!["r3"]);
    // no match after the selection; wraps to the first match from the top
    view.type_ahead('a');
    assert_eq!(selected_ids(&view), vec!["r0"]);
}

#[test]
fn type_ahead_matches_case_insensitively() {
    let mut view = ListView::new();
    view.build(vec![file("r0", "alpha", 0), file("r1", "Beta", 1)], None, &[]);
    view.type_ahead('B');
    assert_eq!(selected_ids(&view), vec!["r1"]);
}

#[test]
fn backspace_submits_the_synthetic_parent_row() {
    let mut view = ListView::new();
    let mut nodes = vec![parent_row("up")];
    nodes.extend(four_rows());
    view.build(nodes, None, &[]);
    view.take_events();

    view.backspace();
    let events = view.take_events();
    match &events[..] {
        [ViewEvent::Submit { entries, .. }] => {
            assert_eq!(entries[0].id, id("up"));
            assert!(entries[0].is_synthetic_parent());
        }
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn backspace_beeps_at_the_root() {
    let mut view = ListView::new();
    view.build(four_rows(), None, &[]);
    view.take_events();
    view.backspace();
    assert_eq!(view.take_events(), vec![ViewEvent::Beep]);
}

#[test]
fn entries_without_selection_filter_skips_the_synthetic_parent() {
    let mut view = ListView::new();
    let mut nodes = vec![parent_row("up")];
    nodes.extend(four_rows());
    view.build(nodes, None, &[]);

    let all = view.entries(false);
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|node| !node.is_synthetic_parent()));
}

#[test]
fn ensure_visible_scrolls_the_selection_into_the_viewport() {
    let mut view = ListView::new();
    let nodes: Vec<BookmarkNode> =
        (0..20).map(|i| file(&format!("r{i}"), &format!("row {i}"), i)).collect();
    view.build(nodes, None, &[]);

    view.select(15, Modifiers::default());
    view.ensure_visible(5);
    assert_eq!(view.offset(), 11);

    view.select(2, Modifiers::default());
    view.ensure_visible(5);
    assert_eq!(view.offset(), 2);
}

#[test]
fn column_resize_redistributes_between_adjacent_columns() {
    let mut columns = Columns::default();
    let before = columns.cell_widths(100);
    columns.resize(1, 10, 100);
    let after = columns.cell_widths(100);

    assert_eq!(u32::from(after[0]) + u32::from(after[1]), u32::from(before[0]) + u32::from(before[1]));
    assert!(after[0] > before[0]);
    assert!(after[1] < before[1]);
}

#[test]
fn column_resize_blocks_below_the_minimum_width() {
    let mut columns = Columns::default();
    let before = columns.clone();
    // a drag this large would push the dragged column below the floor
    columns.resize(2, 100, 100);
    assert_eq!(columns, before);

    columns.resize(2, -100, 100);
    assert_eq!(columns, before);

    assert!(MIN_COLUMN_WIDTH > 0);
}
