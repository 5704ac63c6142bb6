mod common;

use ndarray::array;

use pixcluscol_core::consts::MAX_CLUSTERS;
use pixcluscol_core::picker;
use pixcluscol_core::{Annotator, AnnotatorError, Event, Key, SessionMode, Shown};

use common::{hover, press, scenario_annotator, type_str};

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_initial_state() {
    let a = scenario_annotator();
    assert_eq!(a.shape(), (3, 3));
    assert_eq!(a.label_names(), &["_1".to_string(), "_2".to_string()]);
    assert_eq!(a.mode(), SessionMode::Idle);
    assert_eq!(a.hovered(), None);
    assert_eq!(a.shown(), Shown::Color);
    assert_eq!(a.status_text(), "");
    assert_eq!(a.picker().dim(), (256, 256, 3));
}

#[test]
fn test_zero_label_rejected() {
    let result = Annotator::new(array![[1, 0], [1, 1]]);
    assert!(matches!(
        result,
        Err(AnnotatorError::InvalidLabel { row: 0, col: 1, .. })
    ));
}

#[test]
fn test_empty_grid_rejected() {
    let grid = ndarray::Array2::<u32>::zeros((0, 4));
    assert!(matches!(Annotator::new(grid), Err(AnnotatorError::EmptyImage)));
}

#[test]
fn test_cluster_count_is_bounded() {
    let result = Annotator::new(array![[1, 60_000]]);
    assert!(matches!(
        result,
        Err(AnnotatorError::TooManyClusters { count: 60_000, max: MAX_CLUSTERS })
    ));

    let a = Annotator::new(array![[1, MAX_CLUSTERS as u32]]).unwrap();
    assert_eq!(a.num_labels(), MAX_CLUSTERS);
}

#[test]
fn test_sparse_labels_keep_empty_clusters() {
    let a = Annotator::new(array![[1, 4], [4, 1]]).unwrap();
    assert_eq!(a.num_labels(), 4);
    assert!(a.masks().index_axis(ndarray::Axis(0), 1).iter().all(|&m| !m));
}

// ---------------------------------------------------------------------------
// Hovering
// ---------------------------------------------------------------------------

#[test]
fn test_hover_highlights_cluster() {
    let mut a = scenario_annotator();
    hover(&mut a, 1.0, 1.0);
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.hovered(), Some(1));
    assert_eq!(a.shown(), Shown::Highlight(1));
    assert_eq!(a.label_buffer(), "_2");
    assert_eq!(a.status_text(), "1: _2");
    assert_eq!(a.displayed(), a.highlight(1).unwrap());
}

#[test]
fn test_move_without_enter_is_ignored() {
    let mut a = scenario_annotator();
    a.handle(Event::PointerMove { x: 0.0, y: 0.0 }).unwrap();
    assert_eq!(a.mode(), SessionMode::Idle);
    assert_eq!(a.hovered(), None);
}

#[test]
fn test_pointer_off_grid_is_clamped() {
    let mut a = scenario_annotator();
    hover(&mut a, 10.0, -5.0);
    // Clamps to row 0, col 2.
    assert_eq!(a.hovered(), Some(1));
    assert_eq!(a.cluster_at(-3.0, 40.0).unwrap(), 0);
}

#[test]
fn test_non_finite_pointer_is_an_error() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    let result = a.handle(Event::PointerMove {
        x: f64::NAN,
        y: 1.0,
    });
    assert!(matches!(result, Err(AnnotatorError::PointerOutOfBounds { .. })));
    assert_eq!(a.hovered(), Some(0));
}

#[test]
fn test_leave_while_hovering_resets() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    a.handle(Event::PointerLeave).unwrap();
    assert_eq!(a.mode(), SessionMode::Idle);
    assert_eq!(a.hovered(), None);
    assert_eq!(a.shown(), Shown::Color);
    assert_eq!(a.status_text(), "");

    // Re-entering over the same cluster highlights it again.
    hover(&mut a, 0.0, 0.0);
    assert_eq!(a.shown(), Shown::Highlight(0));
}

#[test]
fn test_keys_ignored_when_idle() {
    let mut a = scenario_annotator();
    type_str(&mut a, "abc");
    press(&mut a, "enter");
    assert_eq!(a.mode(), SessionMode::Idle);
    assert_eq!(a.label_names()[0], "_1");
}

// ---------------------------------------------------------------------------
// Label editing
// ---------------------------------------------------------------------------

#[test]
fn test_rename_scenario() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    type_str(&mut a, "wall");
    assert_eq!(a.mode(), SessionMode::EditingLabel);
    assert_eq!(a.status_text(), "0(editing): wall");

    press(&mut a, "enter");
    assert_eq!(a.label_names()[0], "wall");
    assert_eq!(a.label_names()[1], "_2");
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.shown(), Shown::Highlight(0));
    assert_eq!(a.status_text(), "0: wall");
}

#[test]
fn test_backspace_and_clear() {
    let mut a = scenario_annotator();
    hover(&mut a, 2.0, 2.0);
    type_str(&mut a, "roof");
    press(&mut a, "backspace");
    assert_eq!(a.label_buffer(), "roo");
    press(&mut a, "ctrl+d");
    assert_eq!(a.label_buffer(), "");
    type_str(&mut a, "sky");
    press(&mut a, "f5");
    press(&mut a, "enter");
    assert_eq!(a.label_names()[1], "sky");
}

#[test]
fn test_escape_restores_name() {
    for typed in 0..5 {
        let mut a = scenario_annotator();
        hover(&mut a, 0.0, 0.0);
        type_str(&mut a, &"xyzzy"[..typed]);
        press(&mut a, "escape");
        assert_eq!(a.label_names(), &["_1".to_string(), "_2".to_string()], "typed {typed}");
        assert_eq!(a.label_buffer(), "_1");
        assert_eq!(a.mode(), SessionMode::Hovering);
    }
}

#[test]
fn test_escape_while_hovering_changes_nothing() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    let revision = a.revision();

    press(&mut a, "escape");
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.hovered(), Some(0));
    assert_eq!(a.shown(), Shown::Highlight(0));
    assert_eq!(a.label_buffer(), "_1");
    assert_eq!(a.label_names(), &["_1".to_string(), "_2".to_string()]);
    assert_eq!(a.revision(), revision);

    // Still editable afterwards.
    type_str(&mut a, "x");
    press(&mut a, "enter");
    assert_eq!(a.label_names()[0], "x");
}

#[test]
fn test_moving_to_other_cluster_abandons_edit() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    type_str(&mut a, "ab");
    a.handle(Event::PointerMove { x: 2.0, y: 2.0 }).unwrap();
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.hovered(), Some(1));
    assert_eq!(a.label_buffer(), "_2");
    assert_eq!(a.label_names()[0], "_1");
}

#[test]
fn test_moving_within_cluster_keeps_edit() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    type_str(&mut a, "ab");
    a.handle(Event::PointerMove { x: 0.0, y: 2.0 }).unwrap();
    assert_eq!(a.mode(), SessionMode::EditingLabel);
    assert_eq!(a.label_buffer(), "ab");
}

#[test]
fn test_edit_survives_leaving_plot() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    type_str(&mut a, "door");
    a.handle(Event::PointerLeave).unwrap();
    assert_eq!(a.mode(), SessionMode::EditingLabel);
    assert_eq!(a.shown(), Shown::Color);

    press(&mut a, "return");
    assert_eq!(a.label_names()[0], "door");
    assert_eq!(a.mode(), SessionMode::Idle);
    assert_eq!(a.shown(), Shown::Color);
}

// ---------------------------------------------------------------------------
// Color picking
// ---------------------------------------------------------------------------

#[test]
fn test_recolor_cycle() {
    let mut a = scenario_annotator();
    hover(&mut a, 2.0, 0.0);
    a.handle(Event::Click { x: 2.0, y: 0.0 }).unwrap();
    assert_eq!(a.mode(), SessionMode::PickingColor { pending: 1 });
    assert_eq!(a.pending_color(), Some(1));
    assert_eq!(a.shown(), Shown::Picker);
    assert_eq!(a.displayed(), a.picker().view());

    a.commit_color([0, 128, 255]).unwrap();
    assert_eq!(a.palette()[1], [0, 128, 255]);
    assert_eq!(a.palette()[0], [0, 0, 0]);
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.shown(), Shown::Color);
    assert_eq!(a.label_buffer(), "");

    for (r, c) in [(0, 2), (1, 1), (1, 2), (2, 2)] {
        assert_eq!(a.color_image()[[r, c, 2]], 255);
    }
    assert_eq!(a.color_image()[[0, 0, 2]], 0);
}

#[test]
fn test_click_in_picker_samples_color() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    a.handle(Event::Click { x: 0.0, y: 0.0 }).unwrap();

    let expected = picker::sample(a.picker(), a.shape(), 1.4, 2.0).unwrap();
    a.handle(Event::Click { x: 1.4, y: 2.0 }).unwrap();
    assert_eq!(a.palette()[0], expected);
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_ne!(expected, [0, 0, 0]);
}

#[test]
fn test_escape_cancels_pick() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    a.handle(Event::Click { x: 0.0, y: 0.0 }).unwrap();
    type_str(&mut a, "zz");
    press(&mut a, "escape");
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.shown(), Shown::Color);
    assert_eq!(a.palette()[0], [0, 0, 0]);
    assert_eq!(a.label_names()[0], "_1");
    assert_eq!(a.label_buffer(), "_1");
}

#[test]
fn test_enter_during_pick_renames() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    a.handle(Event::Click { x: 0.0, y: 0.0 }).unwrap();
    assert_eq!(a.status_text(), "0: _1");
    type_str(&mut a, "x");
    press(&mut a, "enter");
    assert_eq!(a.label_names()[0], "x");
    assert_eq!(a.palette()[0], [0, 0, 0]);
    assert_eq!(a.mode(), SessionMode::Hovering);
    assert_eq!(a.shown(), Shown::Highlight(0));
}

#[test]
fn test_pick_survives_leaving_plot() {
    let mut a = scenario_annotator();
    hover(&mut a, 0.0, 0.0);
    a.handle(Event::Click { x: 0.0, y: 0.0 }).unwrap();
    a.handle(Event::PointerLeave).unwrap();
    assert_eq!(a.pending_color(), Some(0));

    // Clicks outside the plot are not delivered as picks.
    a.handle(Event::Click { x: 0.0, y: 0.0 }).unwrap();
    assert_eq!(a.pending_color(), Some(0));

    a.handle(Event::PointerEnter).unwrap();
    a.handle(Event::Click { x: 2.0, y: 2.0 }).unwrap();
    assert_eq!(a.pending_color(), None);
    assert_ne!(a.palette()[0], [0, 0, 0]);
}

#[test]
fn test_commit_color_outside_pick_is_noop() {
    let mut a = scenario_annotator();
    let revision = a.revision();
    a.commit_color([1, 2, 3]).unwrap();
    assert_eq!(a.revision(), revision);
    assert!(a.palette().iter().all(|p| *p == [0, 0, 0]));
}

#[test]
fn test_replay_event_sequence() {
    let mut a = scenario_annotator();
    let events = vec![
        Event::PointerEnter,
        Event::PointerMove { x: 0.0, y: 0.0 },
        Event::Key(Key::Char('w')),
        Event::Key(Key::Char('a')),
        Event::Key(Key::Enter),
        Event::PointerMove { x: 2.0, y: 1.0 },
        Event::Click { x: 2.0, y: 1.0 },
        Event::Click { x: 0.0, y: 0.0 },
        Event::PointerLeave,
    ];
    a.replay(events).unwrap();
    assert_eq!(a.label_names()[0], "wa");
    assert_ne!(a.palette()[1], [0, 0, 0]);
    assert_eq!(a.mode(), SessionMode::Idle);
}
