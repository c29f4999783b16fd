use super::{CollapseState, FoldNotice, CARET_CLOSED, CARET_OPEN};
use crate::outline::Outline;
use crate::scan::ScannedHeading;

fn scanned(cell_index: usize, level: usize, title: &str) -> ScannedHeading {
    ScannedHeading {
        cell_index,
        level,
        source_id: title.replace(' ', "-"),
        title: title.to_string(),
    }
}

/// headings: A (cell 1, level 1) > B (cell 3, level 2); C (cell 6, level 1)
fn outline() -> Outline {
    Outline::build(&[
        scanned(1, 1, "A"),
        scanned(3, 2, "B"),
        scanned(6, 1, "C"),
    ])
}

#[test]
fn test_collapse_round_trip() {
    let outline = outline();
    let mut state = CollapseState::new();
    assert_eq!(state.caret(&outline, 0), CARET_OPEN);

    state.set_collapsed(&outline, "A-1", true, false);
    assert!(state.is_collapsed("A-1"));
    assert_eq!(state.caret(&outline, 0), CARET_CLOSED);
    assert_eq!(state.visible_entries(&outline), vec![0, 2]);

    state.set_collapsed(&outline, "A-1", false, false);
    assert!(!state.is_collapsed("A-1"));
    assert_eq!(state.caret(&outline, 0), CARET_OPEN);
    assert_eq!(state.visible_entries(&outline), vec![0, 1, 2]);
    // notify=false emitted nothing in either direction
    assert!(state.drain_notices().is_empty());
}

#[test]
fn test_user_toggle_notifies_fold_feature() {
    let outline = outline();
    let mut state = CollapseState::new();
    state.toggle(&outline, "A-1");
    state.toggle(&outline, "A-1");
    assert_eq!(
        state.drain_notices(),
        vec![
            FoldNotice {
                cell_index: 1,
                folded: true
            },
            FoldNotice {
                cell_index: 1,
                folded: false
            },
        ]
    );
    // drained once, gone
    assert!(state.drain_notices().is_empty());
}

#[test]
fn test_leaves_have_blank_caret_and_no_toggle() {
    let outline = outline();
    let mut state = CollapseState::new();
    assert_eq!(state.caret(&outline, 1), ' ');
    assert_eq!(state.caret(&outline, 2), ' ');
    state.toggle(&outline, "C-2");
    assert!(!state.is_collapsed("C-2"));
    assert!(state.drain_notices().is_empty());
}

#[test]
fn test_unknown_identifier_is_ignored() {
    let outline = outline();
    let mut state = CollapseState::new();
    state.set_collapsed(&outline, "nope-1", true, true);
    assert!(!state.is_collapsed("nope-1"));
    assert!(state.drain_notices().is_empty());
}

#[test]
fn test_redundant_set_collapsed_does_not_renotify() {
    let outline = outline();
    let mut state = CollapseState::new();
    state.set_collapsed(&outline, "A-1", true, true);
    state.set_collapsed(&outline, "A-1", true, true);
    assert_eq!(state.drain_notices().len(), 1);
}

#[test]
fn test_hidden_cells_span_to_next_peer_heading() {
    let outline = outline();
    let mut state = CollapseState::new();
    state.set_collapsed(&outline, "A-1", true, false);
    // cells between A's cell and C's cell are hidden; both headings stay
    let hidden: Vec<usize> = state.hidden_cells(&outline, 8).into_iter().collect();
    assert_eq!(hidden, vec![2, 3, 4, 5]);

    state.set_collapsed(&outline, "A-1", false, false);
    state.set_collapsed(&outline, "C-2", true, false);
    // last section folds to the end of the document
    let hidden: Vec<usize> = state.hidden_cells(&outline, 8).into_iter().collect();
    assert_eq!(hidden, vec![7]);
}

#[test]
fn test_nested_collapse_visibility() {
    let outline = Outline::build(&[
        scanned(0, 1, "A"),
        scanned(1, 2, "B"),
        scanned(2, 3, "D"),
        scanned(3, 1, "C"),
    ]);
    let mut state = CollapseState::new();
    state.set_collapsed(&outline, "B-1.1", true, false);
    assert_eq!(state.visible_entries(&outline), vec![0, 1, 3]);
    // collapsing the outer branch hides the inner one along with its state
    state.set_collapsed(&outline, "A-1", true, false);
    assert_eq!(state.visible_entries(&outline), vec![0, 3]);
}

#[test]
fn test_fold_event_applies_without_notice() {
    let outline = outline();
    let mut state = CollapseState::new();
    state.apply_fold_event(&outline, 1, true);
    assert!(state.is_collapsed("A-1"));
    assert!(state.drain_notices().is_empty());
    // a fold event for a cell holding no heading is ignored
    state.apply_fold_event(&outline, 4, true);
    assert_eq!(state.visible_entries(&outline), vec![0, 2]);
}

#[test]
fn test_collapse_state_carries_across_rebuild_by_source_id() {
    let old = outline();
    let mut state = CollapseState::new();
    state.set_collapsed(&old, "A-1", true, false);

    // a heading added above shifts every composite id
    let new = Outline::build(&[
        scanned(0, 1, "Fresh"),
        scanned(1, 1, "A"),
        scanned(3, 2, "B"),
        scanned(6, 1, "C"),
    ]);
    state.remap(&old, &new);
    assert!(state.is_collapsed("A-2"));
    assert!(!state.is_collapsed("A-1"));
    assert_eq!(state.visible_entries(&new), vec![0, 1, 3]);
}
