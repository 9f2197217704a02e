use super::*;
use crate::models::NodeId;

fn node(id: &str) -> NodeId {
    NodeId::from(id)
}

fn editor_with(nodes: &[&str]) -> EditorState {
    let mut editor = EditorState::new(3);
    for id in nodes {
        editor.open(node(id), &format!("{}.sql", id), &format!("-- {}", id));
    }
    editor
}

#[test]
fn test_open_appends_and_activates() {
    let editor = editor_with(&["a", "b"]);
    let pane = editor.active_pane().unwrap();
    assert_eq!(pane.tabs.len(), 2);
    assert_eq!(editor.active_tab().unwrap().node_id, node("b"));
}

#[test]
fn test_open_existing_node_reuses_tab() {
    let mut editor = editor_with(&["a", "b"]);
    let first = editor.active_pane().unwrap().tabs[0].id;
    let reopened = editor.open(node("a"), "a.sql", "ignored");
    assert_eq!(reopened, first);
    let pane = editor.active_pane().unwrap();
    assert_eq!(pane.tabs.len(), 2);
    assert_eq!(pane.active_tab, Some(first));
    assert_eq!(pane.tabs[0].content, "-- a");
}

#[test]
fn test_close_active_tab_falls_back_to_first() {
    let mut editor = editor_with(&["a", "b", "c"]);
    let pane = editor.active_pane_id();
    let active = editor.active_tab().unwrap().id;
    editor.close_tab(pane, active).unwrap();
    assert_eq!(editor.active_tab().unwrap().node_id, node("a"));
}

#[test]
fn test_close_inactive_tab_keeps_active() {
    let mut editor = editor_with(&["a", "b", "c"]);
    let pane = editor.active_pane_id();
    let first = editor.active_pane().unwrap().tabs[0].id;
    editor.close_tab(pane, first).unwrap();
    assert_eq!(editor.active_tab().unwrap().node_id, node("c"));
}

#[test]
fn test_closing_only_tab_keeps_one_empty_pane() {
    let mut editor = editor_with(&["a"]);
    let pane = editor.active_pane_id();
    let tab = editor.active_tab().unwrap().id;
    editor.close_tab(pane, tab).unwrap();
    assert_eq!(editor.panes().len(), 1);
    assert!(editor.panes()[0].is_empty());
    assert_eq!(editor.panes()[0].active_tab, None);
}

#[test]
fn test_close_unknown_tab_is_error() {
    let mut editor = editor_with(&["a"]);
    let pane = editor.active_pane_id();
    assert_eq!(
        editor.close_tab(pane, TabId::new(999)),
        Err(EditorError::InvalidTab)
    );
    assert_eq!(
        editor.close_tab(PaneId::new(999), TabId::new(1)),
        Err(EditorError::InvalidPane)
    );
}

#[test]
fn test_split_copies_only_active_tab() {
    let mut editor = editor_with(&["a", "b"]);
    let source = editor.active_pane_id();
    let new_pane = editor.split(source).unwrap();

    assert_eq!(editor.panes().len(), 2);
    assert_eq!(editor.active_pane_id(), new_pane);
    let pane = editor.pane(new_pane).unwrap();
    assert_eq!(pane.tabs.len(), 1);
    assert_eq!(pane.tabs[0].node_id, node("b"));
    assert_ne!(pane.tabs[0].id, editor.pane(source).unwrap().tabs[1].id);
}

#[test]
fn test_split_requires_active_tab() {
    let mut editor = EditorState::new(3);
    let pane = editor.active_pane_id();
    assert_eq!(editor.split(pane), Err(EditorError::NoActiveTab));
}

#[test]
fn test_split_respects_pane_limit() {
    let mut editor = editor_with(&["a"]);
    let first = editor.active_pane_id();
    editor.split(first).unwrap();
    editor.split(first).unwrap();
    assert_eq!(editor.split(first), Err(EditorError::PaneLimit(3)));

    let mut unlimited = EditorState::new(0);
    unlimited.open(node("a"), "a.sql", "");
    let pane = unlimited.active_pane_id();
    for _ in 0..5 {
        unlimited.split(pane).unwrap();
    }
    assert_eq!(unlimited.panes().len(), 6);
}

#[test]
fn test_closing_last_tab_of_split_removes_pane() {
    let mut editor = editor_with(&["a"]);
    let first = editor.active_pane_id();
    let second = editor.split(first).unwrap();
    let tab = editor.pane(second).unwrap().tabs[0].id;

    editor.close_tab(second, tab).unwrap();
    assert_eq!(editor.panes().len(), 1);
    assert_eq!(editor.active_pane_id(), first);
}

#[test]
fn test_close_pane_rejects_last() {
    let mut editor = editor_with(&["a"]);
    let first = editor.active_pane_id();
    assert_eq!(editor.close_pane(first), Err(EditorError::LastPane));

    let second = editor.split(first).unwrap();
    editor.close_pane(second).unwrap();
    assert_eq!(editor.active_pane_id(), first);
}

#[test]
fn test_edit_writes_active_tab_and_syncs_other_views() {
    let mut editor = editor_with(&["a"]);
    let first = editor.active_pane_id();
    let second = editor.split(first).unwrap();

    let edited = editor.edit(second, "SELECT 1");
    assert_eq!(edited, Some(node("a")));

    let second_tab = editor.pane(second).unwrap().active_tab().unwrap();
    assert!(second_tab.dirty);
    assert_eq!(second_tab.content, "SELECT 1");
    let first_tab = editor.pane(first).unwrap().active_tab().unwrap();
    assert_eq!(first_tab.content, "SELECT 1");
    assert!(!first_tab.dirty);
}

#[test]
fn test_edit_without_active_tab_is_noop() {
    let mut editor = EditorState::new(3);
    let pane = editor.active_pane_id();
    assert_eq!(editor.edit(pane, "x"), None);
}

#[test]
fn test_remove_nodes_closes_tabs_everywhere() {
    let mut editor = editor_with(&["a", "b"]);
    let first = editor.active_pane_id();
    let second = editor.split(first).unwrap();

    assert!(editor.remove_nodes(&[node("b")]));
    assert_eq!(editor.panes().len(), 1);
    assert!(editor.pane(second).is_none());
    assert_eq!(editor.active_tab().unwrap().node_id, node("a"));
}

#[test]
fn test_rename_node_updates_titles() {
    let mut editor = editor_with(&["a"]);
    assert!(editor.rename_node(&node("a"), "renamed.md"));
    assert_eq!(editor.active_tab().unwrap().title, "renamed.md");
    assert!(!editor.rename_node(&node("a"), "renamed.md"));
}

#[test]
fn test_snapshot_restore_round_trip() {
    let mut editor = editor_with(&["a", "b"]);
    let first = editor.active_pane_id();
    let a_tab = editor.pane(first).unwrap().tabs[0].id;
    editor.set_active_tab(first, a_tab);
    editor.split(first).unwrap();

    let snapshot = editor.snapshot_first_pane();
    assert_eq!(snapshot.tabs.len(), 2);
    assert_eq!(snapshot.active, Some(node("a")));

    let mut other = EditorState::new(3);
    other.restore(&snapshot);
    assert_eq!(other.panes().len(), 1);
    assert_eq!(other.snapshot_first_pane(), snapshot);
}

#[test]
fn test_dispatch_action_reports_changes() {
    let mut editor = editor_with(&["a", "b"]);
    let pane = editor.active_pane_id();
    let first = editor.active_pane().unwrap().tabs[0].id;

    assert!(editor.dispatch_action(EditorAction::SetActiveTab { pane, tab: first }));
    assert!(!editor.dispatch_action(EditorAction::SetActiveTab { pane, tab: first }));
    assert!(!editor.dispatch_action(EditorAction::ClosePane { pane }));
    assert!(editor.dispatch_action(EditorAction::SplitPane { pane }));
    assert!(editor.dispatch_action(EditorAction::SetActivePane { pane }));
}
