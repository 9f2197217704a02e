//! Editor domain: panes, tabs and their actions.

mod action;
mod reducer;
mod state;

pub use action::EditorAction;
pub use state::{
    EditorError, EditorPane, EditorState, EditorTab, PaneId, PaneSnapshot, TabId, TabSnapshot,
};

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/state.rs"]
mod tests;
