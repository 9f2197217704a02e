use super::{PaneId, TabId};

/// Pane/tab actions that touch no other part of the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    SetActiveTab { pane: PaneId, tab: TabId },
    SetActivePane { pane: PaneId },
    CloseTab { pane: PaneId, tab: TabId },
    SplitPane { pane: PaneId },
    ClosePane { pane: PaneId },
}
