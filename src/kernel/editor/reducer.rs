use super::action::EditorAction;
use super::state::EditorState;

impl EditorState {
    pub fn dispatch_action(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::SetActiveTab { pane, tab } => self.set_active_tab(pane, tab),
            EditorAction::SetActivePane { pane } => self.set_active_pane(pane),
            EditorAction::CloseTab { pane, tab } => match self.close_tab(pane, tab) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, ?pane, ?tab, "close tab ignored");
                    false
                }
            },
            EditorAction::SplitPane { pane } => match self.split(pane) {
                Ok(new_pane) => {
                    tracing::debug!(?pane, ?new_pane, "split pane");
                    true
                }
                Err(e) => {
                    tracing::warn!(error = %e, ?pane, "split ignored");
                    false
                }
            },
            EditorAction::ClosePane { pane } => match self.close_pane(pane) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, ?pane, "close pane ignored");
                    false
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/reducer.rs"]
mod tests;
