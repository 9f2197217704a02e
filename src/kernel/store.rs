mod assistant;
mod query;
mod schema;
mod tree;
mod workspace;

use super::{Action, AppState, Effect};

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Editor(editor_action) => {
                DispatchResult::changed(self.state.editor.dispatch_action(editor_action))
            }

            action @ (Action::CreateFile { .. }
            | Action::CreateFolder { .. }
            | Action::RenameNode { .. }
            | Action::DeleteNode { .. }
            | Action::CutNode { .. }
            | Action::CopyNode { .. }
            | Action::Paste { .. }
            | Action::OpenFile { .. }
            | Action::EditText { .. }) => self.reduce_tree(action),

            action @ (Action::SwitchWorkspace { .. }
            | Action::AddWorkspace { .. }
            | Action::RemoveWorkspace { .. }
            | Action::RenameWorkspace { .. }
            | Action::RefreshExplorer) => self.reduce_workspace(action),

            action @ (Action::RunQuery { .. }
            | Action::QueryFinished { .. }
            | Action::QueryStatusExpired { .. }
            | Action::ClearQueryResults) => self.reduce_query(action),

            action @ (Action::SendChat { .. }
            | Action::RunAgent { .. }
            | Action::AssistantReplied { .. }
            | Action::EditSuggestion(_)
            | Action::AcceptSuggestion
            | Action::RejectSuggestion
            | Action::ClearChat) => self.reduce_assistant(action),

            action @ (Action::ImportSchema { .. }
            | Action::ConfirmImport
            | Action::CancelImport) => self.reduce_schema(action),
        }
    }

    /// Drops a pending import or suggestion that points at a node no longer
    /// in the live tree.
    fn drop_dangling_targets(&mut self) -> bool {
        let mut changed = false;
        if self
            .state
            .pending_import
            .as_ref()
            .is_some_and(|p| !self.state.tree.contains(&p.node_id))
        {
            self.state.pending_import = None;
            changed = true;
        }
        if self
            .state
            .assistant
            .suggestion()
            .is_some_and(|s| !self.state.tree.contains(&s.target.node_id))
        {
            self.state.assistant.take_suggestion();
            changed = true;
        }
        if self
            .state
            .last_created
            .as_ref()
            .is_some_and(|id| !self.state.tree.contains(id))
        {
            self.state.last_created = None;
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
