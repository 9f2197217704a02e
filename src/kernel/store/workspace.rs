use crate::kernel::workspace::WorkspaceId;
use crate::kernel::Action;
use crate::models::NodeId;

impl super::Store {
    pub(super) fn reduce_workspace(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::SwitchWorkspace { id } => self.switch_workspace(&id),
            Action::AddWorkspace { name } => {
                let id = self.state.workspaces.add(name);
                tracing::info!(workspace = %id, "workspace added");
                let mut result = self.switch_workspace(&id);
                result.state_changed = true;
                result
            }
            Action::RemoveWorkspace { id } => {
                let was_current = self.state.workspaces.current_id() == &id;
                let state = &mut self.state;
                if let Err(e) =
                    state
                        .workspaces
                        .remove(&id, &mut state.tree, &mut state.content, &mut state.editor)
                {
                    tracing::warn!(error = %e, workspace = %id, "remove workspace ignored");
                    return super::DispatchResult::unchanged();
                }
                if was_current {
                    self.reset_workspace_scoped();
                }
                tracing::info!(workspace = %id, "workspace removed");
                super::DispatchResult::changed(true)
            }
            Action::RenameWorkspace { id, name } => match self.state.workspaces.rename(&id, &name) {
                Ok(changed) => super::DispatchResult::changed(changed),
                Err(e) => {
                    tracing::warn!(error = %e, workspace = %id, "rename workspace ignored");
                    super::DispatchResult::unchanged()
                }
            },
            Action::RefreshExplorer => {
                let before: Vec<NodeId> =
                    self.state.tree.rows().into_iter().map(|row| row.id).collect();
                if let Err(e) = self.state.workspaces.refresh(&mut self.state.tree) {
                    tracing::warn!(error = %e, "refresh ignored");
                    return super::DispatchResult::unchanged();
                }
                self.drop_vanished_nodes(before);
                super::DispatchResult::changed(true)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn switch_workspace(&mut self, id: &WorkspaceId) -> super::DispatchResult {
        let state = &mut self.state;
        match state
            .workspaces
            .switch_to(id, &mut state.tree, &mut state.content, &mut state.editor)
        {
            Ok(true) => {
                self.reset_workspace_scoped();
                tracing::info!(workspace = %id, "workspace switched");
                super::DispatchResult::changed(true)
            }
            Ok(false) => super::DispatchResult::unchanged(),
            Err(e) => {
                tracing::warn!(error = %e, workspace = %id, "switch ignored");
                super::DispatchResult::unchanged()
            }
        }
    }

    /// Closes tabs (and purges content, when configured) for nodes the live
    /// tree no longer has.
    fn drop_vanished_nodes(&mut self, before: Vec<NodeId>) {
        let tree = &self.state.tree;
        let mut vanished: Vec<NodeId> = before.into_iter().filter(|id| !tree.contains(id)).collect();
        if self.state.settings.workspace.purge_deleted_content {
            for id in &vanished {
                self.state.content.remove(id);
            }
        }
        for pane in self.state.editor.panes() {
            for tab in &pane.tabs {
                if !tree.contains(&tab.node_id) && !vanished.contains(&tab.node_id) {
                    vanished.push(tab.node_id.clone());
                }
            }
        }
        if !vanished.is_empty() {
            tracing::debug!(vanished = vanished.len(), "refresh dropped nodes");
            self.state.editor.remove_nodes(&vanished);
        }
        self.drop_dangling_targets();
    }

    /// Node ids belong to one workspace; anything holding them is dropped.
    fn reset_workspace_scoped(&mut self) {
        self.state.clipboard.clear();
        self.state.pending_import = None;
        self.state.last_created = None;
        self.state.assistant.take_suggestion();
        self.state.assistant.cancel_agent_request();
    }
}
