use crate::kernel::clipboard::ClipboardError;
use crate::kernel::Action;
use crate::models::{is_blank_content, FileKind, NodeId, NodeKind};

const DEFAULT_FILE_NAME: &str = "untitled";
const DEFAULT_FOLDER_NAME: &str = "New Folder";
const OPENED_WITHOUT_CONTENT: &str = "-- New file\n";

impl super::Store {
    pub(super) fn reduce_tree(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::CreateFile { parent, name } => {
                let name = name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
                let Some(id) = self.insert_node(parent.as_ref(), &name, NodeKind::File) else {
                    return super::DispatchResult::unchanged();
                };
                self.state.content.set(id.clone(), String::new());
                self.state.last_created = Some(id);
                super::DispatchResult::changed(true)
            }
            Action::CreateFolder { parent, name } => {
                let name = name.unwrap_or_else(|| DEFAULT_FOLDER_NAME.to_string());
                let created = self
                    .insert_node(parent.as_ref(), &name, NodeKind::Folder)
                    .is_some();
                super::DispatchResult::changed(created)
            }
            Action::RenameNode { id, name } => self.rename_node(&id, &name),
            Action::DeleteNode { id } => self.delete_node(&id),
            Action::CutNode { id } => {
                let state = &mut self.state;
                super::DispatchResult::changed(state.clipboard.cut(&state.tree, &state.content, &id))
            }
            Action::CopyNode { id } => {
                let state = &mut self.state;
                super::DispatchResult::changed(state.clipboard.copy(&state.tree, &state.content, &id))
            }
            Action::Paste { target } => self.paste(&target),
            Action::OpenFile { id } => {
                if !self.state.tree.is_file(&id) {
                    tracing::warn!(node = %id, "open ignored: not a file");
                    return super::DispatchResult::unchanged();
                }
                let title = self.state.tree.name(&id).unwrap_or_default().to_string();
                if !self.state.content.contains(&id) {
                    self.state.content.set(id.clone(), OPENED_WITHOUT_CONTENT);
                }
                let content = self.state.content.get(&id).unwrap_or_default().to_string();
                self.state.editor.open(id, &title, &content);
                super::DispatchResult::changed(true)
            }
            Action::EditText { pane, text } => {
                let Some(node_id) = self.state.editor.edit(pane, &text) else {
                    return super::DispatchResult::unchanged();
                };
                self.state.content.set(node_id, text);
                super::DispatchResult::changed(true)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn insert_node(&mut self, parent: Option<&NodeId>, name: &str, kind: NodeKind) -> Option<NodeId> {
        match self.state.tree.insert(parent, name, kind) {
            Ok(id) => {
                tracing::debug!(node = %id, ?kind, name, "node created");
                Some(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, ?parent, name, "create ignored");
                None
            }
        }
    }

    fn rename_node(&mut self, id: &NodeId, name: &str) -> super::DispatchResult {
        if let Err(e) = self.state.tree.rename(id, name) {
            tracing::warn!(error = %e, node = %id, name, "rename ignored");
            return super::DispatchResult::unchanged();
        }
        let name = name.trim();
        self.state.editor.rename_node(id, name);
        if self.state.last_created.as_ref() == Some(id) {
            self.state.last_created = None;
        }

        let blank = self.state.content.get(id).map_or(true, is_blank_content);
        if self.state.tree.is_file(id) && blank {
            let template = FileKind::from_name(name).default_template();
            self.state.content.set(id.clone(), template);
            self.state.editor.sync_node_content(id, template, None);
        }
        super::DispatchResult::changed(true)
    }

    fn delete_node(&mut self, id: &NodeId) -> super::DispatchResult {
        let removed = match self.state.tree.delete(id) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(error = %e, node = %id, "delete ignored");
                return super::DispatchResult::unchanged();
            }
        };
        self.state.editor.remove_nodes(&removed);
        if self.state.settings.workspace.purge_deleted_content {
            for node in &removed {
                self.state.content.remove(node);
            }
        }
        self.drop_dangling_targets();
        tracing::debug!(node = %id, removed = removed.len(), "subtree deleted");
        super::DispatchResult::changed(true)
    }

    fn paste(&mut self, target: &NodeId) -> super::DispatchResult {
        let outcome = match self.state.clipboard.paste(&mut self.state.tree, target) {
            Ok(outcome) => outcome,
            Err(ClipboardError::Empty) => return super::DispatchResult::unchanged(),
            Err(e) => {
                tracing::warn!(error = %e, target = %target, "paste ignored");
                return super::DispatchResult::unchanged();
            }
        };
        for (original, copy) in &outcome.copied {
            if let Some(text) = self.state.content.get(original).map(str::to_string) {
                self.state.content.set(copy.clone(), text);
            }
        }
        for (id, text) in outcome.restored {
            if !self.state.content.contains(&id) {
                self.state.content.set(id, text);
            }
        }
        tracing::debug!(root = %outcome.root, copied = outcome.copied.len(), "pasted");
        super::DispatchResult::changed(true)
    }
}
