//! Workspace registry: named records of tree, content and open tabs, one of
//! which is loaded into the live editor state at a time.

mod samples;

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kernel::editor::{EditorState, PaneSnapshot, TabSnapshot};
use crate::models::{ContentMap, FileTree, FileTreeError, NodeId, TreeNode};

const UNTITLED_ID: &str = "untitled";
const UNTITLED_NAME: &str = "untitled.sql";
const UNTITLED_CONTENT: &str = "-- New workspace\n";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(CompactString);

impl WorkspaceId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for WorkspaceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub file_tree: Vec<TreeNode>,
    #[serde(default)]
    pub open_tabs: Vec<TabSnapshot>,
    #[serde(default)]
    pub active_tab: Option<NodeId>,
    #[serde(default)]
    pub file_content: ContentMap,
}

impl Workspace {
    /// A fresh workspace holding a single `untitled.sql`.
    pub fn untitled(id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            file_tree: vec![TreeNode::file(UNTITLED_ID, UNTITLED_NAME)],
            open_tabs: Vec::new(),
            active_tab: None,
            file_content: ContentMap::from_iter([(UNTITLED_ID, UNTITLED_CONTENT)]),
        }
    }

    pub fn pane_snapshot(&self) -> PaneSnapshot {
        PaneSnapshot {
            tabs: self.open_tabs.clone(),
            active: self.active_tab.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    NotFound(WorkspaceId),
    LastWorkspace,
    NoWorkspaces,
    EmptyName,
    InvalidTree(FileTreeError),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::NotFound(id) => write!(f, "workspace not found: {}", id),
            WorkspaceError::LastWorkspace => write!(f, "cannot remove the last workspace"),
            WorkspaceError::NoWorkspaces => write!(f, "at least one workspace is required"),
            WorkspaceError::EmptyName => write!(f, "workspace name cannot be empty"),
            WorkspaceError::InvalidTree(e) => write!(f, "workspace tree is invalid: {}", e),
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<FileTreeError> for WorkspaceError {
    fn from(value: FileTreeError) -> Self {
        WorkspaceError::InvalidTree(value)
    }
}

/// Saved workspace records plus the id of the one currently loaded.
///
/// The records of the current workspace are only refreshed on save; the live
/// tree, content map and editor panes are owned by the caller.
#[derive(Debug, Clone)]
pub struct WorkspaceRegistry {
    workspaces: Vec<Workspace>,
    current: WorkspaceId,
    next_id: u64,
}

impl WorkspaceRegistry {
    pub fn from_workspaces(workspaces: Vec<Workspace>) -> Result<Self, WorkspaceError> {
        let current = workspaces
            .first()
            .map(|w| w.id.clone())
            .ok_or(WorkspaceError::NoWorkspaces)?;
        let next_id = workspaces.len() as u64 + 1;
        Ok(Self {
            workspaces,
            current,
            next_id,
        })
    }

    pub fn with_samples() -> Self {
        let workspaces = samples::sample_workspaces();
        let current = WorkspaceId::new("workspace-1");
        let next_id = workspaces.len() as u64 + 1;
        Self {
            workspaces,
            current,
            next_id,
        }
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn current_id(&self) -> &WorkspaceId {
        &self.current
    }

    pub fn current(&self) -> Option<&Workspace> {
        self.get(&self.current)
    }

    pub fn get(&self, id: &WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| &w.id == id)
    }

    fn position(&self, id: &WorkspaceId) -> Result<usize, WorkspaceError> {
        self.workspaces
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| WorkspaceError::NotFound(id.clone()))
    }

    /// Loads the current record into the live state, replacing it.
    pub fn load_current(
        &self,
        tree: &mut FileTree,
        content: &mut ContentMap,
        editor: &mut EditorState,
    ) -> Result<(), WorkspaceError> {
        let index = self.position(&self.current)?;
        load_record(&self.workspaces[index], tree, content, editor)
    }

    /// Writes the live state back into the current record. Only the first
    /// pane's tabs are kept.
    pub fn save_current(&mut self, tree: &FileTree, content: &ContentMap, editor: &EditorState) {
        let Some(record) = self.workspaces.iter_mut().find(|w| w.id == self.current) else {
            return;
        };
        let pane = editor.snapshot_first_pane();
        record.file_tree = tree.to_nodes();
        record.file_content = content.clone();
        record.open_tabs = pane.tabs;
        record.active_tab = pane.active;
    }

    /// Saves the outgoing workspace and loads `id`. Returns false when `id` is
    /// already current.
    pub fn switch_to(
        &mut self,
        id: &WorkspaceId,
        tree: &mut FileTree,
        content: &mut ContentMap,
        editor: &mut EditorState,
    ) -> Result<bool, WorkspaceError> {
        if id == &self.current {
            return Ok(false);
        }
        let index = self.position(id)?;
        let incoming = FileTree::from_nodes(self.workspaces[index].file_tree.clone())?;

        self.save_current(tree, content, editor);
        install_record(&self.workspaces[index], incoming, tree, content, editor);
        tracing::debug!(from = %self.current, to = %id, "workspace switched");
        self.current = id.clone();
        Ok(true)
    }

    /// Appends a fresh workspace record. The caller decides whether to switch.
    pub fn add(&mut self, name: Option<String>) -> WorkspaceId {
        let id = self.alloc_id();
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Workspace {}", self.workspaces.len() + 1));
        self.workspaces.push(Workspace::untitled(id.clone(), name));
        id
    }

    /// Removes a record. Removing the current workspace loads the first
    /// remaining one without saving the removed state.
    pub fn remove(
        &mut self,
        id: &WorkspaceId,
        tree: &mut FileTree,
        content: &mut ContentMap,
        editor: &mut EditorState,
    ) -> Result<(), WorkspaceError> {
        let index = self.position(id)?;
        if self.workspaces.len() <= 1 {
            return Err(WorkspaceError::LastWorkspace);
        }
        if id != &self.current {
            self.workspaces.remove(index);
            return Ok(());
        }

        let fallback = if index == 0 { 1 } else { 0 };
        let incoming = FileTree::from_nodes(self.workspaces[fallback].file_tree.clone())?;
        self.workspaces.remove(index);
        let record = &self.workspaces[0];
        install_record(record, incoming, tree, content, editor);
        self.current = record.id.clone();
        tracing::debug!(removed = %id, current = %self.current, "current workspace removed");
        Ok(())
    }

    pub fn rename(&mut self, id: &WorkspaceId, name: &str) -> Result<bool, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::EmptyName);
        }
        let index = self.position(id)?;
        let record = &mut self.workspaces[index];
        if record.name == name {
            return Ok(false);
        }
        record.name = name.to_string();
        Ok(true)
    }

    /// Reloads the live tree from the current workspace's saved record.
    pub fn refresh(&self, tree: &mut FileTree) -> Result<(), WorkspaceError> {
        let index = self.position(&self.current)?;
        let mut incoming = FileTree::from_nodes(self.workspaces[index].file_tree.clone())?;
        incoming.continue_ids_from(tree);
        *tree = incoming;
        Ok(())
    }

    fn alloc_id(&mut self) -> WorkspaceId {
        loop {
            let id = WorkspaceId(format_compact!("workspace-{}", self.next_id));
            self.next_id = self.next_id.saturating_add(1);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl Default for WorkspaceRegistry {
    fn default() -> Self {
        Self::with_samples()
    }
}

fn load_record(
    record: &Workspace,
    tree: &mut FileTree,
    content: &mut ContentMap,
    editor: &mut EditorState,
) -> Result<(), WorkspaceError> {
    let incoming = FileTree::from_nodes(record.file_tree.clone())?;
    install_record(record, incoming, tree, content, editor);
    Ok(())
}

fn install_record(
    record: &Workspace,
    mut incoming: FileTree,
    tree: &mut FileTree,
    content: &mut ContentMap,
    editor: &mut EditorState,
) {
    incoming.continue_ids_from(tree);
    *tree = incoming;
    *content = record.file_content.clone();
    editor.restore(&record.pane_snapshot());
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/workspace.rs"]
mod tests;
