use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(u64);

impl PaneId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    InvalidPane,
    InvalidTab,
    NoActiveTab,
    LastPane,
    PaneLimit(usize),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::InvalidPane => write!(f, "invalid pane id"),
            EditorError::InvalidTab => write!(f, "invalid tab id"),
            EditorError::NoActiveTab => write!(f, "pane has no active tab"),
            EditorError::LastPane => write!(f, "cannot close the last pane"),
            EditorError::PaneLimit(max) => write!(f, "pane limit reached ({})", max),
        }
    }
}

impl std::error::Error for EditorError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTab {
    pub id: TabId,
    pub node_id: NodeId,
    pub title: String,
    pub content: String,
    pub dirty: bool,
}

/// Persisted form of a tab; tab handles are reallocated on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub node_id: NodeId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub dirty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pub tabs: Vec<TabSnapshot>,
    pub active: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct EditorPane {
    pub id: PaneId,
    pub tabs: Vec<EditorTab>,
    pub active_tab: Option<TabId>,
}

impl EditorPane {
    fn new(id: PaneId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active_tab: None,
        }
    }

    pub fn active_tab(&self) -> Option<&EditorTab> {
        let active = self.active_tab?;
        self.tabs.iter().find(|t| t.id == active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut EditorTab> {
        let active = self.active_tab?;
        self.tabs.iter_mut().find(|t| t.id == active)
    }

    pub fn tab(&self, tab: TabId) -> Option<&EditorTab> {
        self.tabs.iter().find(|t| t.id == tab)
    }

    pub fn tab_for_node(&self, node_id: &NodeId) -> Option<&EditorTab> {
        self.tabs.iter().find(|t| &t.node_id == node_id)
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn set_active(&mut self, tab: TabId) -> bool {
        if self.active_tab == Some(tab) || self.tab(tab).is_none() {
            return false;
        }
        self.active_tab = Some(tab);
        true
    }

    /// Removes a tab. Activation falls to the first remaining tab.
    fn remove_tab(&mut self, tab: TabId) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.id == tab) else {
            return false;
        };
        self.tabs.remove(index);
        if self.active_tab == Some(tab) {
            self.active_tab = self.tabs.first().map(|t| t.id);
        }
        true
    }
}

/// Tab/pane manager. Always holds at least one pane.
#[derive(Debug, Clone)]
pub struct EditorState {
    panes: Vec<EditorPane>,
    active_pane: PaneId,
    max_panes: usize,
    next_tab_id: u64,
    next_pane_id: u64,
}

impl EditorState {
    /// `max_panes == 0` means unlimited.
    pub fn new(max_panes: usize) -> Self {
        let first = PaneId::new(1);
        Self {
            panes: vec![EditorPane::new(first)],
            active_pane: first,
            max_panes,
            next_tab_id: 1,
            next_pane_id: 2,
        }
    }

    pub fn panes(&self) -> &[EditorPane] {
        &self.panes
    }

    pub fn pane(&self, pane: PaneId) -> Option<&EditorPane> {
        self.panes.iter().find(|p| p.id == pane)
    }

    fn pane_mut(&mut self, pane: PaneId) -> Option<&mut EditorPane> {
        self.panes.iter_mut().find(|p| p.id == pane)
    }

    pub fn active_pane_id(&self) -> PaneId {
        self.active_pane
    }

    pub fn active_pane(&self) -> Option<&EditorPane> {
        self.pane(self.active_pane).or_else(|| self.panes.first())
    }

    pub fn active_tab(&self) -> Option<&EditorTab> {
        self.active_pane()?.active_tab()
    }

    pub fn max_panes(&self) -> usize {
        self.max_panes
    }

    pub fn tabs_for_node<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a EditorTab> + 'a {
        self.panes
            .iter()
            .flat_map(|p| p.tabs.iter())
            .filter(move |t| &t.node_id == node_id)
    }

    fn alloc_tab_id(&mut self) -> TabId {
        let id = TabId::new(self.next_tab_id);
        self.next_tab_id = self.next_tab_id.saturating_add(1);
        id
    }

    fn alloc_pane_id(&mut self) -> PaneId {
        let id = PaneId::new(self.next_pane_id);
        self.next_pane_id = self.next_pane_id.saturating_add(1);
        id
    }

    /// Opens a node in the active pane, reusing an existing tab for it.
    pub fn open(&mut self, node_id: NodeId, title: &str, content: &str) -> TabId {
        let active = self.active_pane;
        let existing = self
            .pane(active)
            .and_then(|p| p.tab_for_node(&node_id))
            .map(|t| t.id);
        if let Some(tab) = existing {
            if let Some(pane) = self.pane_mut(active) {
                pane.set_active(tab);
            }
            return tab;
        }

        let id = self.alloc_tab_id();
        let tab = EditorTab {
            id,
            node_id,
            title: title.to_string(),
            content: content.to_string(),
            dirty: false,
        };
        let pane_index = self.active_pane_index();
        let pane = &mut self.panes[pane_index];
        pane.tabs.push(tab);
        pane.active_tab = Some(id);
        id
    }

    pub fn set_active_tab(&mut self, pane: PaneId, tab: TabId) -> bool {
        let Some(pane_state) = self.pane_mut(pane) else {
            return false;
        };
        pane_state.set_active(tab)
    }

    pub fn set_active_pane(&mut self, pane: PaneId) -> bool {
        if self.active_pane == pane || self.pane(pane).is_none() {
            return false;
        }
        self.active_pane = pane;
        true
    }

    pub fn close_tab(&mut self, pane: PaneId, tab: TabId) -> Result<(), EditorError> {
        let pane_state = self.pane_mut(pane).ok_or(EditorError::InvalidPane)?;
        if !pane_state.remove_tab(tab) {
            return Err(EditorError::InvalidTab);
        }
        if pane_state.is_empty() {
            self.drop_pane_if_not_last(pane);
        }
        Ok(())
    }

    /// Duplicates the active tab of `pane` into a new pane and focuses it.
    pub fn split(&mut self, pane: PaneId) -> Result<PaneId, EditorError> {
        if self.max_panes > 0 && self.panes.len() >= self.max_panes {
            return Err(EditorError::PaneLimit(self.max_panes));
        }
        let source = self.pane(pane).ok_or(EditorError::InvalidPane)?;
        let active = source.active_tab().ok_or(EditorError::NoActiveTab)?.clone();

        let tab_id = self.alloc_tab_id();
        let pane_id = self.alloc_pane_id();
        let mut new_pane = EditorPane::new(pane_id);
        new_pane.tabs.push(EditorTab { id: tab_id, ..active });
        new_pane.active_tab = Some(tab_id);
        self.panes.push(new_pane);
        self.active_pane = pane_id;
        Ok(pane_id)
    }

    pub fn close_pane(&mut self, pane: PaneId) -> Result<(), EditorError> {
        if self.pane(pane).is_none() {
            return Err(EditorError::InvalidPane);
        }
        if self.panes.len() <= 1 {
            return Err(EditorError::LastPane);
        }
        self.drop_pane_if_not_last(pane);
        Ok(())
    }

    /// Writes `text` into the active tab of `pane`. Returns the node the
    /// edited tab refers to, resolved at the time of the edit.
    pub fn edit(&mut self, pane: PaneId, text: &str) -> Option<NodeId> {
        let tab = self.pane_mut(pane)?.active_tab_mut()?;
        tab.content = text.to_string();
        tab.dirty = true;
        let node_id = tab.node_id.clone();
        let edited = tab.id;
        self.sync_node_content(&node_id, text, Some(edited));
        Some(node_id)
    }

    /// Refreshes the cached copy of every tab showing `node_id`, except `skip`.
    pub fn sync_node_content(&mut self, node_id: &NodeId, text: &str, skip: Option<TabId>) -> bool {
        let mut changed = false;
        for tab in self.panes.iter_mut().flat_map(|p| p.tabs.iter_mut()) {
            if &tab.node_id == node_id && Some(tab.id) != skip && tab.content != text {
                tab.content = text.to_string();
                changed = true;
            }
        }
        changed
    }

    /// Replaces content in every tab of `node_id` and marks them dirty.
    pub fn set_node_content(&mut self, node_id: &NodeId, text: &str) -> bool {
        let mut changed = false;
        for tab in self.panes.iter_mut().flat_map(|p| p.tabs.iter_mut()) {
            if &tab.node_id == node_id {
                tab.content = text.to_string();
                tab.dirty = true;
                changed = true;
            }
        }
        changed
    }

    pub fn rename_node(&mut self, node_id: &NodeId, title: &str) -> bool {
        let mut changed = false;
        for tab in self.panes.iter_mut().flat_map(|p| p.tabs.iter_mut()) {
            if &tab.node_id == node_id && tab.title != title {
                tab.title = title.to_string();
                changed = true;
            }
        }
        changed
    }

    /// Closes every tab referring to one of `nodes`, with `close_tab` semantics.
    pub fn remove_nodes(&mut self, nodes: &[NodeId]) -> bool {
        let doomed: Vec<(PaneId, TabId)> = self
            .panes
            .iter()
            .flat_map(|p| {
                p.tabs
                    .iter()
                    .filter(|t| nodes.contains(&t.node_id))
                    .map(move |t| (p.id, t.id))
            })
            .collect();
        for (pane, tab) in &doomed {
            let _ = self.close_tab(*pane, *tab);
        }
        !doomed.is_empty()
    }

    pub fn snapshot_first_pane(&self) -> PaneSnapshot {
        let Some(pane) = self.panes.first() else {
            return PaneSnapshot::default();
        };
        PaneSnapshot {
            tabs: pane
                .tabs
                .iter()
                .map(|t| TabSnapshot {
                    node_id: t.node_id.clone(),
                    title: t.title.clone(),
                    content: t.content.clone(),
                    dirty: t.dirty,
                })
                .collect(),
            active: pane.active_tab().map(|t| t.node_id.clone()),
        }
    }

    /// Replaces every pane with a single pane rebuilt from `snapshot`.
    pub fn restore(&mut self, snapshot: &PaneSnapshot) {
        let pane_id = self.alloc_pane_id();
        let mut pane = EditorPane::new(pane_id);
        for tab in &snapshot.tabs {
            let id = self.alloc_tab_id();
            pane.tabs.push(EditorTab {
                id,
                node_id: tab.node_id.clone(),
                title: tab.title.clone(),
                content: tab.content.clone(),
                dirty: tab.dirty,
            });
        }
        pane.active_tab = snapshot
            .active
            .as_ref()
            .and_then(|node| pane.tab_for_node(node))
            .map(|t| t.id);
        self.panes = vec![pane];
        self.active_pane = pane_id;
    }

    fn active_pane_index(&mut self) -> usize {
        match self.panes.iter().position(|p| p.id == self.active_pane) {
            Some(index) => index,
            None => {
                self.active_pane = self.panes[0].id;
                0
            }
        }
    }

    fn drop_pane_if_not_last(&mut self, pane: PaneId) {
        if self.panes.len() <= 1 {
            return;
        }
        self.panes.retain(|p| p.id != pane);
        if self.active_pane == pane {
            self.active_pane = self.panes[0].id;
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(0)
    }
}
