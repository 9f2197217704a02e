//! Workspace file tree: an arena of nodes addressed by string ids.

use compact_str::{format_compact, CompactString};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! { struct NodeKey; }

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(CompactString);

impl NodeId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(CompactString::from(value))
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(CompactString::from(value))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeError {
    InvalidNodeId,
    ParentNotFolder,
    EmptyName,
    DuplicateId(NodeId),
    FileWithChildren(NodeId),
    MoveIntoDescendant,
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::InvalidNodeId => write!(f, "invalid node id"),
            FileTreeError::ParentNotFolder => write!(f, "parent is not a folder"),
            FileTreeError::EmptyName => write!(f, "name must not be empty"),
            FileTreeError::DuplicateId(id) => write!(f, "node id already exists: {}", id),
            FileTreeError::FileWithChildren(id) => write!(f, "file node has children: {}", id),
            FileTreeError::MoveIntoDescendant => {
                write!(f, "cannot move node into its own subtree")
            }
        }
    }
}

impl std::error::Error for FileTreeError {}

/// Owned snapshot of a subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Folder,
            children,
        }
    }

    /// Ids of this node and every descendant, pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node.id.clone());
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
struct Node {
    id: NodeId,
    name: CompactString,
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Default)]
pub struct FileTree {
    arena: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
    index: FxHashMap<NodeId, NodeKey>,
    next_id: u64,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<Self, FileTreeError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert_subtree(None, node)?;
        }
        Ok(tree)
    }

    /// Keeps id generation going past everything `previous` handed out, so a
    /// rebuilt tree never reissues an id still held by tabs or content.
    pub fn continue_ids_from(&mut self, previous: &FileTree) {
        self.next_id = self.next_id.max(previous.next_id);
    }

    pub fn to_nodes(&self) -> Vec<TreeNode> {
        self.roots.iter().filter_map(|&key| self.snapshot(key)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn find(&self, id: &NodeId) -> Option<TreeNode> {
        self.key(id).and_then(|key| self.snapshot(key))
    }

    pub fn name(&self, id: &NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn kind(&self, id: &NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    pub fn is_folder(&self, id: &NodeId) -> bool {
        self.kind(id) == Some(NodeKind::Folder)
    }

    pub fn is_file(&self, id: &NodeId) -> bool {
        self.kind(id) == Some(NodeKind::File)
    }

    pub fn parent(&self, id: &NodeId) -> Option<&NodeId> {
        let parent = self.node(id)?.parent?;
        self.arena.get(parent).map(|n| &n.id)
    }

    pub fn children(&self, id: Option<&NodeId>) -> Vec<&NodeId> {
        let keys = match id {
            None => &self.roots,
            Some(id) => match self.node(id) {
                Some(node) => &node.children,
                None => return Vec::new(),
            },
        };
        keys.iter()
            .filter_map(|&key| self.arena.get(key).map(|n| &n.id))
            .collect()
    }

    /// True when `node` lies strictly below `ancestor`.
    pub fn is_ancestor(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let (Some(ancestor), Some(mut current)) = (self.key(ancestor), self.key(node)) else {
            return false;
        };
        while let Some(parent) = self.arena.get(current).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    pub fn insert(
        &mut self,
        parent: Option<&NodeId>,
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, FileTreeError> {
        let name = validate_name(name)?;
        let parent_key = self.folder_key(parent)?;
        let prefix = match kind {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
        };
        let id = self.alloc_id(prefix);
        self.attach_new(parent_key, id.clone(), name, kind);
        Ok(id)
    }

    /// Inserts a snapshot keeping every id it carries.
    pub fn insert_subtree(
        &mut self,
        parent: Option<&NodeId>,
        node: TreeNode,
    ) -> Result<NodeId, FileTreeError> {
        let parent_key = self.folder_key(parent)?;
        self.validate_subtree(&node)?;
        let root_id = node.id.clone();
        self.attach_subtree(parent_key, node);
        Ok(root_id)
    }

    pub fn rename(&mut self, id: &NodeId, new_name: &str) -> Result<(), FileTreeError> {
        let name = validate_name(new_name)?;
        let key = self.key(id).ok_or(FileTreeError::InvalidNodeId)?;
        let node = self
            .arena
            .get_mut(key)
            .ok_or(FileTreeError::InvalidNodeId)?;
        node.name = name;
        Ok(())
    }

    /// Removes the node and its descendants. Returns every removed id,
    /// the subtree root first.
    pub fn delete(&mut self, id: &NodeId) -> Result<Vec<NodeId>, FileTreeError> {
        let key = self.key(id).ok_or(FileTreeError::InvalidNodeId)?;
        self.detach(key);

        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                self.index.remove(&node.id);
                stack.extend(node.children.iter().rev().copied());
                removed.push(node.id);
            }
        }
        Ok(removed)
    }

    /// Re-parents a node, keeping its id and its descendants' ids.
    pub fn move_to(&mut self, id: &NodeId, new_parent: Option<&NodeId>) -> Result<(), FileTreeError> {
        let key = self.key(id).ok_or(FileTreeError::InvalidNodeId)?;
        if let Some(target) = new_parent {
            if target == id || self.is_ancestor(id, target) {
                return Err(FileTreeError::MoveIntoDescendant);
            }
        }
        let parent_key = self.folder_key(new_parent)?;

        self.detach(key);
        match parent_key {
            Some(parent) => {
                if let Some(parent_node) = self.arena.get_mut(parent) {
                    parent_node.children.push(key);
                }
            }
            None => self.roots.push(key),
        }
        if let Some(node) = self.arena.get_mut(key) {
            node.parent = parent_key;
        }
        Ok(())
    }

    /// Deep copy of `node` where every id is freshly generated.
    pub fn clone_with_fresh_ids(&mut self, node: &TreeNode) -> TreeNode {
        let id = self.alloc_id(&format!("{}-copy", copy_base(&node.id)));
        let children = node
            .children
            .iter()
            .map(|child| self.clone_with_fresh_ids(child))
            .collect();
        TreeNode {
            id,
            name: node.name.clone(),
            kind: node.kind,
            children,
        }
    }

    /// File nodes in depth-first order.
    pub fn files(&self) -> Vec<(NodeId, String)> {
        self.rows()
            .into_iter()
            .filter(|row| row.kind == NodeKind::File)
            .map(|row| (row.id, row.name))
            .collect()
    }

    pub fn rows(&self) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeKey, u16)> = self.roots.iter().rev().map(|&k| (k, 0)).collect();

        while let Some((key, depth)) = stack.pop() {
            let Some(node) = self.arena.get(key) else {
                continue;
            };
            result.push(FileTreeRow {
                id: node.id.clone(),
                depth,
                name: node.name.to_string(),
                kind: node.kind,
            });
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        result
    }

    fn key(&self, id: &NodeId) -> Option<NodeKey> {
        self.index.get(id).copied()
    }

    fn node(&self, id: &NodeId) -> Option<&Node> {
        self.key(id).and_then(|key| self.arena.get(key))
    }

    fn folder_key(&self, parent: Option<&NodeId>) -> Result<Option<NodeKey>, FileTreeError> {
        let Some(parent) = parent else {
            return Ok(None);
        };
        let key = self.key(parent).ok_or(FileTreeError::InvalidNodeId)?;
        let node = self.arena.get(key).ok_or(FileTreeError::InvalidNodeId)?;
        if node.kind != NodeKind::Folder {
            return Err(FileTreeError::ParentNotFolder);
        }
        Ok(Some(key))
    }

    fn alloc_id(&mut self, prefix: &str) -> NodeId {
        loop {
            self.next_id = self.next_id.saturating_add(1);
            let id = NodeId(format_compact!("{}-{}", prefix, self.next_id));
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Moves the counter past a numeric suffix in `id` (`file-7` -> 7).
    fn reserve_id(&mut self, id: &NodeId) {
        let suffix = id.as_str().rsplit('-').next().and_then(|n| n.parse::<u64>().ok());
        if let Some(n) = suffix {
            self.next_id = self.next_id.max(n);
        }
    }

    fn attach_new(
        &mut self,
        parent: Option<NodeKey>,
        id: NodeId,
        name: CompactString,
        kind: NodeKind,
    ) -> NodeKey {
        self.reserve_id(&id);
        let key = self.arena.insert(Node {
            id: id.clone(),
            name,
            kind,
            parent,
            children: Vec::new(),
        });
        self.index.insert(id, key);
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.arena.get_mut(parent) {
                    parent_node.children.push(key);
                }
            }
            None => self.roots.push(key),
        }
        key
    }

    fn attach_subtree(&mut self, parent: Option<NodeKey>, node: TreeNode) {
        let key = self.attach_new(parent, node.id, CompactString::from(node.name), node.kind);
        for child in node.children {
            self.attach_subtree(Some(key), child);
        }
    }

    fn validate_subtree(&self, node: &TreeNode) -> Result<(), FileTreeError> {
        let mut seen = FxHashSet::default();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current.name.trim().is_empty() {
                return Err(FileTreeError::EmptyName);
            }
            if current.kind == NodeKind::File && !current.children.is_empty() {
                return Err(FileTreeError::FileWithChildren(current.id.clone()));
            }
            if self.index.contains_key(&current.id) || !seen.insert(&current.id) {
                return Err(FileTreeError::DuplicateId(current.id.clone()));
            }
            stack.extend(current.children.iter());
        }
        Ok(())
    }

    fn detach(&mut self, key: NodeKey) {
        let parent = self.arena.get(key).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.arena.get_mut(parent) {
                    parent_node.children.retain(|&child| child != key);
                }
            }
            None => self.roots.retain(|&root| root != key),
        }
    }

    fn snapshot(&self, key: NodeKey) -> Option<TreeNode> {
        let node = self.arena.get(key)?;
        Some(TreeNode {
            id: node.id.clone(),
            name: node.name.to_string(),
            kind: node.kind,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.snapshot(child))
                .collect(),
        })
    }
}

/// `query1-copy-5` copies as `query1-copy-N`, not `query1-copy-5-copy-N`.
fn copy_base(id: &NodeId) -> &str {
    let raw = id.as_str();
    raw.find("-copy-").map_or(raw, |pos| &raw[..pos])
}

fn validate_name(name: &str) -> Result<CompactString, FileTreeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FileTreeError::EmptyName);
    }
    Ok(CompactString::from(trimmed))
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
