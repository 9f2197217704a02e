//! Single-slot clipboard over the file tree.

use std::fmt;

use crate::models::{ContentMap, FileTree, FileTreeError, NodeId, TreeNode};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipboardOperation {
    Cut,
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub node_id: NodeId,
    pub operation: ClipboardOperation,
    pub node: TreeNode,
    /// File contents of the subtree when it was cut or copied.
    pub content: Vec<(NodeId, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    Empty,
    InvalidTarget,
    WouldCreateCycle,
    SourceMissing,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Empty => write!(f, "clipboard is empty"),
            ClipboardError::InvalidTarget => write!(f, "paste target is not a folder"),
            ClipboardError::WouldCreateCycle => {
                write!(f, "cannot paste a folder into itself or its descendant")
            }
            ClipboardError::SourceMissing => write!(f, "cut source no longer exists"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Result of a successful paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutcome {
    pub root: NodeId,
    /// `(original, copy)` pairs for every node of a copy-paste; empty for a cut.
    pub copied: Vec<(NodeId, NodeId)>,
    /// Contents to write back when a cut source had been deleted and its
    /// snapshot was re-inserted.
    pub restored: Vec<(NodeId, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    item: Option<ClipboardItem>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self) -> Option<&ClipboardItem> {
        self.item.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub fn clear(&mut self) -> bool {
        self.item.take().is_some()
    }

    pub fn cut(&mut self, tree: &FileTree, content: &ContentMap, id: &NodeId) -> bool {
        self.store(tree, content, id, ClipboardOperation::Cut)
    }

    pub fn copy(&mut self, tree: &FileTree, content: &ContentMap, id: &NodeId) -> bool {
        self.store(tree, content, id, ClipboardOperation::Copy)
    }

    fn store(
        &mut self,
        tree: &FileTree,
        content: &ContentMap,
        id: &NodeId,
        operation: ClipboardOperation,
    ) -> bool {
        let Some(node) = tree.find(id) else {
            return false;
        };
        let content = node
            .ids()
            .into_iter()
            .filter_map(|id| content.get(&id).map(|text| (id, text.to_string())))
            .collect();
        self.item = Some(ClipboardItem {
            node_id: id.clone(),
            operation,
            node,
            content,
        });
        true
    }

    pub fn paste(
        &mut self,
        tree: &mut FileTree,
        target: &NodeId,
    ) -> Result<PasteOutcome, ClipboardError> {
        let item = self.item.as_ref().ok_or(ClipboardError::Empty)?;
        if !tree.is_folder(target) {
            return Err(ClipboardError::InvalidTarget);
        }

        match item.operation {
            ClipboardOperation::Cut => {
                let outcome = paste_cut(tree, item, target)?;
                self.item = None;
                Ok(outcome)
            }
            ClipboardOperation::Copy => {
                if tree.contains(&item.node_id)
                    && (target == &item.node_id || tree.is_ancestor(&item.node_id, target))
                {
                    return Err(ClipboardError::WouldCreateCycle);
                }
                let copy = tree.clone_with_fresh_ids(&item.node);
                let copied: Vec<_> = item.node.ids().into_iter().zip(copy.ids()).collect();
                let root = tree
                    .insert_subtree(Some(target), copy)
                    .map_err(|_| ClipboardError::InvalidTarget)?;
                Ok(PasteOutcome {
                    root,
                    copied,
                    restored: Vec::new(),
                })
            }
        }
    }
}

fn paste_cut(
    tree: &mut FileTree,
    item: &ClipboardItem,
    target: &NodeId,
) -> Result<PasteOutcome, ClipboardError> {
    if tree.contains(&item.node_id) {
        return match tree.move_to(&item.node_id, Some(target)) {
            Ok(()) => Ok(PasteOutcome {
                root: item.node_id.clone(),
                copied: Vec::new(),
                restored: Vec::new(),
            }),
            Err(FileTreeError::MoveIntoDescendant) => Err(ClipboardError::WouldCreateCycle),
            Err(_) => Err(ClipboardError::InvalidTarget),
        };
    }

    match tree.insert_subtree(Some(target), item.node.clone()) {
        Ok(root) => Ok(PasteOutcome {
            root,
            copied: Vec::new(),
            restored: item.content.clone(),
        }),
        Err(FileTreeError::DuplicateId(_)) => Err(ClipboardError::SourceMissing),
        Err(_) => Err(ClipboardError::InvalidTarget),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/clipboard.rs"]
mod tests;
