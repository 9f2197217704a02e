//! Data models: the file tree, file contents and file kinds.

pub mod content;
pub mod file_kind;
pub mod file_tree;

pub use content::ContentMap;
pub use file_kind::{is_blank_content, FileKind};
pub use file_tree::{FileTree, FileTreeError, FileTreeRow, NodeId, NodeKind, TreeNode};
