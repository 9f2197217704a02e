use super::*;
use crate::models::NodeKind;

fn id(raw: &str) -> NodeId {
    NodeId::from(raw)
}

fn tree() -> FileTree {
    FileTree::from_nodes(vec![
        TreeNode::folder(
            "queries",
            "queries",
            vec![
                TreeNode::file("q1", "customers.sql"),
                TreeNode::folder("nested", "nested", vec![TreeNode::file("q2", "deep.sql")]),
            ],
        ),
        TreeNode::folder("archive", "archive", Vec::new()),
        TreeNode::file("loose", "loose.sql"),
    ])
    .unwrap()
}

#[test]
fn test_paste_empty_clipboard() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();
    assert_eq!(
        clipboard.paste(&mut tree, &id("archive")),
        Err(ClipboardError::Empty)
    );
}

#[test]
fn test_cut_unknown_node_is_noop() {
    let tree = tree();
    let mut clipboard = Clipboard::new();
    assert!(!clipboard.cut(&tree, &ContentMap::new(), &id("missing")));
    assert!(clipboard.is_empty());
}

#[test]
fn test_paste_into_file_is_invalid_target() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();
    clipboard.copy(&tree, &ContentMap::new(), &id("q1"));
    assert_eq!(
        clipboard.paste(&mut tree, &id("loose")),
        Err(ClipboardError::InvalidTarget)
    );
    assert!(!clipboard.is_empty());
}

#[test]
fn test_cut_paste_moves_subtree_and_keeps_ids() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();
    clipboard.cut(&tree, &ContentMap::new(), &id("nested"));

    let outcome = clipboard.paste(&mut tree, &id("archive")).unwrap();
    assert_eq!(outcome.root, id("nested"));
    assert!(outcome.copied.is_empty());
    assert_eq!(tree.parent(&id("nested")), Some(&id("archive")));
    assert_eq!(tree.parent(&id("q2")), Some(&id("nested")));
    assert_eq!(tree.len(), 6);
    assert!(clipboard.is_empty());
}

#[test]
fn test_cut_paste_keeps_rename_made_after_cut() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();
    clipboard.cut(&tree, &ContentMap::new(), &id("q1"));
    tree.rename(&id("q1"), "renamed.sql").unwrap();

    clipboard.paste(&mut tree, &id("archive")).unwrap();
    assert_eq!(tree.name(&id("q1")), Some("renamed.sql"));
}

#[test]
fn test_cut_paste_reinserts_deleted_source() {
    let mut tree = tree();
    let mut content = ContentMap::new();
    content.set(id("q2"), "SELECT 2;");
    let mut clipboard = Clipboard::new();
    clipboard.cut(&tree, &content, &id("nested"));
    tree.delete(&id("nested")).unwrap();

    let outcome = clipboard.paste(&mut tree, &id("archive")).unwrap();
    assert_eq!(outcome.root, id("nested"));
    assert!(tree.contains(&id("q2")));
    assert_eq!(outcome.restored, vec![(id("q2"), "SELECT 2;".to_string())]);
}

#[test]
fn test_live_cut_paste_restores_nothing() {
    let mut tree = tree();
    let mut content = ContentMap::new();
    content.set(id("q2"), "SELECT 2;");
    let mut clipboard = Clipboard::new();
    clipboard.cut(&tree, &content, &id("nested"));
    assert_eq!(clipboard.item().unwrap().content.len(), 1);

    let outcome = clipboard.paste(&mut tree, &id("archive")).unwrap();
    assert!(outcome.restored.is_empty());
}

#[test]
fn test_copy_of_copy_does_not_stack_suffixes() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();
    clipboard.copy(&tree, &ContentMap::new(), &id("q1"));
    let first = clipboard.paste(&mut tree, &id("archive")).unwrap().root;

    clipboard.copy(&tree, &ContentMap::new(), &first);
    let second = clipboard.paste(&mut tree, &id("archive")).unwrap().root;
    assert!(second.as_str().starts_with("q1-copy-"));
    assert_eq!(second.as_str().matches("-copy-").count(), 1);
    assert_ne!(second, first);
}

#[test]
fn test_cut_paste_with_taken_ids_is_source_missing() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();
    clipboard.cut(&tree, &ContentMap::new(), &id("nested"));
    tree.delete(&id("nested")).unwrap();
    tree.insert_subtree(Some(&id("archive")), TreeNode::file("q2", "squatter.sql"))
        .unwrap();

    assert_eq!(
        clipboard.paste(&mut tree, &id("queries")),
        Err(ClipboardError::SourceMissing)
    );
}

#[test]
fn test_copy_paste_creates_disjoint_clone() {
    let mut tree = tree();
    let before = tree.find(&id("queries")).unwrap();
    let mut clipboard = Clipboard::new();
    clipboard.copy(&tree, &ContentMap::new(), &id("nested"));

    let outcome = clipboard.paste(&mut tree, &id("archive")).unwrap();
    assert_ne!(outcome.root, id("nested"));
    assert_eq!(outcome.copied.len(), 2);
    assert_eq!(outcome.copied[0], (id("nested"), outcome.root.clone()));
    assert_eq!(tree.find(&id("queries")).unwrap(), before);
    assert_eq!(tree.kind(&outcome.root), Some(NodeKind::Folder));
    assert_eq!(tree.len(), 8);
    assert!(!clipboard.is_empty());

    let second = clipboard.paste(&mut tree, &id("archive")).unwrap();
    assert_ne!(second.root, outcome.root);
}

#[test]
fn test_paste_into_own_descendant_is_rejected() {
    let mut tree = tree();
    let mut clipboard = Clipboard::new();

    clipboard.cut(&tree, &ContentMap::new(), &id("queries"));
    assert_eq!(
        clipboard.paste(&mut tree, &id("nested")),
        Err(ClipboardError::WouldCreateCycle)
    );
    assert_eq!(tree.parent(&id("queries")), None);

    clipboard.copy(&tree, &ContentMap::new(), &id("queries"));
    assert_eq!(
        clipboard.paste(&mut tree, &id("queries")),
        Err(ClipboardError::WouldCreateCycle)
    );
}
