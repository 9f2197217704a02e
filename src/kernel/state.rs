use crate::kernel::services::ports::Settings;
use crate::models::{ContentMap, FileKind, FileTree, NodeId};

use super::assistant::AssistantState;
use super::clipboard::Clipboard;
use super::editor::{EditorState, EditorTab};
use super::query::QueryState;
use super::schema::PendingImport;
use super::workspace::{WorkspaceError, WorkspaceRegistry};

/// Everything the store owns. The tree, content map and editor hold the
/// current workspace; the registry holds the saved records of every workspace.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub workspaces: WorkspaceRegistry,
    pub tree: FileTree,
    pub content: ContentMap,
    pub editor: EditorState,
    pub clipboard: Clipboard,
    pub query: QueryState,
    pub assistant: AssistantState,
    pub pending_import: Option<PendingImport>,
    /// Most recently created file, awaiting its first rename.
    pub last_created: Option<NodeId>,
}

impl AppState {
    /// Loads the registry's current workspace into live state.
    pub fn new(settings: Settings, workspaces: WorkspaceRegistry) -> Result<Self, WorkspaceError> {
        let mut tree = FileTree::new();
        let mut content = ContentMap::new();
        let mut editor = EditorState::new(settings.editor.max_panes);
        workspaces.load_current(&mut tree, &mut content, &mut editor)?;
        let query = QueryState::new(settings.query.history_limit);
        Ok(Self {
            settings,
            workspaces,
            tree,
            content,
            editor,
            clipboard: Clipboard::new(),
            query,
            assistant: AssistantState::new(),
            pending_import: None,
            last_created: None,
        })
    }

    pub fn with_samples(settings: Settings) -> Result<Self, WorkspaceError> {
        Self::new(settings, WorkspaceRegistry::with_samples())
    }

    pub fn active_tab(&self) -> Option<&EditorTab> {
        self.editor.active_tab()
    }

    /// Kind of the file in the active tab, for agent quick actions.
    pub fn active_file_kind(&self) -> Option<FileKind> {
        self.active_tab().map(|tab| FileKind::from_name(&tab.title))
    }

    pub fn content_of(&self, id: &NodeId) -> Option<&str> {
        self.content.get(id)
    }
}
