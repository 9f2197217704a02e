use crate::kernel::assistant::AssistantReply;
use crate::kernel::editor::{EditorAction, PaneId};
use crate::kernel::services::ports::QueryExecution;
use crate::kernel::workspace::WorkspaceId;
use crate::models::NodeId;

#[derive(Debug, Clone)]
pub enum Action {
    Editor(EditorAction),

    CreateFile {
        parent: Option<NodeId>,
        name: Option<String>,
    },
    CreateFolder {
        parent: Option<NodeId>,
        name: Option<String>,
    },
    RenameNode {
        id: NodeId,
        name: String,
    },
    DeleteNode {
        id: NodeId,
    },
    CutNode {
        id: NodeId,
    },
    CopyNode {
        id: NodeId,
    },
    Paste {
        target: NodeId,
    },
    OpenFile {
        id: NodeId,
    },
    EditText {
        pane: PaneId,
        text: String,
    },

    SwitchWorkspace {
        id: WorkspaceId,
    },
    AddWorkspace {
        name: Option<String>,
    },
    RemoveWorkspace {
        id: WorkspaceId,
    },
    RenameWorkspace {
        id: WorkspaceId,
        name: String,
    },
    RefreshExplorer,

    RunQuery {
        pane: PaneId,
    },
    QueryFinished {
        seq: u64,
        execution: QueryExecution,
    },
    QueryStatusExpired {
        seq: u64,
    },
    ClearQueryResults,

    SendChat {
        message: String,
        mentions: Vec<NodeId>,
    },
    RunAgent {
        prompt: String,
    },
    AssistantReplied {
        seq: u64,
        reply: AssistantReply,
    },
    EditSuggestion(String),
    AcceptSuggestion,
    RejectSuggestion,
    ClearChat,

    ImportSchema {
        database: String,
        table: String,
    },
    ConfirmImport,
    CancelImport,
}
