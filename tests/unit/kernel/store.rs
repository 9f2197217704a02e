use super::*;
use crate::kernel::assistant::{AssistantMode, AssistantReply, SERVICE_WARNING};
use crate::kernel::editor::{EditorAction, TabSnapshot};
use crate::kernel::query::{QueryStatus, EMPTY_QUERY_MESSAGE};
use crate::kernel::services::ports::{QueryError, QueryExecution, QueryResult, Settings};
use crate::kernel::workspace::{Workspace, WorkspaceId, WorkspaceRegistry};
use crate::models::{ContentMap, FileKind, NodeId, TreeNode};
use std::time::Duration;

fn registry() -> WorkspaceRegistry {
    let main = Workspace {
        id: WorkspaceId::from("ws-a"),
        name: "A".to_string(),
        file_tree: vec![
            TreeNode::folder(
                "queries",
                "queries",
                vec![
                    TreeNode::file("q1", "main.sql"),
                    TreeNode::file("orphan", "orphan.txt"),
                ],
            ),
            TreeNode::folder("archive", "archive", Vec::new()),
        ],
        open_tabs: vec![TabSnapshot {
            node_id: NodeId::from("q1"),
            title: "main.sql".to_string(),
            content: "SELECT 1;".to_string(),
            dirty: false,
        }],
        active_tab: Some(NodeId::from("q1")),
        file_content: ContentMap::from_iter([("q1", "SELECT 1;")]),
    };
    let other = Workspace::untitled(WorkspaceId::from("ws-b"), "B");
    WorkspaceRegistry::from_workspaces(vec![main, other]).unwrap()
}

fn new_store_with(settings: Settings) -> Store {
    Store::new(AppState::new(settings, registry()).unwrap())
}

fn new_store() -> Store {
    new_store_with(Settings::default())
}

fn id(raw: &str) -> NodeId {
    NodeId::from(raw)
}

fn active_pane(store: &Store) -> crate::kernel::editor::PaneId {
    store.state().editor.active_pane_id()
}

fn close_all_tabs(store: &mut Store) {
    let pane = active_pane(store);
    let tabs: Vec<_> = store
        .state()
        .editor
        .pane(pane)
        .unwrap()
        .tabs
        .iter()
        .map(|t| t.id)
        .collect();
    for tab in tabs {
        store.dispatch(Action::Editor(EditorAction::CloseTab { pane, tab }));
    }
    assert!(store.state().active_tab().is_none());
}

fn sample_result() -> QueryResult {
    QueryResult {
        columns: vec!["id".to_string()],
        rows: Vec::new(),
        execution_time_ms: 12,
        row_count: 0,
    }
}

#[test]
fn test_create_file_defaults() {
    let mut store = new_store();
    let result = store.dispatch(Action::CreateFile {
        parent: Some(id("queries")),
        name: None,
    });
    assert!(result.state_changed);
    assert!(result.effects.is_empty());

    let created = store.state().last_created.clone().unwrap();
    assert_eq!(store.state().tree.name(&created), Some("untitled"));
    assert_eq!(store.state().tree.parent(&created), Some(&id("queries")));
    assert_eq!(store.state().content_of(&created), Some(""));
}

#[test]
fn test_create_under_file_is_noop() {
    let mut store = new_store();
    let before = store.state().tree.to_nodes();
    let result = store.dispatch(Action::CreateFolder {
        parent: Some(id("q1")),
        name: None,
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().tree.to_nodes(), before);
}

#[test]
fn test_rename_applies_template_to_blank_file() {
    let mut store = new_store();
    store.dispatch(Action::CreateFile {
        parent: None,
        name: None,
    });
    let created = store.state().last_created.clone().unwrap();
    store.dispatch(Action::OpenFile {
        id: created.clone(),
    });

    let result = store.dispatch(Action::RenameNode {
        id: created.clone(),
        name: "notes.md".to_string(),
    });
    assert!(result.state_changed);
    assert!(store.state().last_created.is_none());

    let template = FileKind::Markdown.default_template();
    assert_eq!(store.state().content_of(&created), Some(template));
    let tab = store.state().active_tab().unwrap();
    assert_eq!(tab.title, "notes.md");
    assert_eq!(tab.content, template);
    assert!(!tab.dirty);
}

#[test]
fn test_rename_keeps_existing_content() {
    let mut store = new_store();
    store.dispatch(Action::RenameNode {
        id: id("q1"),
        name: "renamed.py".to_string(),
    });
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));
    assert_eq!(store.state().active_tab().unwrap().title, "renamed.py");
}

#[test]
fn test_rename_to_blank_is_rejected() {
    let mut store = new_store();
    let result = store.dispatch(Action::RenameNode {
        id: id("q1"),
        name: "   ".to_string(),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().tree.name(&id("q1")), Some("main.sql"));
}

#[test]
fn test_delete_folder_closes_tabs_and_purges_content() {
    let mut store = new_store();
    let result = store.dispatch(Action::DeleteNode { id: id("queries") });
    assert!(result.state_changed);
    assert!(!store.state().tree.contains(&id("q1")));
    assert!(store.state().content_of(&id("q1")).is_none());
    assert!(store.state().active_tab().is_none());
    assert_eq!(store.state().editor.panes().len(), 1);
}

#[test]
fn test_delete_keeps_content_when_purge_disabled() {
    let mut settings = Settings::default();
    settings.workspace.purge_deleted_content = false;
    let mut store = new_store_with(settings);
    store.dispatch(Action::DeleteNode { id: id("q1") });
    assert!(!store.state().tree.contains(&id("q1")));
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));
}

#[test]
fn test_delete_unknown_is_noop() {
    let mut store = new_store();
    let result = store.dispatch(Action::DeleteNode { id: id("missing") });
    assert!(!result.state_changed);
}

#[test]
fn test_copy_paste_duplicates_content() {
    let mut store = new_store();
    assert!(store.dispatch(Action::CopyNode { id: id("q1") }).state_changed);
    let result = store.dispatch(Action::Paste {
        target: id("archive"),
    });
    assert!(result.state_changed);

    let copies = store.state().tree.children(Some(&id("archive")));
    assert_eq!(copies.len(), 1);
    let copy = copies[0].clone();
    assert_ne!(copy, id("q1"));
    assert_eq!(store.state().tree.name(&copy), Some("main.sql"));
    assert_eq!(store.state().content_of(&copy), Some("SELECT 1;"));
    assert!(store.state().tree.contains(&id("q1")));
    assert!(!store.state().clipboard.is_empty());
}

#[test]
fn test_cut_paste_moves_live_node() {
    let mut store = new_store();
    store.dispatch(Action::CutNode { id: id("q1") });
    store.dispatch(Action::RenameNode {
        id: id("q1"),
        name: "moved.sql".to_string(),
    });
    store.dispatch(Action::Paste {
        target: id("archive"),
    });

    assert_eq!(store.state().tree.parent(&id("q1")), Some(&id("archive")));
    assert_eq!(store.state().tree.name(&id("q1")), Some("moved.sql"));
    assert!(store.state().clipboard.is_empty());
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));
}

#[test]
fn test_cut_paste_after_delete_restores_content() {
    let mut store = new_store();
    store.dispatch(Action::CutNode { id: id("q1") });
    store.dispatch(Action::DeleteNode { id: id("q1") });
    assert_eq!(store.state().content_of(&id("q1")), None);

    assert!(store
        .dispatch(Action::Paste {
            target: id("archive"),
        })
        .state_changed);
    assert_eq!(store.state().tree.parent(&id("q1")), Some(&id("archive")));
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));
}

#[test]
fn test_paste_into_own_descendant_is_rejected() {
    let mut store = new_store();
    store.dispatch(Action::CreateFolder {
        parent: Some(id("queries")),
        name: Some("nested".to_string()),
    });
    let nested = store.state().tree.children(Some(&id("queries")))[2].clone();
    store.dispatch(Action::CutNode { id: id("queries") });

    let before = store.state().tree.to_nodes();
    let result = store.dispatch(Action::Paste { target: nested });
    assert!(!result.state_changed);
    assert_eq!(store.state().tree.to_nodes(), before);
    assert!(!store.state().clipboard.is_empty());
}

#[test]
fn test_paste_with_empty_clipboard_is_noop() {
    let mut store = new_store();
    let result = store.dispatch(Action::Paste {
        target: id("archive"),
    });
    assert!(!result.state_changed);
}

#[test]
fn test_open_file_without_content_uses_placeholder() {
    let mut store = new_store();
    assert!(store
        .dispatch(Action::OpenFile { id: id("orphan") })
        .state_changed);
    let tab = store.state().active_tab().unwrap();
    assert_eq!(tab.title, "orphan.txt");
    assert_eq!(tab.content, "-- New file\n");
    assert_eq!(store.state().content_of(&id("orphan")), Some("-- New file\n"));
    assert_eq!(store.state().editor.panes()[0].tabs.len(), 2);

    store.dispatch(Action::OpenFile { id: id("q1") });
    assert_eq!(store.state().editor.panes()[0].tabs.len(), 2);
    assert_eq!(store.state().active_tab().unwrap().node_id, id("q1"));
}

#[test]
fn test_open_folder_is_noop() {
    let mut store = new_store();
    let result = store.dispatch(Action::OpenFile {
        id: id("archive"),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().active_tab().unwrap().node_id, id("q1"));
}

#[test]
fn test_edit_writes_through_to_content_and_sibling_tabs() {
    let mut store = new_store();
    let first = active_pane(&store);
    store.dispatch(Action::Editor(EditorAction::SplitPane { pane: first }));
    let second = active_pane(&store);
    assert_ne!(first, second);

    let result = store.dispatch(Action::EditText {
        pane: second,
        text: "SELECT 2;".to_string(),
    });
    assert!(result.state_changed);
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 2;"));
    for tab in store.state().editor.tabs_for_node(&id("q1")) {
        assert_eq!(tab.content, "SELECT 2;");
    }
}

#[test]
fn test_run_empty_query_is_rejected_without_engine_call() {
    let mut store = new_store();
    let pane = active_pane(&store);
    store.dispatch(Action::EditText {
        pane,
        text: "   ".to_string(),
    });
    let result = store.dispatch(Action::RunQuery { pane });
    assert_eq!(
        store.state().query.status(),
        &QueryStatus::Error(EMPTY_QUERY_MESSAGE.to_string())
    );
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        result.effects[0],
        Effect::ScheduleStatusReset { after, .. } if after == Duration::from_millis(3000)
    ));
}

#[test]
fn test_query_lifecycle() {
    let mut store = new_store();
    let pane = active_pane(&store);
    let result = store.dispatch(Action::RunQuery { pane });
    let seq = match &result.effects[..] {
        [Effect::ExecuteQuery { seq, text }] => {
            assert_eq!(text, "SELECT 1;");
            *seq
        }
        other => panic!("unexpected effects: {:?}", other),
    };
    assert_eq!(store.state().query.status(), &QueryStatus::Loading);

    let result = store.dispatch(Action::QueryFinished {
        seq,
        execution: QueryExecution::ok(sample_result()),
    });
    assert!(result.state_changed);
    assert!(matches!(
        result.effects[..],
        [Effect::ScheduleStatusReset { seq: reset, .. }] if reset == seq
    ));
    assert_eq!(store.state().query.status(), &QueryStatus::Success);
    assert_eq!(store.state().query.history().len(), 1);

    assert!(store
        .dispatch(Action::QueryStatusExpired { seq })
        .state_changed);
    assert_eq!(store.state().query.status(), &QueryStatus::Idle);
    assert!(store.state().query.result().is_some());

    assert!(store.dispatch(Action::ClearQueryResults).state_changed);
    assert!(store.state().query.history().is_empty());
}

#[test]
fn test_stale_query_result_is_discarded() {
    let mut store = new_store();
    let pane = active_pane(&store);
    store.dispatch(Action::RunQuery { pane });
    store.dispatch(Action::RunQuery { pane });
    let latest = store.state().query.current_seq();

    let stale = store.dispatch(Action::QueryFinished {
        seq: latest - 1,
        execution: QueryExecution::failed(QueryError::new("late")),
    });
    assert!(!stale.state_changed);
    assert!(stale.effects.is_empty());
    assert_eq!(store.state().query.status(), &QueryStatus::Loading);

    store.dispatch(Action::QueryFinished {
        seq: latest,
        execution: QueryExecution::failed(QueryError::new("syntax error")),
    });
    assert_eq!(
        store.state().query.status(),
        &QueryStatus::Error("syntax error".to_string())
    );
}

#[test]
fn test_switch_workspace_round_trip() {
    let mut store = new_store();
    let pane = active_pane(&store);
    store.dispatch(Action::EditText {
        pane,
        text: "SELECT 42;".to_string(),
    });
    store.dispatch(Action::CopyNode { id: id("q1") });

    assert!(store
        .dispatch(Action::SwitchWorkspace {
            id: WorkspaceId::from("ws-b")
        })
        .state_changed);
    assert!(store.state().clipboard.is_empty());
    assert!(store.state().tree.contains(&id("untitled")));
    assert!(!store.state().tree.contains(&id("q1")));

    store.dispatch(Action::SwitchWorkspace {
        id: WorkspaceId::from("ws-a"),
    });
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 42;"));
    assert_eq!(store.state().active_tab().unwrap().content, "SELECT 42;");

    let again = store.dispatch(Action::SwitchWorkspace {
        id: WorkspaceId::from("ws-a"),
    });
    assert!(!again.state_changed);
}

#[test]
fn test_add_workspace_switches_to_it() {
    let mut store = new_store();
    let result = store.dispatch(Action::AddWorkspace { name: None });
    assert!(result.state_changed);
    assert_eq!(store.state().workspaces.len(), 3);
    let current = store.state().workspaces.current().unwrap();
    assert_eq!(current.name, "Workspace 3");
    assert_eq!(
        store.state().content_of(&id("untitled")),
        Some("-- New workspace\n")
    );
}

#[test]
fn test_remove_workspaces_down_to_last() {
    let mut store = new_store();
    assert!(store
        .dispatch(Action::RemoveWorkspace {
            id: WorkspaceId::from("ws-a")
        })
        .state_changed);
    assert_eq!(store.state().workspaces.current_id().as_str(), "ws-b");
    assert!(store.state().tree.contains(&id("untitled")));

    let last = store.dispatch(Action::RemoveWorkspace {
        id: WorkspaceId::from("ws-b"),
    });
    assert!(!last.state_changed);
    assert_eq!(store.state().workspaces.len(), 1);
}

#[test]
fn test_rename_workspace_and_refresh() {
    let mut store = new_store();
    assert!(store
        .dispatch(Action::RenameWorkspace {
            id: WorkspaceId::from("ws-a"),
            name: "Reports".to_string()
        })
        .state_changed);
    assert_eq!(store.state().workspaces.current().unwrap().name, "Reports");

    store.dispatch(Action::CreateFolder {
        parent: None,
        name: Some("scratch".to_string()),
    });
    assert_eq!(store.state().tree.children(None).len(), 3);
    store.dispatch(Action::RefreshExplorer);
    assert_eq!(store.state().tree.children(None).len(), 2);
}

#[test]
fn test_refresh_closes_tabs_of_unsaved_nodes() {
    let mut store = new_store();
    store.dispatch(Action::CreateFile {
        parent: None,
        name: Some("a.sql".to_string()),
    });
    let first = store.state().last_created.clone().unwrap();
    store.dispatch(Action::OpenFile { id: first.clone() });
    let pane = active_pane(&store);
    store.dispatch(Action::EditText {
        pane,
        text: "SECRET".to_string(),
    });

    store.dispatch(Action::RefreshExplorer);
    assert!(!store.state().tree.contains(&first));
    assert!(store.state().editor.tabs_for_node(&first).next().is_none());
    assert_eq!(store.state().content_of(&first), None);
    assert_eq!(store.state().active_tab().unwrap().node_id, id("q1"));

    store.dispatch(Action::CreateFile {
        parent: None,
        name: Some("b.sql".to_string()),
    });
    let second = store.state().last_created.clone().unwrap();
    assert_ne!(second, first);
    store.dispatch(Action::OpenFile { id: second });
    let tab = store.state().active_tab().unwrap();
    assert_eq!(tab.title, "b.sql");
    assert_eq!(tab.content, "");
}

#[test]
fn test_ids_stay_unique_across_workspace_switches() {
    let mut store = new_store();
    store.dispatch(Action::CreateFile {
        parent: None,
        name: None,
    });
    let in_a = store.state().last_created.clone().unwrap();

    store.dispatch(Action::SwitchWorkspace {
        id: WorkspaceId::from("ws-b"),
    });
    store.dispatch(Action::CreateFile {
        parent: None,
        name: None,
    });
    let in_b = store.state().last_created.clone().unwrap();
    assert_ne!(in_a, in_b);

    store.dispatch(Action::SwitchWorkspace {
        id: WorkspaceId::from("ws-a"),
    });
    assert!(store.state().tree.contains(&in_a));
    assert!(!store.state().tree.contains(&in_b));
}

#[test]
fn test_send_chat_resolves_mentions() {
    let mut store = new_store();
    let result = store.dispatch(Action::SendChat {
        message: "why is this slow?".to_string(),
        mentions: vec![id("q1"), id("queries"), id("missing")],
    });
    assert!(result.state_changed);
    assert!(store.state().assistant.is_loading());
    assert_eq!(store.state().assistant.messages().len(), 1);

    match &result.effects[..] {
        [Effect::RequestCompletion {
            mode,
            context,
            attachments,
            ..
        }] => {
            assert_eq!(*mode, AssistantMode::Chat);
            assert_eq!(context.as_deref(), Some("SELECT 1;"));
            assert_eq!(attachments.len(), 1);
            assert_eq!(attachments[0].name, "main.sql");
        }
        other => panic!("unexpected effects: {:?}", other),
    }

    let busy = store.dispatch(Action::SendChat {
        message: "again".to_string(),
        mentions: Vec::new(),
    });
    assert!(!busy.state_changed);
}

#[test]
fn test_blank_chat_is_ignored() {
    let mut store = new_store();
    let result = store.dispatch(Action::SendChat {
        message: "  ".to_string(),
        mentions: Vec::new(),
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

fn request_seq(result: &DispatchResult) -> u64 {
    match &result.effects[..] {
        [Effect::RequestCompletion { seq, .. }] => *seq,
        other => panic!("unexpected effects: {:?}", other),
    }
}

#[test]
fn test_chat_reply_appends_message() {
    let mut store = new_store();
    let seq = request_seq(&store.dispatch(Action::SendChat {
        message: "debug this error".to_string(),
        mentions: Vec::new(),
    }));
    let reply = AssistantReply {
        response: "fallback".to_string(),
        warning: Some(SERVICE_WARNING.to_string()),
    };
    assert!(store
        .dispatch(Action::AssistantReplied { seq, reply })
        .state_changed);
    assert!(!store.state().assistant.is_loading());
    assert_eq!(store.state().assistant.messages().len(), 2);
    assert_eq!(
        store.state().assistant.last_warning(),
        Some(SERVICE_WARNING)
    );

    assert!(store.dispatch(Action::ClearChat).state_changed);
    assert!(store.state().assistant.messages().is_empty());
}

#[test]
fn test_agent_requires_open_file() {
    let mut store = new_store();
    close_all_tabs(&mut store);
    let result = store.dispatch(Action::RunAgent {
        prompt: "Add comments".to_string(),
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn test_agent_suggestion_accept() {
    let mut store = new_store();
    let result = store.dispatch(Action::RunAgent {
        prompt: "Add a LIMIT".to_string(),
    });
    let seq = match &result.effects[..] {
        [Effect::RequestCompletion {
            seq,
            mode,
            message,
            context,
            ..
        }] => {
            assert_eq!(*mode, AssistantMode::Agent);
            assert!(message.starts_with("Add a LIMIT"));
            assert!(message.contains("SELECT 1;"));
            assert_eq!(context.as_deref(), Some("SELECT 1;"));
            *seq
        }
        other => panic!("unexpected effects: {:?}", other),
    };

    store.dispatch(Action::AssistantReplied {
        seq,
        reply: AssistantReply {
            response: "SELECT 1 LIMIT 10;".to_string(),
            warning: None,
        },
    });
    let suggestion = store.state().assistant.suggestion().unwrap();
    assert_eq!(suggestion.target.node_id, id("q1"));

    store.dispatch(Action::EditSuggestion("SELECT 1 LIMIT 5;".to_string()));
    assert!(store.dispatch(Action::AcceptSuggestion).state_changed);
    assert!(store.state().assistant.suggestion().is_none());
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1 LIMIT 5;"));
    let tab = store.state().active_tab().unwrap();
    assert_eq!(tab.content, "SELECT 1 LIMIT 5;");
    assert!(tab.dirty);
}

#[test]
fn test_agent_reply_after_workspace_switch_is_discarded() {
    let mut store = new_store();
    let seq = request_seq(&store.dispatch(Action::RunAgent {
        prompt: "Rewrite".to_string(),
    }));
    assert!(store.state().assistant.is_loading());

    store.dispatch(Action::AddWorkspace { name: None });
    assert!(!store.state().assistant.is_loading());
    let untitled = id("untitled");
    store.dispatch(Action::OpenFile {
        id: untitled.clone(),
    });
    let before = store.state().content_of(&untitled).map(str::to_string);
    assert!(before.is_some());

    let result = store.dispatch(Action::AssistantReplied {
        seq,
        reply: AssistantReply {
            response: "FROM THE OTHER WORKSPACE".to_string(),
            warning: None,
        },
    });
    assert!(!result.state_changed);
    assert!(store.state().assistant.suggestion().is_none());
    assert!(!store.dispatch(Action::AcceptSuggestion).state_changed);
    assert_eq!(store.state().content_of(&untitled).map(str::to_string), before);
}

#[test]
fn test_chat_reply_survives_workspace_switch() {
    let mut store = new_store();
    let seq = request_seq(&store.dispatch(Action::SendChat {
        message: "hello".to_string(),
        mentions: Vec::new(),
    }));
    store.dispatch(Action::SwitchWorkspace {
        id: WorkspaceId::from("ws-b"),
    });
    assert!(store
        .dispatch(Action::AssistantReplied {
            seq,
            reply: AssistantReply {
                response: "hi".to_string(),
                warning: None,
            },
        })
        .state_changed);
    assert_eq!(store.state().assistant.messages().len(), 2);
}

#[test]
fn test_agent_suggestion_reject_and_deleted_target() {
    let mut store = new_store();
    let seq = request_seq(&store.dispatch(Action::RunAgent {
        prompt: "Rewrite".to_string(),
    }));
    store.dispatch(Action::AssistantReplied {
        seq,
        reply: AssistantReply {
            response: "SELECT 2;".to_string(),
            warning: None,
        },
    });
    assert!(store.dispatch(Action::RejectSuggestion).state_changed);
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));
    assert!(!store.dispatch(Action::RejectSuggestion).state_changed);

    let seq = request_seq(&store.dispatch(Action::RunAgent {
        prompt: "Rewrite".to_string(),
    }));
    store.dispatch(Action::DeleteNode { id: id("q1") });
    store.dispatch(Action::AssistantReplied {
        seq,
        reply: AssistantReply {
            response: "SELECT 3;".to_string(),
            warning: None,
        },
    });
    assert!(store.state().assistant.suggestion().is_none());
    assert!(!store.state().assistant.is_loading());
}

#[test]
fn test_import_schema_creates_file_when_nothing_open() {
    let mut store = new_store();
    close_all_tabs(&mut store);
    let result = store.dispatch(Action::ImportSchema {
        database: "production".to_string(),
        table: "orders".to_string(),
    });
    assert!(result.state_changed);

    let tab = store.state().active_tab().unwrap();
    assert_eq!(tab.title, "orders_schema.sql");
    assert!(tab.content.starts_with("CREATE TABLE orders ("));
    assert_eq!(store.state().tree.parent(&tab.node_id), None);
    assert_eq!(
        store.state().content_of(&tab.node_id),
        Some(tab.content.as_str())
    );
}

#[test]
fn test_import_schema_replaces_blank_active_file() {
    let mut store = new_store();
    let pane = active_pane(&store);
    store.dispatch(Action::EditText {
        pane,
        text: FileKind::Sql.default_template().to_string(),
    });
    store.dispatch(Action::ImportSchema {
        database: "production".to_string(),
        table: "customers".to_string(),
    });
    assert!(store.state().pending_import.is_none());
    assert!(store
        .state()
        .content_of(&id("q1"))
        .unwrap()
        .starts_with("CREATE TABLE customers ("));
}

#[test]
fn test_import_schema_confirm_and_cancel() {
    let mut store = new_store();
    store.dispatch(Action::ImportSchema {
        database: "staging".to_string(),
        table: "test_users".to_string(),
    });
    let pending = store.state().pending_import.clone().unwrap();
    assert_eq!(pending.node_id, id("q1"));
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));

    assert!(store.dispatch(Action::CancelImport).state_changed);
    assert!(store.state().pending_import.is_none());
    assert_eq!(store.state().content_of(&id("q1")), Some("SELECT 1;"));

    store.dispatch(Action::ImportSchema {
        database: "staging".to_string(),
        table: "test_users".to_string(),
    });
    assert!(store.dispatch(Action::ConfirmImport).state_changed);
    assert_eq!(store.state().content_of(&id("q1")), Some(pending.sql.as_str()));
    assert_eq!(store.state().active_tab().unwrap().content, pending.sql);
}

#[test]
fn test_import_unknown_table_is_noop() {
    let mut store = new_store();
    let result = store.dispatch(Action::ImportSchema {
        database: "production".to_string(),
        table: "nope".to_string(),
    });
    assert!(!result.state_changed);
}
