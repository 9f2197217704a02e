//! Headless workspace core (state/action/effect).

pub mod action;
pub mod assistant;
pub mod clipboard;
pub mod editor;
pub mod effect;
pub mod query;
pub mod schema;
pub mod services;
pub mod state;
pub mod store;
pub mod translate;
pub mod workspace;

pub use action::Action;
pub use assistant::{AssistantMode, AssistantReply, AssistantState};
pub use clipboard::{Clipboard, ClipboardError, ClipboardOperation};
pub use editor::{EditorAction, EditorState, PaneId, TabId};
pub use effect::Effect;
pub use query::{QueryState, QueryStatus};
pub use state::AppState;
pub use store::{DispatchResult, Store};
pub use workspace::{Workspace, WorkspaceError, WorkspaceId, WorkspaceRegistry};
