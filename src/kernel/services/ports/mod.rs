//! Service ports: traits + data contracts.

pub mod completion;
pub mod query;
pub mod settings;

pub use completion::{CompletionError, CompletionRequest, CompletionService};
pub use query::{QueryEngine, QueryError, QueryExecution, QueryResult, QueryRow};
pub use settings::{
    AssistantSettings, EditorSettings, QuerySettings, ServerSettings, Settings, WorkspaceSettings,
};
