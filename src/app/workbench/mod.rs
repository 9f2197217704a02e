use std::fmt;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crate::kernel::services::adapters::{
    AppMessage, AsyncRuntime, CompletionConfig, HttpCompletionService, MockQueryEngine,
};
use crate::kernel::services::ports::{CompletionService, QueryEngine, Settings};
use crate::kernel::{AppState, Store, WorkspaceError, WorkspaceRegistry};

mod bridge;
mod tick;

const MAX_MESSAGE_DRAIN_PER_TICK: usize = 256;

#[derive(Debug)]
pub enum WorkbenchError {
    Runtime(std::io::Error),
    Workspace(WorkspaceError),
}

impl fmt::Display for WorkbenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbenchError::Runtime(e) => write!(f, "failed to start runtime: {}", e),
            WorkbenchError::Workspace(e) => write!(f, "failed to load workspace: {}", e),
        }
    }
}

impl std::error::Error for WorkbenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkbenchError::Runtime(e) => Some(e),
            WorkbenchError::Workspace(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for WorkbenchError {
    fn from(value: std::io::Error) -> Self {
        WorkbenchError::Runtime(value)
    }
}

impl From<WorkspaceError> for WorkbenchError {
    fn from(value: WorkspaceError) -> Self {
        WorkbenchError::Workspace(value)
    }
}

/// Owns the store and runs its effects. Messages from finished work are
/// turned back into actions by [`Workbench::tick`].
pub struct Workbench {
    store: Store,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    query_engine: Arc<dyn QueryEngine>,
    completion: Arc<dyn CompletionService>,
}

impl Workbench {
    pub fn new(
        settings: Settings,
        workspaces: WorkspaceRegistry,
        query_engine: Arc<dyn QueryEngine>,
        completion: Arc<dyn CompletionService>,
    ) -> Result<Self, WorkbenchError> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;
        let store = Store::new(AppState::new(settings, workspaces)?);
        Ok(Self {
            store,
            runtime,
            rx,
            query_engine,
            completion,
        })
    }

    /// Sample workspaces, the mock engine and the HTTP completion client, all
    /// configured from `settings`.
    pub fn from_settings(settings: Settings) -> Result<Self, WorkbenchError> {
        let query_engine = Arc::new(MockQueryEngine::from_settings(&settings.query));
        let completion = Arc::new(HttpCompletionService::new(CompletionConfig::from_settings(
            &settings.assistant,
        )));
        Self::new(
            settings,
            WorkspaceRegistry::with_samples(),
            query_engine,
            completion,
        )
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.tokio_handle()
    }
}
