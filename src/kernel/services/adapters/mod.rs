//! Service adapters: HTTP completion client, mock query engine, settings IO
//! and the async runtime.

pub mod completion;
pub mod mock_engine;
pub mod runtime;
pub mod settings;

pub use completion::{CompletionConfig, HttpCompletionService};
pub use mock_engine::MockQueryEngine;
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    SettingsError,
};
