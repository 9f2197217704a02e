//! sqldesk - SQL workspace state engine
//!
//! Modules:
//! - models: file tree arena, content map, file kinds
//! - kernel: store, actions, effects and the workspace/query/assistant state
//! - app: workbench that runs store effects on the async runtime
//! - server: HTTP chat and translation endpoints

pub mod app;
pub mod kernel;
pub mod models;
pub mod server;
