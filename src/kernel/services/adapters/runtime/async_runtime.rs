use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use super::message::AppMessage;
use crate::kernel::assistant::{self, AssistantMode, AssistantReply, Attachment};
use crate::kernel::services::ports::{CompletionService, QueryEngine, QueryError, QueryExecution};

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Waits out the engine's simulated latency, then runs the query on the
    /// blocking pool.
    pub fn execute_query(&self, seq: u64, text: String, engine: Arc<dyn QueryEngine>) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let latency = engine.latency();
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let execution = match tokio::task::spawn_blocking(move || engine.execute(&text)).await
            {
                Ok(execution) => execution,
                Err(e) => {
                    tracing::error!(error = %e, seq, "query task failed");
                    QueryExecution::failed(QueryError::new(e.to_string()))
                }
            };
            let _ = tx.send(AppMessage::QueryFinished { seq, execution });
        });
    }

    pub fn schedule_status_reset(&self, seq: u64, after: Duration) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(AppMessage::QueryStatusExpired { seq });
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn request_completion(
        &self,
        seq: u64,
        mode: AssistantMode,
        message: String,
        context: Option<String>,
        attachments: Vec<Attachment>,
        temperature: f32,
        service: Arc<dyn CompletionService>,
    ) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let fallback_message = message.clone();
            let fallback_context = context.clone();
            let result = tokio::task::spawn_blocking(move || {
                assistant::respond(
                    service.as_ref(),
                    mode,
                    &message,
                    context.as_deref(),
                    &attachments,
                    temperature,
                )
            })
            .await;

            let reply = match result {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!(error = %e, seq, "completion task failed");
                    AssistantReply {
                        response: assistant::fallback_response(
                            mode,
                            &fallback_message,
                            fallback_context.as_deref(),
                        ),
                        warning: Some(assistant::SERVICE_WARNING.to_string()),
                    }
                }
            };
            let _ = tx.send(AppMessage::CompletionFinished { seq, reply });
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
