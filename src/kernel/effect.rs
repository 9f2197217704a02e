use std::time::Duration;

use crate::kernel::assistant::{AssistantMode, Attachment};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ExecuteQuery {
        seq: u64,
        text: String,
    },
    ScheduleStatusReset {
        seq: u64,
        after: Duration,
    },
    RequestCompletion {
        seq: u64,
        mode: AssistantMode,
        message: String,
        context: Option<String>,
        attachments: Vec<Attachment>,
        temperature: f32,
    },
}
