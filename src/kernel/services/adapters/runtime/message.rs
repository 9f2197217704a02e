use crate::kernel::assistant::AssistantReply;
use crate::kernel::services::ports::QueryExecution;
use crate::kernel::Action;

#[derive(Debug, Clone)]
pub enum AppMessage {
    QueryFinished {
        seq: u64,
        execution: QueryExecution,
    },
    QueryStatusExpired {
        seq: u64,
    },
    CompletionFinished {
        seq: u64,
        reply: AssistantReply,
    },
}

impl From<AppMessage> for Action {
    fn from(message: AppMessage) -> Self {
        match message {
            AppMessage::QueryFinished { seq, execution } => Action::QueryFinished { seq, execution },
            AppMessage::QueryStatusExpired { seq } => Action::QueryStatusExpired { seq },
            AppMessage::CompletionFinished { seq, reply } => Action::AssistantReplied { seq, reply },
        }
    }
}
