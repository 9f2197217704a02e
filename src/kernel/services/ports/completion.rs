use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    MissingApiKey(String),
    Http { status: u16, body: String },
    Transport(String),
    InvalidResponse(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::MissingApiKey(var) => write!(f, "missing API key in {}", var),
            CompletionError::Http { status, body } => {
                write!(f, "completion service HTTP {}: {}", status, body)
            }
            CompletionError::Transport(e) => write!(f, "completion transport error: {}", e),
            CompletionError::InvalidResponse(e) => {
                write!(f, "invalid completion response: {}", e)
            }
        }
    }
}

impl std::error::Error for CompletionError {}

/// Hosted text-completion service. Calls block; callers run them off the
/// state-owning thread.
pub trait CompletionService: Send + Sync {
    fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
