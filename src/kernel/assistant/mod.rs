//! Assistant coordinator: chat history, in-flight request tracking and the
//! pending agent suggestion.

mod prompt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kernel::editor::PaneId;
use crate::models::{ContentMap, FileTree, NodeId};

pub use prompt::{
    agent_message, fallback_response, quick_actions, respond, system_prompt, AgentQuickAction,
    AssistantMode, AssistantReply, Attachment, SERVICE_WARNING,
};

const MENTION_LIMIT: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Pane and node an agent request was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTarget {
    pub pane: PaneId,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSuggestion {
    pub target: SuggestionTarget,
    pub content: String,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRequest {
    seq: u64,
    mode: AssistantMode,
    target: Option<SuggestionTarget>,
}

#[derive(Debug, Clone, Default)]
pub struct AssistantState {
    messages: Vec<ChatMessage>,
    pending: Option<PendingRequest>,
    suggestion: Option<AgentSuggestion>,
    last_warning: Option<String>,
    next_message_id: u64,
    next_seq: u64,
}

impl AssistantState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn suggestion(&self) -> Option<&AgentSuggestion> {
        self.suggestion.as_ref()
    }

    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    fn push_message(&mut self, role: ChatRole, content: String) {
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_message_id,
            role,
            content,
            timestamp: Utc::now(),
        });
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Appends the user message and marks a chat request in flight.
    pub fn begin_chat(&mut self, message: &str) -> u64 {
        self.push_message(ChatRole::User, message.to_string());
        let seq = self.next_seq();
        self.pending = Some(PendingRequest {
            seq,
            mode: AssistantMode::Chat,
            target: None,
        });
        seq
    }

    /// Marks an agent request in flight, bound to `target`. Any earlier
    /// suggestion is dropped.
    pub fn begin_agent(&mut self, target: SuggestionTarget) -> u64 {
        let seq = self.next_seq();
        self.suggestion = None;
        self.pending = Some(PendingRequest {
            seq,
            mode: AssistantMode::Agent,
            target: Some(target),
        });
        seq
    }

    /// Applies a reply. Returns false when `seq` is not the request in flight.
    pub fn finish(&mut self, seq: u64, reply: AssistantReply) -> bool {
        if self.pending.as_ref().map(|p| p.seq) != Some(seq) {
            tracing::debug!(seq, "stale assistant reply discarded");
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.last_warning = reply.warning.clone();
        match (pending.mode, pending.target) {
            (AssistantMode::Agent, Some(target)) => {
                self.suggestion = Some(AgentSuggestion {
                    target,
                    content: reply.response,
                    warning: reply.warning,
                });
            }
            _ => self.push_message(ChatRole::Assistant, reply.response),
        }
        true
    }

    /// Forgets an in-flight agent request; its reply will be discarded as
    /// stale. Chat requests are left alone.
    pub fn cancel_agent_request(&mut self) -> bool {
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.mode == AssistantMode::Agent)
        {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn edit_suggestion(&mut self, text: &str) -> bool {
        match self.suggestion.as_mut() {
            Some(suggestion) if suggestion.content != text => {
                suggestion.content = text.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn take_suggestion(&mut self) -> Option<AgentSuggestion> {
        self.suggestion.take()
    }

    pub fn clear_messages(&mut self) -> bool {
        if self.messages.is_empty() {
            return false;
        }
        self.messages.clear();
        true
    }
}

/// Resolves mentioned node ids to attachments. Unknown ids and folders are
/// skipped.
pub fn resolve_attachments(tree: &FileTree, content: &ContentMap, ids: &[NodeId]) -> Vec<Attachment> {
    ids.iter()
        .filter(|id| tree.is_file(id))
        .filter_map(|id| {
            let name = tree.name(id)?;
            Some(Attachment {
                name: name.to_string(),
                content: content.get(id).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Files whose name contains `query` (case-insensitive), minus those already
/// mentioned. At most ten.
pub fn mention_candidates(tree: &FileTree, query: &str, mentioned: &[NodeId]) -> Vec<(NodeId, String)> {
    let query = query.to_lowercase();
    tree.files()
        .into_iter()
        .filter(|(id, name)| name.to_lowercase().contains(&query) && !mentioned.contains(id))
        .take(MENTION_LIMIT)
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/assistant.rs"]
mod tests;
