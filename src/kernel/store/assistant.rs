use crate::kernel::assistant::{
    agent_message, resolve_attachments, AssistantMode, SuggestionTarget,
};
use crate::kernel::{Action, Effect};

impl super::Store {
    pub(super) fn reduce_assistant(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::SendChat { message, mentions } => {
                if message.trim().is_empty() || self.state.assistant.is_loading() {
                    return super::DispatchResult::unchanged();
                }
                let context = self.state.active_tab().map(|tab| tab.content.clone());
                let attachments =
                    resolve_attachments(&self.state.tree, &self.state.content, &mentions);
                let seq = self.state.assistant.begin_chat(&message);
                tracing::debug!(seq, attachments = attachments.len(), "chat requested");
                super::DispatchResult {
                    effects: vec![Effect::RequestCompletion {
                        seq,
                        mode: AssistantMode::Chat,
                        message,
                        context,
                        attachments,
                        temperature: self.state.settings.assistant.temperature,
                    }],
                    state_changed: true,
                }
            }
            Action::RunAgent { prompt } => {
                if prompt.trim().is_empty() || self.state.assistant.is_loading() {
                    return super::DispatchResult::unchanged();
                }
                let pane = self.state.editor.active_pane_id();
                let Some(tab) = self.state.active_tab() else {
                    tracing::warn!("agent request ignored: no active file");
                    return super::DispatchResult::unchanged();
                };
                let target = SuggestionTarget {
                    pane,
                    node_id: tab.node_id.clone(),
                };
                let content = tab.content.clone();
                let message = agent_message(&prompt, &content);
                let seq = self.state.assistant.begin_agent(target);
                tracing::debug!(seq, ?pane, "agent requested");
                super::DispatchResult {
                    effects: vec![Effect::RequestCompletion {
                        seq,
                        mode: AssistantMode::Agent,
                        message,
                        context: Some(content),
                        attachments: Vec::new(),
                        temperature: self.state.settings.assistant.temperature,
                    }],
                    state_changed: true,
                }
            }
            Action::AssistantReplied { seq, reply } => {
                let applied = self.state.assistant.finish(seq, reply);
                // The target may have been deleted while the request was out.
                let dropped = applied && self.drop_dangling_targets();
                super::DispatchResult::changed(applied || dropped)
            }
            Action::EditSuggestion(text) => {
                super::DispatchResult::changed(self.state.assistant.edit_suggestion(&text))
            }
            Action::AcceptSuggestion => {
                let Some(suggestion) = self.state.assistant.take_suggestion() else {
                    return super::DispatchResult::unchanged();
                };
                let node_id = suggestion.target.node_id;
                if !self.state.tree.contains(&node_id) {
                    tracing::warn!(node = %node_id, "suggestion target no longer exists");
                    return super::DispatchResult::changed(true);
                }
                self.state.content.set(node_id.clone(), suggestion.content.clone());
                self.state.editor.set_node_content(&node_id, &suggestion.content);
                tracing::debug!(node = %node_id, "suggestion applied");
                super::DispatchResult::changed(true)
            }
            Action::RejectSuggestion => {
                super::DispatchResult::changed(self.state.assistant.take_suggestion().is_some())
            }
            Action::ClearChat => {
                super::DispatchResult::changed(self.state.assistant.clear_messages())
            }
            _ => super::DispatchResult::unchanged(),
        }
    }
}
