use std::sync::Arc;

use super::Workbench;
use crate::kernel::{Action as KernelAction, Effect as KernelEffect};

impl Workbench {
    /// Reduces `action` and starts whatever work it asked for. Returns whether
    /// state changed.
    pub fn dispatch(&mut self, action: KernelAction) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.state_changed
    }

    fn run_effect(&mut self, effect: KernelEffect) {
        match effect {
            KernelEffect::ExecuteQuery { seq, text } => {
                self.runtime
                    .execute_query(seq, text, Arc::clone(&self.query_engine));
            }
            KernelEffect::ScheduleStatusReset { seq, after } => {
                self.runtime.schedule_status_reset(seq, after);
            }
            KernelEffect::RequestCompletion {
                seq,
                mode,
                message,
                context,
                attachments,
                temperature,
            } => {
                self.runtime.request_completion(
                    seq,
                    mode,
                    message,
                    context,
                    attachments,
                    temperature,
                    Arc::clone(&self.completion),
                );
            }
        }
    }
}
