use std::time::Duration;

use crate::kernel::query::QueryStart;
use crate::kernel::{Action, Effect};

impl super::Store {
    pub(super) fn reduce_query(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::RunQuery { pane } => {
                let text = self
                    .state
                    .editor
                    .pane(pane)
                    .and_then(|p| p.active_tab())
                    .map(|tab| tab.content.clone())
                    .unwrap_or_default();

                match self.state.query.start(&text) {
                    QueryStart::Execute { seq } => {
                        tracing::debug!(seq, ?pane, "query dispatched");
                        super::DispatchResult {
                            effects: vec![Effect::ExecuteQuery { seq, text }],
                            state_changed: true,
                        }
                    }
                    QueryStart::Rejected { seq } => super::DispatchResult {
                        effects: vec![self.status_reset(seq)],
                        state_changed: true,
                    },
                }
            }
            Action::QueryFinished { seq, execution } => {
                if !self.state.query.finish(seq, execution) {
                    return super::DispatchResult::unchanged();
                }
                super::DispatchResult {
                    effects: vec![self.status_reset(seq)],
                    state_changed: true,
                }
            }
            Action::QueryStatusExpired { seq } => {
                super::DispatchResult::changed(self.state.query.expire_status(seq))
            }
            Action::ClearQueryResults => {
                super::DispatchResult::changed(self.state.query.clear_results())
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn status_reset(&self, seq: u64) -> Effect {
        Effect::ScheduleStatusReset {
            seq,
            after: Duration::from_millis(self.state.settings.query.status_reset_ms),
        }
    }
}
