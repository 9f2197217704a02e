use std::sync::mpsc;
use std::time::{Duration, Instant};

use super::Workbench;

impl Workbench {
    /// Drains finished runtime work into the store without blocking.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        let mut drained = 0usize;
        while drained < super::MAX_MESSAGE_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    changed |= self.dispatch(msg.into());
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Blocks until one runtime message arrives (or `timeout` passes) and
    /// dispatches it. Returns false on timeout.
    pub fn wait_message(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg.into());
                true
            }
            Err(_) => false,
        }
    }

    /// Pumps messages until `done` holds or `timeout` passes.
    pub fn run_until(&mut self, timeout: Duration, mut done: impl FnMut(&Self) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while !done(self) {
            let now = Instant::now();
            if now >= deadline || !self.wait_message(deadline - now) {
                return done(self);
            }
        }
        true
    }
}
