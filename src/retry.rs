//! Restart-on-reorder harness shared by every public operation.
//!
//! An attempt that triggered dynamic reordering fails with
//! [`BddError::Reordered`], having released all of its intermediate pins on
//! the way out. The harness clears the manager's `reordered` flag, runs the
//! attempt again, and keeps going until an attempt completes without a
//! reordering. Reorderings are bounded by the manager's reordering budget and
//! each one raises the next threshold, so the loop terminates.
//!
//! After the final attempt, a manager whose error code reports an expired
//! time limit invokes its registered timeout handler.

use log::{debug, warn};

use crate::bdd::Bdd;
use crate::error::{BddError, ErrorCode};

impl Bdd {
    /// Runs `attempt` until it completes without dynamic reordering.
    pub(crate) fn retrying<T>(&self, mut attempt: impl FnMut() -> Result<T, BddError>) -> Result<T, BddError> {
        self.clear_error_code();

        let mut attempts = 0;
        let result = loop {
            attempts += 1;
            self.reordered.set(false);
            let result = attempt();
            if !self.reordered.get() {
                break result;
            }
            debug!("Attempt {} interrupted by reordering, restarting", attempts);
        };

        if self.error_code() == ErrorCode::TimeoutExpired {
            warn!("Operation hit the time limit after {} attempt(s)", attempts);
            self.notify_timeout();
        }

        result
    }

    fn notify_timeout(&self) {
        // Taken out for the duration of the call, so the handler may itself
        // register or unregister handlers.
        let handler = self.timeout_handler.borrow_mut().take();
        if let Some(handler) = handler {
            handler(self);
            let mut slot = self.timeout_handler.borrow_mut();
            if slot.is_none() {
                *slot = Some(handler);
            }
        }
    }
}
