//! Routing state for the currently open menu invocation.
//!
//! The only process-wide state the plugin keeps: which invocation, if any, is
//! currently open. It exists solely so a new show-menu request can supersede a
//! still-pending predecessor. Business state (the responded flag and the
//! outcome sink) lives inside each invocation, and menu-event handlers receive
//! their invocation as captured context rather than through a shared global.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::arbiter::Invocation;

#[derive(Default)]
pub struct MenuRegistry {
    active: Mutex<Option<Arc<Invocation>>>,
}

impl MenuRegistry {
    /// Installs `invocation` as the currently open one. The previous
    /// invocation, if any, is superseded outside the lock: still-unresolved
    /// predecessors report their dismissal, already-resolved ones stay silent.
    pub fn begin(&self, invocation: Arc<Invocation>) {
        let previous = match self.active.lock() {
            Ok(mut active) => active.replace(invocation),
            Err(e) => {
                warn!(error = %e, "invocation registry poisoned, previous invocation not superseded");
                return;
            }
        };
        if let Some(previous) = previous {
            previous.supersede();
        }
    }

}
