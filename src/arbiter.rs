//! Selection arbitration for one open context menu.
//!
//! Native toolkits deliver two unordered signals when a popup menu goes away:
//! "item activated" (at most once, only on a click) and "menu closed" (always,
//! whatever the reason — click, click outside, Escape, focus loss). Neither
//! GTK nor Win32 orders them reliably, so reporting "dismissed" the moment the
//! menu closes can race a click whose activation has not been dispatched yet.
//!
//! Each open menu owns an [`Invocation`] that resolves the race: an activation
//! wins immediately (a click is definitive), while a close only turns into a
//! dismissal after a short grace period with no activation. The `responded`
//! flag is checked-and-set atomically, so the UI thread and the grace timer
//! can never both believe they were first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// How long to wait after "menu closed" for a late "item activated" before
/// reporting dismissal. Empirical: long enough for a near-simultaneous
/// activation to win the race, short enough not to delay legitimate dismissal
/// notifications noticeably. Configurable per host via `gracePeriodMs` in the
/// plugin config.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(100);

/// Terminal outcome of one menu invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The user clicked the leaf entry with this caller-assigned id.
    Selected(i32),
    /// The menu went away without a selection.
    Dismissed,
}

/// Receives the single terminal outcome of an invocation. Called at most once.
pub type OutcomeSink = Box<dyn Fn(MenuOutcome) + Send + Sync + 'static>;

/// Live state for one open menu, from popup to terminal notification.
///
/// Every invocation owns its own flag and sink; nothing is shared with earlier
/// or later invocations, so a stale grace timer can only ever no-op against
/// the invocation it belongs to.
pub struct Invocation {
    responded: AtomicBool,
    grace_period: Duration,
    sink: OutcomeSink,
}

impl Invocation {
    pub fn new(grace_period: Duration, sink: OutcomeSink) -> Arc<Self> {
        Arc::new(Self {
            responded: AtomicBool::new(false),
            grace_period,
            sink,
        })
    }

    /// First resolution wins; everything after is a no-op. Returns whether
    /// this call was the one that delivered the outcome.
    fn resolve(&self, outcome: MenuOutcome) -> bool {
        if self.responded.swap(true, Ordering::AcqRel) {
            return false;
        }
        (self.sink)(outcome);
        true
    }

    /// Whether the terminal outcome has already been delivered.
    pub fn is_resolved(&self) -> bool {
        self.responded.load(Ordering::Acquire)
    }

    /// The user clicked a leaf entry. Resolves immediately; duplicate
    /// activations and activations after the terminal outcome are ignored.
    pub fn item_activated(&self, id: i32) {
        if self.resolve(MenuOutcome::Selected(id)) {
            debug!(id, "menu item selected");
        } else {
            debug!(id, "activation after terminal outcome, ignored");
        }
    }

    /// The native menu is no longer visible. The activation for a click may
    /// still be in flight, so the dismissal verdict is deferred: a timer task
    /// on the async runtime sleeps out the grace period and reports
    /// [`MenuOutcome::Dismissed`] only if nothing resolved the invocation in
    /// the meantime. The task holds its own handle on this invocation and is
    /// never joined; once the flag is set it does nothing.
    pub fn menu_closed(self: &Arc<Self>) {
        if self.is_resolved() {
            return;
        }
        let invocation = Arc::clone(self);
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(invocation.grace_period).await;
            if invocation.resolve(MenuOutcome::Dismissed) {
                debug!("menu dismissed without selection");
            }
        });
    }

    /// Resolves as dismissed immediately, without a grace period. Used when
    /// the popup could not be shown at all. Returns whether this call
    /// delivered the outcome.
    pub fn dismiss_now(&self) -> bool {
        self.resolve(MenuOutcome::Dismissed)
    }

    /// A new invocation is replacing this one. If no terminal outcome has
    /// been delivered yet, report dismissal now so this invocation still gets
    /// exactly one notification; a pending grace timer then finds the flag
    /// set and stays silent.
    pub fn supersede(&self) {
        if self.dismiss_now() {
            debug!("unresolved invocation superseded, reported as dismissed");
        }
    }
}
