//! Native popup context menus for Tauri 2 applications.
//!
//! The frontend (or Rust host code) sends a menu description — entries,
//! optional nested sub-entries, an optional display position — over the
//! invoke channel; the plugin renders the corresponding native popup menu and
//! reports back which entry was selected, or that the menu was dismissed, as
//! exactly one event per invocation ([`ITEM_SELECTED_EVENT`] /
//! [`MENU_DISMISSED_EVENT`]).
//!
//! Native toolkits do not order "item activated" against "menu closed", so
//! each invocation arbitrates the two signals (see [`arbiter`]): a click wins
//! immediately, and a close only becomes a dismissal after a grace period
//! (default 100 ms, `gracePeriodMs` in the plugin config) with no activation.
//!
//! ```json
//! // tauri.conf.json
//! { "plugins": { "native-context-menu": { "gracePeriodMs": 150 } } }
//! ```

mod arbiter;
mod commands;
mod error;
mod menu;
mod models;
mod registry;

use std::time::Duration;

use serde::Deserialize;
use tauri::plugin::{Builder as PluginBuilder, TauriPlugin};
use tauri::{Manager, Runtime};
use tracing::debug;

pub use arbiter::{Invocation, MenuOutcome, OutcomeSink, DEFAULT_GRACE_PERIOD};
pub use commands::{show_menu_impl, ITEM_SELECTED_EVENT, MENU_DISMISSED_EVENT};
pub use error::Error;
pub use models::{MenuEntry, ShowMenuRequest};
pub use registry::MenuRegistry;

/// Plugin configuration, read from `plugins > native-context-menu` in the
/// host's `tauri.conf.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// How long to wait after "menu closed" for a late "item activated"
    /// before reporting dismissal, in milliseconds. The default suits common
    /// desktops; raise it if clicks are occasionally reported as dismissals
    /// on slow or heavily loaded systems.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

fn default_grace_period_ms() -> u64 {
    DEFAULT_GRACE_PERIOD.as_millis() as u64
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            grace_period_ms: default_grace_period_ms(),
        }
    }
}

/// Plugin-managed state: the invocation registry plus the configured grace
/// period.
pub(crate) struct ContextMenuState {
    pub(crate) registry: MenuRegistry,
    pub(crate) grace_period: Duration,
}

/// Initializes the plugin. Register with
/// `tauri::Builder::plugin(tauri_plugin_native_context_menu::init())`.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<PluginConfig>> {
    PluginBuilder::<R, Option<PluginConfig>>::new("native-context-menu")
        .invoke_handler(tauri::generate_handler![commands::show_menu])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            debug!(
                grace_period_ms = config.grace_period_ms,
                "native context menu plugin initialized"
            );
            app.manage(ContextMenuState {
                registry: MenuRegistry::default(),
                grace_period: Duration::from_millis(config.grace_period_ms),
            });
            Ok(())
        })
        .build()
}
