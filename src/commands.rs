//! The show-menu invoke surface and outcome events.
//!
//! `show_menu` acknowledges immediately — the menu may stay open indefinitely
//! awaiting user input — and the terminal result arrives later as exactly one
//! of [`ITEM_SELECTED_EVENT`] (payload: the selected leaf id) or
//! [`MENU_DISMISSED_EVENT`] (no payload).

use std::collections::HashSet;
use std::sync::Arc;

use tauri::{AppHandle, Emitter, Manager, Runtime, Window};
use tracing::{debug, warn};

use crate::arbiter::{Invocation, MenuOutcome, OutcomeSink};
use crate::error::Error;
use crate::menu;
use crate::models::{MenuEntry, ShowMenuRequest};
use crate::ContextMenuState;

/// Emitted with the selected leaf id when the user picks an entry.
pub const ITEM_SELECTED_EVENT: &str = "native-context-menu://item-selected";
/// Emitted with no payload when the menu goes away without a selection.
pub const MENU_DISMISSED_EVENT: &str = "native-context-menu://menu-dismissed";

/// Builds the sink that forwards an invocation's terminal outcome to the host
/// as an app-wide event.
fn event_sink<R: Runtime>(app: AppHandle<R>) -> OutcomeSink {
    Box::new(move |outcome| {
        let emitted = match outcome {
            MenuOutcome::Selected(id) => app.emit(ITEM_SELECTED_EVENT, id),
            MenuOutcome::Dismissed => app.emit(MENU_DISMISSED_EVENT, ()),
        };
        if let Err(e) = emitted {
            warn!(error = %e, ?outcome, "failed to emit menu outcome");
        }
    })
}

/// Shows a native popup context menu on `window`. Rust-side entry point for
/// the `show_menu` command.
///
/// Returns as soon as the popup has been scheduled; the terminal outcome is
/// delivered through the outcome events. A request that arrives while an
/// earlier menu is still unresolved supersedes it (the earlier menu is
/// already closed or about to close, and reports dismissal).
pub fn show_menu_impl<R: Runtime>(
    app: &AppHandle<R>,
    window: Window<R>,
    request: ShowMenuRequest,
) -> Result<(), Error> {
    request.validate()?;

    let state = app.state::<ContextMenuState>();
    let invocation = Invocation::new(state.grace_period, event_sink(app.clone()));
    state.registry.begin(Arc::clone(&invocation));

    // Route activations into this invocation's arbiter. The handler captures
    // the invocation it belongs to together with its own leaf-id set, so
    // events for foreign menus (tray menus, handlers left over from earlier
    // invocations whose flag is already set) fall through harmlessly.
    let leaf_ids: HashSet<i32> = request.leaf_ids();
    let handler_invocation = Arc::clone(&invocation);
    window.on_menu_event(move |_window, event| {
        if let Ok(id) = event.id().0.parse::<i32>() {
            if leaf_ids.contains(&id) {
                handler_invocation.item_activated(id);
            }
        }
    });

    // From here on the invocation is registered, so every exit has to leave
    // it with its terminal notification: the menu never opening counts as an
    // immediate dismissal.
    let menu = match menu::build_menu(app, &request.items) {
        Ok(menu) => menu,
        Err(e) => {
            warn!(error = %e, "failed to build context menu");
            invocation.dismiss_now();
            return Err(e.into());
        }
    };
    let position = request.popup_position();
    debug!(entries = request.items.len(), ?position, "showing context menu");

    // The popup must run on the main thread, and returns once the native menu
    // has gone away — that return is the "menu closed" signal. The matching
    // activation may still be dispatched afterwards, which is the ordering
    // ambiguity the arbiter's grace period absorbs.
    let popup_window = window.clone();
    let popup_invocation = Arc::clone(&invocation);
    let scheduled = window.run_on_main_thread(move || {
        let shown = match position {
            Some(position) => popup_window.popup_menu_at(&menu, position),
            None => popup_window.popup_menu(&menu),
        };
        match shown {
            Ok(()) => popup_invocation.menu_closed(),
            Err(e) => {
                warn!(error = %e, "failed to show context menu");
                // The menu never opened; there is no activation to wait for.
                popup_invocation.dismiss_now();
            }
        }
    });
    if let Err(e) = scheduled {
        warn!(error = %e, "failed to reach the main thread for the popup");
        invocation.dismiss_now();
        return Err(e.into());
    }

    Ok(())
}

#[tauri::command]
pub async fn show_menu<R: Runtime>(
    app: AppHandle<R>,
    window: Window<R>,
    items: Vec<MenuEntry>,
    position: Option<[f64; 2]>,
    device_pixel_ratio: Option<f64>,
) -> Result<(), Error> {
    show_menu_impl(
        &app,
        window,
        ShowMenuRequest {
            items,
            position,
            device_pixel_ratio,
        },
    )
}
