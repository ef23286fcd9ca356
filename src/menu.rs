//! Native menu construction from wire entries.
//!
//! Builds a `tauri::menu::Menu` for one invocation. Leaves carry their
//! caller-assigned id (decimal string) as the menu-item id so activations can
//! be routed back; entries with children become submenus, recursively, and
//! get no routable id since they are not selectable.

use tauri::menu::{Menu, MenuBuilder, MenuItemBuilder, Submenu, SubmenuBuilder};
use tauri::{AppHandle, Runtime};

use crate::models::MenuEntry;

pub fn build_menu<R: Runtime>(
    app: &AppHandle<R>,
    entries: &[MenuEntry],
) -> tauri::Result<Menu<R>> {
    let mut builder = MenuBuilder::new(app);
    for entry in entries {
        if entry.is_leaf() {
            let item = MenuItemBuilder::with_id(entry.id.to_string(), &entry.title).build(app)?;
            builder = builder.item(&item);
        } else {
            let submenu = build_submenu(app, entry)?;
            builder = builder.item(&submenu);
        }
    }
    builder.build()
}

fn build_submenu<R: Runtime>(
    app: &AppHandle<R>,
    entry: &MenuEntry,
) -> tauri::Result<Submenu<R>> {
    let mut builder = SubmenuBuilder::new(app, &entry.title);
    for child in &entry.items {
        if child.is_leaf() {
            let item = MenuItemBuilder::with_id(child.id.to_string(), &child.title).build(app)?;
            builder = builder.item(&item);
        } else {
            let nested = build_submenu(app, child)?;
            builder = builder.item(&nested);
        }
    }
    builder.build()
}
