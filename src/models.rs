//! Wire data model for show-menu requests.
//!
//! Field names match the platform-channel format the plugin has always spoken:
//! each entry has an integer `id`, a `title`, and an `items` list that, when
//! non-empty, turns the entry into a submenu. `position` and
//! `devicePixelRatio` are optional; without a position the menu pops up at the
//! cursor.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tauri::{LogicalPosition, PhysicalPosition, Position};

use crate::error::Error;

/// One menu entry. Entries with a non-empty `items` list render as submenus
/// and are not themselves selectable; only leaves are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Caller-assigned id, unique among the leaves of one request.
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub items: Vec<MenuEntry>,
}

impl MenuEntry {
    /// A leaf entry has no sub-entries and is the only selectable kind.
    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }
}

/// A show-menu request as sent over the invoke channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMenuRequest {
    pub items: Vec<MenuEntry>,
    /// Display position in the window, `[x, y]`. Logical coordinates unless
    /// `device_pixel_ratio` is given.
    #[serde(default)]
    pub position: Option<[f64; 2]>,
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
}

impl ShowMenuRequest {
    /// Rejects requests the native layer cannot render meaningfully: an empty
    /// menu, or duplicate leaf ids (selections route by id, so duplicates
    /// would be ambiguous). Submenu parents are exempt from the id check
    /// since they never report a selection.
    pub fn validate(&self) -> Result<(), Error> {
        if self.items.is_empty() {
            return Err(Error::EmptyMenu);
        }
        let mut seen = HashSet::new();
        let mut stack: Vec<&MenuEntry> = self.items.iter().collect();
        while let Some(entry) = stack.pop() {
            if entry.is_leaf() {
                if !seen.insert(entry.id) {
                    return Err(Error::DuplicateLeafId(entry.id));
                }
            } else {
                stack.extend(entry.items.iter());
            }
        }
        Ok(())
    }

    /// Ids of all selectable (leaf) entries, at any nesting depth.
    pub fn leaf_ids(&self) -> HashSet<i32> {
        let mut ids = HashSet::new();
        let mut stack: Vec<&MenuEntry> = self.items.iter().collect();
        while let Some(entry) = stack.pop() {
            if entry.is_leaf() {
                ids.insert(entry.id);
            } else {
                stack.extend(entry.items.iter());
            }
        }
        ids
    }

    /// Where to pop the menu up. With `devicePixelRatio` the caller's logical
    /// coordinates are scaled to physical pixels; without it they pass
    /// through as logical. `None` means "at the cursor".
    pub fn popup_position(&self) -> Option<Position> {
        let [x, y] = self.position?;
        Some(match self.device_pixel_ratio {
            Some(ratio) => Position::Physical(PhysicalPosition::new(
                (x * ratio).round() as i32,
                (y * ratio).round() as i32,
            )),
            None => Position::Logical(LogicalPosition::new(x, y)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: i32, title: &str) -> MenuEntry {
        MenuEntry {
            id,
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    fn request(items: Vec<MenuEntry>) -> ShowMenuRequest {
        ShowMenuRequest {
            items,
            position: None,
            device_pixel_ratio: None,
        }
    }

    #[test]
    fn deserializes_the_channel_format() {
        let request: ShowMenuRequest = serde_json::from_str(
            r#"{
                "items": [
                    {"id": 1, "title": "Open"},
                    {"id": 2, "title": "Share", "items": [
                        {"id": 3, "title": "Copy Link"},
                        {"id": 4, "title": "Email"}
                    ]}
                ],
                "position": [120.0, 40.0],
                "devicePixelRatio": 2.0
            }"#,
        )
        .expect("request should deserialize");

        assert_eq!(request.items.len(), 2);
        assert!(request.items[0].is_leaf());
        assert!(!request.items[1].is_leaf());
        assert_eq!(request.items[1].items[1].title, "Email");
        assert_eq!(request.position, Some([120.0, 40.0]));
        assert_eq!(request.device_pixel_ratio, Some(2.0));
    }

    #[test]
    fn position_and_ratio_are_optional() {
        let request: ShowMenuRequest =
            serde_json::from_str(r#"{"items": [{"id": 1, "title": "Open"}]}"#)
                .expect("request should deserialize");
        assert_eq!(request.position, None);
        assert_eq!(request.device_pixel_ratio, None);
        assert!(request.popup_position().is_none());
    }

    #[test]
    fn validate_rejects_an_empty_menu() {
        assert!(matches!(request(Vec::new()).validate(), Err(Error::EmptyMenu)));
    }

    #[test]
    fn validate_rejects_duplicate_leaf_ids_across_levels() {
        let request = request(vec![
            leaf(1, "Open"),
            MenuEntry {
                id: 2,
                title: "More".to_string(),
                items: vec![leaf(1, "Open Again")],
            },
        ]);
        assert!(matches!(
            request.validate(),
            Err(Error::DuplicateLeafId(1))
        ));
    }

    #[test]
    fn submenu_parents_may_share_an_id_with_a_leaf() {
        // Parents are not selectable, so their ids never route a selection.
        let request = request(vec![
            leaf(1, "Open"),
            MenuEntry {
                id: 1,
                title: "More".to_string(),
                items: vec![leaf(2, "Nested")],
            },
        ]);
        assert!(request.validate().is_ok());
        assert_eq!(request.leaf_ids(), HashSet::from([1, 2]));
    }

    #[test]
    fn leaf_ids_skip_submenu_parents() {
        let request = request(vec![
            leaf(10, "Open"),
            MenuEntry {
                id: 20,
                title: "Share".to_string(),
                items: vec![
                    leaf(21, "Copy Link"),
                    MenuEntry {
                        id: 22,
                        title: "Send To".to_string(),
                        items: vec![leaf(23, "Email")],
                    },
                ],
            },
        ]);
        assert_eq!(request.leaf_ids(), HashSet::from([10, 21, 23]));
    }

    #[test]
    fn popup_position_scales_by_the_pixel_ratio() {
        let request = ShowMenuRequest {
            items: vec![leaf(1, "Open")],
            position: Some([100.5, 40.25]),
            device_pixel_ratio: Some(2.0),
        };
        match request.popup_position() {
            Some(Position::Physical(p)) => {
                assert_eq!(p.x, 201);
                assert_eq!(p.y, 81);
            }
            other => panic!("expected a physical position, got {other:?}"),
        }
    }

    #[test]
    fn popup_position_without_ratio_stays_logical() {
        let request = ShowMenuRequest {
            items: vec![leaf(1, "Open")],
            position: Some([12.0, 34.0]),
            device_pixel_ratio: None,
        };
        match request.popup_position() {
            Some(Position::Logical(p)) => {
                assert_eq!(p.x, 12.0);
                assert_eq!(p.y, 34.0);
            }
            other => panic!("expected a logical position, got {other:?}"),
        }
    }
}
