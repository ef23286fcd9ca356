//! Plugin error type.

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Tauri(#[from] tauri::Error),
    #[error("menu has no entries")]
    EmptyMenu,
    #[error("duplicate menu entry id {0}")]
    DuplicateLeafId(i32),
}

// Commands hand errors to the frontend as their display string.
impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
