//! Owned copy of a status line appearance record.

use crate::LineAppearanceState;
use serde::{Deserialize, Serialize};

/// A status line appearance, detached from native memory.
///
/// Text fields are `None` where the native record holds a null pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineAppearance {
    /// Line label (e.g. the extension "101").
    pub line: Option<String>,
    pub state: LineAppearanceState,
    /// Appearance code assigned by the remote server; negative if undefined.
    pub appearance: i32,
    pub call_id: Option<String>,
    pub party_a: Option<String>,
    pub party_b: Option<String>,
}

impl LineAppearance {
    /// Appearance code marking "undefined".
    pub const UNDEFINED_APPEARANCE: i32 = -1;

    /// Creates an idle appearance for a line with no appearance code.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: Some(line.into()),
            appearance: Self::UNDEFINED_APPEARANCE,
            ..Self::default()
        }
    }

    /// Returns the appearance code if it is defined.
    pub fn appearance_index(&self) -> Option<u32> {
        u32::try_from(self.appearance).ok()
    }
}
