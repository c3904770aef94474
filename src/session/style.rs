use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Accent color used when a session starts.
pub const DEFAULT_ACCENT: Rgba8 = Rgba8::opaque(0xff, 0x6b, 0x6b);

/// User-controlled style: the accent color and the caption text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleState {
    /// Frame color, serialized as `#rrggbb` / `#rrggbbaa`.
    pub accent: Rgba8,
    /// Free-form caption; may be empty or contain any Unicode.
    #[serde(default)]
    pub caption: String,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT,
            caption: String::new(),
        }
    }
}

impl StyleState {
    /// The caption with surrounding whitespace removed, or `None` when nothing remains.
    pub fn trimmed_caption(&self) -> Option<&str> {
        let t = self.caption.trim();
        (!t.is_empty()).then_some(t)
    }
}
