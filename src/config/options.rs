//! Mirror options
//!
//! The only configuration a mirror has: which axes are mirrored. Options are
//! serde-enabled so they can be persisted alongside other user preferences.

use crate::mirror::Axis;
use serde::{Deserialize, Serialize};

/// Which scroll axes a mirror keeps in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorOptions {
    /// Mirror vertical scrolling (default: true)
    pub vertical: bool,
    /// Mirror horizontal scrolling (default: true)
    pub horizontal: bool,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            vertical: true,
            horizontal: true,
        }
    }
}

impl MirrorOptions {
    /// Mirror only vertical scrolling.
    pub fn vertical_only() -> Self {
        Self {
            vertical: true,
            horizontal: false,
        }
    }

    /// Mirror only horizontal scrolling.
    pub fn horizontal_only() -> Self {
        Self {
            vertical: false,
            horizontal: true,
        }
    }

    /// Whether `axis` is mirrored.
    pub fn mirrors(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_mirror_both_axes() {
        let options = MirrorOptions::default();
        assert!(options.mirrors(Axis::Vertical));
        assert!(options.mirrors(Axis::Horizontal));
    }

    #[test]
    fn test_single_axis_constructors() {
        let options = MirrorOptions::vertical_only();
        assert!(options.mirrors(Axis::Vertical));
        assert!(!options.mirrors(Axis::Horizontal));

        let options = MirrorOptions::horizontal_only();
        assert!(!options.mirrors(Axis::Vertical));
        assert!(options.mirrors(Axis::Horizontal));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = MirrorOptions::from_json(r#"{"horizontal": false}"#).unwrap();
        assert!(options.vertical);
        assert!(!options.horizontal);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let options = MirrorOptions::from_json(r#"{"vertical": false, "smooth": true}"#).unwrap();
        assert!(!options.vertical);
        assert!(options.horizontal);
    }

    #[test]
    fn test_wrong_types_rejected() {
        assert!(MirrorOptions::from_json(r#"{"vertical": "yes"}"#).is_err());
    }
}
