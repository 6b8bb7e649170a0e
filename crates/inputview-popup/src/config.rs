#![forbid(unsafe_code)]

//! Popup configuration and environment overrides.

use inputview_core::geometry::Point;
use serde::{Deserialize, Serialize};

/// Overrides [`PopupConfig::default_offset`].
pub const ENV_OFFSET: &str = "INPUTVIEW_ACCENT_OFFSET";
/// Overrides [`PopupConfig::max_slots`].
pub const ENV_MAX_SLOTS: &str = "INPUTVIEW_ACCENT_MAX_SLOTS";

/// Settings for one popup session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Cancel tolerance in pixels, used when the host sends none.
    pub default_offset: f64,
    /// Screen position of the top-left key for the built-in layout.
    pub origin: Point,
    /// Largest `columns * rows` the session accepts.
    pub max_slots: usize,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            default_offset: 0.0,
            origin: Point::default(),
            max_slots: 64,
        }
    }
}

impl PopupConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom lookup. Unparseable values are
    /// ignored.
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(offset) = get_env(ENV_OFFSET)
            .and_then(|v| v.trim().parse().ok())
            .filter(|v: &f64| v.is_finite())
        {
            config.default_offset = offset;
        }
        if let Some(max) = get_env(ENV_MAX_SLOTS)
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
        {
            config.max_slots = max;
        }
        config
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_default_offset(mut self, offset: f64) -> Self {
        self.default_offset = offset;
        self
    }

    #[must_use]
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides() {
        let config = PopupConfig::from_env_with(lookup(&[
            (ENV_OFFSET, " 12.5 "),
            (ENV_MAX_SLOTS, "32"),
        ]));
        assert_eq!(config.default_offset, 12.5);
        assert_eq!(config.max_slots, 32);
    }

    #[test]
    fn bad_env_values_ignored() {
        let config = PopupConfig::from_env_with(lookup(&[
            (ENV_OFFSET, "NaN"),
            (ENV_MAX_SLOTS, "0"),
        ]));
        assert_eq!(config, PopupConfig::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: PopupConfig = serde_json::from_str(r#"{"default_offset":8}"#).unwrap();
        assert_eq!(config.default_offset, 8.0);
        assert_eq!(config.max_slots, 64);
        assert_eq!(config.origin, Point::new(0, 0));
    }
}
