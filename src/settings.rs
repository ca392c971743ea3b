//! Settings Snapshot
//!
//! Flat option map mirrored from the host. Local edits are merged on top
//! of the last host snapshot; readers coerce values and fall back to the
//! built-in defaults.

use std::sync::LazyLock;

use serde_json::{json, Map, Value};

pub type SettingsMap = Map<String, Value>;

pub const DEFAULT_AI_PROVIDER: &str = "OpenAI兼容";
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

static DEFAULTS: LazyLock<SettingsMap> = LazyLock::new(|| {
    let value = json!({
        "focus_active_ms": 60000,
        "focus_sleep_ms": 120000,
        "window_opacity": 100,
        "model_scale": 0.35,
        "model_x": 0.6,
        "model_y": 0.65,
        "model_x_offset": 0.0,
        "model_y_offset": 0.0,
        "model_path": "model/miku/miku.model3.json",
        "ui_scale": 1.0,
        "animation_speed": 1.0,
        "pomodoro_focus_min": 25,
        "pomodoro_break_min": 5,
        "rest_enabled": true,
        "rest_interval_min": 90,
        "water_enabled": true,
        "water_interval_min": 60,
        "eye_enabled": true,
        "eye_interval_min": 45,
        "ai_provider": DEFAULT_AI_PROVIDER,
        "ai_base_url": DEFAULT_AI_BASE_URL,
        "ai_model": DEFAULT_AI_MODEL,
        "ai_api_key": "",
        "passive_enabled": true,
        "passive_interval_min": 30,
        "passive_random_enabled": true,
        "passive_blessing_enabled": true,
        "passive_focus_enabled": true,
        "passive_focus_interval_min": 60,
        "local_city": "",
        "local_location": "",
        "favor": 50,
        "chat_hotkey": "Ctrl+H",
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
});

/// Cached settings snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Settings(SettingsMap);

impl Default for Settings {
    fn default() -> Self {
        Self(DEFAULTS.clone())
    }
}

impl Settings {
    pub fn from_map(map: SettingsMap) -> Self {
        let mut settings = Self::default();
        settings.merge(&map);
        settings
    }

    /// Overwrite the delta's keys; every other key is kept
    pub fn merge(&mut self, delta: &SettingsMap) {
        for (key, value) in delta {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Merge a JSON value; anything but an object is ignored
    pub fn merge_value(&mut self, delta: &Value) {
        if let Value::Object(map) = delta {
            self.merge(map);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &SettingsMap {
        &self.0
    }

    pub fn f64(&self, key: &str) -> f64 {
        self.0
            .get(key)
            .and_then(coerce_f64)
            .or_else(|| DEFAULTS.get(key).and_then(coerce_f64))
            .unwrap_or(0.0)
    }

    pub fn bool(&self, key: &str) -> bool {
        self.0
            .get(key)
            .and_then(coerce_bool)
            .or_else(|| DEFAULTS.get(key).and_then(coerce_bool))
            .unwrap_or(false)
    }

    /// String value; an empty string falls back to the default
    pub fn string(&self, key: &str) -> String {
        self.0
            .get(key)
            .and_then(coerce_string)
            .filter(|s| !s.is_empty())
            .or_else(|| DEFAULTS.get(key).and_then(coerce_string))
            .unwrap_or_default()
    }

    pub fn favor(&self) -> i64 {
        self.f64("favor").round() as i64
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a form field as a number, using `fallback` for blank or bad input
pub fn parse_number(input: &str, fallback: f64) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(fallback)
}

/// Build a delta map from `json!` object syntax
pub fn delta(value: Value) -> SettingsMap {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unrelated_keys() {
        let mut settings = Settings::from_map(delta(json!({
            "ai_model": "qwen",
            "custom_flag": true,
            "window_opacity": 80,
        })));
        let before = settings.clone();

        let update = delta(json!({ "window_opacity": 55, "ui_scale": 1.25 }));
        settings.merge(&update);

        for (key, value) in before.as_map() {
            if update.contains_key(key) {
                continue;
            }
            assert_eq!(settings.get(key), Some(value), "lost key {}", key);
        }
        for (key, value) in &update {
            assert_eq!(settings.get(key), Some(value));
        }
        assert_eq!(settings.string("ai_model"), "qwen");
        assert!(settings.bool("custom_flag"));
    }

    #[test]
    fn test_non_object_delta_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_value(&json!([1, 2, 3]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_numeric_coercion_falls_back_to_default() {
        let settings = Settings::from_map(delta(json!({
            "model_scale": "0.5",
            "ui_scale": "huge",
            "window_opacity": null,
        })));
        assert_eq!(settings.f64("model_scale"), 0.5);
        assert_eq!(settings.f64("ui_scale"), 1.0);
        assert_eq!(settings.f64("window_opacity"), 100.0);
        assert_eq!(settings.f64("not_a_setting"), 0.0);
    }

    #[test]
    fn test_empty_string_uses_default() {
        let settings = Settings::from_map(delta(json!({ "ai_base_url": "" })));
        assert_eq!(settings.string("ai_base_url"), DEFAULT_AI_BASE_URL);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 ", 1.0), 42.0);
        assert_eq!(parse_number("", 25.0), 25.0);
        assert_eq!(parse_number("abc", 5.0), 5.0);
    }
}
