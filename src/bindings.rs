//! Motion Bindings
//!
//! Per-model table mapping semantic events (`category` + `key`) to a
//! motion/expression pair, plus the flat preset format used for
//! import/export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Editable categories and the keys each one offers
pub const BINDING_CATEGORIES: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "mood",
        "心情",
        &[("开心", "开心"), ("愉快", "愉快"), ("平静", "平静"), ("低落", "低落"), ("孤独", "孤独")],
    ),
    (
        "status",
        "状态",
        &[("active", "专注"), ("idle", "空闲"), ("sleep", "睡眠"), ("paused", "暂停")],
    ),
    ("pomodoro", "番茄钟", &[("focus", "专注"), ("break", "休息")]),
    ("ai", "AI", &[("greeting", "问候"), ("reply", "回复")]),
    ("interaction", "互动", &[("click", "点击"), ("petting", "抚摸")]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionBinding {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub motion: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub expression: Option<String>,
}

impl MotionBinding {
    pub fn new(motion: Option<&str>, expression: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            motion: clean(motion),
            expression: clean(expression),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.motion.is_none() && self.expression.is_none()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

pub type BindingTable = BTreeMap<String, BTreeMap<String, MotionBinding>>;

/// Bindings for one model path (matches host)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelBindings {
    #[serde(default)]
    pub model_path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bindings: BindingTable,
    #[serde(default)]
    pub default: MotionBinding,
}

impl ModelBindings {
    /// Exact lookup; unset pairs come back empty
    pub fn lookup(&self, category: &str, key: &str) -> MotionBinding {
        self.bindings
            .get(category)
            .and_then(|items| items.get(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Lookup used for playback: unset pairs use the model default
    pub fn resolve(&self, category: &str, key: &str) -> MotionBinding {
        let binding = self.lookup(category, key);
        if binding.is_empty() {
            self.default.clone()
        } else {
            binding
        }
    }

    /// Local edit; an empty binding removes the entry
    pub fn set(&mut self, category: &str, key: &str, binding: MotionBinding) {
        if category == "default" {
            self.default = binding;
            return;
        }
        if binding.is_empty() {
            if let Some(items) = self.bindings.get_mut(category) {
                items.remove(key);
                if items.is_empty() {
                    self.bindings.remove(category);
                }
            }
            return;
        }
        self.bindings
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), binding);
    }
}

/// Flat preset: keys are `"{category}_{key}"`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bindings: BTreeMap<String, MotionBinding>,
}

impl Preset {
    pub fn from_table(name: &str, table: &BindingTable) -> Self {
        Self {
            name: name.to_string(),
            bindings: flatten(table),
        }
    }

    /// Parse an imported preset file
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let mut preset: Preset = serde_json::from_str(text)?;
        preset.name = preset.name.trim().to_string();
        if preset.name.is_empty() {
            preset.name = "导入预设".to_string();
        }
        Ok(preset)
    }

    pub fn to_table(&self) -> BindingTable {
        expand(&self.bindings)
    }
}

pub fn flatten(table: &BindingTable) -> BTreeMap<String, MotionBinding> {
    table
        .iter()
        .flat_map(|(category, items)| {
            items
                .iter()
                .map(move |(key, binding)| (format!("{}_{}", category, key), binding.clone()))
        })
        .collect()
}

/// Split flat keys at the first `_`; keys without one are dropped
pub fn expand(flat: &BTreeMap<String, MotionBinding>) -> BindingTable {
    let mut table = BindingTable::new();
    for (flat_key, binding) in flat {
        let Some((category, key)) = flat_key.split_once('_') else { continue };
        table
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), binding.clone());
    }
    table
}

/// Category/key a host event maps to, for playback on state changes
pub fn mood_key(label: &str) -> Option<&'static str> {
    BINDING_CATEGORIES
        .iter()
        .find(|(category, _, _)| *category == "mood")
        .and_then(|(_, _, keys)| keys.iter().find(|(key, _)| *key == label))
        .map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModelBindings {
        let mut bindings = ModelBindings {
            model_path: "model/miku/miku.model3.json".into(),
            name: "miku".into(),
            default: MotionBinding::new(Some("Idle"), None),
            ..Default::default()
        };
        bindings.set("status", "active", MotionBinding::new(Some("Tap"), Some("smile")));
        bindings.set("mood", "开心", MotionBinding::new(Some("Flick"), None));
        bindings
    }

    #[test]
    fn test_unset_lookup_is_empty() {
        let bindings = sample();
        assert_eq!(bindings.lookup("status", "sleep"), MotionBinding::default());
        assert_eq!(bindings.lookup("no-such-category", "x"), MotionBinding::default());
        assert_eq!(ModelBindings::default().lookup("ai", "greeting"), MotionBinding::default());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let bindings = sample();
        assert_eq!(bindings.resolve("status", "sleep").motion.as_deref(), Some("Idle"));
        assert_eq!(bindings.resolve("status", "active").expression.as_deref(), Some("smile"));
    }

    #[test]
    fn test_clearing_binding_removes_entry() {
        let mut bindings = sample();
        bindings.set("mood", "开心", MotionBinding::new(Some("  "), None));
        assert!(!bindings.bindings.contains_key("mood"));
    }

    #[test]
    fn test_preset_flat_keys_split_at_first_underscore() {
        let preset = Preset::parse(
            r#"{"name":"","bindings":{"ai_greeting":{"motion":"Tap","expression":""},"status_idle_long":{"motion":"Idle"},"broken":{"motion":"X"}}}"#,
        )
        .unwrap();
        assert_eq!(preset.name, "导入预设");
        let table = preset.to_table();
        assert_eq!(table["ai"]["greeting"], MotionBinding::new(Some("Tap"), None));
        assert_eq!(table["status"]["idle_long"].motion.as_deref(), Some("Idle"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_export_flattens_table() {
        let preset = Preset::from_table("daily", &sample().bindings);
        assert!(preset.bindings.contains_key("status_active"));
        assert!(preset.bindings.contains_key("mood_开心"));
        assert_eq!(expand(&preset.bindings), sample().bindings);
    }

    #[test]
    fn test_bad_preset_json_is_error() {
        assert!(Preset::parse("{not json").is_err());
    }

    #[test]
    fn test_mood_key() {
        assert_eq!(mood_key("平静"), Some("平静"));
        assert_eq!(mood_key("unknown"), None);
    }
}
