//! Model and Binding Commands
//!
//! Model placement, the per-model binding table and binding presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{call, query, send, BridgeError};
use crate::avatar::ModelConfig;
use crate::bindings::{ModelBindings, MotionBinding, Preset};

// ========================
// Types
// ========================

/// A model descriptor the host found under the web root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub path: String,
    #[serde(default)]
    pub name: String,
}

impl ModelEntry {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.path
        } else {
            &self.name
        }
    }
}

/// Stored presets keyed by id
pub type PresetMap = BTreeMap<String, Preset>;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct ConfigArgs<'a> {
    config: &'a ModelConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelPathArgs<'a> {
    model_path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetBindingArgs<'a> {
    model_path: &'a str,
    category: &'a str,
    key: &'a str,
    motion: Option<&'a str>,
    expression: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetNameArgs<'a> {
    model_path: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct ImportArgs<'a> {
    preset: &'a Preset,
}

// ========================
// Commands
// ========================

pub async fn set_model_config(config: &ModelConfig) -> Result<(), BridgeError> {
    send("set_model_config", &ConfigArgs { config }).await
}

pub async fn get_available_models() -> Result<Vec<ModelEntry>, BridgeError> {
    let models: Option<Vec<ModelEntry>> = query("get_available_models").await?;
    Ok(models.unwrap_or_default())
}

pub async fn get_model_bindings(model_path: &str) -> Result<ModelBindings, BridgeError> {
    let mut bindings: ModelBindings = call("get_model_bindings", &ModelPathArgs { model_path }).await?;
    if bindings.model_path.is_empty() {
        bindings.model_path = model_path.to_string();
    }
    Ok(bindings)
}

pub async fn set_binding(model_path: &str, category: &str, key: &str, binding: &MotionBinding) -> Result<(), BridgeError> {
    let args = SetBindingArgs {
        model_path,
        category,
        key,
        motion: binding.motion.as_deref(),
        expression: binding.expression.as_deref(),
    };
    send("set_binding", &args).await
}

pub async fn get_available_presets() -> Result<PresetMap, BridgeError> {
    let presets: Option<PresetMap> = query("get_available_presets").await?;
    Ok(presets.unwrap_or_default())
}

/// Store the model's current bindings as a named preset
pub async fn save_preset(model_path: &str, name: &str) -> Result<(), BridgeError> {
    send("save_preset", &PresetNameArgs { model_path, name }).await
}

pub async fn apply_preset(model_path: &str, name: &str) -> Result<(), BridgeError> {
    send("apply_preset", &PresetNameArgs { model_path, name }).await
}

pub async fn export_preset(model_path: &str) -> Result<Preset, BridgeError> {
    let value: Value = call("export_preset", &ModelPathArgs { model_path }).await?;
    serde_json::from_value(value).map_err(|e| BridgeError::Serde(e.to_string()))
}

pub async fn import_preset(preset: &Preset) -> Result<(), BridgeError> {
    send("import_preset", &ImportArgs { preset }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_binding_args_shape() {
        let binding = MotionBinding::new(Some("Tap"), None);
        let args = SetBindingArgs {
            model_path: "model/miku/miku.model3.json",
            category: "mood",
            key: "开心",
            motion: binding.motion.as_deref(),
            expression: binding.expression.as_deref(),
        };
        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(value["modelPath"], "model/miku/miku.model3.json");
        assert_eq!(value["motion"], "Tap");
        assert!(value["expression"].is_null());
    }

    #[test]
    fn test_model_entry_display_name() {
        let entry = ModelEntry { path: "model/a/a.model3.json".into(), name: String::new() };
        assert_eq!(entry.display_name(), "model/a/a.model3.json");
        let named = ModelEntry { name: "Miku".into(), ..entry };
        assert_eq!(named.display_name(), "Miku");
    }
}
