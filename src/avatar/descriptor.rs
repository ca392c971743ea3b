//! Live2D model descriptor (`*.model3.json`)

use std::collections::BTreeMap;

use serde::Deserialize;

/// Motion groups used when the descriptor lists none
pub const FALLBACK_MOTION_GROUPS: &[&str] = &["Tap", "Flick", "Flick3", "Idle"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDescriptor {
    #[serde(default)]
    file_references: RawFileReferences,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawFileReferences {
    #[serde(default)]
    motions: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    expressions: Option<Vec<RawExpression>>,
}

#[derive(Debug, Deserialize)]
struct RawExpression {
    #[serde(rename = "Name", default)]
    name: Option<String>,
}

/// Named motion groups and expressions a model offers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelDescriptor {
    pub motion_groups: Vec<String>,
    pub expressions: Vec<String>,
}

impl ModelDescriptor {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDescriptor = serde_json::from_str(text)?;
        let refs = raw.file_references;
        Ok(Self {
            motion_groups: refs.motions.map(|m| m.into_keys().collect()).unwrap_or_default(),
            expressions: refs
                .expressions
                .unwrap_or_default()
                .into_iter()
                .filter_map(|e| e.name.filter(|n| !n.is_empty()))
                .collect(),
        })
    }

    pub fn fallback() -> Self {
        Self {
            motion_groups: FALLBACK_MOTION_GROUPS.iter().map(|s| s.to_string()).collect(),
            expressions: Vec::new(),
        }
    }

    /// Motion groups, or the fallback set when the model lists none
    pub fn groups_or_fallback(&self) -> Vec<String> {
        if self.motion_groups.is_empty() {
            Self::fallback().motion_groups
        } else {
            self.motion_groups.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_motions_and_expressions() {
        let text = r#"{
            "Version": 3,
            "FileReferences": {
                "Moc": "miku.moc3",
                "Motions": { "Idle": [{"File": "idle.motion3.json"}], "Tap": [] },
                "Expressions": [{"Name": "smile", "File": "smile.exp3.json"}, {"File": "nameless.exp3.json"}]
            }
        }"#;
        let descriptor = ModelDescriptor::parse(text).unwrap();
        assert_eq!(descriptor.motion_groups, vec!["Idle", "Tap"]);
        assert_eq!(descriptor.expressions, vec!["smile"]);
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let descriptor = ModelDescriptor::parse(r#"{"Version": 3}"#).unwrap();
        assert!(descriptor.motion_groups.is_empty());
        assert_eq!(descriptor.groups_or_fallback(), vec!["Tap", "Flick", "Flick3", "Idle"]);
    }

    #[test]
    fn test_malformed_descriptor_is_error() {
        assert!(ModelDescriptor::parse("<html>404</html>").is_err());
    }
}
