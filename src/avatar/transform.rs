//! Avatar placement: anchor fractions, pixel offsets and scale.

use serde::Serialize;
use serde_json::json;

use crate::settings::{delta, Settings, SettingsMap};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 2.0;
/// Wheel delta that changes the scale by 1.0
const WHEEL_DIVISOR: f64 = 800.0;

/// Payload of `set_model_config`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub scale: f64,
    /// Anchor as a fraction of the renderer width
    pub x: f64,
    /// Anchor as a fraction of the renderer height
    pub y: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ModelTransform {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            scale: settings.f64("model_scale"),
            x: settings.f64("model_x"),
            y: settings.f64("model_y"),
            x_offset: settings.f64("model_x_offset"),
            y_offset: settings.f64("model_y_offset"),
        }
    }

    pub fn clamped_scale(&self) -> f64 {
        self.scale.clamp(MIN_SCALE, MAX_SCALE)
    }

    /// Apply a wheel event; scrolling up zooms in
    pub fn zoom(&mut self, wheel_delta_y: f64) {
        self.scale = (self.scale - wheel_delta_y / WHEEL_DIVISOR).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x_offset += dx;
        self.y_offset += dy;
    }

    /// Model position in renderer pixels
    pub fn position_in(&self, width: f64, height: f64) -> (f64, f64) {
        (width * self.x + self.x_offset, height * self.y + self.y_offset)
    }

    pub fn to_config(&self) -> ModelConfig {
        ModelConfig {
            scale: self.scale,
            x: self.x,
            y: self.y,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
        }
    }

    /// Same values as a settings delta, for the local cache
    pub fn to_settings_delta(&self) -> SettingsMap {
        delta(json!({
            "model_scale": self.scale,
            "model_x": self.x,
            "model_y": self.y,
            "model_x_offset": self.x_offset,
            "model_y_offset": self.y_offset,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_settings() {
        let transform = ModelTransform::default();
        assert_eq!(transform.scale, 0.35);
        assert_eq!(transform.position_in(1000.0, 1000.0), (600.0, 650.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut transform = ModelTransform::default();
        transform.zoom(-80.0);
        assert!((transform.scale - 0.45).abs() < 1e-9);
        transform.zoom(100_000.0);
        assert_eq!(transform.scale, MIN_SCALE);
        transform.zoom(-100_000.0);
        assert_eq!(transform.scale, MAX_SCALE);
    }

    #[test]
    fn test_pan_moves_offsets() {
        let mut transform = ModelTransform::default();
        transform.pan(12.0, -4.0);
        transform.pan(3.0, 1.0);
        assert_eq!((transform.x_offset, transform.y_offset), (15.0, -3.0));
        let delta = transform.to_settings_delta();
        assert_eq!(delta["model_x_offset"], json!(15.0));
    }

    #[test]
    fn test_config_uses_camel_case() {
        let value = serde_json::to_value(ModelTransform::default().to_config()).unwrap();
        assert!(value.get("xOffset").is_some());
        assert!(value.get("x_offset").is_none());
    }
}
