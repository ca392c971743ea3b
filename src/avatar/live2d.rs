//! Live2D Runtime Bindings
//!
//! Thin handles over `PIXI.Application` and `PIXI.live2d.Live2DModel`.
//! Every call goes through `Reflect` so a missing runtime or method is an
//! `Err`/`false`, never a trap.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlCanvasElement;

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    path.iter().try_fold(root.clone(), |value, key| get(&value, key))
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let func = get(target, method)
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("{} is not a function", method)))?;
    let array: Array = args.iter().collect();
    func.apply(target, &array)
}

fn global() -> JsValue {
    js_sys::global().into()
}

fn live2d_model_class() -> Option<JsValue> {
    get_path(&global(), &["PIXI", "live2d", "Live2DModel"])
}

/// True when both PIXI and the Live2D plugin are on the page
pub fn runtime_available() -> bool {
    live2d_model_class().is_some()
}

/// True when the Cubism core script is loaded
pub fn cubism_core_available() -> bool {
    get(&global(), "Live2DCubismCore").is_some()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, point: (f64, f64)) -> bool {
        point.0 >= self.x
            && point.0 <= self.x + self.width
            && point.1 >= self.y
            && point.1 <= self.y + self.height
    }
}

/// PIXI application bound to the Live2D canvas
pub struct Live2dStage {
    app: JsValue,
}

impl Live2dStage {
    pub fn create(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctor = get_path(&global(), &["PIXI", "Application"])
            .and_then(|c| c.dyn_into::<Function>().ok())
            .ok_or_else(|| JsValue::from_str("PIXI.Application missing"))?;
        let options = Object::new();
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        Reflect::set(&options, &"view".into(), canvas)?;
        Reflect::set(&options, &"backgroundAlpha".into(), &JsValue::from_f64(0.0))?;
        Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        Reflect::set(&options, &"autoStart".into(), &JsValue::TRUE)?;
        Reflect::set(&options, &"resolution".into(), &JsValue::from_f64(dpr))?;
        let app = Reflect::construct(&ctor, &Array::of1(&options))?;
        Ok(Self { app })
    }

    pub fn renderer_size(&self) -> (f64, f64) {
        let renderer = get(&self.app, "renderer").unwrap_or(JsValue::UNDEFINED);
        let width = get(&renderer, "width").and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = get(&renderer, "height").and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width, height)
    }

    pub fn resize(&self, width: f64, height: f64) {
        if let Some(renderer) = get(&self.app, "renderer") {
            let _ = call(&renderer, "resize", &[width.into(), height.into()]);
        }
    }

    pub fn add(&self, model: &Live2dModel) {
        if let Some(stage) = get(&self.app, "stage") {
            let _ = call(&stage, "addChild", &[model.obj.clone()]);
        }
    }

    pub fn set_speed(&self, speed: f64) {
        if let Some(ticker) = get(&self.app, "ticker") {
            let _ = Reflect::set(&ticker, &"speed".into(), &JsValue::from_f64(speed));
        }
    }
}

/// A loaded Live2D model. Dropping it destroys the PIXI object, which
/// also detaches it from the stage.
pub struct Live2dModel {
    obj: JsValue,
}

impl Live2dModel {
    pub async fn load(url: &str) -> Result<Self, JsValue> {
        let class = live2d_model_class().ok_or_else(|| JsValue::from_str("Live2DModel missing"))?;
        let promise: Promise = call(&class, "from", &[JsValue::from_str(url)])?.dyn_into()?;
        let obj = JsFuture::from(promise).await?;
        let model = Self { obj };
        if let Some(anchor) = get(&model.obj, "anchor") {
            let _ = call(&anchor, "set", &[0.5.into(), 0.5.into()]);
        }
        Ok(model)
    }

    pub fn set_position(&self, x: f64, y: f64) {
        if let Some(position) = get(&self.obj, "position") {
            let _ = call(&position, "set", &[x.into(), y.into()]);
        }
    }

    pub fn set_scale(&self, scale: f64) {
        if let Some(s) = get(&self.obj, "scale") {
            let _ = call(&s, "set", &[scale.into()]);
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let b = call(&self.obj, "getBounds", &[]).ok()?;
        Some(Bounds {
            x: get(&b, "x")?.as_f64()?,
            y: get(&b, "y")?.as_f64()?,
            width: get(&b, "width")?.as_f64()?,
            height: get(&b, "height")?.as_f64()?,
        })
    }

    /// Start a motion group; false when the model cannot play motions
    pub fn motion(&self, group: &str) -> bool {
        if call(&self.obj, "motion", &[group.into()]).is_ok() {
            return true;
        }
        get_path(&self.obj, &["internalModel", "motionManager"])
            .map(|manager| call(&manager, "startMotion", &[group.into()]).is_ok())
            .unwrap_or(false)
    }

    pub fn expression(&self, name: &str) -> bool {
        call(&self.obj, "expression", &[name.into()]).is_ok()
    }
}

impl Drop for Live2dModel {
    fn drop(&mut self) {
        let _ = call(&self.obj, "destroy", &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds { x: 10.0, y: 20.0, width: 100.0, height: 50.0 };
        assert!(bounds.contains((10.0, 20.0)));
        assert!(bounds.contains((110.0, 70.0)));
        assert!(!bounds.contains((111.0, 40.0)));
        assert!(!bounds.contains((50.0, 19.0)));
    }
}
