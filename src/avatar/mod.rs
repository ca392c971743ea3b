//! Avatar Renderer
//!
//! Owns the two avatar canvases: the Live2D stage and the placeholder.
//! Model loads are sequenced so a slow, older load can never replace a
//! newer one.

mod descriptor;
mod live2d;
mod loader;
mod placeholder;
mod transform;

pub use descriptor::ModelDescriptor;
pub use loader::{LoadSequence, LoadTicket, ModelSlot};
pub use placeholder::{status_color, Geometry};
pub use transform::{ModelConfig, ModelTransform};

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlCanvasElement;

use crate::bindings::MotionBinding;
use crate::dom::now_ms;
use live2d::{Live2dModel, Live2dStage};
use loader::settle;
use placeholder::Placeholder;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AvatarError {
    #[error("未检测到 Live2D SDK，仍使用占位模型")]
    RuntimeMissing,
    #[error("模型地址无效：{0}")]
    BadUrl(String),
    #[error("模型加载失败：{0}")]
    Load(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Attached,
    /// A newer load started before this one finished
    Superseded,
}

/// Motion cue for keywords in a passive message
pub fn motion_for_message(text: &str) -> Option<&'static str> {
    const RULES: &[(&str, &str)] = &[("加油", "Tap"), ("困", "Idle"), ("专心", "Flick"), ("查找资料", "Tap")];
    RULES
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, motion)| *motion)
}

fn js_error(err: wasm_bindgen::JsValue) -> String {
    err.as_string()
        .or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| "unknown error".to_string())
}

fn resolve_url(path: &str) -> Result<String, AvatarError> {
    let base = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .ok_or_else(|| AvatarError::BadUrl(path.to_string()))?;
    web_sys::Url::new_with_base(path, &base)
        .map(|url| url.href())
        .map_err(|_| AvatarError::BadUrl(path.to_string()))
}

async fn fetch_descriptor(url: &str) -> Result<ModelDescriptor, String> {
    let window = web_sys::window().ok_or("no window")?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();
    ModelDescriptor::parse(&text).map_err(|e| e.to_string())
}

#[derive(Default)]
struct AvatarInner {
    placeholder: Option<Rc<Placeholder>>,
    live2d_canvas: Option<HtmlCanvasElement>,
    stage: Option<Live2dStage>,
    slot: ModelSlot<Live2dModel>,
    transform: ModelTransform,
    descriptor: ModelDescriptor,
    speed: f64,
}

impl AvatarInner {
    fn position_model(&self) {
        let (Some(stage), Some(model)) = (self.stage.as_ref(), self.slot.get()) else { return };
        let (width, height) = stage.renderer_size();
        let (x, y) = self.transform.position_in(width, height);
        model.set_position(x, y);
        model.set_scale(self.transform.clamped_scale());
    }
}

/// Shared avatar handle; cheap to clone
#[derive(Clone, Default)]
pub struct Avatar {
    inner: Rc<RefCell<AvatarInner>>,
    sequence: LoadSequence,
}

impl Avatar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the canvases and start the placeholder
    pub fn mount(&self, placeholder_canvas: HtmlCanvasElement, live2d_canvas: HtmlCanvasElement) {
        let mut inner = self.inner.borrow_mut();
        inner.live2d_canvas = Some(live2d_canvas);
        match Placeholder::new(placeholder_canvas) {
            Some(placeholder) => {
                placeholder.set_speed(if inner.speed > 0.0 { inner.speed } else { 1.0 });
                placeholder.start();
                inner.placeholder = Some(placeholder);
            }
            None => log::warn!("placeholder canvas has no 2d context"),
        }
    }

    pub fn is_live2d(&self) -> bool {
        self.inner.borrow().slot.is_attached()
    }

    /// Load a model descriptor path (relative to the page)
    pub async fn load_model(&self, path: &str) -> Result<LoadOutcome, AvatarError> {
        let ticket = self.sequence.begin();
        let url = resolve_url(path)?;

        let fetched = settle(&self.sequence, ticket, async {
            fetch_descriptor(&url).await.unwrap_or_else(|err| {
                log::warn!("load motion groups failed for {}: {}", url, err);
                ModelDescriptor::default()
            })
        })
        .await;
        let Some(descriptor) = fetched else {
            return Ok(LoadOutcome::Superseded);
        };

        if !live2d::runtime_available() {
            return Err(AvatarError::RuntimeMissing);
        }
        if !live2d::cubism_core_available() {
            log::warn!("Live2D Cubism core not loaded");
        }
        self.ensure_stage()?;

        let model = Live2dModel::load(&url)
            .await
            .map_err(|e| AvatarError::Load(js_error(e)))?;

        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if !inner.slot.attach(&self.sequence, ticket, model) {
            return Ok(LoadOutcome::Superseded);
        }
        if let (Some(stage), Some(model)) = (inner.stage.as_ref(), inner.slot.get()) {
            stage.add(model);
            stage.set_speed(if inner.speed > 0.0 { inner.speed } else { 1.0 });
        }
        inner.descriptor = descriptor;
        inner.position_model();
        if let Some(placeholder) = inner.placeholder.as_ref() {
            placeholder.stop();
        }
        Ok(LoadOutcome::Attached)
    }

    fn ensure_stage(&self) -> Result<(), AvatarError> {
        let mut inner = self.inner.borrow_mut();
        if inner.stage.is_some() {
            return Ok(());
        }
        let canvas = inner
            .live2d_canvas
            .clone()
            .ok_or_else(|| AvatarError::Load("canvas not mounted".to_string()))?;
        let stage = Live2dStage::create(&canvas).map_err(|e| AvatarError::Load(js_error(e)))?;
        let rect = canvas.get_bounding_client_rect();
        stage.resize(rect.width(), rect.height());
        inner.stage = Some(stage);
        Ok(())
    }

    /// Drop the Live2D model and go back to the placeholder
    pub fn unload(&self) {
        self.sequence.begin();
        let mut inner = self.inner.borrow_mut();
        inner.slot.clear();
        if let Some(placeholder) = inner.placeholder.as_ref() {
            placeholder.start();
        }
    }

    pub fn resize(&self) {
        let inner = self.inner.borrow();
        if let (Some(stage), Some(canvas)) = (inner.stage.as_ref(), inner.live2d_canvas.as_ref()) {
            let rect = canvas.get_bounding_client_rect();
            stage.resize(rect.width(), rect.height());
            inner.position_model();
        }
        if let Some(placeholder) = inner.placeholder.as_ref() {
            placeholder.resize();
        }
    }

    pub fn transform(&self) -> ModelTransform {
        self.inner.borrow().transform
    }

    pub fn set_transform(&self, transform: ModelTransform) {
        let mut inner = self.inner.borrow_mut();
        inner.transform = transform;
        inner.position_model();
    }

    /// Wheel zoom; returns the new transform
    pub fn zoom(&self, wheel_delta_y: f64) -> ModelTransform {
        let mut inner = self.inner.borrow_mut();
        inner.transform.zoom(wheel_delta_y);
        inner.position_model();
        inner.transform
    }

    pub fn pan(&self, dx: f64, dy: f64) -> ModelTransform {
        let mut inner = self.inner.borrow_mut();
        inner.transform.pan(dx, dy);
        inner.position_model();
        inner.transform
    }

    pub fn set_speed(&self, speed: f64) {
        let speed = if speed > 0.0 { speed } else { 1.0 };
        let mut inner = self.inner.borrow_mut();
        inner.speed = speed;
        if let Some(stage) = inner.stage.as_ref() {
            stage.set_speed(speed);
        }
        if let Some(placeholder) = inner.placeholder.as_ref() {
            placeholder.set_speed(speed);
        }
    }

    pub fn set_status(&self, status: &str) {
        if let Some(placeholder) = self.inner.borrow().placeholder.as_ref() {
            placeholder.set_status(status);
        }
    }

    pub fn motion_groups(&self) -> Vec<String> {
        self.inner.borrow().descriptor.groups_or_fallback()
    }

    pub fn expressions(&self) -> Vec<String> {
        self.inner.borrow().descriptor.expressions.clone()
    }

    /// Play a motion group; false when no model or no such group
    pub fn trigger_motion(&self, group: &str) -> bool {
        let inner = self.inner.borrow();
        let Some(model) = inner.slot.get() else { return false };
        let known = &inner.descriptor.motion_groups;
        if !known.is_empty() && !known.iter().any(|g| g == group) {
            return false;
        }
        model.motion(group)
    }

    pub fn trigger_expression(&self, name: &str) -> bool {
        let inner = self.inner.borrow();
        let Some(model) = inner.slot.get() else { return false };
        let known = &inner.descriptor.expressions;
        if !known.is_empty() && !known.iter().any(|e| e == name) {
            return false;
        }
        model.expression(name)
    }

    pub fn trigger_random_motion(&self) -> bool {
        let groups = self.motion_groups();
        if groups.is_empty() {
            return false;
        }
        let index = ((js_sys::Math::random() * groups.len() as f64) as usize).min(groups.len() - 1);
        self.trigger_motion(&groups[index])
    }

    /// Play whatever part of a binding is set
    pub fn play(&self, binding: &MotionBinding) -> bool {
        let motion = binding.motion.as_deref().map(|m| self.trigger_motion(m)).unwrap_or(false);
        let expression = binding
            .expression
            .as_deref()
            .map(|e| self.trigger_expression(e))
            .unwrap_or(false);
        motion || expression
    }

    /// Placeholder click feedback
    pub fn pulse(&self) {
        if let Some(placeholder) = self.inner.borrow().placeholder.as_ref() {
            placeholder.pulse(now_ms());
        }
    }

    /// Whether a pointer at client coordinates is over the avatar
    pub fn hit(&self, client: (f64, f64)) -> bool {
        let inner = self.inner.borrow();
        if let (Some(stage), Some(model), Some(canvas)) =
            (inner.stage.as_ref(), inner.slot.get(), inner.live2d_canvas.as_ref())
        {
            let rect = canvas.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return false;
            }
            let (rw, rh) = stage.renderer_size();
            let point = (
                (client.0 - rect.left()) * rw / rect.width(),
                (client.1 - rect.top()) * rh / rect.height(),
            );
            return model.bounds().map(|b| b.contains(point)).unwrap_or(false);
        }
        let Some(placeholder) = inner.placeholder.as_ref() else { return false };
        let (left, top) = placeholder.origin();
        placeholder.geometry().hit((client.0 - left, client.1 - top))
    }

    /// Client coordinates of the top of the head, for the speech bubble
    pub fn head_anchor(&self) -> Option<(f64, f64)> {
        let inner = self.inner.borrow();
        if let (Some(stage), Some(model), Some(canvas)) =
            (inner.stage.as_ref(), inner.slot.get(), inner.live2d_canvas.as_ref())
        {
            let rect = canvas.get_bounding_client_rect();
            let (rw, rh) = stage.renderer_size();
            if rw <= 0.0 || rh <= 0.0 {
                return None;
            }
            let bounds = model.bounds()?;
            return Some((
                rect.left() + (bounds.x + bounds.width * 0.5) * rect.width() / rw,
                rect.top() + bounds.y * rect.height() / rh - 12.0,
            ));
        }
        let placeholder = inner.placeholder.as_ref()?;
        let (left, top) = placeholder.origin();
        let (x, y) = placeholder.geometry().head();
        Some((left + x, top + y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_for_message() {
        assert_eq!(motion_for_message("今天也要加油哦"), Some("Tap"));
        assert_eq!(motion_for_message("有点困了"), Some("Idle"));
        assert_eq!(motion_for_message("专心工作"), Some("Flick"));
        assert_eq!(motion_for_message("你好"), None);
    }

    #[test]
    fn test_avatar_without_model_is_inert() {
        let avatar = Avatar::new();
        assert!(!avatar.is_live2d());
        assert!(!avatar.trigger_motion("Tap"));
        assert!(!avatar.trigger_expression("smile"));
        assert!(!avatar.play(&MotionBinding::new(Some("Tap"), Some("smile"))));
        assert_eq!(avatar.motion_groups(), vec!["Tap", "Flick", "Flick3", "Idle"]);
    }

    #[test]
    fn test_pan_and_zoom_update_transform() {
        let avatar = Avatar::new();
        avatar.pan(5.0, 6.0);
        let transform = avatar.zoom(-80.0);
        assert_eq!((transform.x_offset, transform.y_offset), (5.0, 6.0));
        assert!((avatar.transform().scale - 0.45).abs() < 1e-9);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;

    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Attached canvas at a fixed client position
    fn canvas_at(left: f64, top: f64) -> HtmlCanvasElement {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas
            .set_attribute(
                "style",
                &format!("position: fixed; left: {}px; top: {}px; width: 200px; height: 200px;", left, top),
            )
            .unwrap();
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn placeholder_hit_uses_its_own_canvas() {
        let avatar = Avatar::new();
        avatar.mount(canvas_at(100.0, 50.0), canvas_at(400.0, 50.0));

        // Body centre sits at (116, 116) inside the 200px canvas
        assert!(avatar.hit((216.0, 166.0)));
        assert!(!avatar.hit((116.0, 116.0)));

        let (x, y) = avatar.head_anchor().unwrap();
        assert_eq!(x, 216.0);
        assert!((y - (166.0 - 84.0 * 0.65)).abs() < 1e-9);
    }
}
