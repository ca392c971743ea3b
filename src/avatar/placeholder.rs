//! Placeholder Pet
//!
//! Hand-drawn animated character used whenever the Live2D runtime or
//! model is not available. Drawn every animation frame on a 2D canvas.

use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// How long a click keeps the body enlarged
pub const CLICK_PULSE_MS: f64 = 350.0;

pub fn status_color(status: &str) -> &'static str {
    match status {
        "idle" => "#f7d774",
        "sleep" => "#8aa3ff",
        "paused" => "#a5a5a5",
        _ => "#6ed7a7",
    }
}

/// Body placement for a canvas of the given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub center: (f64, f64),
    pub base: f64,
}

impl Geometry {
    pub fn for_size(width: f64, height: f64) -> Self {
        Self {
            center: (width * 0.58, height * 0.58),
            base: width.min(height) * 0.42,
        }
    }

    /// True when `point` (canvas-relative) lies on the body
    pub fn hit(&self, point: (f64, f64)) -> bool {
        let dx = point.0 - self.center.0;
        let dy = point.1 - self.center.1;
        let radius = self.base * 0.6;
        dx * dx + dy * dy <= radius * radius
    }

    /// Where the speech bubble should anchor (above the head)
    pub fn head(&self) -> (f64, f64) {
        (self.center.0, self.center.1 - self.base * 0.65)
    }
}

/// Eye height for the blink cycle at time `t` (ms)
pub fn eye_height(t: f64) -> f64 {
    if (t / 900.0).sin().abs() < 0.1 {
        2.0
    } else {
        8.0
    }
}

pub struct Placeholder {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Cell<(f64, f64)>,
    status: RefCell<String>,
    pulse_until: Cell<f64>,
    speed: Cell<f64>,
    active: Cell<bool>,
    /// Frame callback, created on first start and reused afterwards
    frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    request: Cell<Option<i32>>,
}

impl Placeholder {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Rc<Self>> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let placeholder = Rc::new(Self {
            canvas,
            ctx,
            size: Cell::new((0.0, 0.0)),
            status: RefCell::new("idle".to_string()),
            pulse_until: Cell::new(0.0),
            speed: Cell::new(1.0),
            active: Cell::new(false),
            frame: RefCell::new(None),
            request: Cell::new(None),
        });
        placeholder.resize();
        Some(placeholder)
    }

    pub fn set_status(&self, status: &str) {
        self.status.replace(status.to_string());
    }

    pub fn set_speed(&self, speed: f64) {
        self.speed.set(if speed > 0.0 { speed } else { 1.0 });
    }

    pub fn pulse(&self, now_ms: f64) {
        self.pulse_until.set(now_ms + CLICK_PULSE_MS);
    }

    pub fn geometry(&self) -> Geometry {
        let (w, h) = self.size.get();
        Geometry::for_size(w, h)
    }

    /// Match the backing store to the element size and device pixel ratio
    pub fn resize(&self) {
        let rect = self.canvas.get_bounding_client_rect();
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        self.canvas.set_width(((rect.width() * dpr).floor() as u32).max(1));
        self.canvas.set_height(((rect.height() * dpr).floor() as u32).max(1));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.size.set((rect.width(), rect.height()));
    }

    /// Start the frame loop; `stop` cancels the pending frame
    pub fn start(self: &Rc<Self>) {
        if self.active.replace(true) {
            return;
        }
        if self.frame.borrow().is_none() {
            let weak = Rc::downgrade(self);
            let tick = Closure::new(move |t: f64| {
                let Some(this) = weak.upgrade() else { return };
                this.request.set(None);
                if !this.active.get() {
                    return;
                }
                this.draw(t * this.speed.get(), t);
                this.schedule();
            });
            self.frame.replace(Some(tick));
        }
        self.schedule();
    }

    fn schedule(&self) {
        let frame = self.frame.borrow();
        let (Some(cb), Some(window)) = (frame.as_ref(), web_sys::window()) else { return };
        self.request.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }

    pub fn stop(&self) {
        self.active.set(false);
        if let (Some(id), Some(window)) = (self.request.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        let (w, h) = self.size.get();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    /// Client coordinates of the canvas' top-left corner
    pub fn origin(&self) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        (rect.left(), rect.top())
    }

    fn draw(&self, t: f64, now: f64) {
        let ctx = &self.ctx;
        let (width, height) = self.size.get();
        let pulse = if now < self.pulse_until.get() { 1.06 } else { 1.0 };
        let geometry = Geometry::for_size(width, height);
        let base = geometry.base * pulse;
        let x = geometry.center.0;
        let y = geometry.center.1 + (t / 600.0).sin() * 6.0;
        let color = status_color(&self.status.borrow());

        ctx.clear_rect(0.0, 0.0, width, height);

        // Shadow
        ctx.set_fill_style_str("rgba(0,0,0,0.2)");
        ctx.begin_path();
        let _ = ctx.ellipse(x, y + base * 0.58, base * 0.45, base * 0.12, 0.0, 0.0, PI * 2.0);
        ctx.fill();

        // Body
        if let Ok(grad) = ctx.create_radial_gradient(x - base * 0.2, y - base * 0.3, base * 0.2, x, y, base) {
            let _ = grad.add_color_stop(0.0, "#ffffff");
            let _ = grad.add_color_stop(0.5, color);
            let _ = grad.add_color_stop(1.0, "#2b2b2b");
            ctx.set_fill_style_canvas_gradient(&grad);
        } else {
            ctx.set_fill_style_str(color);
        }
        ctx.begin_path();
        let _ = ctx.arc(x, y, base * 0.55, 0.0, PI * 2.0);
        ctx.fill();

        // Ears
        ctx.set_fill_style_str(color);
        for side in [-1.0, 1.0] {
            ctx.begin_path();
            ctx.move_to(x + side * base * 0.45, y - base * 0.3);
            ctx.line_to(x + side * base * 0.7, y - base * 0.7);
            ctx.line_to(x + side * base * 0.2, y - base * 0.6);
            ctx.close_path();
            ctx.fill();
        }

        // Eyes
        let eye_h = eye_height(t);
        ctx.set_fill_style_str("#1a1a1a");
        for eye_x in [x - base * 0.2, x + base * 0.08] {
            ctx.begin_path();
            ctx.rect(eye_x, y - base * 0.12, base * 0.12, eye_h);
            ctx.fill();
        }

        // Smile
        ctx.set_stroke_style_str("#1a1a1a");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let _ = ctx.arc(x, y + base * 0.12, base * 0.12, 0.0, PI);
        ctx.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("sleep"), "#8aa3ff");
        assert_eq!(status_color("active"), "#6ed7a7");
        assert_eq!(status_color("something-new"), "#6ed7a7");
    }

    #[test]
    fn test_hit_test_covers_body_only() {
        let geometry = Geometry::for_size(400.0, 300.0);
        assert_eq!(geometry.center, (232.0, 174.0));
        assert!(geometry.hit((232.0, 174.0)));
        assert!(geometry.hit((232.0 + 70.0, 174.0)));
        assert!(!geometry.hit((232.0 + 80.0, 174.0)));
        assert!(!geometry.hit((0.0, 0.0)));
    }

    #[test]
    fn test_blink_cycle() {
        assert_eq!(eye_height(0.0), 2.0);
        assert_eq!(eye_height(900.0 * PI / 2.0), 8.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;

    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("canvas").ok())
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .unwrap()
    }

    #[wasm_bindgen_test]
    async fn frame_loop_survives_stop_and_restart() {
        let placeholder = Placeholder::new(canvas()).unwrap();

        placeholder.start();
        TimeoutFuture::new(50).await;
        assert!(placeholder.request.get().is_some());

        placeholder.stop();
        assert!(placeholder.request.get().is_none());
        TimeoutFuture::new(50).await;
        assert!(placeholder.request.get().is_none());

        // The same callback drives the restarted loop
        placeholder.start();
        TimeoutFuture::new(50).await;
        assert!(placeholder.active.get());
        assert!(placeholder.frame.borrow().is_some());
        assert!(placeholder.request.get().is_some());
        placeholder.stop();
    }
}
