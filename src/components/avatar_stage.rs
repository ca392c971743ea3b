//! Avatar Stage Component
//!
//! Hosts the two avatar canvases and turns pointer input into avatar
//! drags, zoom, clicks and petting.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::avatar::{LoadOutcome, ModelTransform};
use crate::bindings::mood_key;
use crate::commands;
use crate::context::use_app_context;
use crate::dom::{now_ms, on_window, set_body_property};
use crate::interaction::{AvatarDrag, Blocker, DragKind, PettingThrottle};
use crate::models::PomodoroMode;
use crate::store::AppStateStoreFields;

/// Spark lifetime
const SPARK_MS: u32 = 700;

#[derive(Clone, Copy, PartialEq)]
struct Spark {
    id: u32,
    x: f64,
    y: f64,
}

#[component]
pub fn AvatarStage() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let placeholder_ref = NodeRef::<leptos::html::Canvas>::new();
    let live2d_ref = NodeRef::<leptos::html::Canvas>::new();
    let live2d_ready = RwSignal::new(false);
    let sparks = RwSignal::new(Vec::<Spark>::new());
    let spark_seq = StoredValue::new(0u32);
    let drag = StoredValue::new(AvatarDrag::default());
    let petting = StoredValue::new(PettingThrottle::default());

    let spawn_spark = move |x: f64, y: f64| {
        let id = spark_seq.try_update_value(|seq| {
            *seq = seq.wrapping_add(1);
            *seq
        });
        let Some(id) = id else { return };
        sparks.update(|list| list.push(Spark { id, x, y }));
        gloo_timers::callback::Timeout::new(SPARK_MS, move || {
            sparks.update(|list| list.retain(|s| s.id != id));
        })
        .forget();
    };

    // Mount canvases once both refs resolve
    Effect::new(move |mounted: Option<bool>| {
        if mounted == Some(true) {
            return true;
        }
        let (Some(placeholder), Some(live2d)) = (placeholder_ref.get(), live2d_ref.get()) else {
            return false;
        };
        ctx.avatar.with_value(|avatar| avatar.mount(placeholder, live2d));
        on_window("resize", move |_: web_sys::Event| ctx.avatar.with_value(|a| a.resize()));
        true
    });

    // Placement, speed and UI scale follow settings
    Effect::new(move |_| {
        let (transform, speed, ui_scale) = store.settings().with(|s| {
            (ModelTransform::from_settings(s), s.f64("animation_speed"), s.f64("ui_scale"))
        });
        ctx.avatar.with_value(|avatar| {
            avatar.set_transform(transform);
            avatar.set_speed(speed);
        });
        set_body_property("--ui-scale", &ui_scale.to_string());
    });

    // (Re)load when the model path changes
    let model_path = Memo::new(move |_| store.settings().with(|s| s.string("model_path")));
    Effect::new(move |_| {
        let path = model_path.get();
        if placeholder_ref.get().is_none() {
            return;
        }
        let avatar = ctx.avatar();
        if path.trim().is_empty() {
            avatar.unload();
            live2d_ready.set(false);
            return;
        }
        spawn_local(async move {
            match avatar.load_model(&path).await {
                Ok(LoadOutcome::Attached) => {
                    live2d_ready.set(true);
                    ctx.log_status(format!("模型已加载：{}", path));
                }
                Ok(LoadOutcome::Superseded) => return,
                Err(err) => {
                    log::warn!("model load failed: {}", err);
                    live2d_ready.set(avatar.is_live2d());
                    ctx.log_status(err.to_string());
                }
            }
            match commands::get_model_bindings(&path).await {
                Ok(bindings) => {
                    store.bindings().set(bindings);
                    ctx.play_binding("ai", "greeting");
                }
                Err(err) => log::debug!("get_model_bindings: {}", err),
            }
        });
    });

    // Status, pomodoro and mood drive colour and bound motions
    Effect::new(move |prev: Option<String>| {
        let status = store.pet().with(|p| p.status.clone());
        ctx.avatar.with_value(|a| a.set_status(&status));
        if prev.as_deref() != Some(status.as_str()) {
            ctx.play_binding("status", &status);
        }
        status
    });
    Effect::new(move |prev: Option<PomodoroMode>| {
        let mode = store.pomodoro().with(|p| p.mode);
        if prev.is_some_and(|p| p != mode) && mode != PomodoroMode::Idle {
            ctx.play_binding("pomodoro", mode.label());
        }
        mode
    });
    Effect::new(move |prev: Option<Option<&'static str>>| {
        let key = store.pet().with(|p| p.mood.as_ref().and_then(|m| mood_key(&m.label)));
        if let (Some(previous), Some(key)) = (prev, key) {
            if previous != Some(key) {
                ctx.play_binding("mood", key);
            }
        }
        key
    });

    // Avatar drag follows the pointer anywhere in the window
    on_window("mousemove", move |ev: web_sys::MouseEvent| {
        if ctx.gate.get_untracked().move_mode() {
            return;
        }
        let pointer = (ev.client_x() as f64, ev.client_y() as f64);
        let step = drag.try_update_value(|d| d.step(pointer)).flatten();
        match step {
            Some((dx, dy)) => {
                let transform = ctx.avatar.with_value(|a| a.pan(dx, dy));
                ctx.save_model_transform(transform);
            }
            None => {
                let over = ctx.avatar.with_value(|a| a.is_live2d() && a.hit(pointer));
                ctx.set_blocker(Blocker::Model, over);
            }
        }
    });
    on_window("mouseup", move |_: web_sys::MouseEvent| {
        let ended = drag.try_update_value(|d| d.end()).unwrap_or(false);
        if ended {
            ctx.arbiter.update_value(|a| {
                a.end(DragKind::Avatar);
            });
            ctx.set_blocker(Blocker::Model, false);
        }
    });

    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || ctx.gate.get_untracked().move_mode() {
            return;
        }
        let pointer = (ev.client_x() as f64, ev.client_y() as f64);
        let over = ctx.avatar.with_value(|a| a.is_live2d() && a.hit(pointer));
        if !over && !ctx.model_edit_mode.get_untracked() {
            ctx.set_blocker(Blocker::Model, false);
            return;
        }
        if ctx.arbiter.try_update_value(|a| a.try_begin(DragKind::Avatar)).unwrap_or(false) {
            drag.update_value(|d| d.begin(pointer));
            ctx.set_blocker(Blocker::Model, true);
        }
    };

    let on_click = move |ev: web_sys::MouseEvent| {
        if ctx.gate.get_untracked().move_mode() {
            return;
        }
        let pointer = (ev.client_x() as f64, ev.client_y() as f64);
        let (hit, live2d) = ctx.avatar.with_value(|a| (a.hit(pointer), a.is_live2d()));
        if !hit {
            return;
        }
        let reacted = if live2d {
            ctx.play_binding("interaction", "click") || ctx.avatar.with_value(|a| a.trigger_random_motion())
        } else {
            ctx.avatar.with_value(|a| a.pulse());
            true
        };
        if reacted {
            spawn_spark(pointer.0, pointer.1);
        }
    };

    let on_pet = move |ev: web_sys::MouseEvent| {
        if ctx.gate.get_untracked().move_mode() || drag.with_value(|d| d.is_dragging()) {
            return;
        }
        let pointer = (ev.client_x() as f64, ev.client_y() as f64);
        if !ctx.avatar.with_value(|a| a.hit(pointer)) {
            return;
        }
        if !petting.try_update_value(|p| p.try_pet(now_ms())).unwrap_or(false) {
            return;
        }
        let live2d = ctx.avatar.with_value(|a| a.is_live2d());
        if live2d {
            if !ctx.play_binding("interaction", "petting") {
                ctx.avatar.with_value(|a| a.trigger_random_motion());
            }
        } else {
            ctx.avatar.with_value(|a| a.pulse());
        }
        spawn_spark(pointer.0, pointer.1);
    };

    let on_wheel = move |ev: web_sys::WheelEvent| {
        if ctx.gate.get_untracked().move_mode() || !ctx.avatar.with_value(|a| a.is_live2d()) {
            return;
        }
        ev.prevent_default();
        let transform = ctx.avatar.with_value(|a| a.zoom(ev.delta_y()));
        ctx.save_model_transform(transform);
    };

    view! {
        <div
            class="avatar-stage"
            class:edit-mode=move || ctx.model_edit_mode.get()
            on:mousedown=on_mousedown
            on:click=on_click
            on:mousemove=on_pet
            on:wheel=on_wheel
        >
            <canvas
                id="pet-canvas"
                node_ref=placeholder_ref
                class:hidden=move || live2d_ready.get()
            ></canvas>
            <canvas
                id="live2d-canvas"
                node_ref=live2d_ref
                class:hidden=move || !live2d_ready.get()
            ></canvas>
            <For each=move || sparks.get() key=|spark| spark.id let:spark>
                <span class="spark" style=format!("left: {}px; top: {}px;", spark.x, spark.y)>
                    "✨"
                </span>
            </For>
        </div>
    }
}
