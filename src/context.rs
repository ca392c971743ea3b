//! Application Context
//!
//! Shared UI state provided via Leptos Context API. Host mirrors live in
//! the store; this holds what only the page knows about (open panels,
//! drag modes, the avatar handle).

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::avatar::{Avatar, ModelConfig, ModelTransform};
use crate::commands::{self, Bridge};
use crate::debounce::Debouncer;
use crate::interaction::{Blocker, DragArbiter, DragGate};
use crate::models::{ChatRole, Launcher};
use crate::panels::{PanelId, PanelSet};
use crate::store::{store_merge_settings, store_push_chat, AppStateStoreFields, AppStore};

/// Placement changes are saved once the wheel/drag burst settles
const MODEL_SAVE_DEBOUNCE_MS: u32 = 200;
/// How long a speech bubble stays up
const BUBBLE_MS: u32 = 4_000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    pub bridge: RwSignal<Option<Bridge>>,
    pub panels: RwSignal<PanelSet>,
    pub chat_hidden: RwSignal<bool>,
    pub chat_collapsed: RwSignal<bool>,
    pub model_edit_mode: RwSignal<bool>,
    /// Context menu anchor in client coordinates
    pub context_menu: RwSignal<Option<(f64, f64)>>,
    pub bubble: RwSignal<Option<String>>,
    /// Launcher being edited in the modal form
    pub launcher_form: RwSignal<Option<Launcher>>,
    pub gate: RwSignal<DragGate>,
    pub arbiter: StoredValue<DragArbiter>,
    pub avatar: StoredValue<Avatar, LocalStorage>,
    bubble_timer: StoredValue<Option<Timeout>, LocalStorage>,
    model_saver: StoredValue<Debouncer<ModelConfig>, LocalStorage>,
}

impl AppContext {
    pub fn new(store: AppStore) -> Self {
        let bridge = RwSignal::new(None);
        let model_saver = Debouncer::new(MODEL_SAVE_DEBOUNCE_MS, |config: ModelConfig| {
            spawn_local(async move {
                commands::report("save model config", commands::set_model_config(&config).await);
            });
        });
        Self {
            store,
            bridge,
            panels: RwSignal::new(PanelSet::default()),
            chat_hidden: RwSignal::new(false),
            chat_collapsed: RwSignal::new(true),
            model_edit_mode: RwSignal::new(false),
            context_menu: RwSignal::new(None),
            bubble: RwSignal::new(None),
            launcher_form: RwSignal::new(None),
            gate: RwSignal::new(DragGate::default()),
            arbiter: StoredValue::new(DragArbiter::default()),
            avatar: StoredValue::new_local(Avatar::new()),
            bubble_timer: StoredValue::new_local(None),
            model_saver: StoredValue::new_local(model_saver),
        }
    }

    pub fn bridge_ready(&self) -> bool {
        self.bridge.get_untracked().is_some()
    }

    pub fn avatar(&self) -> Avatar {
        self.avatar.get_value()
    }

    // ========================
    // Panels
    // ========================

    /// Open `id` (closing any other) or close it if it is the open one
    pub fn toggle_panel(&self, id: PanelId) {
        self.context_menu.set(None);
        self.panels.update(|panels| {
            panels.toggle(id);
        });
    }

    pub fn open_panel(&self, id: PanelId) {
        self.context_menu.set(None);
        self.panels.update(|panels| panels.open(id));
    }

    pub fn close_panel(&self, id: PanelId) {
        self.panels.update(|panels| panels.close(id));
    }

    /// Escape: panels, context menu and the launcher modal
    pub fn close_all(&self) {
        self.panels.update(|panels| panels.close_all());
        self.context_menu.set(None);
        self.launcher_form.set(None);
    }

    // ========================
    // Chat & Bubble
    // ========================

    /// Status line in the chat log
    pub fn log_status(&self, text: impl Into<String>) {
        store_push_chat(&self.store, ChatRole::Pet, text);
    }

    /// Show a speech bubble; a new message restarts the timer
    pub fn show_bubble(&self, text: impl Into<String>) {
        self.bubble.set(Some(text.into()));
        let bubble = self.bubble;
        let timeout = Timeout::new(BUBBLE_MS, move || bubble.set(None));
        self.bubble_timer.set_value(Some(timeout));
    }

    // ========================
    // Window Drag
    // ========================

    pub fn set_move_mode(&self, enabled: bool) {
        self.gate.update(|gate| gate.set_move_mode(enabled));
        self.sync_window_drag();
        self.log_status(if enabled { "进入移动模式" } else { "退出移动模式" });
    }

    pub fn set_blocker(&self, blocker: Blocker, blocked: bool) {
        let current = self.gate.get_untracked();
        let mut next = current;
        next.set_blocker(blocker, blocked);
        if next == current {
            return;
        }
        self.gate.set(next);
        self.sync_window_drag();
    }

    /// Report the window-drag permission if it changed since last report
    pub fn sync_window_drag(&self) {
        let ready = self.bridge_ready();
        let update = self.gate.try_update_untracked(|gate| gate.take_update(ready)).flatten();
        if let Some(allowed) = update {
            spawn_local(async move {
                commands::report("set window drag", commands::set_window_drag_enabled(allowed).await);
            });
        }
    }

    // ========================
    // Avatar
    // ========================

    /// Apply placement locally and schedule the debounced host save
    pub fn save_model_transform(&self, transform: ModelTransform) {
        store_merge_settings(&self.store, &transform.to_settings_delta());
        self.model_saver.with_value(|saver| saver.push(transform.to_config()));
    }

    /// Play the binding for `category`/`key`, falling back to the model default
    pub fn play_binding(&self, category: &str, key: &str) -> bool {
        let binding = self.store.bindings().with_untracked(|b| b.resolve(category, key));
        self.avatar.with_value(|avatar| avatar.play(&binding))
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
