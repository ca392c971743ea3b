//! Note Panel Component
//!
//! A single free-text note, saved to the host after typing pauses.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::ToolPanel;
use crate::commands;
use crate::context::use_app_context;
use crate::debounce::Debouncer;
use crate::panels::PanelId;
use crate::store::AppStateStoreFields;

const NOTE_SAVE_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn NotePanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let saver = StoredValue::new_local(Debouncer::new(NOTE_SAVE_DEBOUNCE_MS, |text: String| {
        spawn_local(async move {
            commands::report("save note", commands::set_note(&text).await);
        });
    }));

    // Don't lose the last keystrokes on teardown
    on_cleanup(move || {
        saver.try_with_value(|s| s.flush());
    });

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        store.note().set(text.clone());
        saver.with_value(|s| s.push(text));
    };

    view! {
        <ToolPanel id=PanelId::Note>
            <textarea
                class="note-input"
                placeholder="写点什么..."
                prop:value=move || store.note().get()
                on:input=on_input
                on:blur=move |_| saver.with_value(|s| s.flush())
            ></textarea>
        </ToolPanel>
    }
}
