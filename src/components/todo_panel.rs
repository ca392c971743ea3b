//! Todo Panel Component
//!
//! Timed todos; the host fires the reminder when one comes due.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::ToolPanel;
use crate::commands;
use crate::context::use_app_context;
use crate::format::{format_due, local_offset_at, parse_datetime_local};
use crate::panels::PanelId;
use crate::store::{store_remove_todo, AppStateStoreFields};

#[component]
pub fn TodoPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let (title, set_title) = signal(String::new());
    let (due, set_due) = signal(String::new());

    let add = move || {
        let text = title.get_untracked().trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(due_ts) = parse_datetime_local(&due.get_untracked(), local_offset_at) else {
            ctx.log_status("请选择提醒时间");
            return;
        };
        set_title.set(String::new());
        spawn_local(async move {
            commands::report("add todo", commands::add_todo(&text, due_ts).await);
        });
    };

    let remove = move |todo_id: i64| {
        store_remove_todo(&store, todo_id);
        spawn_local(async move {
            commands::report("remove todo", commands::remove_todo(todo_id).await);
        });
    };

    view! {
        <ToolPanel id=PanelId::Todo>
            <div class="panel-row">
                <input
                    type="text"
                    placeholder="待办内容"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            add();
                        }
                    }
                />
                <input
                    type="datetime-local"
                    prop:value=move || due.get()
                    on:input=move |ev| set_due.set(event_target_value(&ev))
                />
                <button class="primary" on:click=move |_| add()>"添加"</button>
            </div>
            <ul class="todo-list">
                <For each=move || store.todos().get() key=|todo| todo.id let:todo>
                    <li class="todo-item">
                        <span class="todo-title">{todo.title.clone()}</span>
                        <span class="todo-due">{format_due(todo.due_ts, local_offset_at)}</span>
                        <button class="todo-remove" title="删除" on:click=move |_| remove(todo.id)>
                            "×"
                        </button>
                    </li>
                </For>
            </ul>
        </ToolPanel>
    }
}
