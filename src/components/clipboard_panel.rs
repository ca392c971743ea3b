//! Clipboard Panel Component
//!
//! Searchable clipboard history; clicking an entry copies it back.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::ToolPanel;
use crate::commands;
use crate::context::use_app_context;
use crate::format::truncate_preview;
use crate::panels::PanelId;
use crate::store::{filter_clipboard, AppStateStoreFields};

const PREVIEW_CHARS: usize = 80;

#[component]
pub fn ClipboardPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let (query, set_query) = signal(String::new());

    let visible_items = Memo::new(move |_| {
        let query = query.get();
        store.clipboard().with(|items| filter_clipboard(items, &query))
    });

    let copy = move |text: String| {
        spawn_local(async move {
            match commands::set_clipboard_text(&text).await {
                Ok(()) => ctx.log_status("已复制到剪贴板"),
                Err(err) => commands::report("copy clipboard", Err(err)),
            }
        });
    };

    let clear = move |_| {
        store.clipboard().set(Vec::new());
        spawn_local(async {
            commands::report("clear clipboard", commands::clear_clipboard().await);
        });
    };

    view! {
        <ToolPanel id=PanelId::Clipboard>
            <div class="panel-row">
                <input
                    type="text"
                    class="search-input"
                    placeholder="搜索..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button on:click=clear>"清空"</button>
            </div>
            <Show
                when=move || visible_items.with(|items| !items.is_empty())
                fallback=|| view! { <div class="empty-hint">"暂无记录"</div> }
            >
                <ul class="clipboard-list">
                    {move || {
                        visible_items
                            .get()
                            .into_iter()
                            .map(|item| {
                                let preview = truncate_preview(&item.text, PREVIEW_CHARS);
                                let text = item.text;
                                view! {
                                    <li class="clipboard-item" on:click=move |_| copy(text.clone())>
                                        {preview}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </ToolPanel>
    }
}
