//! Plugin Panel Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::ToolPanel;
use crate::commands;
use crate::context::use_app_context;
use crate::models::Plugin;
use crate::panels::PanelId;
use crate::store::{store_set_plugin_enabled, AppStateStoreFields};

#[component]
fn PluginRow(plugin: Plugin) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let id = StoredValue::new(plugin.id.clone());

    let toggle = move |ev| {
        let enabled = event_target_checked(&ev);
        let plugin_id = id.get_value();
        store_set_plugin_enabled(&store, &plugin_id, enabled);
        spawn_local(async move {
            commands::report("toggle plugin", commands::set_plugin_enabled(&plugin_id, enabled).await);
        });
    };

    let reload = move |_| {
        let plugin_id = id.get_value();
        spawn_local(async move {
            commands::report("reload plugin", commands::reload_plugin(&plugin_id).await);
        });
    };

    let Plugin { name, version, description, enabled, loaded, error, .. } = plugin;
    let status = if !error.is_empty() {
        "error"
    } else if loaded {
        "loaded"
    } else {
        "idle"
    };

    view! {
        <li class=format!("plugin-item {}", status)>
            <div class="plugin-head">
                <label class="toggle">
                    <input type="checkbox" prop:checked=enabled on:change=toggle />
                    <span class="plugin-name">{name}</span>
                </label>
                <span class="plugin-version">{version}</span>
                <button on:click=reload>"重载"</button>
            </div>
            {(!description.is_empty()).then(|| view! { <div class="plugin-desc">{description}</div> })}
            {(!error.is_empty()).then(|| view! { <div class="plugin-error">{error}</div> })}
        </li>
    }
}

#[component]
pub fn PluginPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let reload_all = move |_| {
        spawn_local(async {
            commands::report("reload plugins", commands::reload_plugins().await);
        });
    };

    view! {
        <ToolPanel id=PanelId::Plugins>
            <div class="panel-row">
                <button on:click=reload_all>"全部重载"</button>
            </div>
            <Show
                when=move || store.plugins().with(|p| !p.is_empty())
                fallback=|| view! { <div class="empty-hint">"未发现插件"</div> }
            >
                <ul class="plugin-list">
                    <For
                        each=move || store.plugins().get()
                        key=|plugin| (plugin.id.clone(), plugin.enabled, plugin.loaded, plugin.error.clone())
                        let:plugin
                    >
                        <PluginRow plugin=plugin />
                    </For>
                </ul>
            </Show>
        </ToolPanel>
    }
}
