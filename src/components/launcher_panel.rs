//! Launcher Panel Component
//!
//! Searchable launcher list: run, edit in the modal form, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{DeleteConfirmButton, ToolPanel};
use crate::commands;
use crate::context::use_app_context;
use crate::models::Launcher;
use crate::panels::PanelId;
use crate::store::{store_remove_launcher, AppStateStoreFields};

/// Matching launchers, most used first
pub fn search_launchers(launchers: &[Launcher], query: &str) -> Vec<Launcher> {
    let mut found: Vec<Launcher> = launchers.iter().filter(|l| l.matches(query)).cloned().collect();
    found.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    found
}

/// Current copy of launcher `id` from the cached list
pub fn find_launcher(launchers: &[Launcher], id: i64) -> Option<Launcher> {
    launchers.iter().find(|l| l.id == id).cloned()
}

#[component]
fn LauncherRow(launcher: Launcher) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let id = launcher.id;

    let run = move |_| {
        spawn_local(async move {
            commands::report("run launcher", commands::run_launcher(id).await);
        });
    };

    let remove = move |_| {
        store_remove_launcher(&store, id);
        spawn_local(async move {
            commands::report("delete launcher", commands::delete_launcher(id).await);
        });
    };

    let edit = move |_| {
        if let Some(current) = store.launchers().with_untracked(|all| find_launcher(all, id)) {
            ctx.launcher_form.set(Some(current));
        }
    };

    let icon = if launcher.icon.is_empty() { "🔗".to_string() } else { launcher.icon };
    let tags = launcher.tags.join(" · ");

    view! {
        <li class="launcher-item">
            <span class="launcher-icon">{icon}</span>
            <div class="launcher-main" on:click=run>
                <span class="launcher-name">{launcher.name}</span>
                <span class="launcher-meta">{launcher.kind.label()} " " {tags}</span>
            </div>
            <button title="编辑" on:click=edit>"✎"</button>
            <DeleteConfirmButton label="删除" on_confirm=remove />
        </li>
    }
}

#[component]
pub fn LauncherPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let (query, set_query) = signal(String::new());

    let results = Memo::new(move |_| {
        let query = query.get();
        store.launchers().with(|all| search_launchers(all, &query))
    });

    view! {
        <ToolPanel id=PanelId::Launcher class="wide">
            <div class="panel-row">
                <input
                    type="text"
                    class="search-input"
                    placeholder="搜索名称或标签..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button class="primary" on:click=move |_| ctx.launcher_form.set(Some(Launcher::default()))>
                    "新建"
                </button>
            </div>
            <Show
                when=move || results.with(|r| !r.is_empty())
                fallback=|| view! { <div class="empty-hint">"没有启动项"</div> }
            >
                <ul class="launcher-list">
                    <For
                        each=move || results.get()
                        key=|l| l.clone()
                        let:launcher
                    >
                        <LauncherRow launcher=launcher />
                    </For>
                </ul>
            </Show>
        </ToolPanel>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LauncherKind;

    fn launcher(id: i64, name: &str, tags: &[&str], usage_count: u32) -> Launcher {
        Launcher {
            id,
            name: name.to_string(),
            kind: LauncherKind::Web,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            usage_count,
            ..Launcher::default()
        }
    }

    #[test]
    fn test_search_filters_and_ranks_by_usage() {
        let all = vec![
            launcher(1, "Docs", &["rust"], 2),
            launcher(2, "Mail", &["work"], 9),
            launcher(3, "Crates", &["Rust"], 5),
        ];
        let ids: Vec<i64> = search_launchers(&all, "RUST").iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1]);
        let ids: Vec<i64> = search_launchers(&all, "").iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_edit_reads_latest_launcher_by_id() {
        let mut all = vec![launcher(1, "Docs", &[], 0), launcher(2, "Mail", &[], 0)];
        let shown = all[0].clone();

        // Host push changes only the url and hotkey
        all[0].url = "https://docs.rs".to_string();
        all[0].hotkey = "Ctrl+Alt+D".to_string();

        let current = find_launcher(&all, shown.id).unwrap();
        assert_eq!(current.url, "https://docs.rs");
        assert_eq!(current.hotkey, "Ctrl+Alt+D");
        assert_ne!(current, shown);
        assert!(find_launcher(&all, 9).is_none());
    }
}
