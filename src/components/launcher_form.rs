//! Launcher Form Component
//!
//! Modal editor for one launcher. Edits go into a `LauncherDraft`; nothing
//! reaches the host until the draft validates.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::hotkey::{Chord, ChordError};
use crate::interaction::Blocker;
use crate::store::AppStateStoreFields;
use crate::models::{Launcher, LauncherKind, LauncherRef};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("请输入名称")]
    MissingName,
    #[error("网页启动项需要填写网址")]
    MissingUrl,
    #[error("应用启动项需要填写路径")]
    MissingPath,
    #[error("套件至少需要包含一个启动项")]
    EmptyGroup,
    #[error("快捷键无效：{0}")]
    Hotkey(#[from] ChordError),
}

/// Form-side launcher with text fields for the list-valued parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LauncherDraft {
    pub id: i64,
    pub name: String,
    pub kind: LauncherKind,
    pub url: String,
    pub path: String,
    /// Whitespace separated
    pub args: String,
    pub icon: String,
    /// Comma separated
    pub tags: String,
    pub hotkey: String,
    pub members: Vec<i64>,
    pub usage_count: u32,
}

fn split_tags(text: &str) -> Vec<String> {
    text.split([',', '，'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl LauncherDraft {
    pub fn from_launcher(launcher: &Launcher) -> Self {
        Self {
            id: launcher.id,
            name: launcher.name.clone(),
            kind: launcher.kind,
            url: launcher.url.clone(),
            path: launcher.path.clone(),
            args: launcher.args.join(" "),
            icon: launcher.icon.clone(),
            tags: launcher.tags.join(", "),
            hotkey: launcher.hotkey.clone(),
            members: launcher.items.iter().map(|r| r.launcher_id).collect(),
            usage_count: launcher.usage_count,
        }
    }

    pub fn toggle_member(&mut self, launcher_id: i64) {
        if let Some(pos) = self.members.iter().position(|id| *id == launcher_id) {
            self.members.remove(pos);
        } else {
            self.members.push(launcher_id);
        }
    }

    /// Build the launcher to save; fields unused by the kind are cleared
    pub fn validate(&self) -> Result<Launcher, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let hotkey = self.hotkey.trim();
        if !hotkey.is_empty() {
            hotkey.parse::<Chord>()?;
        }

        let mut launcher = Launcher {
            id: self.id,
            name: name.to_string(),
            kind: self.kind,
            icon: self.icon.trim().to_string(),
            tags: split_tags(&self.tags),
            hotkey: hotkey.to_string(),
            usage_count: self.usage_count,
            ..Launcher::default()
        };
        match self.kind {
            LauncherKind::Web => {
                let url = self.url.trim();
                if url.is_empty() {
                    return Err(DraftError::MissingUrl);
                }
                launcher.url = url.to_string();
            }
            LauncherKind::App => {
                let path = self.path.trim();
                if path.is_empty() {
                    return Err(DraftError::MissingPath);
                }
                launcher.path = path.to_string();
                launcher.args = self.args.split_whitespace().map(str::to_string).collect();
            }
            LauncherKind::Group => {
                let members: Vec<i64> = self.members.iter().copied().filter(|id| *id != self.id).collect();
                if members.is_empty() {
                    return Err(DraftError::EmptyGroup);
                }
                launcher.items = members.into_iter().map(|launcher_id| LauncherRef { launcher_id }).collect();
            }
        }
        Ok(launcher)
    }
}

#[component]
fn DraftText(
    #[prop(into)] label: String,
    draft: RwSignal<LauncherDraft>,
    read: fn(&LauncherDraft) -> String,
    write: fn(&mut LauncherDraft, String),
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || draft.with(read)
                on:input=move |ev| draft.update(|d| write(d, event_target_value(&ev)))
            />
        </label>
    }
}

#[component]
fn LauncherFormBody(launcher: Launcher) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let is_new = launcher.id == 0;
    let draft = RwSignal::new(LauncherDraft::from_launcher(&launcher));
    let error = RwSignal::new(None::<String>);
    let kind = move || draft.with(|d| d.kind);

    let save = move |_| match draft.with_untracked(LauncherDraft::validate) {
        Ok(launcher) => {
            error.set(None);
            ctx.launcher_form.set(None);
            spawn_local(async move {
                match commands::save_launcher(&launcher).await {
                    Ok(()) => ctx.log_status(format!("已保存启动项：{}", launcher.name)),
                    Err(err) => commands::report("save launcher", Err(err)),
                }
            });
        }
        Err(err) => error.set(Some(err.to_string())),
    };

    let group_candidates = move || {
        let own_id = draft.with(|d| d.id);
        store.launchers().with(|all| {
            all.iter()
                .filter(|l| l.id != own_id && l.kind != LauncherKind::Group)
                .map(|l| (l.id, l.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| ctx.launcher_form.set(None)>
            <div
                class="modal launcher-form"
                on:click=|ev| ev.stop_propagation()
                on:mouseenter=move |_| ctx.set_blocker(Blocker::Ui, true)
                on:mouseleave=move |_| ctx.set_blocker(Blocker::Ui, false)
            >
                <div class="modal-title">{if is_new { "新建启动项" } else { "编辑启动项" }}</div>
                <DraftText
                    label="名称"
                    draft=draft
                    read={|d: &LauncherDraft| d.name.clone()}
                    write={|d: &mut LauncherDraft, v: String| d.name = v}
                />
                <label class="field">
                    <span>"类型"</span>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.kind = LauncherKind::parse(&value));
                    }>
                        {LauncherKind::ALL
                            .iter()
                            .map(|k| {
                                let k = *k;
                                view! {
                                    <option value=k.as_str() selected=move || kind() == k>
                                        {k.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <Show when=move || kind() == LauncherKind::Web>
                    <DraftText
                        label="网址"
                        draft=draft
                        read={|d: &LauncherDraft| d.url.clone()}
                        write={|d: &mut LauncherDraft, v: String| d.url = v}
                        placeholder="https://"
                    />
                </Show>
                <Show when=move || kind() == LauncherKind::App>
                    <DraftText
                        label="路径"
                        draft=draft
                        read={|d: &LauncherDraft| d.path.clone()}
                        write={|d: &mut LauncherDraft, v: String| d.path = v}
                    />
                    <DraftText
                        label="参数"
                        draft=draft
                        read={|d: &LauncherDraft| d.args.clone()}
                        write={|d: &mut LauncherDraft, v: String| d.args = v}
                    />
                </Show>
                <Show when=move || kind() == LauncherKind::Group>
                    <div class="field group-members">
                        <span>"包含"</span>
                        {move || {
                            group_candidates()
                                .into_iter()
                                .map(|(id, name)| {
                                    view! {
                                        <label class="toggle">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || draft.with(|d| d.members.contains(&id))
                                                on:change=move |_| draft.update(|d| d.toggle_member(id))
                                            />
                                            <span>{name}</span>
                                        </label>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
                <DraftText
                    label="图标"
                    draft=draft
                    read={|d: &LauncherDraft| d.icon.clone()}
                    write={|d: &mut LauncherDraft, v: String| d.icon = v}
                />
                <DraftText
                    label="标签"
                    draft=draft
                    read={|d: &LauncherDraft| d.tags.clone()}
                    write={|d: &mut LauncherDraft, v: String| d.tags = v}
                    placeholder="逗号分隔"
                />
                <DraftText
                    label="快捷键"
                    draft=draft
                    read={|d: &LauncherDraft| d.hotkey.clone()}
                    write={|d: &mut LauncherDraft, v: String| d.hotkey = v}
                    placeholder="Ctrl+Alt+1"
                />
                {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                <div class="panel-actions">
                    <button class="primary" on:click=save>"保存"</button>
                    <button on:click=move |_| ctx.launcher_form.set(None)>"取消"</button>
                </div>
            </div>
        </div>
    }
}

/// Modal host; renders while `launcher_form` holds a launcher
#[component]
pub fn LauncherForm() -> impl IntoView {
    let ctx = use_app_context();
    move || {
        ctx.launcher_form
            .get()
            .map(|launcher| view! { <LauncherFormBody launcher=launcher /> })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: LauncherKind) -> LauncherDraft {
        LauncherDraft {
            name: "Docs".to_string(),
            kind,
            ..LauncherDraft::default()
        }
    }

    #[test]
    fn test_name_is_required() {
        let mut d = draft(LauncherKind::Web);
        d.name = "   ".to_string();
        d.url = "https://docs.rs".to_string();
        assert_eq!(d.validate(), Err(DraftError::MissingName));
    }

    #[test]
    fn test_web_needs_url() {
        let mut d = draft(LauncherKind::Web);
        assert_eq!(d.validate(), Err(DraftError::MissingUrl));
        d.url = " https://docs.rs ".to_string();
        d.path = "/ignored".to_string();
        let launcher = d.validate().unwrap();
        assert_eq!(launcher.url, "https://docs.rs");
        assert!(launcher.path.is_empty());
    }

    #[test]
    fn test_app_needs_path_and_splits_args() {
        let mut d = draft(LauncherKind::App);
        assert_eq!(d.validate(), Err(DraftError::MissingPath));
        d.path = "C:/Tools/code.exe".to_string();
        d.args = "  --new-window   .  ".to_string();
        let launcher = d.validate().unwrap();
        assert_eq!(launcher.args, vec!["--new-window", "."]);
    }

    #[test]
    fn test_group_needs_member_other_than_itself() {
        let mut d = draft(LauncherKind::Group);
        d.id = 7;
        d.members = vec![7];
        assert_eq!(d.validate(), Err(DraftError::EmptyGroup));
        d.toggle_member(3);
        let launcher = d.validate().unwrap();
        assert_eq!(launcher.items, vec![LauncherRef { launcher_id: 3 }]);
    }

    #[test]
    fn test_tags_and_hotkey() {
        let mut d = draft(LauncherKind::Web);
        d.url = "https://docs.rs".to_string();
        d.tags = "rust, docs，, ref ".to_string();
        d.hotkey = "Ctrl+".to_string();
        assert!(matches!(d.validate(), Err(DraftError::Hotkey(_))));
        d.hotkey = "Ctrl+Alt+D".to_string();
        let launcher = d.validate().unwrap();
        assert_eq!(launcher.tags, vec!["rust", "docs", "ref"]);
        assert_eq!(launcher.hotkey, "Ctrl+Alt+D");
    }

    #[test]
    fn test_round_trip_from_launcher_keeps_members() {
        let launcher = Launcher {
            id: 4,
            name: "Morning".to_string(),
            kind: LauncherKind::Group,
            items: vec![LauncherRef { launcher_id: 1 }, LauncherRef { launcher_id: 2 }],
            ..Launcher::default()
        };
        let d = LauncherDraft::from_launcher(&launcher);
        assert_eq!(d.members, vec![1, 2]);
        assert_eq!(d.validate().unwrap(), launcher);
    }
}
