//! Bindings Panel Component
//!
//! Model picker, per-category motion/expression editor and binding presets.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;
use wasm_bindgen_futures::JsFuture;

use super::settings_panel::{push_settings, SettingsTarget};
use super::ToolPanel;
use crate::bindings::{MotionBinding, Preset, BINDING_CATEGORIES};
use crate::commands;
use crate::context::{use_app_context, AppContext};
use crate::dom::download_text;
use crate::panels::PanelId;
use crate::settings::delta;
use crate::store::AppStateStoreFields;

/// Re-read bindings and presets after a host-side change
fn refresh_bindings(ctx: AppContext, model_path: String) {
    let store = ctx.store;
    spawn_local(async move {
        match commands::get_model_bindings(&model_path).await {
            Ok(bindings) => store.bindings().set(bindings),
            Err(err) => commands::report("load bindings", Err(err)),
        }
        match commands::get_available_presets().await {
            Ok(presets) => store.presets().set(presets),
            Err(err) => commands::report("load presets", Err(err)),
        }
    });
}

async fn read_file(file: web_sys::File) -> Result<String, String> {
    let text = JsFuture::from(file.text()).await.map_err(|e| format!("{:?}", e))?;
    text.as_string().ok_or_else(|| "文件不是文本".to_string())
}

/// `<select>` with an empty "none" option followed by `options`
#[component]
fn ChoiceSelect(
    options: Signal<Vec<String>>,
    selected: Signal<Option<String>>,
    #[prop(into)] on_pick: Callback<Option<String>>,
) -> impl IntoView {
    view! {
        <select on:change=move |ev| {
            let value = event_target_value(&ev);
            on_pick.run((!value.is_empty()).then_some(value));
        }>
            <option value="" selected=move || selected.get().is_none()>"（无）"</option>
            {move || {
                let current = selected.get();
                options
                    .get()
                    .into_iter()
                    .map(|name| {
                        let is_selected = current.as_deref() == Some(name.as_str());
                        view! {
                            <option value=name.clone() selected=is_selected>{name.clone()}</option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}

/// One editable category/key row
#[component]
fn BindingRow(
    category: &'static str,
    binding_key: &'static str,
    label: &'static str,
    groups: RwSignal<Vec<String>>,
    expressions: RwSignal<Vec<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let current = Memo::new(move |_| {
        store.bindings().with(|b| {
            if category == "default" {
                b.default.clone()
            } else {
                b.lookup(category, binding_key)
            }
        })
    });

    let save = move |binding: MotionBinding| {
        let model_path = store.bindings().with_untracked(|b| b.model_path.clone());
        store.bindings().update(|b| b.set(category, binding_key, binding.clone()));
        spawn_local(async move {
            commands::report(
                "save binding",
                commands::set_binding(&model_path, category, binding_key, &binding).await,
            );
        });
    };

    let pick_motion = move |motion: Option<String>| {
        let expression = current.with_untracked(|b| b.expression.clone());
        save(MotionBinding::new(motion.as_deref(), expression.as_deref()));
    };
    let pick_expression = move |expression: Option<String>| {
        let motion = current.with_untracked(|b| b.motion.clone());
        save(MotionBinding::new(motion.as_deref(), expression.as_deref()));
    };
    let preview = move |_| {
        let binding = current.get_untracked();
        ctx.avatar.with_value(|a| a.play(&binding));
    };

    view! {
        <div class="binding-row">
            <span class="binding-key">{label}</span>
            <ChoiceSelect
                options=groups.into()
                selected=Signal::derive(move || current.with(|b| b.motion.clone()))
                on_pick=pick_motion
            />
            <ChoiceSelect
                options=expressions.into()
                selected=Signal::derive(move || current.with(|b| b.expression.clone()))
                on_pick=pick_expression
            />
            <button title="预览" on:click=preview>"▶"</button>
        </div>
    }
}

#[component]
pub fn BindingsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let groups = RwSignal::new(Vec::<String>::new());
    let expressions = RwSignal::new(Vec::<String>::new());
    let preset_name = RwSignal::new(String::new());
    let file_ref = NodeRef::<leptos::html::Input>::new();

    // Motion lists come from the attached model; its bindings arrive right after it
    Effect::new(move |_| {
        let _ = ctx.panels.with(|p| p.is_visible(PanelId::Bindings));
        let _ = store.bindings().with(|b| b.model_path.clone());
        let avatar = ctx.avatar();
        groups.set(avatar.motion_groups());
        expressions.set(avatar.expressions());
    });

    let model_path = move || store.settings().with(|s| s.string("model_path"));

    let refresh_models = move |_| {
        spawn_local(async move {
            match commands::get_available_models().await {
                Ok(models) => store.models().set(models),
                Err(err) => commands::report("load models", Err(err)),
            }
        });
    };

    let pick_model = move |ev| {
        let path = event_target_value(&ev);
        if path.is_empty() {
            return;
        }
        push_settings(ctx, delta(json!({ "model_path": path })), SettingsTarget::General);
    };

    let save_preset = move |_| {
        let name = preset_name.get_untracked().trim().to_string();
        if name.is_empty() {
            ctx.log_status("请输入预设名称");
            return;
        }
        preset_name.set(String::new());
        let path = model_path();
        spawn_local(async move {
            match commands::save_preset(&path, &name).await {
                Ok(()) => {
                    ctx.log_status(format!("预设已保存：{}", name));
                    refresh_bindings(ctx, path);
                }
                Err(err) => commands::report("save preset", Err(err)),
            }
        });
    };

    let apply_preset = move |id: String| {
        let path = model_path();
        spawn_local(async move {
            match commands::apply_preset(&path, &id).await {
                Ok(()) => refresh_bindings(ctx, path),
                Err(err) => commands::report("apply preset", Err(err)),
            }
        });
    };

    let export = move |_| {
        let path = model_path();
        spawn_local(async move {
            let preset = match commands::export_preset(&path).await {
                Ok(preset) => preset,
                Err(err) => {
                    commands::report("export preset", Err(err));
                    return;
                }
            };
            let text = match serde_json::to_string_pretty(&preset) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("export preset: {}", err);
                    return;
                }
            };
            let filename = format!("{}.json", if preset.name.is_empty() { "preset" } else { preset.name.as_str() });
            if let Err(err) = download_text(&filename, &text, "application/json") {
                log::warn!("download preset: {:?}", err);
            }
        });
    };

    let import = move |_| {
        let Some(input) = file_ref.get_untracked() else { return };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
        input.set_value("");
        let path = model_path();
        spawn_local(async move {
            let preset = match read_file(file).await.and_then(|text| Preset::parse(&text).map_err(|e| e.to_string())) {
                Ok(preset) => preset,
                Err(err) => {
                    ctx.log_status(format!("导入失败：{}", err));
                    return;
                }
            };
            match commands::import_preset(&preset).await {
                Ok(()) => {
                    ctx.log_status(format!("已导入预设：{}", preset.name));
                    refresh_bindings(ctx, path);
                }
                Err(err) => ctx.log_status(format!("导入失败：{}", err)),
            }
        });
    };

    let open_import = move |_| {
        if let Some(input) = file_ref.get_untracked() {
            input.click();
        }
    };

    view! {
        <ToolPanel id=PanelId::Bindings class="wide">
            <div class="panel-row">
                <select class="model-select" on:change=pick_model>
                    {move || {
                        let current = model_path();
                        store
                            .models()
                            .get()
                            .into_iter()
                            .map(|model| {
                                let selected = model.path == current;
                                let name = model.display_name().to_string();
                                view! {
                                    <option value=model.path selected=selected>{name}</option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
                <button on:click=refresh_models>"刷新"</button>
            </div>

            <div class="binding-table">
                <BindingRow
                    category="default"
                    binding_key="default"
                    label="默认"
                    groups=groups
                    expressions=expressions
                />
                {BINDING_CATEGORIES
                    .iter()
                    .map(|&(category, title, keys)| {
                        view! {
                            <div class="binding-category">
                                <div class="binding-category-title">{title}</div>
                                {keys
                                    .iter()
                                    .map(|&(key, label)| {
                                        view! {
                                            <BindingRow
                                                category=category
                                                binding_key=key
                                                label=label
                                                groups=groups
                                                expressions=expressions
                                            />
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="preset-section">
                <div class="panel-row">
                    <input
                        type="text"
                        placeholder="预设名称"
                        prop:value=move || preset_name.get()
                        on:input=move |ev| preset_name.set(event_target_value(&ev))
                    />
                    <button on:click=save_preset>"保存预设"</button>
                </div>
                <ul class="preset-list">
                    {move || {
                        store
                            .presets()
                            .get()
                            .into_iter()
                            .map(|(id, preset)| {
                                let name = if preset.name.is_empty() { id.clone() } else { preset.name };
                                view! {
                                    <li class="preset-item">
                                        <span>{name}</span>
                                        <button on:click=move |_| apply_preset(id.clone())>"应用"</button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <div class="panel-actions">
                    <button on:click=export>"导出"</button>
                    <button on:click=open_import>"导入"</button>
                    <input
                        type="file"
                        accept=".json,application/json"
                        class="hidden"
                        node_ref=file_ref
                        on:change=import
                    />
                </div>
            </div>
        </ToolPanel>
    }
}
