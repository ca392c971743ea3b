//! Plugin Commands

use serde::Serialize;

use super::{query, send, send_empty, BridgeError};
use crate::models::Plugin;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PluginEnabledArgs<'a> {
    plugin_id: &'a str,
    enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PluginIdArgs<'a> {
    plugin_id: &'a str,
}

pub async fn get_plugins() -> Result<Vec<Plugin>, BridgeError> {
    let plugins: Option<Vec<Plugin>> = query("get_plugins").await?;
    Ok(plugins.unwrap_or_default())
}

pub async fn set_plugin_enabled(plugin_id: &str, enabled: bool) -> Result<(), BridgeError> {
    send("set_plugin_enabled", &PluginEnabledArgs { plugin_id, enabled }).await
}

pub async fn reload_plugin(plugin_id: &str) -> Result<(), BridgeError> {
    send("reload_plugin", &PluginIdArgs { plugin_id }).await
}

pub async fn reload_plugins() -> Result<(), BridgeError> {
    send_empty("reload_plugins").await
}
