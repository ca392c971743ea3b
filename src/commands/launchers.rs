//! Launcher Commands

use serde::Serialize;

use super::{query, send, BridgeError};
use crate::models::Launcher;

#[derive(Serialize)]
struct LauncherArgs<'a> {
    launcher: &'a Launcher,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LauncherIdArgs {
    launcher_id: i64,
}

pub async fn get_launchers() -> Result<Vec<Launcher>, BridgeError> {
    let launchers: Option<Vec<Launcher>> = query("get_launchers").await?;
    Ok(launchers.unwrap_or_default())
}

/// Create (id 0) or update a launcher
pub async fn save_launcher(launcher: &Launcher) -> Result<(), BridgeError> {
    send("save_launcher", &LauncherArgs { launcher }).await
}

pub async fn delete_launcher(launcher_id: i64) -> Result<(), BridgeError> {
    send("delete_launcher", &LauncherIdArgs { launcher_id }).await
}

pub async fn run_launcher(launcher_id: i64) -> Result<(), BridgeError> {
    send("run_launcher", &LauncherIdArgs { launcher_id }).await
}
