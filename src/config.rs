/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/config.rs
 * Responsibility: YAML configuration structure and loading
 */
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mod identifiers known to break current game builds. Matched as
/// case-sensitive substrings of the loaded plugin names.
static DEFAULT_OUTDATED_MODS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "net.tnrd.zeepkist.utilities",
        "com.metalted.zeepkist.blueprints",
        "com.metalted.zeepkist.dragselect",
        "com.metalted.zeepkist.hotbar",
        "com.metalted.zeepkist.selectioncountergui",
        "com.metalted.zeepkist.notooltip",
        "com.metalted.zeepkist.uiinjector",
        "UIInjector",
        "Hotbar",
        "Selection Counter GUI",
        "BlueprintsPlus",
        "Blueprints+",
        "Blueprints",
        "Level Editor Drag Select",
        "No Tooltip",
        "RecordsMod",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
});

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DiscordConfig {
    pub token: String,
    /// Guild whose active threads are seeded on startup.
    pub guild_id: u64,
    /// Forum channel whose new threads are scouted for logs.
    pub forum_id: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    /// Per-message character cap of the transport. Discord's legacy value.
    #[serde(default = "default_message_limit")]
    pub message_limit: usize,
    /// At most this many exception blocks get follow-up messages.
    #[serde(default = "default_max_reported_errors")]
    pub max_reported_errors: usize,
    /// Reference list of known-incompatible mod identifiers.
    #[serde(default = "default_outdated_mods")]
    pub outdated_mods: Vec<String>,
}

fn default_message_limit() -> usize {
    2000
}

fn default_max_reported_errors() -> usize {
    5
}

fn default_outdated_mods() -> Vec<String> {
    DEFAULT_OUTDATED_MODS.clone()
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            message_limit: default_message_limit(),
            max_reported_errors: default_max_reported_errors(),
            outdated_mods: default_outdated_mods(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file at {:?}", path.as_ref()))?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
