/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/init.rs
 * Responsibility: Home directory resolution and first-run configuration
 */

use anyhow::{Context, Result};
use dirs::home_dir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "zeepscout.yml";

const CONFIG_TEMPLATE: &str = r#"discord:
  token: "YOUR_DISCORD_TOKEN"
  guild_id: 0
  forum_id: 0
# report:
#   message_limit: 2000
#   max_reported_errors: 5
#   outdated_mods: []   # omit to use the built-in incompatibility list
"#;

/// Resolve the scout's home directory.
/// Priority: CLI > Environment Variable > Default (~/.zeepscout)
pub fn resolve_home_path(cli_home: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_home {
        return path;
    }

    if let Ok(env_path) = std::env::var("ZEEPSCOUT_HOME") {
        return PathBuf::from(env_path);
    }

    home_dir()
        .expect("Could not locate home directory")
        .join(".zeepscout")
}

/// Ensure the home directory exists and carries a config file, scaffolding a
/// placeholder template on first run.
pub fn initialize_home(base_path: &Path) -> Result<PathBuf> {
    if !base_path.exists() {
        fs::create_dir_all(base_path)
            .with_context(|| format!("Failed to create home directory {:?}", base_path))?;
    }

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, CONFIG_TEMPLATE).context("Failed to write config template")?;
        println!(
            "📝 Initialized default {} — please configure your token and channel ids!",
            CONFIG_FILE
        );
    }

    Ok(config_path)
}

fn mask_secret(secret: &str) -> String {
    if secret.len() <= 5 {
        "***".to_string()
    } else {
        format!("***{}", &secret[secret.len() - 5..])
    }
}

fn prompt_line(label: &str) -> Result<String> {
    println!("{}", label);
    print!("> ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Interactive setup for the Discord token and channel ids.
pub fn run_interactive_setup(base_path: &Path, config: &mut crate::config::Config) -> Result<()> {
    println!("\n✨ ZeepScout Setup - configuring your log scout...");

    let env_token = std::env::var("DISCORD_BOT_TOKEN").ok();
    let token_label = if let Some(token) = &env_token {
        format!(
            "\n🤖 Discord Bot Token detected in environment: {}\nPress Enter to use it, or paste a new one:",
            mask_secret(token)
        )
    } else {
        "\n🤖 Please enter your Discord Bot Token:".to_string()
    };

    let entered = prompt_line(&token_label)?;
    if !entered.is_empty() {
        config.discord.token = entered;
    } else if let Some(token) = env_token {
        config.discord.token = token;
    } else if config.discord.token.contains("YOUR_") {
        anyhow::bail!("Discord Token cannot be empty.");
    }

    let guild = prompt_line("\n🏠 Guild ID (server the bot lives in):")?;
    if !guild.is_empty() {
        config.discord.guild_id = guild.parse().context("Guild ID must be a number")?;
    }

    let forum = prompt_line("\n🗂️ Forum channel ID (bug-report forum to scout):")?;
    if !forum.is_empty() {
        config.discord.forum_id = forum.parse().context("Forum ID must be a number")?;
    }

    let config_file = base_path.join(CONFIG_FILE);
    let updated_yaml = serde_yaml::to_string(&config)?;
    fs::write(&config_file, updated_yaml)?;
    println!("\n📝 Configuration saved to {}!", CONFIG_FILE);

    Ok(())
}
