use zeepscout::config::Config;
use zeepscout::report::build_report;
use zeepscout::{discord, init};

use chrono::Local;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "ZeepScout - Zeepkist bug-report log scout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scout home directory (default: ~/.zeepscout)
    #[arg(long, global = true)]
    home: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the Discord gateway listener (default)
    Run,
    /// Interactive setup for the bot token and channel ids
    Setup,
    /// Parse a local Player.log and print the report to stdout
    Parse {
        /// Path to the log file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
   _____                ____                  _
  |__  /___  ___ _ __  / ___|  ___ ___  _   _| |_
    / // _ \/ _ \ '_ \ \___ \ / __/ _ \| | | | __|
   / /|  __/  __/ |_) | ___) | (_| (_) | |_| | |_
  /____\___|\___| .__/ |____/ \___\___/ \__,_|\__|
                |_|
    "#
    );

    let args = Cli::parse();
    let home_path = init::resolve_home_path(args.home);
    let config_file = init::initialize_home(&home_path)?;
    let mut config = Config::load(&config_file)?;

    match args.command.unwrap_or(Commands::Run) {
        Commands::Setup => {
            init::run_interactive_setup(&home_path, &mut config)?;
            return Ok(());
        }
        Commands::Parse { file } => {
            return run_local_parse(&file, &config);
        }
        Commands::Run => {
            // Prompt for missing credentials ONLY when running interactively.
            if config.discord.token.contains("YOUR_") && atty::is(atty::Stream::Stdin) {
                println!("✨ Placeholder configuration detected. Entering setup...");
                init::run_interactive_setup(&home_path, &mut config)?;
            }
            if config.discord.token.contains("YOUR_") {
                anyhow::bail!("Discord token is not configured; run `zeepscout setup` first.");
            }
        }
    }

    println!("🚀 ZeepScout is starting...");
    println!("Scout home: {:?}", home_path);
    println!("📖 Configuration loaded successfully!");

    discord::start_listening(config).await
}

/// Offline adapter: same core as the gateway triggers, output to stdout.
fn run_local_parse(file: &PathBuf, config: &Config) -> anyhow::Result<()> {
    let content = fs::read_to_string(file)?;
    let report = match build_report(&content, &config.report) {
        Ok(report) => report,
        Err(err) => anyhow::bail!("cannot parse {:?}: {}", file, err),
    };

    println!(
        "📋 Parse results for {:?} at {}",
        file,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("\n== Installed mods ==\n{}", report.mods_field);
    if let Some(outdated) = &report.outdated_field {
        println!("\n== Incompatible mods (remove these!) ==\n{}", outdated);
    }
    println!("\n== Exceptions ==\n{}", report.errors_field);
    for message in &report.error_messages {
        println!("\n{}", message);
    }
    if report.has_mod_activity {
        println!("\n⚠️ Mod-loader activity detected; ask the reporter to remove mods and retry.");
    }

    Ok(())
}
