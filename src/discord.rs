/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/discord.rs
 * Responsibility: Gateway adapters. Forum-thread and follow-up-message triggers feeding the report core.
 */

use serenity::async_trait;
use serenity::http::Http;
use serenity::model::channel::{Attachment, GuildChannel, Message, PartialGuildChannel};
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id::{ChannelId, GuildId, MessageId};
use serenity::prelude::*;

use crate::config::Config;
use crate::parser::LogTextError;
use crate::report::{
    self, build_report, LogReport, EMBED_AUTHOR, EMBED_TITLE, ERRORS_FIELD_NAME, MODS_FIELD_NAME,
    OUTDATED_FIELD_NAME,
};
use crate::threads::ThreadRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

struct Scout {
    config: Config,
    threads: Arc<RwLock<ThreadRepository>>,
}

#[async_trait]
impl EventHandler for Scout {
    async fn ready(&self, ctx: Context, ready: Ready) {
        println!("✅ {} is connected and scouting!", ready.user.name);

        if self.config.discord.guild_id == 0 || self.config.discord.forum_id == 0 {
            eprintln!("⚠️ Guild or forum id not configured; existing threads will not be seeded.");
            return;
        }

        // Threads that were already open before this process started keep
        // responding to follow-up logs after a restart.
        let guild_id = GuildId::new(self.config.discord.guild_id);
        let forum_id = ChannelId::new(self.config.discord.forum_id);
        match ctx.http.get_guild_active_threads(guild_id).await {
            Ok(data) => {
                let mut seeded = 0usize;
                let mut repo = self.threads.write().await;
                for thread in data.threads {
                    if thread.parent_id == Some(forum_id) {
                        repo.add_thread(thread.id);
                        repo.mark_processed(thread.id);
                        seeded += 1;
                    }
                }
                println!("📚 Seeded {} active forum threads", seeded);
            }
            Err(e) => eprintln!("⚠️ Failed to list active guild threads: {:?}", e),
        }
    }

    async fn thread_create(&self, ctx: Context, thread: GuildChannel) {
        if self.config.discord.forum_id == 0
            || thread.parent_id != Some(ChannelId::new(self.config.discord.forum_id))
        {
            return;
        }

        {
            let mut repo = self.threads.write().await;
            if repo.has_thread(thread.id) {
                return;
            }
            repo.add_thread(thread.id);
        }

        println!("🧵 New bug-report thread: #{}", thread.name);

        // A forum thread's starter message shares the thread's id.
        let starter = ctx
            .http
            .get_message(thread.id, MessageId::new(thread.id.get()))
            .await;

        match starter {
            Ok(message) => {
                let handled = self.process_log_message(&ctx, &message).await;
                match handled {
                    Ok(true) => {}
                    Ok(false) => {
                        if let Err(e) =
                            send_plain(&ctx.http, thread.id, report::MISSING_LOG_PROMPT).await
                        {
                            eprintln!("❌ Failed to send missing-log prompt: {:?}", e);
                        }
                    }
                    Err(e) => eprintln!("❌ Failed to process starter log: {:?}", e),
                }
            }
            Err(e) => eprintln!("⚠️ Failed to fetch starter message: {:?}", e),
        }

        self.threads.write().await.mark_processed(thread.id);
    }

    async fn thread_delete(
        &self,
        _ctx: Context,
        thread: PartialGuildChannel,
        _full_thread_data: Option<GuildChannel>,
    ) {
        self.threads.write().await.remove_thread(thread.id);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if !self.threads.read().await.has_processed(msg.channel_id) {
            return;
        }

        if let Err(e) = self.process_log_message(&ctx, &msg).await {
            eprintln!("❌ Failed to process log in #{}: {:?}", msg.channel_id, e);
        }
    }
}

impl Scout {
    /// Shared processing path for both triggers. Returns whether a log
    /// attachment was found on the message at all.
    async fn process_log_message(&self, ctx: &Context, msg: &Message) -> anyhow::Result<bool> {
        let Some(attachment) = find_player_log(&msg.attachments) else {
            return Ok(false);
        };

        println!(
            "📥 Downloading {} ({} bytes) from #{}",
            attachment.filename, attachment.size, msg.channel_id
        );
        let content = download_attachment(&attachment.url).await?;

        let report = match build_report(&content, &self.config.report) {
            Ok(report) => report,
            Err(err) => {
                let notice = match err {
                    LogTextError::Empty => "Attachment is empty.",
                    LogTextError::NoLineBreak => "Attachment has no line breaks.",
                };
                send_reply(&ctx.http, msg, notice).await?;
                return Ok(true);
            }
        };

        let embed_map = json!({
            "embeds": [report_embed(&report)],
            "message_reference": reference_json(msg),
        });
        ctx.http.send_message(msg.channel_id, vec![], &embed_map).await?;

        for body in &report.error_messages {
            send_reply(&ctx.http, msg, body).await?;
        }

        if report.has_mod_activity {
            let advisory = format!("<@{}> {}", msg.author.id, report::MOD_ADVISORY);
            send_reply(&ctx.http, msg, &advisory).await?;
        }

        Ok(true)
    }
}

/// Logs are only accepted under the game's own dump name, `Player.log`
/// (or rotated variants such as `Player-prev.log`).
fn is_player_log(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    lower.starts_with("player") && lower.ends_with(".log")
}

fn find_player_log(attachments: &[Attachment]) -> Option<&Attachment> {
    attachments
        .iter()
        .find(|attachment| is_player_log(&attachment.filename))
}

async fn download_attachment(url: &str) -> anyhow::Result<String> {
    let client = reqwest::Client::new();
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

fn reference_json(msg: &Message) -> Value {
    json!({
        "message_id": msg.id.to_string(),
        "channel_id": msg.channel_id.to_string(),
        "fail_if_not_exists": false,
    })
}

/// The report embed, as the raw payload the REST send expects.
fn report_embed(report: &LogReport) -> Value {
    let mut fields = vec![json!({
        "name": MODS_FIELD_NAME,
        "value": report.mods_field,
        "inline": false,
    })];

    if let Some(outdated) = &report.outdated_field {
        fields.push(json!({
            "name": OUTDATED_FIELD_NAME,
            "value": outdated,
            "inline": false,
        }));
    }

    fields.push(json!({
        "name": ERRORS_FIELD_NAME,
        "value": report.errors_field,
        "inline": false,
    }));

    json!({
        "title": EMBED_TITLE,
        "author": { "name": EMBED_AUTHOR },
        "fields": fields,
    })
}

async fn send_plain(http: &Http, channel_id: ChannelId, content: &str) -> anyhow::Result<Message> {
    let map = json!({ "content": content });
    let msg = http.send_message(channel_id, vec![], &map).await?;
    Ok(msg)
}

async fn send_reply(http: &Http, reply_to: &Message, content: &str) -> anyhow::Result<Message> {
    let map = json!({
        "content": content,
        "message_reference": reference_json(reply_to),
    });
    let msg = http.send_message(reply_to.channel_id, vec![], &map).await?;
    Ok(msg)
}

pub async fn start_listening(config: Config) -> anyhow::Result<()> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let token = config.discord.token.clone();
    let handler = Scout {
        config,
        threads: Arc::new(RwLock::new(ThreadRepository::default())),
    };

    let mut client = Client::builder(&token, intents).event_handler(handler).await?;
    client.start().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;

    #[test]
    fn test_is_player_log_accepts_case_insensitive_variants() {
        assert!(is_player_log("Player.log"));
        assert!(is_player_log("player-prev.LOG"));
        assert!(!is_player_log("output_log.txt"));
        assert!(!is_player_log("NotPlayer.log.png"));
    }

    #[test]
    fn test_report_embed_carries_all_fields_in_order() {
        let report = build_report(
            "[Info: BepInEx] Loading [Hotbar]\nGame started\n",
            &ReportConfig::default(),
        )
        .unwrap();
        let embed = report_embed(&report);

        assert_eq!(embed["title"], EMBED_TITLE);
        assert_eq!(embed["author"]["name"], EMBED_AUTHOR);
        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0]["name"], MODS_FIELD_NAME);
        assert_eq!(fields[1]["name"], OUTDATED_FIELD_NAME);
        assert_eq!(fields[2]["name"], ERRORS_FIELD_NAME);
    }

    #[test]
    fn test_report_embed_drops_outdated_field_without_reference_list() {
        let mut settings = ReportConfig::default();
        settings.outdated_mods.clear();
        let report = build_report("Game started\nGame quit\n", &settings).unwrap();
        let embed = report_embed(&report);

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], MODS_FIELD_NAME);
        assert_eq!(fields[1]["name"], ERRORS_FIELD_NAME);
    }
}
