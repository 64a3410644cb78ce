/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/report.rs
 * Responsibility: Assemble parse results into transport-ready report text.
 */

use crate::chunk::chunk_lines;
use crate::classify::{classify, Classification};
use crate::config::ReportConfig;
use crate::parser::{scan, split_lines, LogTextError, ParseResult};

pub const EMBED_TITLE: &str = "Parse results";
pub const EMBED_AUTHOR: &str = "ZeepScout";
pub const MODS_FIELD_NAME: &str = "\u{1f6e0}\u{fe0f} Installed mods";
pub const OUTDATED_FIELD_NAME: &str = "\u{26a0}\u{fe0f} Incompatible mods (remove these!)";
pub const ERRORS_FIELD_NAME: &str = "\u{1f6a9} Exceptions";

/// Sent alongside the report when any mod-loader activity was observed.
pub const MOD_ADVISORY: &str = "you seem to have mods installed. It is essential that you remove these mods before reporting bugs.\n\
Mods can introduce unexpected behaviour and interfere with the inner workings of the game resulting in bugs that aren't caused by the game itself.\n\n\
Please remove all your mods and try to reproduce the bug.\n\
The easiest way to remove your mods is by renaming the `BepInEx` folder in your game directory to anything else.";

/// Prompt for threads opened without a usable log attachment.
pub const MISSING_LOG_PROMPT: &str = "Please attach a valid `Player.log` file to this thread.\n\
This can be found at `%localappdata%low\\SteelPan Interactive\\Zeepkist`";

/// Everything the transport layer needs to send, already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReport {
    pub has_mod_activity: bool,
    pub classification: Classification,
    /// Body of the installed-mods embed field.
    pub mods_field: String,
    /// Body of the incompatible-mods field; absent when no reference entries
    /// are configured at all.
    pub outdated_field: Option<String>,
    /// Body of the exceptions summary field.
    pub errors_field: String,
    /// Ordered follow-up message bodies, one or more per reported exception.
    pub error_messages: Vec<String>,
}

/// Run the whole pipeline on raw log text: split, scan, classify, render.
/// The two line-splitting preconditions are the only reportable failures;
/// malformed content degrades to empty lists inside the scan.
pub fn build_report(content: &str, settings: &ReportConfig) -> Result<LogReport, LogTextError> {
    let lines = split_lines(content)?;
    let parsed = scan(lines);
    Ok(render(parsed, settings))
}

fn render(parsed: ParseResult, settings: &ReportConfig) -> LogReport {
    let classification = classify(&parsed.mods, &settings.outdated_mods);

    let mods_field = if parsed.has_mod_activity && !classification.current.is_empty() {
        bullet_list(&classification.current)
    } else {
        "No mods found".to_string()
    };

    let outdated_field = if settings.outdated_mods.is_empty() {
        None
    } else if classification.outdated.is_empty() {
        Some("No incompatible mods found".to_string())
    } else {
        Some(bullet_list(&classification.outdated))
    };

    let errors_field = if parsed.error_blocks.is_empty() {
        "No exceptions found".to_string()
    } else {
        format!(
            "Found {} exceptions, see following messages",
            parsed.error_blocks.len()
        )
    };

    let error_messages = render_error_messages(&parsed.error_blocks, settings);

    LogReport {
        has_mod_activity: parsed.has_mod_activity,
        classification,
        mods_field,
        outdated_field,
        errors_field,
        error_messages,
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One message per reported block, or a numbered run of sub-chunk messages
/// when the block alone exceeds the transport limit. Blocks beyond the
/// configured cap are dropped from the follow-ups; the summary field still
/// counts them.
fn render_error_messages(error_blocks: &[String], settings: &ReportConfig) -> Vec<String> {
    let mut messages = Vec::new();

    for (index, block) in error_blocks
        .iter()
        .take(settings.max_reported_errors)
        .enumerate()
    {
        let number = index + 1;
        if block.len() > settings.message_limit {
            let chunks = chunk_lines(block, settings.message_limit);
            let total = chunks.len();
            for (part, chunk) in chunks.iter().enumerate() {
                messages.push(format!(
                    "Exception {} ({}/{})\n```{}```",
                    number,
                    part + 1,
                    total,
                    chunk
                ));
            }
        } else {
            messages.push(format!("Exception {}\n```{}```", number, block));
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;

    fn settings() -> ReportConfig {
        ReportConfig::default()
    }

    #[test]
    fn test_build_report_concrete_scenario() {
        let log = "[Info: BepInEx] Loading [com.metalted.zeepkist.hotbar]\r\n\
                   Game started\r\n\
                   System.Exception: boom\r\n\
                   at Foo()\r\n\
                   at Bar()\r\n\
                   End";
        // CRLF splitting leaves the indented lines intact only when they
        // really are indented; rebuild with true leading spaces.
        let log = log.replace("at Foo()", "   at Foo()").replace("at Bar()", "   at Bar()");

        let report = build_report(&log, &settings()).unwrap();

        assert!(report.has_mod_activity);
        assert_eq!(
            report.classification.outdated,
            vec!["com.metalted.zeepkist.hotbar"]
        );
        assert!(report.classification.current.is_empty());
        assert_eq!(report.error_messages.len(), 1);
        assert_eq!(
            report.error_messages[0],
            "Exception 1\n```System.Exception: boom\nat Foo()\nat Bar()```"
        );
        assert_eq!(report.errors_field, "Found 1 exceptions, see following messages");
    }

    #[test]
    fn test_build_report_rejects_unsplittable_content() {
        assert_eq!(build_report("", &settings()), Err(LogTextError::Empty));
        assert_eq!(
            build_report("no breaks here", &settings()),
            Err(LogTextError::NoLineBreak)
        );
    }

    #[test]
    fn test_mods_field_placeholder_without_activity() {
        let report = build_report("Game started\nGame quit\n", &settings()).unwrap();
        assert!(!report.has_mod_activity);
        assert_eq!(report.mods_field, "No mods found");
        assert_eq!(report.errors_field, "No exceptions found");
        assert_eq!(
            report.outdated_field.as_deref(),
            Some("No incompatible mods found")
        );
    }

    #[test]
    fn test_outdated_field_gated_on_reference_entries() {
        let mut custom = settings();
        custom.outdated_mods.clear();
        let report = build_report("[Info: BepInEx] Loading [Hotbar]\n", &custom).unwrap();
        assert!(report.outdated_field.is_none());
        assert_eq!(report.mods_field, "- Hotbar");
    }

    #[test]
    fn test_current_mods_render_as_sorted_bullets() {
        let log = "[Info: BepInEx] Loading [Zulu]\n[Info: BepInEx] Loading [Alpha]\n";
        let mut custom = settings();
        custom.outdated_mods = vec!["NothingMatches".to_string()];
        let report = build_report(log, &custom).unwrap();
        assert_eq!(report.mods_field, "- Alpha\n- Zulu");
    }

    #[test]
    fn test_oversized_block_is_split_into_numbered_parts() {
        let mut custom = settings();
        custom.message_limit = 40;
        let trace_lines: Vec<String> =
            (0..6).map(|i| format!("   at Frame{}.Invoke()", i)).collect();
        let log = format!("System.Exception: deep\n{}\nend\n", trace_lines.join("\n"));

        let report = build_report(&log, &custom).unwrap();

        assert!(report.error_messages.len() > 1);
        let total = report.error_messages.len();
        for (i, message) in report.error_messages.iter().enumerate() {
            let header = format!("Exception 1 ({}/{})", i + 1, total);
            assert!(message.starts_with(&header), "unexpected header in {:?}", message);
            assert!(message.contains("```"));
        }
    }

    #[test]
    fn test_error_messages_capped_at_configured_maximum() {
        let mut custom = settings();
        custom.max_reported_errors = 2;
        let log = "A.Exception: one\nB.Exception: two\nC.Exception: three\n";
        let report = build_report(log, &custom).unwrap();

        assert_eq!(report.errors_field, "Found 3 exceptions, see following messages");
        assert_eq!(report.error_messages.len(), 2);
        assert!(report.error_messages[0].starts_with("Exception 1\n"));
        assert!(report.error_messages[1].starts_with("Exception 2\n"));
    }
}
