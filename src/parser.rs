/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/parser.rs
 * Responsibility: Single-pass Player.log scanner for mod activity and exception blocks.
 */

use std::fmt;

/// Any line produced by the mod-loading subsystem carries this fragment.
pub const MOD_LOADER_MARKER: &str = "BepInEx]";
/// A plugin load announcement: the mod name sits between this and the next `]`.
pub const MOD_LOADING_MARKER: &str = "BepInEx] Loading [";
/// Start of a stack-trace style error block.
pub const EXCEPTION_MARKER: &str = "Exception:";

/// Preconditions the scanner cannot recover from. Everything else (missing
/// markers, a trace left open at EOF) degrades gracefully inside [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTextError {
    /// The attachment body was empty.
    Empty,
    /// The text contains neither `\r\n` nor `\n` and cannot be a multi-line log.
    NoLineBreak,
}

impl fmt::Display for LogTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTextError::Empty => write!(f, "log content is empty"),
            LogTextError::NoLineBreak => write!(f, "log content has no line breaks"),
        }
    }
}

impl std::error::Error for LogTextError {}

/// Everything a single scan discovers. Built by accumulation, read-only after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// True when any mod-loader line was seen, even if no plugin loaded.
    pub has_mod_activity: bool,
    /// Plugin names in scan order. Duplicates survive if the log repeats them.
    pub mods: Vec<String>,
    /// Newline-joined trimmed lines of each captured exception block, in scan order.
    pub error_blocks: Vec<String>,
}

/// Split raw log text on its line-break convention: `\r\n` wins if present
/// anywhere, then `\n`. Text without either is rejected as unparseable.
pub fn split_lines(content: &str) -> Result<Vec<&str>, LogTextError> {
    if content.is_empty() {
        return Err(LogTextError::Empty);
    }
    if content.contains("\r\n") {
        Ok(content.split("\r\n").collect())
    } else if content.contains('\n') {
        Ok(content.split('\n').collect())
    } else {
        Err(LogTextError::NoLineBreak)
    }
}

/// Single forward pass over the lines of a Player.log.
///
/// Error capture is a two-state machine. While capturing, the *untrimmed*
/// line decides the block boundary: an empty line or a line without leading
/// indentation closes the block before anything else is evaluated for that
/// line. An exception marker appearing while capture is already open does not
/// start a nested block; the capture simply continues. A block still open at
/// end of input is flushed.
pub fn scan<'a, I>(lines: I) -> ParseResult
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = ParseResult::default();
    let mut capturing = false;
    let mut current_block: Vec<&str> = Vec::new();

    for line in lines {
        let trimmed = line.trim();

        if trimmed.contains(MOD_LOADER_MARKER) {
            result.has_mod_activity = true;
        }

        if let Some((_, after)) = trimmed.split_once(MOD_LOADING_MARKER) {
            let name = match after.find(']') {
                Some(end) => &after[..end],
                None => after,
            };
            result.mods.push(name.to_string());
        }

        if capturing && (line.is_empty() || !line.starts_with(' ')) {
            result.error_blocks.push(current_block.join("\n"));
            current_block.clear();
            capturing = false;
        }

        if trimmed.contains(EXCEPTION_MARKER) {
            capturing = true;
        }

        if capturing {
            current_block.push(trimmed);
        }
    }

    // End-of-input is a valid block terminator.
    if capturing {
        result.error_blocks.push(current_block.join("\n"));
    }

    result
}
