/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/threads.rs
 * Responsibility: In-memory registry of tracked forum threads.
 */

use serenity::model::id::ChannelId;
use std::collections::HashMap;

/// Tracks which forum threads the scout has seen and which it has finished
/// processing. Follow-up messages are only parsed in processed threads, so a
/// thread being worked on cannot trigger the second adapter concurrently.
#[derive(Debug, Default)]
pub struct ThreadRepository {
    threads: HashMap<ChannelId, bool>,
}

impl ThreadRepository {
    pub fn add_thread(&mut self, thread_id: ChannelId) {
        self.threads.entry(thread_id).or_insert(false);
    }

    pub fn remove_thread(&mut self, thread_id: ChannelId) {
        self.threads.remove(&thread_id);
    }

    pub fn mark_processed(&mut self, thread_id: ChannelId) {
        self.threads.insert(thread_id, true);
    }

    pub fn has_thread(&self, thread_id: ChannelId) -> bool {
        self.threads.contains_key(&thread_id)
    }

    pub fn has_processed(&self, thread_id: ChannelId) -> bool {
        self.threads.get(&thread_id).copied().unwrap_or(false)
    }
}
