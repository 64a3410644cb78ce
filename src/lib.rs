/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/lib.rs
 * Responsibility: Shared library modules
 */

pub mod chunk;
pub mod classify;
pub mod config;
pub mod discord;
pub mod init;
pub mod parser;
pub mod report;
pub mod threads;
