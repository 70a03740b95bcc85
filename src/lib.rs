//! titleforged - stream-title cleanup for media libraries
//!
//! This library crate exposes the config loader and library scanner for
//! integration testing. The title engine itself lives in the `tf-*` crates.

pub mod config;
pub mod scanner;
