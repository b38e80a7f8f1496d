//! Reelstream - byte-range video delivery
//!
//! This library crate exposes the server and streaming core for integration
//! testing and embedding.

pub mod config;
pub mod server;
pub mod streaming;
