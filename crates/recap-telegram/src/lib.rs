//! # recap-telegram
//!
//! Minimal Telegram Bot API client: long polling plus the send surface the
//! bot needs. JSON over HTTP via reqwest; only the fields the bot actually
//! reads are modeled.

pub mod client;
pub mod error;
pub mod types;

pub use client::BotClient;
pub use error::TelegramError;
