//! # recap-shared
//!
//! Domain types, error taxonomy, and tuning constants shared across the
//! recap crates.

pub mod constants;
pub mod error;
pub mod types;

pub use error::RecapError;
pub use types::{CaptionMode, ChatId, ContentRef, MediaItem, MediaKind};
