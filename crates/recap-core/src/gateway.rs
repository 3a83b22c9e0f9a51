//! Collaborator contract toward the messaging platform.
//!
//! The engine drives all outbound effects through this trait; the binary
//! crate implements it over the real platform client, tests implement it
//! with a recorder.

use async_trait::async_trait;
use thiserror::Error;

use recap_shared::types::{CaptionMode, ChatId};

use crate::batch::CaptionedItem;

/// Failure reported by the platform collaborator for one send operation.
///
/// Delivery failures are per item and never fatal: the engine records
/// them, continues with the rest of the batch, and summarizes at the end.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Plain status or help text to the chat.
    async fn send_notice(&self, chat: ChatId, text: &str) -> Result<(), GatewayError>;

    /// Present the caption-mode menu for a settled batch of `item_count`
    /// items. The user's pick comes back later as its own event.
    async fn present_modes(
        &self,
        chat: ChatId,
        item_count: usize,
        modes: &[CaptionMode],
    ) -> Result<(), GatewayError>;

    /// Prompt for the mode's text input (`step` is 1 or 2).
    async fn request_input(
        &self,
        chat: ChatId,
        mode: CaptionMode,
        step: u8,
    ) -> Result<(), GatewayError>;

    /// Send one item with its final caption.
    async fn deliver_item(&self, chat: ChatId, item: &CaptionedItem) -> Result<(), GatewayError>;

    /// Send one bounded album (2 to 10 groupable items).
    async fn deliver_album(
        &self,
        chat: ChatId,
        items: &[CaptionedItem],
    ) -> Result<(), GatewayError>;
}
