//! [`Gateway`] implementation over the Bot API client.

use async_trait::async_trait;

use recap_core::batch::CaptionedItem;
use recap_core::{Gateway, GatewayError};
use recap_shared::types::{CaptionMode, ChatId, MediaKind};
use recap_telegram::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputMedia, SendKind};
use recap_telegram::{BotClient, TelegramError};

use crate::dispatch::{input_prompt, mode_button_label, mode_key};

pub struct TelegramGateway {
    client: BotClient,
}

impl TelegramGateway {
    pub fn new(client: BotClient) -> Self {
        Self { client }
    }
}

fn send_kind(kind: MediaKind) -> SendKind {
    match kind {
        MediaKind::Photo => SendKind::Photo,
        MediaKind::Video => SendKind::Video,
        MediaKind::Document => SendKind::Document,
        MediaKind::Animation => SendKind::Animation,
        MediaKind::Audio => SendKind::Audio,
        MediaKind::Voice => SendKind::Voice,
    }
}

/// `sendMediaGroup` entry type for a kind. Voice and animation never reach
/// album grouping; the batcher emits them individually.
fn group_type(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Photo => "photo",
        MediaKind::Video | MediaKind::Animation => "video",
        MediaKind::Document => "document",
        MediaKind::Audio | MediaKind::Voice => "audio",
    }
}

/// Two buttons per keyboard row, as the menu is laid out for the user.
fn mode_keyboard(modes: &[CaptionMode]) -> InlineKeyboardMarkup {
    let inline_keyboard = modes
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|mode| InlineKeyboardButton {
                    text: mode_button_label(*mode).to_string(),
                    callback_data: mode_key(*mode).to_string(),
                })
                .collect()
        })
        .collect();
    InlineKeyboardMarkup { inline_keyboard }
}

fn to_gateway(e: TelegramError) -> GatewayError {
    GatewayError(e.to_string())
}

#[async_trait]
impl Gateway for TelegramGateway {
    async fn send_notice(&self, chat: ChatId, text: &str) -> Result<(), GatewayError> {
        self.client
            .send_message(chat.0, text, None)
            .await
            .map(drop)
            .map_err(to_gateway)
    }

    async fn present_modes(
        &self,
        chat: ChatId,
        item_count: usize,
        modes: &[CaptionMode],
    ) -> Result<(), GatewayError> {
        let text = format!("📦 Received {item_count} media item(s)!\n\nChoose a caption mode:");
        self.client
            .send_message(chat.0, &text, Some(&mode_keyboard(modes)))
            .await
            .map(drop)
            .map_err(to_gateway)
    }

    async fn request_input(
        &self,
        chat: ChatId,
        mode: CaptionMode,
        step: u8,
    ) -> Result<(), GatewayError> {
        self.client
            .send_message(chat.0, input_prompt(mode, step), None)
            .await
            .map(drop)
            .map_err(to_gateway)
    }

    async fn deliver_item(&self, chat: ChatId, item: &CaptionedItem) -> Result<(), GatewayError> {
        let caption = (!item.caption.is_empty()).then_some(item.caption.as_str());
        self.client
            .send_media(chat.0, send_kind(item.item.kind), &item.item.content_ref.0, caption)
            .await
            .map(drop)
            .map_err(to_gateway)
    }

    async fn deliver_album(
        &self,
        chat: ChatId,
        items: &[CaptionedItem],
    ) -> Result<(), GatewayError> {
        let media: Vec<InputMedia> = items
            .iter()
            .map(|captioned| InputMedia {
                media_type: group_type(captioned.item.kind).to_string(),
                media: captioned.item.content_ref.0.clone(),
                caption: (!captioned.caption.is_empty()).then(|| captioned.caption.clone()),
            })
            .collect();
        self.client
            .send_media_group(chat.0, &media)
            .await
            .map(drop)
            .map_err(to_gateway)
    }
}
