//! Bot API wire types, limited to the fields the bot reads or writes.

use serde::{Deserialize, Serialize};

/// Standard Bot API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// An inbound message. At most one of the media fields is set.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Several renditions of the same photo, smallest first.
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default)]
    pub video: Option<Video>,
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default)]
    pub animation: Option<Animation>,
    #[serde(default)]
    pub audio: Option<Audio>,
    #[serde(default)]
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Animation {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Audio {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub file_id: String,
    pub file_unique_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    /// The message the pressed button was attached to.
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// One entry of a `sendMediaGroup` payload.
#[derive(Debug, Clone, Serialize)]
pub struct InputMedia {
    /// `photo`, `video`, `document`, or `audio`.
    #[serde(rename = "type")]
    pub media_type: String,
    /// File id of previously stored content.
    pub media: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Media send flavors, mapping one Bot API method each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendKind {
    Photo,
    Video,
    Document,
    Animation,
    Audio,
    Voice,
}

impl SendKind {
    pub fn method(&self) -> &'static str {
        match self {
            SendKind::Photo => "sendPhoto",
            SendKind::Video => "sendVideo",
            SendKind::Document => "sendDocument",
            SendKind::Animation => "sendAnimation",
            SendKind::Audio => "sendAudio",
            SendKind::Voice => "sendVoice",
        }
    }

    /// Name of the JSON field carrying the file id for this method.
    pub fn field(&self) -> &'static str {
        match self {
            SendKind::Photo => "photo",
            SendKind::Video => "video",
            SendKind::Document => "document",
            SendKind::Animation => "animation",
            SendKind::Audio => "audio",
            SendKind::Voice => "voice",
        }
    }
}
