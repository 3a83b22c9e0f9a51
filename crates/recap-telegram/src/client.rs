//! HTTP client for the Bot API.
//!
//! Every method posts JSON to `https://<base>/bot<token>/<method>` and
//! unwraps the standard `{ok, result, description}` envelope. The API
//! reports failures inside the envelope even on non-2xx statuses, so the
//! envelope, not the HTTP status, is the source of truth.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Result, TelegramError};
use crate::types::{ApiResponse, InlineKeyboardMarkup, InputMedia, Message, SendKind, Update};

/// Extra headroom on top of the long-poll timeout before the HTTP layer
/// gives up on a request.
const HTTP_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Client bound to one bot token.
#[derive(Debug, Clone)]
pub struct BotClient {
    http: Client,
    base: String,
    poll_timeout_secs: u64,
}

impl BotClient {
    pub fn new(token: &str, poll_timeout_secs: u64) -> Self {
        Self::with_base("https://api.telegram.org", token, poll_timeout_secs)
    }

    /// Point the client at a different API host (tests, local proxies).
    pub fn with_base(base: &str, token: &str, poll_timeout_secs: u64) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + HTTP_TIMEOUT_MARGIN_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base: format!("{}/bot{}", base.trim_end_matches('/'), token),
            poll_timeout_secs,
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T> {
        let url = format!("{}/{}", self.base, method);
        debug!(method, "Bot API call");

        let response = self.http.post(&url).json(&body).send().await?;
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                code: envelope.error_code.unwrap_or(0),
                description: envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        envelope.result.ok_or(TelegramError::EmptyResult)
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let mut body = json!({
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", body).await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message> {
        let mut body = json!({ "chat_id": chat_id, "text": text });
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("sendMessage", body).await
    }

    /// Resend stored media by file id, with an optional caption. An empty
    /// caption is omitted rather than sent as "".
    pub async fn send_media(
        &self,
        chat_id: i64,
        kind: SendKind,
        file_id: &str,
        caption: Option<&str>,
    ) -> Result<Message> {
        let mut body = json!({ "chat_id": chat_id });
        body[kind.field()] = json!(file_id);
        if let Some(caption) = caption {
            if !caption.is_empty() {
                body["caption"] = json!(caption);
            }
        }
        self.call(kind.method(), body).await
    }

    /// Send 2 to 10 items as one album.
    pub async fn send_media_group(
        &self,
        chat_id: i64,
        media: &[InputMedia],
    ) -> Result<Vec<Message>> {
        let body = json!({ "chat_id": chat_id, "media": media });
        self.call("sendMediaGroup", body).await
    }

    /// Ack a button press so the client stops showing a spinner.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<bool> {
        self.call(
            "answerCallbackQuery",
            json!({ "callback_query_id": callback_query_id }),
        )
        .await
    }
}
