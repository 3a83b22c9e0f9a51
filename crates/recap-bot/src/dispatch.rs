//! Routes Telegram updates into engine events.

use recap_core::{EngineHandle, Event};
use recap_shared::types::{CaptionMode, ChatId};
use recap_telegram::types::Update;
use recap_telegram::BotClient;
use tracing::{debug, warn};

use crate::media::extract_media;

/// Callback-data key for a mode button.
pub fn mode_key(mode: CaptionMode) -> &'static str {
    match mode {
        CaptionMode::NewCaption => "mode_new",
        CaptionMode::KeepOriginal => "mode_keep",
        CaptionMode::AppendText => "mode_append",
        CaptionMode::PrependText => "mode_prepend",
        CaptionMode::ReplaceLinks => "mode_replace_links",
        CaptionMode::UseFilename => "mode_filename",
        CaptionMode::RemoveCaption => "mode_remove",
        CaptionMode::AddTextToEach => "mode_add_to_each",
        CaptionMode::FilenameWithCap => "mode_filename_cap",
        CaptionMode::MakeAlbum => "mode_album",
    }
}

pub fn mode_from_key(key: &str) -> Option<CaptionMode> {
    CaptionMode::ALL.iter().copied().find(|mode| mode_key(*mode) == key)
}

/// Button label shown on the mode menu.
pub fn mode_button_label(mode: CaptionMode) -> &'static str {
    match mode {
        CaptionMode::NewCaption => "✏️ New Caption",
        CaptionMode::KeepOriginal => "📋 Keep Original",
        CaptionMode::AppendText => "➕ Append Text",
        CaptionMode::PrependText => "⬆️ Prepend Text",
        CaptionMode::ReplaceLinks => "🔗 Replace Links",
        CaptionMode::UseFilename => "📄 Use Filename",
        CaptionMode::RemoveCaption => "🚫 Remove Caption",
        CaptionMode::AddTextToEach => "🔄 Add Text to Each",
        CaptionMode::FilenameWithCap => "📝 Filename with Cap",
        CaptionMode::MakeAlbum => "🖼 Make Album",
    }
}

/// Follow-up prompt for a mode's text input (`step` is 1 or 2).
pub fn input_prompt(mode: CaptionMode, step: u8) -> &'static str {
    match (mode, step) {
        (CaptionMode::NewCaption, _) => "✏️ Send the new caption:",
        (CaptionMode::AppendText, _) => "➕ Send the text to append:",
        (CaptionMode::PrependText, _) => "⬆️ Send the text to prepend:",
        (CaptionMode::AddTextToEach, _) => "🔄 Send the text to add to each caption:",
        (CaptionMode::FilenameWithCap, _) => "📝 Send the caption to place under the filename:",
        (CaptionMode::ReplaceLinks, 1) => "🔗 Send the link (or text) to replace:",
        (CaptionMode::ReplaceLinks, _) => "🔗 Send the replacement:",
        _ => "Send the text:",
    }
}

/// Convert one update into engine events, acking button presses on the
/// way through.
pub async fn dispatch_update(client: &BotClient, engine: &EngineHandle, update: Update) {
    if let Some(message) = update.message {
        let chat = ChatId(message.chat.id);

        if let Some(media) = extract_media(&message) {
            engine.send(Event::MediaReceived { chat, media }).await;
        } else if let Some(text) = message.text {
            if text.trim_start().starts_with('/') {
                engine.send(Event::CommandReceived { chat, input: text }).await;
            } else {
                engine.send(Event::TextReceived { chat, text }).await;
            }
        }
        return;
    }

    if let Some(query) = update.callback_query {
        if let Err(e) = client.answer_callback_query(&query.id).await {
            warn!(error = %e, "answerCallbackQuery failed");
        }
        let Some(message) = query.message else {
            debug!(query = %query.id, "callback without originating message");
            return;
        };
        let chat = ChatId(message.chat.id);

        match query.data.as_deref().and_then(mode_from_key) {
            Some(mode) => engine.send(Event::ModeChosen { chat, mode }).await,
            None => debug!(%chat, data = ?query.data, "unrecognized callback data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_key_round_trips() {
        for mode in CaptionMode::ALL {
            assert_eq!(mode_from_key(mode_key(mode)), Some(mode));
        }
    }

    #[test]
    fn unknown_keys_map_to_none() {
        assert_eq!(mode_from_key("mode_bogus"), None);
        assert_eq!(mode_from_key(""), None);
    }

    #[test]
    fn replace_links_prompts_differ_by_step() {
        let first = input_prompt(CaptionMode::ReplaceLinks, 1);
        let second = input_prompt(CaptionMode::ReplaceLinks, 2);
        assert_ne!(first, second);
    }
}
