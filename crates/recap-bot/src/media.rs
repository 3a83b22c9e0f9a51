//! Inbound media extraction.

use recap_core::IncomingMedia;
use recap_shared::types::{ContentRef, MediaKind};
use recap_telegram::types::Message;

/// Pull the media payload out of a message, if it carries one.
///
/// Photos arrive as several renditions of the same image; the largest
/// (last) one is kept. When the platform supplies no filename, one is
/// synthesized from the kind and the file's unique id so filename-based
/// caption modes always have something to work with.
pub fn extract_media(message: &Message) -> Option<IncomingMedia> {
    let caption = message.caption.clone();

    if let Some(photo) = message.photo.as_ref().and_then(|sizes| sizes.last()) {
        return Some(IncomingMedia {
            kind: MediaKind::Photo,
            content_ref: ContentRef(photo.file_id.clone()),
            caption,
            filename: Some(format!("photo_{}.jpg", photo.file_unique_id)),
        });
    }
    if let Some(video) = &message.video {
        return Some(IncomingMedia {
            kind: MediaKind::Video,
            content_ref: ContentRef(video.file_id.clone()),
            caption,
            filename: video
                .file_name
                .clone()
                .or_else(|| Some(format!("video_{}.mp4", video.file_unique_id))),
        });
    }
    if let Some(document) = &message.document {
        return Some(IncomingMedia {
            kind: MediaKind::Document,
            content_ref: ContentRef(document.file_id.clone()),
            caption,
            filename: document
                .file_name
                .clone()
                .or_else(|| Some(format!("document_{}", document.file_unique_id))),
        });
    }
    if let Some(animation) = &message.animation {
        return Some(IncomingMedia {
            kind: MediaKind::Animation,
            content_ref: ContentRef(animation.file_id.clone()),
            caption,
            filename: animation
                .file_name
                .clone()
                .or_else(|| Some(format!("animation_{}.gif", animation.file_unique_id))),
        });
    }
    if let Some(audio) = &message.audio {
        return Some(IncomingMedia {
            kind: MediaKind::Audio,
            content_ref: ContentRef(audio.file_id.clone()),
            caption,
            filename: audio
                .file_name
                .clone()
                .or_else(|| Some(format!("audio_{}.mp3", audio.file_unique_id))),
        });
    }
    if let Some(voice) = &message.voice {
        return Some(IncomingMedia {
            kind: MediaKind::Voice,
            content_ref: ContentRef(voice.file_id.clone()),
            caption,
            filename: Some(format!("voice_{}.ogg", voice.file_unique_id)),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_telegram::types::{Chat, Document, PhotoSize, Video, Voice};

    fn bare_message() -> Message {
        Message {
            message_id: 1,
            chat: Chat { id: 5 },
            text: None,
            caption: None,
            photo: None,
            video: None,
            document: None,
            animation: None,
            audio: None,
            voice: None,
        }
    }

    #[test]
    fn picks_the_largest_photo_rendition() {
        let mut message = bare_message();
        message.caption = Some("cap".to_string());
        message.photo = Some(vec![
            PhotoSize {
                file_id: "small".to_string(),
                file_unique_id: "u1".to_string(),
            },
            PhotoSize {
                file_id: "large".to_string(),
                file_unique_id: "u2".to_string(),
            },
        ]);

        let media = extract_media(&message).unwrap();
        assert_eq!(media.kind, MediaKind::Photo);
        assert_eq!(media.content_ref.0, "large");
        assert_eq!(media.caption.as_deref(), Some("cap"));
        assert_eq!(media.filename.as_deref(), Some("photo_u2.jpg"));
    }

    #[test]
    fn keeps_platform_filename_when_present() {
        let mut message = bare_message();
        message.video = Some(Video {
            file_id: "v".to_string(),
            file_unique_id: "u".to_string(),
            file_name: Some("holiday.mov".to_string()),
        });

        let media = extract_media(&message).unwrap();
        assert_eq!(media.filename.as_deref(), Some("holiday.mov"));
    }

    #[test]
    fn synthesizes_filenames_per_kind() {
        let mut message = bare_message();
        message.document = Some(Document {
            file_id: "d".to_string(),
            file_unique_id: "u9".to_string(),
            file_name: None,
        });
        assert_eq!(
            extract_media(&message).unwrap().filename.as_deref(),
            Some("document_u9")
        );

        let mut message = bare_message();
        message.voice = Some(Voice {
            file_id: "w".to_string(),
            file_unique_id: "u3".to_string(),
        });
        assert_eq!(
            extract_media(&message).unwrap().filename.as_deref(),
            Some("voice_u3.ogg")
        );
    }

    #[test]
    fn plain_text_is_not_media() {
        let mut message = bare_message();
        message.text = Some("hello".to_string());
        assert!(extract_media(&message).is_none());
    }
}
