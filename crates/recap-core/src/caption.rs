//! Caption transformation rules.
//!
//! [`transform`] is a pure function from one collected item plus the chosen
//! mode and its parameters to the new caption string. It never fails: a
//! missing original caption or filename is treated as the empty string.

use recap_shared::constants::CAPTION_SEPARATOR;
use recap_shared::types::{CaptionMode, MediaItem};

/// Produce the new caption for `item` under `mode`.
///
/// `inputs` holds the 0-2 follow-up texts collected for the mode, in the
/// order they were received (for Replace Links: target first, then
/// replacement).
pub fn transform(item: &MediaItem, mode: CaptionMode, inputs: &[String]) -> String {
    let original = item.caption_or_empty();
    let first = inputs.first().map(String::as_str).unwrap_or("");
    let second = inputs.get(1).map(String::as_str).unwrap_or("");

    match mode {
        CaptionMode::NewCaption => first.to_string(),

        CaptionMode::KeepOriginal => original.to_string(),

        CaptionMode::AppendText | CaptionMode::AddTextToEach => join(original, first),

        CaptionMode::PrependText => {
            if original.is_empty() {
                first.to_string()
            } else {
                format!("{first}{CAPTION_SEPARATOR}{original}")
            }
        }

        CaptionMode::ReplaceLinks => {
            // Literal substring replacement, all occurrences, left to right.
            // An empty target would match everywhere; leave the caption alone.
            if original.is_empty() || first.is_empty() {
                original.to_string()
            } else {
                original.replace(first, second)
            }
        }

        CaptionMode::UseFilename => strip_extension(item.filename_or_empty()).to_string(),

        CaptionMode::FilenameWithCap => {
            join(strip_extension(item.filename_or_empty()), first)
        }

        CaptionMode::RemoveCaption => String::new(),

        // Routing flag, resolved by the engine before transformation.
        CaptionMode::MakeAlbum => original.to_string(),
    }
}

/// `base` and `extra` joined by the caption separator; either side alone if
/// the other is empty.
fn join(base: &str, extra: &str) -> String {
    if base.is_empty() {
        extra.to_string()
    } else if extra.is_empty() {
        base.to_string()
    } else {
        format!("{base}{CAPTION_SEPARATOR}{extra}")
    }
}

/// Drop the last `.` and everything after it. A name without a dot is
/// returned unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use recap_shared::types::{ContentRef, MediaKind};

    fn item(caption: Option<&str>, filename: Option<&str>) -> MediaItem {
        MediaItem {
            kind: MediaKind::Photo,
            content_ref: ContentRef("file-1".to_string()),
            original_caption: caption.map(String::from),
            original_filename: filename.map(String::from),
            sequence: 1,
            received_at: Utc::now(),
        }
    }

    fn run(item: &MediaItem, mode: CaptionMode, inputs: &[&str]) -> String {
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
        transform(item, mode, &inputs)
    }

    #[test]
    fn new_caption_ignores_original() {
        let it = item(Some("old"), None);
        assert_eq!(run(&it, CaptionMode::NewCaption, &["fresh"]), "fresh");
    }

    #[test]
    fn keep_original_passes_through() {
        assert_eq!(run(&item(Some("old"), None), CaptionMode::KeepOriginal, &[]), "old");
        assert_eq!(run(&item(None, None), CaptionMode::KeepOriginal, &[]), "");
    }

    #[test]
    fn append_with_empty_original_has_no_separator() {
        let it = item(None, None);
        assert_eq!(run(&it, CaptionMode::AppendText, &["Join us"]), "Join us");
    }

    #[test]
    fn append_and_prepend_use_line_break() {
        let it = item(Some("body"), None);
        assert_eq!(run(&it, CaptionMode::AppendText, &["tail"]), "body\ntail");
        assert_eq!(run(&it, CaptionMode::PrependText, &["head"]), "head\nbody");
    }

    #[test]
    fn prepend_with_empty_original() {
        assert_eq!(run(&item(None, None), CaptionMode::PrependText, &["head"]), "head");
    }

    #[test]
    fn replace_links_replaces_every_occurrence() {
        let it = item(Some("see http://a.co and http://a.co again"), None);
        assert_eq!(
            run(&it, CaptionMode::ReplaceLinks, &["http://a.co", "http://b.co"]),
            "see http://b.co and http://b.co again"
        );
    }

    #[test]
    fn replace_links_on_empty_caption_is_unchanged() {
        let it = item(None, None);
        assert_eq!(run(&it, CaptionMode::ReplaceLinks, &["a", "b"]), "");
    }

    #[test]
    fn replace_links_is_case_sensitive_and_literal() {
        let it = item(Some("Go to HTTP://A.CO now"), None);
        assert_eq!(
            run(&it, CaptionMode::ReplaceLinks, &["http://a.co", "x"]),
            "Go to HTTP://A.CO now"
        );
    }

    #[test]
    fn use_filename_strips_only_last_extension() {
        let it = item(None, Some("report.final.pdf"));
        assert_eq!(run(&it, CaptionMode::UseFilename, &[]), "report.final");
    }

    #[test]
    fn use_filename_without_extension_is_unchanged() {
        let it = item(None, Some("README"));
        assert_eq!(run(&it, CaptionMode::UseFilename, &[]), "README");
    }

    #[test]
    fn use_filename_without_filename_is_empty() {
        assert_eq!(run(&item(Some("cap"), None), CaptionMode::UseFilename, &[]), "");
    }

    #[test]
    fn filename_with_cap_joins_with_line_break() {
        let it = item(None, Some("clip.mp4"));
        assert_eq!(run(&it, CaptionMode::FilenameWithCap, &["my note"]), "clip\nmy note");
    }

    #[test]
    fn add_text_to_each_composes_with_caption() {
        assert_eq!(
            run(&item(Some("cap"), Some("f.jpg")), CaptionMode::AddTextToEach, &["promo"]),
            "cap\npromo"
        );
        assert_eq!(
            run(&item(None, Some("f.jpg")), CaptionMode::AddTextToEach, &["promo"]),
            "promo"
        );
    }

    #[test]
    fn remove_caption_yields_empty() {
        assert_eq!(run(&item(Some("old"), None), CaptionMode::RemoveCaption, &[]), "");
    }
}
