use chrono::{DateTime, Utc};

/// Numeric chat identifier as assigned by the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle the delivery collaborator can use to resend the same
/// bytes (a platform file id). The core never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Document,
    Animation,
    Audio,
    Voice,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Animation => "animation",
            MediaKind::Audio => "audio",
            MediaKind::Voice => "voice",
        }
    }

    /// Whether the platform accepts this kind inside an album.
    ///
    /// Voice notes can never be grouped; animations are excluded because
    /// `sendMediaGroup` only takes photo, video, document, and audio inputs.
    pub fn groupable(&self) -> bool {
        !matches!(self, MediaKind::Voice | MediaKind::Animation)
    }
}

/// One collected media message. Immutable once created; owned by the
/// session it was appended to.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub content_ref: ContentRef,
    pub original_caption: Option<String>,
    pub original_filename: Option<String>,
    /// Monotonic arrival index within the owning session, starting at 1.
    pub sequence: u64,
    pub received_at: DateTime<Utc>,
}

impl MediaItem {
    /// The original caption, with absence collapsed to the empty string.
    pub fn caption_or_empty(&self) -> &str {
        self.original_caption.as_deref().unwrap_or("")
    }

    /// The original filename, with absence collapsed to the empty string.
    pub fn filename_or_empty(&self) -> &str {
        self.original_filename.as_deref().unwrap_or("")
    }
}

/// Caption-transformation modes offered after a batch settles.
///
/// `MakeAlbum` is not a caption rule: it flips the session to album output
/// and defers to a second mode pick for the caption itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionMode {
    NewCaption,
    KeepOriginal,
    AppendText,
    PrependText,
    ReplaceLinks,
    UseFilename,
    RemoveCaption,
    AddTextToEach,
    FilenameWithCap,
    MakeAlbum,
}

impl CaptionMode {
    /// Menu order: two entries per keyboard row.
    pub const ALL: [CaptionMode; 10] = [
        CaptionMode::NewCaption,
        CaptionMode::KeepOriginal,
        CaptionMode::AppendText,
        CaptionMode::PrependText,
        CaptionMode::ReplaceLinks,
        CaptionMode::UseFilename,
        CaptionMode::RemoveCaption,
        CaptionMode::AddTextToEach,
        CaptionMode::FilenameWithCap,
        CaptionMode::MakeAlbum,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CaptionMode::NewCaption => "New Caption",
            CaptionMode::KeepOriginal => "Keep Original",
            CaptionMode::AppendText => "Append Text",
            CaptionMode::PrependText => "Prepend Text",
            CaptionMode::ReplaceLinks => "Replace Links",
            CaptionMode::UseFilename => "Use Filename",
            CaptionMode::RemoveCaption => "Remove Caption",
            CaptionMode::AddTextToEach => "Add Text to Each",
            CaptionMode::FilenameWithCap => "Filename with Cap",
            CaptionMode::MakeAlbum => "Make Album",
        }
    }

    /// How many follow-up text inputs the mode needs before processing.
    pub fn required_inputs(&self) -> u8 {
        match self {
            CaptionMode::KeepOriginal
            | CaptionMode::UseFilename
            | CaptionMode::RemoveCaption
            | CaptionMode::MakeAlbum => 0,
            CaptionMode::ReplaceLinks => 2,
            _ => 1,
        }
    }
}
