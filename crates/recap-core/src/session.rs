//! Per-chat session: collected media plus the mode/input state machine.
//!
//! A session moves through collect, settle, input, deliver. Transition
//! guards live here so illegal combinations are unrepresentable; the
//! engine only plumbs events in and effects out.

use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use recap_shared::error::{RecapError, Result};
use recap_shared::types::{CaptionMode, ContentRef, MediaItem, MediaKind};

/// Media fields as handed over by the platform collaborator, before the
/// session stamps a sequence number on them.
#[derive(Debug, Clone)]
pub struct IncomingMedia {
    pub kind: MediaKind,
    pub content_ref: ContentRef,
    pub caption: Option<String>,
    pub filename: Option<String>,
}

/// Where a session is in its workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting media; every arrival restarts the debounce timer.
    Collecting,
    /// Debounce fired; the mode menu is in front of the user.
    Settled,
    /// Mode chosen, waiting for its (first) text parameter.
    AwaitingFirstInput { mode: CaptionMode },
    /// Replace Links only: target received, waiting for the replacement.
    AwaitingSecondInput { mode: CaptionMode, first: String },
}

/// Handle to the single outstanding debounce timer of a session.
///
/// Restarting replaces the handle, which aborts the previous sleep task
/// and bumps the epoch; a fire whose epoch no longer matches is stale and
/// is ignored.
#[derive(Debug)]
pub struct DebounceTimer {
    pub epoch: u64,
    handle: JoinHandle<()>,
}

impl DebounceTimer {
    pub fn new(epoch: u64, handle: JoinHandle<()>) -> Self {
        Self { epoch, handle }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// What the engine should do after a mode pick.
#[derive(Debug, PartialEq, Eq)]
pub enum ModeOutcome {
    /// Album output armed; re-present the menu for the caption mode proper.
    AlbumArmed,
    /// Prompt for the mode's first text input.
    NeedInput(CaptionMode),
    /// No inputs required; process immediately.
    Ready { mode: CaptionMode, inputs: Vec<String> },
}

/// What the engine should do after a text message.
#[derive(Debug, PartialEq, Eq)]
pub enum TextOutcome {
    /// First of two inputs stored; prompt for the second.
    NeedSecond(CaptionMode),
    /// All inputs collected; process with these parameters.
    Ready { mode: CaptionMode, inputs: Vec<String> },
}

/// Live per-chat record of collected media and workflow progress.
#[derive(Debug)]
pub struct Session {
    /// Correlation id for log lines spanning the session's lifetime.
    pub id: Uuid,
    pub state: SessionState,
    pub items: Vec<MediaItem>,
    /// Set by the Make Album pick; routes output through album batching.
    pub as_album: bool,
    pub timer: Option<DebounceTimer>,
    next_sequence: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Collecting,
            items: Vec::new(),
            as_album: false,
            timer: None,
            next_sequence: 1,
        }
    }

    /// Whether the session still accepts media arrivals.
    pub fn collecting(&self) -> bool {
        self.state == SessionState::Collecting
    }

    /// Stamp and store an arrival; returns its sequence number.
    ///
    /// Only valid while collecting; the engine rejects later arrivals
    /// before calling this.
    pub fn append(&mut self, media: IncomingMedia) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.items.push(MediaItem {
            kind: media.kind,
            content_ref: media.content_ref,
            original_caption: media.caption,
            original_filename: media.filename,
            sequence,
            received_at: Utc::now(),
        });
        sequence
    }

    /// Move to `Settled` when the debounce fire is current and there is
    /// something to settle. Returns `false` for stale or empty fires.
    pub fn settle(&mut self, epoch: u64) -> bool {
        let current = matches!(&self.timer, Some(timer) if timer.epoch == epoch);
        if !current || self.state != SessionState::Collecting || self.items.is_empty() {
            return false;
        }
        self.timer = None;
        self.state = SessionState::Settled;
        true
    }

    /// Apply a mode pick from the menu.
    pub fn choose_mode(&mut self, mode: CaptionMode) -> Result<ModeOutcome> {
        if self.state != SessionState::Settled {
            return Err(RecapError::StateMismatch);
        }
        if mode == CaptionMode::MakeAlbum {
            self.as_album = true;
            return Ok(ModeOutcome::AlbumArmed);
        }
        if mode.required_inputs() == 0 {
            return Ok(ModeOutcome::Ready {
                mode,
                inputs: Vec::new(),
            });
        }
        self.state = SessionState::AwaitingFirstInput { mode };
        Ok(ModeOutcome::NeedInput(mode))
    }

    /// Apply a plain text message as mode input.
    pub fn accept_text(&mut self, text: String) -> Result<TextOutcome> {
        match self.state.clone() {
            SessionState::AwaitingFirstInput { mode } if mode == CaptionMode::ReplaceLinks => {
                self.state = SessionState::AwaitingSecondInput { mode, first: text };
                Ok(TextOutcome::NeedSecond(mode))
            }
            SessionState::AwaitingFirstInput { mode } => Ok(TextOutcome::Ready {
                mode,
                inputs: vec![text],
            }),
            SessionState::AwaitingSecondInput { mode, first } => Ok(TextOutcome::Ready {
                mode,
                inputs: vec![first, text],
            }),
            _ => Err(RecapError::StateMismatch),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_shared::types::ContentRef;

    fn media() -> IncomingMedia {
        IncomingMedia {
            kind: MediaKind::Photo,
            content_ref: ContentRef("f".to_string()),
            caption: None,
            filename: None,
        }
    }

    fn armed(session: &mut Session, epoch: u64) {
        let handle = tokio::spawn(async {});
        session.timer = Some(DebounceTimer::new(epoch, handle));
    }

    #[tokio::test]
    async fn sequences_start_at_one_and_increase() {
        let mut session = Session::new();
        assert_eq!(session.append(media()), 1);
        assert_eq!(session.append(media()), 2);
        assert_eq!(session.items[1].sequence, 2);
    }

    #[tokio::test]
    async fn settle_requires_matching_epoch() {
        let mut session = Session::new();
        session.append(media());
        armed(&mut session, 3);
        assert!(!session.settle(2));
        assert_eq!(session.state, SessionState::Collecting);
        assert!(session.settle(3));
        assert_eq!(session.state, SessionState::Settled);
    }

    #[tokio::test]
    async fn settle_with_no_items_is_ignored() {
        let mut session = Session::new();
        armed(&mut session, 1);
        assert!(!session.settle(1));
    }

    #[tokio::test]
    async fn settle_twice_is_ignored() {
        let mut session = Session::new();
        session.append(media());
        armed(&mut session, 1);
        assert!(session.settle(1));
        assert!(!session.settle(1));
    }

    #[tokio::test]
    async fn zero_input_mode_is_ready_immediately() {
        let mut session = Session::new();
        session.append(media());
        armed(&mut session, 1);
        session.settle(1);
        let outcome = session.choose_mode(CaptionMode::KeepOriginal).unwrap();
        assert_eq!(
            outcome,
            ModeOutcome::Ready {
                mode: CaptionMode::KeepOriginal,
                inputs: vec![],
            }
        );
    }

    #[tokio::test]
    async fn replace_links_needs_two_inputs() {
        let mut session = Session::new();
        session.append(media());
        armed(&mut session, 1);
        session.settle(1);

        let outcome = session.choose_mode(CaptionMode::ReplaceLinks).unwrap();
        assert_eq!(outcome, ModeOutcome::NeedInput(CaptionMode::ReplaceLinks));

        let outcome = session.accept_text("http://a.co".to_string()).unwrap();
        assert_eq!(outcome, TextOutcome::NeedSecond(CaptionMode::ReplaceLinks));

        let outcome = session.accept_text("http://b.co".to_string()).unwrap();
        assert_eq!(
            outcome,
            TextOutcome::Ready {
                mode: CaptionMode::ReplaceLinks,
                inputs: vec!["http://a.co".to_string(), "http://b.co".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn make_album_arms_flag_and_awaits_second_pick() {
        let mut session = Session::new();
        session.append(media());
        armed(&mut session, 1);
        session.settle(1);

        let outcome = session.choose_mode(CaptionMode::MakeAlbum).unwrap();
        assert_eq!(outcome, ModeOutcome::AlbumArmed);
        assert!(session.as_album);
        assert_eq!(session.state, SessionState::Settled);

        let outcome = session.choose_mode(CaptionMode::RemoveCaption).unwrap();
        assert!(matches!(outcome, ModeOutcome::Ready { .. }));
    }

    #[tokio::test]
    async fn mode_pick_while_collecting_is_a_mismatch() {
        let mut session = Session::new();
        session.append(media());
        assert!(matches!(
            session.choose_mode(CaptionMode::KeepOriginal),
            Err(RecapError::StateMismatch)
        ));
    }

    #[tokio::test]
    async fn text_while_collecting_is_a_mismatch() {
        let mut session = Session::new();
        assert!(matches!(
            session.accept_text("hello".to_string()),
            Err(RecapError::StateMismatch)
        ));
    }
}
