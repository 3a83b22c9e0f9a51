//! Engine event loop with a tokio mpsc command pattern.
//!
//! All inbound platform activity is funneled through one typed channel and
//! processed one event at a time, so no two events for the same chat are
//! ever handled concurrently. Chats never share state: each owns its
//! session and replacement registry. Outbound effects go through the
//! [`Gateway`] collaborator.
//!
//! Debounce timers are spawned sleep tasks that report back into the same
//! channel; restarting a timer aborts the previous task and bumps the
//! session's epoch, so a stale fire can never settle a batch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use recap_shared::constants::DEBOUNCE_SECS;
use recap_shared::types::{CaptionMode, ChatId};

use crate::batch::{self, CaptionedItem, DeliveryBatch};
use crate::caption;
use crate::command::Command;
use crate::gateway::Gateway;
use crate::replace::ReplacementRegistry;
use crate::session::{DebounceTimer, ModeOutcome, Session, TextOutcome};

pub use crate::session::IncomingMedia;

const START_TEXT: &str = "🎯 Caption Bot\n\n\
Send me a batch of media and I'll hand it back with new captions.\n\n\
Modes:\n\
• New caption, keep original, or remove\n\
• Append or prepend text\n\
• Replace links\n\
• Use filename (with optional caption below)\n\
• Add text to each item\n\
• Make an album (up to 10 per group)\n\n\
Global replacements: /global_replacement, /list_global, /remove_replacement\n\n\
Send your media!";

const HELP_TEXT: &str = "How it works:\n\
1. Send media (several in a row is fine)\n\
2. Wait a moment until I ask for a caption mode\n\
3. Pick a mode and answer any follow-up prompts\n\
4. Get your media back with the new captions\n\n\
Commands:\n\
/clear - drop the current batch\n\
/global_replacement <target> <replacement> - always substitute <target>\n\
/list_global - show the substitution rules\n\
/remove_replacement <index> - delete a rule\n\
/help - this message";

/// Events sent *into* the engine task.
#[derive(Debug)]
pub enum Event {
    /// A media message arrived in a chat.
    MediaReceived { chat: ChatId, media: IncomingMedia },
    /// A plain text message arrived.
    TextReceived { chat: ChatId, text: String },
    /// The user picked a caption mode from the menu.
    ModeChosen { chat: ChatId, mode: CaptionMode },
    /// A slash command, raw; the engine parses and validates it.
    CommandReceived { chat: ChatId, input: String },
    /// The debounce timer for `chat` fired.
    BatchSettled { chat: ChatId, epoch: u64 },
}

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet period after the last arrival before a batch settles.
    pub debounce: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(DEBOUNCE_SECS),
        }
    }
}

/// Cloneable handle for feeding events into a spawned engine.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Event>,
}

impl EngineHandle {
    pub async fn send(&self, event: Event) {
        if self.tx.send(event).await.is_err() {
            warn!("engine task is gone, dropping event");
        }
    }
}

/// Per-chat state owned by the engine: the live session (if any) plus the
/// process-lifetime replacement registry.
#[derive(Default)]
struct ChatState {
    session: Option<Session>,
    registry: ReplacementRegistry,
}

struct Engine {
    config: EngineConfig,
    gateway: Arc<dyn Gateway>,
    chats: HashMap<ChatId, ChatState>,
    /// Clone handed to debounce tasks so fires re-enter the event loop.
    tx: mpsc::Sender<Event>,
}

/// Spawn the engine in a background tokio task.
///
/// Returns the handle used to submit events; the task ends when every
/// handle (and internal timer) is dropped.
pub fn spawn(gateway: Arc<dyn Gateway>, config: EngineConfig) -> EngineHandle {
    let (tx, rx) = mpsc::channel(256);
    let engine = Engine {
        config,
        gateway,
        chats: HashMap::new(),
        tx: tx.clone(),
    };
    tokio::spawn(engine.run(rx));
    EngineHandle { tx }
}

impl Engine {
    async fn run(mut self, mut rx: mpsc::Receiver<Event>) {
        info!(debounce_ms = self.config.debounce.as_millis() as u64, "caption engine started");
        while let Some(event) = rx.recv().await {
            self.handle(event).await;
        }
        info!("caption engine stopped");
    }

    async fn handle(&mut self, event: Event) {
        match event {
            Event::MediaReceived { chat, media } => self.on_media(chat, media).await,
            Event::TextReceived { chat, text } => self.on_text(chat, text).await,
            Event::ModeChosen { chat, mode } => self.on_mode(chat, mode).await,
            Event::CommandReceived { chat, input } => self.on_command(chat, input).await,
            Event::BatchSettled { chat, epoch } => self.on_settled(chat, epoch).await,
        }
    }

    // -- media collection ---------------------------------------------------

    async fn on_media(&mut self, chat: ChatId, media: IncomingMedia) {
        let accepted = {
            let state = self.chats.entry(chat).or_default();
            let session = state.session.get_or_insert_with(Session::new);
            if session.collecting() {
                let kind = media.kind;
                let sequence = session.append(media);
                let epoch = session.timer.as_ref().map_or(1, |timer| timer.epoch + 1);
                let tx = self.tx.clone();
                let delay = self.config.debounce;
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::BatchSettled { chat, epoch }).await;
                });
                session.timer = Some(DebounceTimer::new(epoch, handle));
                debug!(%chat, session = %session.id, seq = sequence, kind = kind.as_str(), "collected media");
                true
            } else {
                false
            }
        };

        if !accepted {
            debug!(%chat, "media while batch already settled");
            self.notify(
                chat,
                "A batch is already waiting for captions. Finish it or send /clear to start over.",
            )
            .await;
        }
    }

    async fn on_settled(&mut self, chat: ChatId, epoch: u64) {
        let settled = {
            let Some(session) = self.session_mut(chat) else { return };
            if !session.settle(epoch) {
                debug!(%chat, epoch, "stale or empty debounce fire ignored");
                return;
            }
            let collected_for_ms = session
                .items
                .first()
                .map(|item| (Utc::now() - item.received_at).num_milliseconds())
                .unwrap_or(0);
            info!(
                %chat,
                session = %session.id,
                items = session.items.len(),
                collected_for_ms,
                "batch settled"
            );
            (session.items.len(), session.as_album)
        };

        let menu = Self::menu_for(settled.1);
        if let Err(e) = self.gateway.present_modes(chat, settled.0, &menu).await {
            warn!(%chat, error = %e, "failed to present mode menu");
        }
    }

    // -- mode selection and input -------------------------------------------

    async fn on_mode(&mut self, chat: ChatId, mode: CaptionMode) {
        let outcome = {
            let Some(session) = self.session_mut(chat) else {
                debug!(%chat, mode = mode.label(), "mode pick with no active session");
                return;
            };
            match session.choose_mode(mode) {
                Ok(outcome) => {
                    debug!(%chat, session = %session.id, mode = mode.label(), "mode chosen");
                    Some((outcome, session.items.len()))
                }
                Err(e) => {
                    debug!(%chat, mode = mode.label(), error = %e, "mode pick ignored");
                    None
                }
            }
        };
        let Some((outcome, item_count)) = outcome else { return };

        match outcome {
            ModeOutcome::AlbumArmed => {
                let menu = Self::menu_for(true);
                if let Err(e) = self.gateway.present_modes(chat, item_count, &menu).await {
                    warn!(%chat, error = %e, "failed to re-present mode menu");
                }
            }
            ModeOutcome::NeedInput(mode) => {
                if let Err(e) = self.gateway.request_input(chat, mode, 1).await {
                    warn!(%chat, error = %e, "failed to prompt for input");
                }
            }
            ModeOutcome::Ready { mode, inputs } => self.process(chat, mode, inputs).await,
        }
    }

    async fn on_text(&mut self, chat: ChatId, text: String) {
        let outcome = {
            let Some(session) = self.session_mut(chat) else {
                debug!(%chat, "text with no active session ignored");
                return;
            };
            match session.accept_text(text) {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    // No input expected right now; not an error worth a reply.
                    debug!(%chat, error = %e, "text ignored");
                    None
                }
            }
        };
        let Some(outcome) = outcome else { return };

        match outcome {
            TextOutcome::NeedSecond(mode) => {
                if let Err(e) = self.gateway.request_input(chat, mode, 2).await {
                    warn!(%chat, error = %e, "failed to prompt for second input");
                }
            }
            TextOutcome::Ready { mode, inputs } => self.process(chat, mode, inputs).await,
        }
    }

    // -- commands -----------------------------------------------------------

    async fn on_command(&mut self, chat: ChatId, input: String) {
        let command = match Command::parse(&input) {
            Ok(command) => command,
            Err(e) => {
                debug!(%chat, input = %input, "rejected command");
                self.notify(chat, &e.to_string()).await;
                return;
            }
        };

        match command {
            Command::Start => self.notify(chat, START_TEXT).await,
            Command::Help => self.notify(chat, HELP_TEXT).await,
            Command::Clear => {
                let discarded = self.chats.get_mut(&chat).and_then(|state| state.session.take());
                if let Some(session) = &discarded {
                    info!(%chat, session = %session.id, items = session.items.len(), "session cleared");
                }
                self.notify(chat, "Cleared. Send media to start a new batch.").await;
            }
            Command::GlobalReplacement { target, replacement } => {
                let reply = {
                    let state = self.chats.entry(chat).or_default();
                    match state.registry.upsert(&target, &replacement) {
                        Ok(true) => format!("Updated rule for \"{target}\"."),
                        Ok(false) => format!(
                            "Added rule #{}: \"{target}\" -> \"{replacement}\"",
                            state.registry.len()
                        ),
                        Err(e) => e.to_string(),
                    }
                };
                self.notify(chat, &reply).await;
            }
            Command::ListGlobal => {
                let reply = {
                    let state = self.chats.entry(chat).or_default();
                    if state.registry.is_empty() {
                        "No global replacement rules yet. Add one with \
                         /global_replacement <target> <replacement>."
                            .to_string()
                    } else {
                        let mut lines = vec!["Global replacements:".to_string()];
                        for (i, rule) in state.registry.rules().iter().enumerate() {
                            lines.push(format!(
                                "{}. \"{}\" -> \"{}\"",
                                i + 1,
                                rule.target,
                                rule.replacement
                            ));
                        }
                        lines.push("Remove one with /remove_replacement <index>.".to_string());
                        lines.join("\n")
                    }
                };
                self.notify(chat, &reply).await;
            }
            Command::RemoveReplacement { index } => {
                let reply = {
                    let state = self.chats.entry(chat).or_default();
                    match state.registry.remove_at(index) {
                        Ok(rule) => format!("Removed rule \"{}\".", rule.target),
                        Err(e) => e.to_string(),
                    }
                };
                self.notify(chat, &reply).await;
            }
        }
    }

    // -- processing and delivery --------------------------------------------

    /// Transform, apply global replacements, batch, and deliver. The
    /// session leaves the map up front: delivery is its terminal state.
    async fn process(&mut self, chat: ChatId, mode: CaptionMode, inputs: Vec<String>) {
        let prepared = self.chats.get_mut(&chat).and_then(|state| {
            let mut session = state.session.take()?;
            let as_album = session.as_album;
            let session_id = session.id;
            let items = std::mem::take(&mut session.items);
            let registry = &state.registry;
            let outputs: Vec<CaptionedItem> = items
                .into_iter()
                .map(|item| {
                    let caption = registry.apply(&caption::transform(&item, mode, &inputs));
                    CaptionedItem { item, caption }
                })
                .collect();
            Some((outputs, as_album, session_id))
        });
        let Some((outputs, as_album, session_id)) = prepared else { return };

        info!(
            %chat,
            session = %session_id,
            items = outputs.len(),
            mode = mode.label(),
            as_album,
            "processing batch"
        );

        let batches = batch::plan(outputs, as_album);
        let mut delivered = 0usize;
        let mut failed = 0usize;

        for batch in &batches {
            match batch {
                DeliveryBatch::Single(item) => match self.gateway.deliver_item(chat, item).await {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        failed += 1;
                        warn!(%chat, seq = item.item.sequence, error = %e, "delivery failed");
                    }
                },
                DeliveryBatch::Album(items) => {
                    match self.gateway.deliver_album(chat, items).await {
                        Ok(()) => delivered += items.len(),
                        Err(e) => {
                            failed += items.len();
                            warn!(%chat, count = items.len(), error = %e, "album delivery failed");
                        }
                    }
                }
            }
        }

        let summary = if failed == 0 {
            format!("Done! Sent {delivered} item(s) back.")
        } else {
            format!("Sent {delivered} item(s), {failed} failed.")
        };
        self.notify(chat, &summary).await;
        info!(%chat, session = %session_id, delivered, failed, "batch finished");
    }

    // -- helpers ------------------------------------------------------------

    fn session_mut(&mut self, chat: ChatId) -> Option<&mut Session> {
        self.chats.get_mut(&chat).and_then(|state| state.session.as_mut())
    }

    fn menu_for(as_album: bool) -> Vec<CaptionMode> {
        CaptionMode::ALL
            .iter()
            .copied()
            .filter(|mode| !(as_album && *mode == CaptionMode::MakeAlbum))
            .collect()
    }

    async fn notify(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.gateway.send_notice(chat, text).await {
            warn!(%chat, error = %e, "failed to send notice");
        }
    }
}
