//! # Application State
//!
//! Everything the chat widget knows, owned by one `App` built once at startup.
//! No terminal types here; presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── now: Instant                  // clock, advanced by Action::Tick
//! ├── active: Option<ConversationId> // conversation on screen
//! ├── header: AnimatedTitle         // title above the transcript
//! ├── transcript: Transcript        // messages / welcome / typing
//! ├── sidebar: Sidebar              // conversation list + highlight
//! ├── tracker: ConversationTracker  // which conversations have messages
//! ├── notifications: Notifications  // toasts
//! ├── dialog: ConfirmDialog         // shared confirmation modal
//! ├── history: Vec<HistoryEntry>    // navigation history
//! └── voice: VoiceState             // speech input status
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::{Duration, Instant};

use super::config::ResolvedConfig;
use super::conversation::{self, ConversationId};
use super::modal::ConfirmDialog;
use super::notification::{DEFAULT_TOAST_DURATION, Notifications};
use super::prefs::UiPrefs;
use super::sidebar::{Sidebar, SidebarEntry};
use super::texts::Notice;
use super::title::{AnimatedTitle, TYPING_SPEED};
use super::tracker::ConversationTracker;
use super::transcript::{Transcript, TranscriptItem};
use super::voice::VoiceState;
use crate::backend::ConversationMessages;

pub const DEFAULT_TITLE: &str = "Asistente";

/// One navigation step: the conversation shown and its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub conversation_id: ConversationId,
    pub url: String,
}

/// Timing knobs, taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct WidgetSettings {
    pub typing_speed: Duration,
    pub toast_duration: Duration,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            typing_speed: TYPING_SPEED,
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }
}

pub struct App {
    pub now: Instant,
    pub settings: WidgetSettings,
    pub active: Option<ConversationId>,
    pub header: AnimatedTitle,
    pub transcript: Transcript,
    pub sidebar: Sidebar,
    pub tracker: ConversationTracker,
    pub notifications: Notifications,
    pub dialog: ConfirmDialog,
    pub history: Vec<HistoryEntry>,
    pub voice: VoiceState,
    /// Success toast waiting for the named conversation to finish loading.
    pub pending_notice: Option<(ConversationId, Notice)>,
}

impl App {
    pub fn new(settings: WidgetSettings, prefs: UiPrefs, voice_supported: bool, now: Instant) -> Self {
        Self {
            now,
            settings,
            active: None,
            header: AnimatedTitle::new(DEFAULT_TITLE),
            transcript: Transcript::new(),
            sidebar: Sidebar::new(prefs.sidebar_hidden),
            tracker: ConversationTracker::new(None),
            notifications: Notifications::new(),
            dialog: ConfirmDialog::new(),
            history: Vec::new(),
            voice: VoiceState::new(voice_supported),
            pending_notice: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig, prefs: UiPrefs, voice_supported: bool, now: Instant) -> Self {
        let settings = WidgetSettings {
            typing_speed: config.typing_speed,
            toast_duration: config.toast_duration,
        };
        Self::new(settings, prefs, voice_supported, now)
    }

    /// Register a conversation known at startup: list it and, if it already
    /// holds messages, record that in the tracker.
    pub fn seed_conversation(&mut self, conversation: &ConversationMessages) {
        let updated_at = conversation
            .messages
            .last()
            .map(|m| m.timestamp.clone())
            .unwrap_or_default();
        self.sidebar.push_seed(SidebarEntry::new(
            conversation.id,
            conversation.title.clone(),
            updated_at,
        ));
        if !conversation.messages.is_empty() {
            self.tracker.mark_has_messages(conversation.id);
        }
    }

    pub fn prefs(&self) -> UiPrefs {
        UiPrefs {
            sidebar_hidden: self.sidebar.hidden,
        }
    }

    pub(crate) fn push_history(&mut self, id: ConversationId) {
        self.history.push(HistoryEntry {
            conversation_id: id,
            url: conversation::conversation_url(id),
        });
    }

    /// Whether anything on screen is moving and needs frequent redraws.
    pub fn is_animating(&self) -> bool {
        self.header.is_animating()
            || !self.notifications.is_empty()
            || self.transcript.items().contains(&TranscriptItem::Typing)
            || self
                .sidebar
                .entries()
                .iter()
                .any(|e| e.title.is_animating() || e.opacity(self.now) < 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::{Message, Role};
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.header.text(), DEFAULT_TITLE);
        assert_eq!(app.active, None);
        assert!(app.sidebar.is_empty());
        assert!(!app.voice.supported);
    }

    #[test]
    fn test_seed_marks_non_empty_conversations() {
        let mut app = test_app();
        app.seed_conversation(&ConversationMessages {
            id: ConversationId(1),
            title: "Ventas".to_string(),
            messages: vec![Message {
                role: Role::User,
                text: "hola".to_string(),
                timestamp: "09:30".to_string(),
            }],
        });
        app.seed_conversation(&ConversationMessages {
            id: ConversationId(2),
            title: "Nueva conversación".to_string(),
            messages: Vec::new(),
        });

        assert_eq!(app.sidebar.live_count(), 2);
        assert_eq!(app.sidebar.entries()[0].updated_at, "09:30");
        assert!(app.tracker.has_messages(ConversationId(1)));
        assert!(!app.tracker.has_messages(ConversationId(2)));
    }

    #[test]
    fn test_prefs_follow_sidebar_visibility() {
        let mut app = test_app();
        assert!(!app.prefs().sidebar_hidden);
        app.sidebar.hidden = true;
        assert!(app.prefs().sidebar_hidden);
    }
}
