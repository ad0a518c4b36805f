//! # Actions
//!
//! Everything that can happen in the chat widget becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Server answers? That's `Action::ReplyReceived { .. }`.
//!
//! The `update()` function applies an action to the state and returns the
//! effects the adapter must run. No I/O happens here: backend calls, prefs
//! writes and speech capture are described as `Effect`s and executed by
//! `crate::dispatch`, whose results come back as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//!                                             │
//!                      Action  ←  dispatch  ←─┘
//! ```

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::conversation::{ConversationId, Role};
use super::modal::{ConfirmReceiver, ConfirmRequest};
use super::notification::{SHORT_TOAST_DURATION, ToastKind};
use super::prefs::UiPrefs;
use super::sidebar::{CLEANUP_FADE, REMOVE_FADE, SidebarEntry};
use super::state::{App, DEFAULT_TITLE};
use super::texts::{self, Notice};
use super::tracker::SwitchOutcome;
use super::transcript::SUGGESTIONS;
use super::voice::VoiceEvent;
use crate::backend::{BackendError, ChatReply, ConversationMessages, DeleteOutcome, NewConversation};

/// Why a conversation is being created; decides the toast that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePurpose {
    /// No conversation configured at startup.
    Startup,
    /// The user asked for a new conversation.
    Explicit,
    /// The last listed conversation was deleted.
    ReplaceLast,
}

#[derive(Debug)]
pub enum Action {
    /// Conversations fetched at startup, in configured order.
    Started(Vec<ConversationMessages>),
    Tick(Instant),
    Submit(String),
    SubmitSuggestion(usize),
    ReplyReceived {
        conversation: Option<ConversationId>,
        result: Result<ChatReply, BackendError>,
    },
    LoadConversation(ConversationId),
    ConversationLoaded {
        requested: ConversationId,
        result: Result<ConversationMessages, BackendError>,
    },
    CreateConversation,
    ConversationCreated {
        purpose: CreatePurpose,
        result: Result<NewConversation, BackendError>,
    },
    RequestDelete(ConversationId),
    DeleteConfirmed(ConversationId),
    DeleteFinished {
        id: ConversationId,
        was_last: bool,
        result: Result<DeleteOutcome, BackendError>,
    },
    AnswerDialog(bool),
    DialogBackdropClicked,
    DismissToast(u64),
    DismissLatestToast,
    ToggleSidebar,
    /// Move the keyboard highlight in the sidebar list.
    SelectNext,
    SelectPrevious,
    ToggleVoice,
    Voice(VoiceEvent),
    Quit,
}

#[derive(Debug)]
pub enum Effect {
    SendMessage {
        text: String,
        conversation: Option<ConversationId>,
    },
    FetchMessages(ConversationId),
    CreateConversation(CreatePurpose),
    DeleteConversation {
        id: ConversationId,
        was_last: bool,
    },
    /// Best-effort cleanup of an empty conversation. Never reported back.
    DeleteSilently(ConversationId),
    AwaitConfirmation {
        receiver: ConfirmReceiver,
        conversation: ConversationId,
    },
    SavePrefs(UiPrefs),
    StartListening,
    StopListening,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Started(conversations) => start(app, conversations),

        Action::Tick(now) => {
            app.now = app.now.max(now);
            app.header.tick(app.now);
            app.sidebar.tick(app.now);
            app.notifications.tick(app.now);
            Vec::new()
        }

        Action::Submit(text) => send_message(app, &text),

        Action::SubmitSuggestion(index) => match SUGGESTIONS.get(index) {
            Some(suggestion) => send_message(app, suggestion.message),
            None => Vec::new(),
        },

        Action::ReplyReceived {
            conversation,
            result,
        } => {
            receive_reply(app, conversation, result);
            Vec::new()
        }

        Action::LoadConversation(id) => load_conversation(app, id),

        Action::ConversationLoaded { requested, result } => {
            // Navigation moved on while this fetch was in flight.
            if app.tracker.current() != Some(requested) {
                debug!(
                    "Dropping stale load of conversation {} (current: {:?})",
                    requested,
                    app.tracker.current()
                );
                return Vec::new();
            }
            let pending = app.pending_notice.take_if(|(id, _)| *id == requested);
            match result {
                Ok(conversation) => {
                    show_conversation(app, requested, conversation);
                    if let Some((_, notice)) = pending {
                        toast(app, ToastKind::Success, notice, Some(SHORT_TOAST_DURATION));
                    }
                }
                Err(e) => {
                    warn!("Failed to load conversation {}: {}", requested, e);
                    toast(app, ToastKind::Error, texts::LOAD_ERROR, None);
                }
            }
            Vec::new()
        }

        Action::CreateConversation => {
            if !app.transcript.has_messages() {
                toast(app, ToastKind::Warning, texts::EMPTY_CONVERSATION, None);
                return Vec::new();
            }
            vec![Effect::CreateConversation(CreatePurpose::Explicit)]
        }

        Action::ConversationCreated { purpose, result } => match result {
            Ok(conversation) => conversation_created(app, purpose, conversation),
            Err(e) => {
                warn!("Failed to create conversation ({:?}): {}", purpose, e);
                let notice = match purpose {
                    CreatePurpose::ReplaceLast => texts::DELETE_ERROR,
                    CreatePurpose::Startup | CreatePurpose::Explicit => texts::CREATE_ERROR,
                };
                toast(app, ToastKind::Error, notice, None);
                Vec::new()
            }
        },

        Action::RequestDelete(id) => {
            let receiver = app.dialog.confirm(ConfirmRequest::new(
                texts::DELETE_CONFIRM,
                texts::DELETE_CONFIRM_LABEL,
                true,
            ));
            vec![Effect::AwaitConfirmation {
                receiver,
                conversation: id,
            }]
        }

        Action::DeleteConfirmed(id) => {
            let was_last = app.sidebar.live_count() == 1;
            if was_last {
                info!("Deleting the last conversation ({}), a new one will replace it", id);
            }
            vec![Effect::DeleteConversation { id, was_last }]
        }

        Action::DeleteFinished {
            id,
            was_last,
            result,
        } => match result {
            Ok(outcome) if outcome.success => conversation_deleted(app, id, was_last, outcome),
            Ok(_) => {
                warn!("Server refused to delete conversation {}", id);
                toast(app, ToastKind::Error, texts::DELETE_ERROR, None);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to delete conversation {}: {}", id, e);
                toast(app, ToastKind::Error, texts::DELETE_ERROR, None);
                Vec::new()
            }
        },

        Action::AnswerDialog(confirmed) => {
            app.dialog.resolve(confirmed);
            Vec::new()
        }

        Action::DialogBackdropClicked => {
            app.dialog.click_outside();
            Vec::new()
        }

        Action::DismissToast(id) => {
            app.notifications.dismiss(id, app.now);
            Vec::new()
        }

        Action::DismissLatestToast => {
            app.notifications.dismiss_latest(app.now);
            Vec::new()
        }

        Action::ToggleSidebar => {
            app.sidebar.hidden = !app.sidebar.hidden;
            vec![Effect::SavePrefs(app.prefs())]
        }

        Action::SelectNext => {
            app.sidebar.select_next();
            Vec::new()
        }

        Action::SelectPrevious => {
            app.sidebar.select_previous();
            Vec::new()
        }

        Action::ToggleVoice => {
            if !app.voice.supported {
                Vec::new()
            } else if app.voice.listening {
                vec![Effect::StopListening]
            } else {
                vec![Effect::StartListening]
            }
        }

        Action::Voice(event) => {
            app.voice.apply(event);
            Vec::new()
        }

        Action::Quit => {
            let mut effects = Vec::new();
            if let Some(id) = app.tracker.check_before_leaving() {
                info!("Leaving empty conversation {}, discarding it", id);
                effects.push(Effect::DeleteSilently(id));
            }
            effects.push(Effect::Quit);
            effects
        }
    }
}

/// Seed the sidebar and open the first conversation, or create one when
/// nothing could be seeded.
fn start(app: &mut App, conversations: Vec<ConversationMessages>) -> Vec<Effect> {
    for conversation in &conversations {
        app.seed_conversation(conversation);
    }
    let Some(first) = conversations.into_iter().next() else {
        info!("No conversation to resume, creating one");
        return vec![Effect::CreateConversation(CreatePurpose::Startup)];
    };
    let id = first.id;
    app.tracker.check_before_switch(id);
    show_conversation(app, id, first);
    Vec::new()
}

fn toast(app: &mut App, kind: ToastKind, notice: Notice, duration: Option<Duration>) {
    let duration = duration.unwrap_or(app.settings.toast_duration);
    app.notifications.show(kind, notice, duration, app.now);
}

/// Optimistically render the user message and ask the backend for a reply.
fn send_message(app: &mut App, raw: &str) -> Vec<Effect> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    app.transcript.append_text(Role::User, text);
    app.transcript.show_typing();
    debug!("Sending message to conversation {:?}", app.active);

    vec![Effect::SendMessage {
        text: text.to_string(),
        conversation: app.active,
    }]
}

fn receive_reply(
    app: &mut App,
    conversation: Option<ConversationId>,
    result: Result<ChatReply, BackendError>,
) {
    // The transcript may have been replaced while the request was in flight.
    let on_screen = app.active == conversation;
    if on_screen {
        app.transcript.hide_typing();
    }

    match result {
        Ok(reply) => {
            if on_screen {
                app.transcript.append_text(Role::Bot, reply.display_text());
            }
            if let Some(id) = conversation {
                app.tracker.mark_has_messages(id);
            }
            if let Some(title) = reply.title_update() {
                let (now, speed) = (app.now, app.settings.typing_speed);
                if on_screen {
                    app.header.reveal(title, now, speed);
                }
                if let Some(id) = conversation
                    && let Some(entry) = app.sidebar.entry_mut(id)
                {
                    entry.title.reveal(title, now, speed);
                }
            }
        }
        Err(e) => {
            warn!("Failed to send message: {}", e);
            if on_screen {
                app.transcript
                    .append_text(Role::Bot, texts::SERVER_ERROR.message);
            }
            toast(app, ToastKind::Error, texts::SERVER_ERROR, None);
        }
    }
}

/// First half of navigation: settle the conversation being left, then fetch.
fn load_conversation(app: &mut App, id: ConversationId) -> Vec<Effect> {
    let mut effects = Vec::new();
    match app.tracker.check_before_switch(id) {
        SwitchOutcome::DiscardEmpty(previous) => {
            app.sidebar.remove(previous, CLEANUP_FADE, app.now);
            info!("Empty conversation {} discarded on switch to {}", previous, id);
            effects.push(Effect::DeleteSilently(previous));
        }
        outcome => debug!("Switching to conversation {}: {:?}", id, outcome),
    }
    effects.push(Effect::FetchMessages(id));
    effects
}

/// Second half of navigation: replace the transcript with the fetched messages.
fn show_conversation(app: &mut App, requested: ConversationId, conversation: ConversationMessages) {
    app.active = Some(conversation.id);
    app.transcript.clear();
    app.header.set(conversation.title);

    if conversation.messages.is_empty() {
        app.transcript.show_welcome();
    } else {
        for message in conversation.messages {
            app.transcript.append(message);
        }
        app.tracker.mark_has_messages(conversation.id);
    }

    app.sidebar.set_active(requested);
    app.push_history(requested);
    info!(
        "Conversation {} loaded ({} messages)",
        conversation.id,
        app.transcript.message_count()
    );
}

fn conversation_created(app: &mut App, purpose: CreatePurpose, conversation: NewConversation) -> Vec<Effect> {
    info!("Conversation {} created ({:?})", conversation.id, purpose);
    let id = conversation.id;
    app.sidebar.insert_top(
        SidebarEntry::new(id, conversation.title, conversation.updated_at),
        app.now,
    );
    // Announced once the new conversation is actually on screen
    app.pending_notice = match purpose {
        CreatePurpose::Explicit => Some((id, texts::CREATE_SUCCESS)),
        CreatePurpose::ReplaceLast => Some((id, texts::DELETE_REPLACED)),
        CreatePurpose::Startup => None,
    };
    load_conversation(app, id)
}

fn conversation_deleted(
    app: &mut App,
    id: ConversationId,
    was_last: bool,
    outcome: DeleteOutcome,
) -> Vec<Effect> {
    app.sidebar.remove(id, REMOVE_FADE, app.now);
    app.tracker.forget(id);
    let was_active = app.active == Some(id);

    if was_last {
        return vec![Effect::CreateConversation(CreatePurpose::ReplaceLast)];
    }

    toast(
        app,
        ToastKind::Success,
        texts::DELETE_SUCCESS,
        Some(SHORT_TOAST_DURATION),
    );
    match outcome.next {
        Some(next) => load_conversation(app, next),
        None => {
            if was_active {
                app.active = None;
                app.header.set(DEFAULT_TITLE);
                app.transcript.show_welcome();
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modal::ConfirmError;
    use crate::core::transcript::TranscriptItem;
    use crate::test_support::{conversation, new_conversation, test_app};

    const THREE: ConversationId = ConversationId(3);
    const FIVE: ConversationId = ConversationId(5);
    const SEVEN: ConversationId = ConversationId(7);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// App showing `id` (loaded through the regular navigation path).
    fn app_showing(id: ConversationId, messages: &[(Role, &str)]) -> App {
        let mut app = test_app();
        let loaded = conversation(id.0, "Conversación", messages);
        app.seed_conversation(&loaded);
        update(&mut app, Action::LoadConversation(id));
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: id,
                result: Ok(loaded),
            },
        );
        app
    }

    #[test]
    fn test_start_opens_first_seeded_conversation() {
        let mut app = test_app();
        let effects = update(
            &mut app,
            Action::Started(vec![
                conversation(4, "Ventas", &[(Role::User, "hola")]),
                conversation(6, "Nueva conversación", &[]),
            ]),
        );
        assert!(effects.is_empty());
        assert_eq!(app.active, Some(ConversationId(4)));
        assert_eq!(app.tracker.current(), Some(ConversationId(4)));
        assert_eq!(app.sidebar.live_count(), 2);
        assert_eq!(app.header.text(), "Ventas");
        assert!(!app.tracker.has_messages(ConversationId(6)));
    }

    #[test]
    fn test_start_without_conversations_creates_one() {
        let mut app = test_app();
        let effects = update(&mut app, Action::Started(Vec::new()));
        assert!(matches!(
            effects.as_slice(),
            [Effect::CreateConversation(CreatePurpose::Startup)]
        ));

        update(
            &mut app,
            Action::ConversationCreated {
                purpose: CreatePurpose::Startup,
                result: Ok(new_conversation(1)),
            },
        );
        assert!(app.notifications.is_empty());
        assert_eq!(app.sidebar.active(), Some(ConversationId(1)));
    }

    #[test]
    fn test_switch_away_from_empty_deletes_it_once() {
        let mut app = app_showing(FIVE, &[]);
        app.seed_conversation(&conversation(7, "Otra", &[(Role::User, "hola")]));

        let effects = update(&mut app, Action::LoadConversation(SEVEN));

        assert!(matches!(
            effects.as_slice(),
            [Effect::DeleteSilently(FIVE), Effect::FetchMessages(SEVEN)]
        ));
        assert!(!app.sidebar.contains(FIVE));
        assert_eq!(app.tracker.current(), Some(SEVEN));
    }

    #[test]
    fn test_switch_away_from_marked_never_deletes() {
        let mut app = app_showing(FIVE, &[(Role::User, "hola"), (Role::Bot, "¡hola!")]);
        app.seed_conversation(&conversation(7, "Otra", &[]));

        let effects = update(&mut app, Action::LoadConversation(SEVEN));

        assert!(matches!(effects.as_slice(), [Effect::FetchMessages(SEVEN)]));
        assert!(app.sidebar.contains(FIVE));
    }

    #[test]
    fn test_reload_same_conversation_is_not_a_switch() {
        let mut app = app_showing(FIVE, &[]);
        let effects = update(&mut app, Action::LoadConversation(FIVE));
        assert!(matches!(effects.as_slice(), [Effect::FetchMessages(FIVE)]));
    }

    #[test]
    fn test_loaded_conversation_replaces_transcript() {
        let app = app_showing(THREE, &[(Role::User, "a"), (Role::Bot, "b")]);
        assert_eq!(app.active, Some(THREE));
        assert_eq!(app.transcript.message_count(), 2);
        assert_eq!(app.sidebar.active(), Some(THREE));
        assert!(app.tracker.has_messages(THREE));
        assert_eq!(app.history.last().unwrap().url, "/gameplay/chat/3/");
    }

    #[test]
    fn test_empty_conversation_shows_welcome() {
        let app = app_showing(THREE, &[]);
        assert!(app.transcript.is_welcome());
        assert!(!app.tracker.has_messages(THREE));
    }

    #[test]
    fn test_server_id_is_authoritative() {
        let mut app = test_app();
        update(&mut app, Action::LoadConversation(THREE));
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: THREE,
                result: Ok(conversation(4, "Otra", &[])),
            },
        );
        assert_eq!(app.active, Some(ConversationId(4)));
        assert_eq!(app.history.last().unwrap().conversation_id, THREE);
    }

    #[test]
    fn test_load_failure_keeps_transcript() {
        let mut app = app_showing(THREE, &[(Role::User, "a")]);
        update(&mut app, Action::LoadConversation(FIVE));
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: FIVE,
                result: Err(BackendError::Network("offline".into())),
            },
        );
        assert_eq!(app.active, Some(THREE));
        assert_eq!(app.transcript.message_count(), 1);
        assert_eq!(app.notifications.toasts()[0].title, "Error al cargar");
    }

    #[test]
    fn test_out_of_order_loads_keep_latest_navigation() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Started(vec![
                conversation(1, "Ventas", &[(Role::User, "hola")]),
                conversation(2, "Vacía", &[]),
                conversation(3, "Otra vacía", &[]),
            ]),
        );
        update(&mut app, Action::LoadConversation(ConversationId(2)));
        let effects = update(&mut app, Action::LoadConversation(THREE));
        assert!(matches!(
            effects.as_slice(),
            [Effect::DeleteSilently(ConversationId(2)), Effect::FetchMessages(THREE)]
        ));

        // Replies arrive newest first
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: THREE,
                result: Ok(conversation(3, "Otra vacía", &[])),
            },
        );
        let history_len = app.history.len();
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: ConversationId(2),
                result: Ok(conversation(2, "Vacía", &[])),
            },
        );

        assert_eq!(app.active, Some(THREE));
        assert_eq!(app.active, app.tracker.current());
        assert_eq!(app.sidebar.active(), Some(THREE));
        assert_eq!(app.header.text(), "Otra vacía");
        assert_eq!(app.history.len(), history_len);

        // A stale failure is not reported either
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: ConversationId(2),
                result: Err(BackendError::Network("offline".into())),
            },
        );
        assert!(app.notifications.is_empty());

        let effects = update(&mut app, Action::Quit);
        assert!(matches!(
            effects.as_slice(),
            [Effect::DeleteSilently(THREE), Effect::Quit]
        ));
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let mut app = app_showing(THREE, &[]);
        let effects = update(&mut app, Action::Submit("   \n\t".into()));
        assert!(effects.is_empty());
        assert!(app.transcript.is_welcome());
        assert!(app.transcript.items().is_empty());
    }

    #[test]
    fn test_send_then_reply_with_new_title() {
        let mut app = app_showing(THREE, &[]);
        let t0 = app.now;

        let effects = update(&mut app, Action::Submit("  Hola ".into()));
        match effects.as_slice() {
            [Effect::SendMessage { text, conversation }] => {
                assert_eq!(text, "Hola");
                assert_eq!(*conversation, Some(THREE));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert_eq!(app.transcript.items().last(), Some(&TranscriptItem::Typing));

        update(
            &mut app,
            Action::ReplyReceived {
                conversation: Some(THREE),
                result: Ok(ChatReply {
                    text: Ok("Hola, ¿en qué ayudo?".into()),
                    first_message: true,
                    new_title: Some("Saludo".into()),
                }),
            },
        );

        let texts: Vec<_> = app.transcript.messages().map(|m| (m.role, m.text.as_str())).collect();
        assert_eq!(
            texts,
            vec![(Role::User, "Hola"), (Role::Bot, "Hola, ¿en qué ayudo?")]
        );
        assert!(app.tracker.has_messages(THREE));

        assert_eq!(app.header.display(t0), "");
        update(&mut app, Action::Tick(t0 + ms(250)));
        assert_eq!(app.header.display(app.now), "Salud");
        let entry = &app.sidebar.entries()[0];
        assert_eq!(entry.title.display(app.now), "Salud");

        update(&mut app, Action::Tick(t0 + ms(300)));
        assert_eq!(app.header.display(app.now), "Saludo");
        assert!(!app.header.is_animating());
    }

    #[test]
    fn test_reply_error_field_is_rendered() {
        let mut app = app_showing(THREE, &[]);
        update(&mut app, Action::Submit("borrar todo".into()));
        update(
            &mut app,
            Action::ReplyReceived {
                conversation: Some(THREE),
                result: Ok(ChatReply {
                    text: Err("No permitido".into()),
                    first_message: false,
                    new_title: None,
                }),
            },
        );
        assert_eq!(app.transcript.messages().last().unwrap().text, "No permitido");
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_send_failure_renders_server_error() {
        let mut app = app_showing(THREE, &[]);
        update(&mut app, Action::Submit("Hola".into()));
        update(
            &mut app,
            Action::ReplyReceived {
                conversation: Some(THREE),
                result: Err(BackendError::Http {
                    status: 500,
                    body: "boom".into(),
                }),
            },
        );

        assert!(!app.transcript.items().contains(&TranscriptItem::Typing));
        let last = app.transcript.messages().last().unwrap();
        assert_eq!(last.role, Role::Bot);
        assert_eq!(last.text, "No se pudo comunicar con el servidor");
        assert_eq!(app.notifications.toasts()[0].kind, ToastKind::Error);
        assert!(!app.tracker.has_messages(THREE));
    }

    #[test]
    fn test_double_submit_sends_twice() {
        let mut app = app_showing(THREE, &[]);
        let first = update(&mut app, Action::Submit("uno".into()));
        let second = update(&mut app, Action::Submit("dos".into()));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        let typing = app
            .transcript
            .items()
            .iter()
            .filter(|i| **i == TranscriptItem::Typing)
            .count();
        assert_eq!(typing, 2);
    }

    #[test]
    fn test_reply_for_previous_conversation_leaves_transcript_alone() {
        let mut app = app_showing(THREE, &[(Role::User, "a")]);
        update(&mut app, Action::Submit("pregunta".into()));
        update(&mut app, Action::LoadConversation(FIVE));
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: FIVE,
                result: Ok(conversation(5, "Cinco", &[])),
            },
        );

        update(
            &mut app,
            Action::ReplyReceived {
                conversation: Some(THREE),
                result: Ok(ChatReply {
                    text: Ok("respuesta".into()),
                    first_message: false,
                    new_title: None,
                }),
            },
        );
        assert!(app.transcript.is_welcome());
        assert!(app.tracker.has_messages(THREE));
    }

    #[test]
    fn test_suggestion_sends_its_message() {
        let mut app = app_showing(THREE, &[]);
        let effects = update(&mut app, Action::SubmitSuggestion(1));
        assert!(matches!(
            effects.as_slice(),
            [Effect::SendMessage { text, .. }] if text == "Registrar venta"
        ));
        assert!(update(&mut app, Action::SubmitSuggestion(9)).is_empty());
    }

    #[test]
    fn test_create_refused_on_empty_transcript() {
        let mut app = app_showing(THREE, &[]);
        let effects = update(&mut app, Action::CreateConversation);
        assert!(effects.is_empty());
        let toast = &app.notifications.toasts()[0];
        assert_eq!(toast.kind, ToastKind::Warning);
        assert_eq!(toast.title, "Conversación vacía");
    }

    #[test]
    fn test_create_inserts_on_top_and_loads() {
        let mut app = app_showing(THREE, &[(Role::User, "hola")]);
        let effects = update(&mut app, Action::CreateConversation);
        assert!(matches!(
            effects.as_slice(),
            [Effect::CreateConversation(CreatePurpose::Explicit)]
        ));

        let effects = update(
            &mut app,
            Action::ConversationCreated {
                purpose: CreatePurpose::Explicit,
                result: Ok(new_conversation(8)),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::FetchMessages(ConversationId(8))]
        ));
        assert_eq!(app.sidebar.entries()[0].id, ConversationId(8));
        assert_eq!(app.sidebar.active(), Some(ConversationId(8)));
        assert!(app.notifications.is_empty());

        update(
            &mut app,
            Action::ConversationLoaded {
                requested: ConversationId(8),
                result: Ok(conversation(8, "Nueva conversación", &[])),
            },
        );
        let toast = &app.notifications.toasts()[0];
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.title, texts::CREATE_SUCCESS.title);
    }

    #[test]
    fn test_create_success_not_announced_when_load_fails() {
        let mut app = app_showing(THREE, &[(Role::User, "hola")]);
        update(
            &mut app,
            Action::ConversationCreated {
                purpose: CreatePurpose::Explicit,
                result: Ok(new_conversation(8)),
            },
        );
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: ConversationId(8),
                result: Err(BackendError::Network("offline".into())),
            },
        );
        let toasts = app.notifications.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Error al cargar");

        // A later successful reload does not resurrect the announcement
        update(&mut app, Action::LoadConversation(ConversationId(8)));
        update(
            &mut app,
            Action::ConversationLoaded {
                requested: ConversationId(8),
                result: Ok(conversation(8, "Nueva conversación", &[])),
            },
        );
        assert_eq!(app.notifications.toasts().len(), 1);
    }

    #[test]
    fn test_create_failure_shows_error() {
        let mut app = app_showing(THREE, &[(Role::User, "hola")]);
        update(
            &mut app,
            Action::ConversationCreated {
                purpose: CreatePurpose::Explicit,
                result: Err(BackendError::MissingCsrfToken),
            },
        );
        assert_eq!(app.notifications.toasts()[0].title, "Error al crear");
        assert_eq!(app.sidebar.live_count(), 1);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let mut app = app_showing(THREE, &[]);
        let mut effects = update(&mut app, Action::RequestDelete(THREE));
        let Some(Effect::AwaitConfirmation {
            mut receiver,
            conversation,
        }) = effects.pop()
        else {
            panic!("expected a confirmation request");
        };
        assert_eq!(conversation, THREE);
        let request = app.dialog.request().unwrap();
        assert!(request.danger);
        assert_eq!(request.confirm_label, "Eliminar");

        update(&mut app, Action::DialogBackdropClicked);
        assert_eq!(receiver.try_recv().unwrap(), Ok(false));
        assert!(!app.dialog.is_open());
    }

    #[test]
    fn test_second_delete_request_supersedes_first() {
        let mut app = app_showing(THREE, &[]);
        let mut first = update(&mut app, Action::RequestDelete(THREE));
        update(&mut app, Action::RequestDelete(THREE));
        let Some(Effect::AwaitConfirmation { mut receiver, .. }) = first.pop() else {
            panic!("expected a confirmation request");
        };
        assert_eq!(receiver.try_recv().unwrap(), Err(ConfirmError::Superseded));
    }

    #[test]
    fn test_deleting_last_conversation_creates_replacement() {
        let mut app = app_showing(THREE, &[(Role::User, "hola")]);

        let mut effects = update(&mut app, Action::RequestDelete(THREE));
        let Some(Effect::AwaitConfirmation { mut receiver, .. }) = effects.pop() else {
            panic!("expected a confirmation request");
        };
        update(&mut app, Action::AnswerDialog(true));
        assert_eq!(receiver.try_recv().unwrap(), Ok(true));

        let effects = update(&mut app, Action::DeleteConfirmed(THREE));
        assert!(matches!(
            effects.as_slice(),
            [Effect::DeleteConversation { id: THREE, was_last: true }]
        ));

        let effects = update(
            &mut app,
            Action::DeleteFinished {
                id: THREE,
                was_last: true,
                result: Ok(DeleteOutcome {
                    success: true,
                    next: None,
                }),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::CreateConversation(CreatePurpose::ReplaceLast)]
        ));

        let effects = update(
            &mut app,
            Action::ConversationCreated {
                purpose: CreatePurpose::ReplaceLast,
                result: Ok(new_conversation(9)),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::FetchMessages(ConversationId(9))]
        ));
        assert_eq!(app.sidebar.live_count(), 1);

        update(
            &mut app,
            Action::ConversationLoaded {
                requested: ConversationId(9),
                result: Ok(conversation(9, "Nueva conversación", &[])),
            },
        );
        assert_eq!(app.active, Some(ConversationId(9)));
        assert!(app.transcript.is_welcome());
        assert_eq!(app.notifications.toasts()[0].message, "Nueva conversación creada automáticamente");
    }

    #[test]
    fn test_delete_navigates_to_redirect_target() {
        let mut app = app_showing(THREE, &[(Role::User, "hola")]);
        app.seed_conversation(&conversation(5, "Cinco", &[(Role::User, "x")]));

        let effects = update(&mut app, Action::DeleteConfirmed(THREE));
        assert!(matches!(
            effects.as_slice(),
            [Effect::DeleteConversation { was_last: false, .. }]
        ));

        let effects = update(
            &mut app,
            Action::DeleteFinished {
                id: THREE,
                was_last: false,
                result: Ok(DeleteOutcome {
                    success: true,
                    next: Some(FIVE),
                }),
            },
        );
        assert!(matches!(effects.as_slice(), [Effect::FetchMessages(FIVE)]));
        assert!(!app.sidebar.contains(THREE));
        assert_eq!(app.notifications.toasts()[0].title, "Conversación eliminada");
    }

    #[test]
    fn test_delete_failure_keeps_entry() {
        let mut app = app_showing(THREE, &[(Role::User, "hola")]);
        update(
            &mut app,
            Action::DeleteFinished {
                id: THREE,
                was_last: true,
                result: Err(BackendError::Http {
                    status: 403,
                    body: "CSRF".into(),
                }),
            },
        );
        assert!(app.sidebar.contains(THREE));
        assert_eq!(app.notifications.toasts()[0].title, "Error al eliminar");
    }

    #[test]
    fn test_quit_discards_empty_current() {
        let mut app = app_showing(FIVE, &[]);
        let effects = update(&mut app, Action::Quit);
        assert!(matches!(
            effects.as_slice(),
            [Effect::DeleteSilently(FIVE), Effect::Quit]
        ));

        let mut app = app_showing(FIVE, &[(Role::Bot, "hola")]);
        let effects = update(&mut app, Action::Quit);
        assert!(matches!(effects.as_slice(), [Effect::Quit]));
    }

    #[test]
    fn test_toggle_sidebar_saves_prefs() {
        let mut app = test_app();
        let effects = update(&mut app, Action::ToggleSidebar);
        assert!(app.sidebar.hidden);
        assert!(matches!(
            effects.as_slice(),
            [Effect::SavePrefs(UiPrefs { sidebar_hidden: true })]
        ));
    }

    #[test]
    fn test_keyboard_selection_moves_highlight() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Started(vec![
                conversation(1, "Ventas", &[(Role::User, "hola")]),
                conversation(2, "Stock", &[(Role::User, "hola")]),
            ]),
        );
        assert_eq!(app.sidebar.selected_id(), Some(ConversationId(1)));

        update(&mut app, Action::SelectNext);
        update(&mut app, Action::SelectNext);
        assert_eq!(app.sidebar.selected_id(), Some(ConversationId(2)));

        update(&mut app, Action::SelectPrevious);
        assert_eq!(app.sidebar.selected_id(), Some(ConversationId(1)));
    }

    #[test]
    fn test_toggle_voice_requires_support() {
        let mut app = test_app();
        assert!(update(&mut app, Action::ToggleVoice).is_empty());

        app.voice.supported = true;
        assert!(matches!(
            update(&mut app, Action::ToggleVoice).as_slice(),
            [Effect::StartListening]
        ));
        update(&mut app, Action::Voice(VoiceEvent::Started));
        assert!(matches!(
            update(&mut app, Action::ToggleVoice).as_slice(),
            [Effect::StopListening]
        ));
    }

    #[test]
    fn test_tick_expires_toasts() {
        let mut app = test_app();
        let t0 = app.now;
        update(&mut app, Action::CreateConversation);
        assert_eq!(app.notifications.toasts().len(), 1);
        update(&mut app, Action::Tick(t0 + Duration::from_secs(5)));
        assert!(app.notifications.is_empty());
    }
}
