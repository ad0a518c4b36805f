//! # Effect Dispatch
//!
//! Runs the `Effect`s returned by `core::action::update`. Backend calls are
//! spawned on the tokio runtime and report back as `Action`s through the
//! event-loop channel; local effects (prefs, speech) run inline.
//!
//! ```text
//! update() ──Effect──▶ Dispatcher::run ──spawn──▶ execute(effect, backend)
//!                                                        │
//!   event loop ◀──────────── mpsc::Sender<Action> ◀──────┘
//! ```
//!
//! The silent delete of an empty conversation is fire-and-forget: its result
//! never reaches the reducer and a failure is only logged. At exit the loop
//! grants pending ones a short grace period through [`Dispatcher::finish`].

use std::sync::{Arc, mpsc};
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::backend::{ChatBackend, ConversationMessages};
use crate::core::action::{Action, Effect};
use crate::core::conversation::ConversationId;
use crate::core::modal::ConfirmError;
use crate::core::prefs;
use crate::core::voice::{SpeechRecognizer, VoiceSink};

/// Perform one backend effect and return the action that reports its result.
///
/// Local effects (`SavePrefs`, speech, `Quit`) have no backend work and
/// return `None`, as do the silent delete and a declined confirmation.
pub async fn execute(effect: Effect, backend: &dyn ChatBackend) -> Option<Action> {
    match effect {
        Effect::SendMessage { text, conversation } => {
            let result = backend.send_message(&text, conversation).await;
            Some(Action::ReplyReceived {
                conversation,
                result,
            })
        }
        Effect::FetchMessages(id) => {
            let result = backend.fetch_messages(id).await;
            Some(Action::ConversationLoaded {
                requested: id,
                result,
            })
        }
        Effect::CreateConversation(purpose) => {
            let result = backend.create_conversation().await;
            Some(Action::ConversationCreated { purpose, result })
        }
        Effect::DeleteConversation { id, was_last } => {
            let result = backend.delete_conversation(id).await;
            Some(Action::DeleteFinished {
                id,
                was_last,
                result,
            })
        }
        Effect::DeleteSilently(id) => {
            delete_silently(backend, id).await;
            None
        }
        Effect::AwaitConfirmation {
            receiver,
            conversation,
        } => match receiver.await {
            Ok(Ok(true)) => Some(Action::DeleteConfirmed(conversation)),
            Ok(Ok(false)) => {
                debug!("Deletion of {} cancelled", conversation);
                None
            }
            Ok(Err(ConfirmError::Superseded)) => {
                info!("Confirmation for {} superseded by a newer request", conversation);
                None
            }
            Err(_) => {
                warn!("Confirmation dialog dropped without an answer");
                None
            }
        },
        Effect::SavePrefs(_) | Effect::StartListening | Effect::StopListening | Effect::Quit => {
            None
        }
    }
}

async fn delete_silently(backend: &dyn ChatBackend, id: ConversationId) {
    match backend.delete_conversation(id).await {
        Ok(outcome) if outcome.success => info!("Empty conversation {} deleted", id),
        Ok(_) => warn!("Server refused to delete empty conversation {}", id),
        Err(e) => warn!("Failed to delete empty conversation {}: {}", id, e),
    }
}

/// Fetch the conversations to show at startup. Failures are logged and the
/// conversation is skipped; order is preserved.
pub async fn fetch_startup(
    backend: &dyn ChatBackend,
    ids: &[ConversationId],
) -> Vec<ConversationMessages> {
    let results = join_all(ids.iter().map(|id| backend.fetch_messages(*id))).await;
    ids.iter()
        .zip(results)
        .filter_map(|(id, result)| match result {
            Ok(conversation) => Some(conversation),
            Err(e) => {
                warn!("Skipping conversation {} at startup: {}", id, e);
                None
            }
        })
        .collect()
}

pub struct Dispatcher {
    backend: Arc<dyn ChatBackend>,
    recognizer: Arc<dyn SpeechRecognizer>,
    tx: mpsc::Sender<Action>,
    cleanup: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        recognizer: Arc<dyn SpeechRecognizer>,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            backend,
            recognizer,
            tx,
            cleanup: Vec::new(),
        }
    }

    /// Run an effect. Returns true when the effect asks the adapter to quit.
    pub fn run(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Quit => return true,
            Effect::SavePrefs(prefs) => prefs::save_prefs(&prefs),
            Effect::StartListening => {
                let tx = self.tx.clone();
                let sink: VoiceSink = Arc::new(move |event| {
                    if tx.send(Action::Voice(event)).is_err() {
                        warn!("Failed to forward voice event: receiver dropped");
                    }
                });
                self.recognizer.start(sink);
            }
            Effect::StopListening => self.recognizer.stop(),
            Effect::DeleteSilently(id) => {
                let backend = self.backend.clone();
                let handle = tokio::spawn(async move {
                    delete_silently(backend.as_ref(), id).await;
                });
                self.cleanup.retain(|h| !h.is_finished());
                self.cleanup.push(handle);
            }
            effect => self.spawn(effect),
        }
        false
    }

    fn spawn(&self, effect: Effect) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(action) = execute(effect, backend.as_ref()).await
                && tx.send(action).is_err()
            {
                warn!("Failed to deliver backend result: receiver dropped");
            }
        });
    }

    /// Give in-flight silent deletes up to `grace` to finish before exit.
    /// Whatever is still running afterwards is abandoned.
    pub async fn finish(self, grace: Duration) {
        let pending: Vec<_> = self.cleanup.into_iter().filter(|h| !h.is_finished()).collect();
        if pending.is_empty() {
            return;
        }
        debug!("Waiting for {} cleanup request(s)", pending.len());
        if tokio::time::timeout(grace, join_all(pending)).await.is_err() {
            warn!("Cleanup requests still running after {:?}, abandoning", grace);
        }
    }
}
