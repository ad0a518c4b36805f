//! # Voice Input
//!
//! Bridges a speech recognizer to the message input. The recognizer itself
//! lives outside `core` (see `crate::speech`); this module only holds the
//! contract and the state it drives.

use std::sync::Arc;

use super::texts;

/// Lifecycle events emitted by a recognizer, in order:
/// `Started`, then `Transcript` (optional), then `Ended` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    Started,
    Transcript(String),
    Ended,
    Failed(String),
}

pub type VoiceSink = Arc<dyn Fn(VoiceEvent) + Send + Sync>;

/// A speech-to-text source.
pub trait SpeechRecognizer: Send + Sync {
    /// False when no recognizer is available; the mic control is hidden.
    fn is_supported(&self) -> bool;

    /// Start listening. Events are delivered through `sink`.
    fn start(&self, sink: VoiceSink);

    fn stop(&self);
}

/// Recognizer used when speech input is not configured.
pub struct Unsupported;

impl SpeechRecognizer for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&self, _sink: VoiceSink) {
        log::warn!("Speech recognition requested but not supported");
    }

    fn stop(&self) {}
}

#[derive(Debug)]
pub struct VoiceState {
    pub supported: bool,
    pub listening: bool,
    placeholder: &'static str,
    transcript: Option<String>,
}

impl VoiceState {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            listening: false,
            placeholder: texts::PLACEHOLDER_IDLE,
            transcript: None,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn apply(&mut self, event: VoiceEvent) {
        match event {
            VoiceEvent::Started => {
                self.listening = true;
                self.placeholder = texts::PLACEHOLDER_LISTENING;
            }
            VoiceEvent::Transcript(text) => {
                self.transcript = Some(text);
            }
            VoiceEvent::Ended => {
                self.listening = false;
                self.placeholder = texts::PLACEHOLDER_IDLE;
            }
            VoiceEvent::Failed(reason) => {
                log::error!("Speech recognition error: {}", reason);
                self.listening = false;
                self.placeholder = texts::PLACEHOLDER_VOICE_ERROR;
            }
        }
    }

    /// Transcript waiting to be written into the input box.
    pub fn take_transcript(&mut self) -> Option<String> {
        self.transcript.take()
    }
}
