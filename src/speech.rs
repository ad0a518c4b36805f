//! Speech recognition backed by an external command.
//!
//! The configured command records one utterance and prints its transcript on
//! stdout. The recognition language is passed in `PREDICTA_VOICE_LANG`.

use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use tokio::process::Command;
use tokio::task::AbortHandle;

use crate::core::config::ResolvedConfig;
use crate::core::voice::{SpeechRecognizer, Unsupported, VoiceEvent, VoiceSink};

pub const LANG_ENV: &str = "PREDICTA_VOICE_LANG";

/// Pick the recognizer for this configuration.
pub fn build(config: &ResolvedConfig) -> Arc<dyn SpeechRecognizer> {
    match &config.voice_command {
        Some(argv) => {
            info!("Voice input enabled via {:?}", argv);
            Arc::new(CommandRecognizer::new(argv.clone(), config.voice_lang.clone()))
        }
        None => Arc::new(Unsupported),
    }
}

struct Listening {
    task: AbortHandle,
    sink: VoiceSink,
}

pub struct CommandRecognizer {
    argv: Vec<String>,
    lang: String,
    running: Mutex<Option<Listening>>,
}

impl CommandRecognizer {
    pub fn new(argv: Vec<String>, lang: String) -> Self {
        Self {
            argv,
            lang,
            running: Mutex::new(None),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Listening>> {
        self.running.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn is_supported(&self) -> bool {
        !self.argv.is_empty()
    }

    fn start(&self, sink: VoiceSink) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|l| !l.task.is_finished()) {
            debug!("Voice capture already running");
            return;
        }

        let Some((program, args)) = self.argv.split_first() else {
            sink(VoiceEvent::Failed("no voice command configured".to_string()));
            return;
        };
        let mut command = Command::new(program);
        command.args(args).env(LANG_ENV, &self.lang).kill_on_drop(true);

        let events = sink.clone();
        let task = tokio::spawn(async move {
            events(VoiceEvent::Started);
            match command.output().await {
                Ok(output) if output.status.success() => {
                    let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if !transcript.is_empty() {
                        events(VoiceEvent::Transcript(transcript));
                    }
                    events(VoiceEvent::Ended);
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    warn!("Voice command exited with {}: {}", output.status, stderr);
                    events(VoiceEvent::Failed(format!("{}: {}", output.status, stderr)));
                }
                Err(e) => {
                    warn!("Failed to run voice command: {}", e);
                    events(VoiceEvent::Failed(e.to_string()));
                }
            }
        });

        *slot = Some(Listening {
            task: task.abort_handle(),
            sink,
        });
    }

    fn stop(&self) {
        let Some(listening) = self.slot().take() else {
            return;
        };
        if listening.task.is_finished() {
            return;
        }
        // Aborting drops the child future, which kills the process.
        listening.task.abort();
        info!("Voice capture stopped");
        (listening.sink)(VoiceEvent::Ended);
    }
}
