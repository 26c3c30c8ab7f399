use regex::Regex;
use shared::ipc::{CaptureErrorKind, CaptureEvent};
use std::sync::OnceLock;
use tracing::{debug, error, info, warn};

use super::capture::{CaptureEngine, CaptureError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Listening,
}

/// Idle/Listening lifecycle around a capture engine.
///
/// Only finalized transcripts leave the listener; interim results are dropped.
/// In continuous mode an engine that ends on its own is restarted for as long
/// as the listener should be listening.
pub struct VoiceListener<E: CaptureEngine> {
    state: ListenerState,
    engine: E,
    continuous: bool,
    restarts: u64,
}

impl<E: CaptureEngine> VoiceListener<E> {
    pub fn new(engine: E, continuous: bool) -> Self {
        Self {
            state: ListenerState::Idle,
            engine,
            continuous,
            restarts: 0,
        }
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == ListenerState::Listening
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of automatic restarts performed in continuous mode.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.is_listening() {
            debug!("Listener already listening");
            return Ok(());
        }

        if let Err(e) = self.engine.start() {
            error!("Error starting recognition: {}", e);
            return Err(e);
        }

        self.state = ListenerState::Listening;
        info!("State transition: Idle → Listening");
        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.is_listening() {
            return;
        }

        self.state = ListenerState::Idle;
        self.engine.stop();
        info!("State transition: Listening → Idle (stopped)");
    }

    pub fn toggle(&mut self) -> Result<ListenerState, CaptureError> {
        if self.is_listening() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.state)
    }

    /// Feed one engine event; returns the finalized transcript to interpret.
    pub fn handle_event(&mut self, event: &CaptureEvent) -> Option<String> {
        match event {
            CaptureEvent::Results {
                result_index,
                results,
            } => {
                if !self.is_listening() {
                    debug!("Dropping recognition results received while idle");
                    return None;
                }

                let finalized: String = results
                    .iter()
                    .skip(*result_index)
                    .filter(|r| r.is_final)
                    .map(|r| r.transcript.as_str())
                    .collect();

                let text = normalize_transcript(&finalized);
                if text.is_empty() {
                    debug!("No finalized transcript in results");
                    None
                } else {
                    debug!("Finalized transcript: '{}'", text);
                    Some(text)
                }
            }
            CaptureEvent::End => {
                self.engine.stop();
                if !self.is_listening() {
                    return None;
                }

                if self.continuous {
                    match self.engine.start() {
                        Ok(()) => {
                            self.restarts += 1;
                            info!("Capture ended while listening, restarted ({})", self.restarts);
                        }
                        Err(e) => {
                            self.state = ListenerState::Idle;
                            error!("Failed to restart recognition: {}", e);
                            warn!("State transition: Listening → Idle (restart failed)");
                        }
                    }
                } else {
                    self.state = ListenerState::Idle;
                    info!("State transition: Listening → Idle (end of utterance)");
                }
                None
            }
            CaptureEvent::Error(kind) => {
                self.handle_error(*kind);
                None
            }
        }
    }

    fn handle_error(&mut self, kind: CaptureErrorKind) {
        if !kind.is_fatal() {
            debug!("Ignoring recoverable capture error: {:?}", kind);
            return;
        }

        error!("Speech capture error: {:?}", kind);
        if self.is_listening() {
            self.state = ListenerState::Idle;
            self.engine.stop();
            warn!("State transition: Listening → Idle (fatal error)");
        }
    }
}

/// Clean up a finalized transcript before matching.
///
/// Removes the annotations capture engines insert for non-speech audio, such
/// as `[noise]` or `(inaudible)`, and collapses runs of whitespace. Any other
/// bracketed text was spoken and is kept.
pub fn normalize_transcript(text: &str) -> String {
    static ANNOTATION_RE: OnceLock<Regex> = OnceLock::new();
    let re = ANNOTATION_RE.get_or_init(|| {
        Regex::new(
            r"(?i)[\[(]\s*(?:noise|music|inaudible|unintelligible|silence|blank_audio|laughter|applause|cough)\s*[\])]",
        )
        .expect("annotation regex is valid")
    });

    let stripped = re.replace_all(text, " ");
    let normalized = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized != text {
        debug!("Normalized transcript: '{}' -> '{}'", text, normalized);
    }
    normalized
}
