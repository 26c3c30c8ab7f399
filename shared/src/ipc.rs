use crate::model::{GuideFormData, Notification, Page, Persona, QuizFormData};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const SOCKET_NAME: &str = "quizvoxd.sock";

/// Get the Unix socket path for the daemon.
/// Uses XDG runtime directory if available, falls back to /tmp/quizvoxd.sock
pub fn default_socket_path() -> PathBuf {
    if let Some(runtime_dir) = dirs::runtime_dir() {
        runtime_dir.join(SOCKET_NAME)
    } else {
        PathBuf::from("/tmp").join(SOCKET_NAME)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Status,
    /// A finalized transcript, delivered as a single final recognition result.
    Transcript(String),
    /// A raw event from the external speech capture engine.
    Capture(CaptureEvent),
    Form,
    Chat { persona: Persona, message: String },
    /// The AI client's answer to the last chat message of a persona.
    ChatReply { persona: Persona, reply: String },
    ResetChat(Persona),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Response {
    Ok,
    Error(String),
    Status(StatusInfo),
    Interpreted(InterpretOutcome),
    Form(FormSnapshot),
    Notified(Vec<Notification>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusInfo {
    pub is_running: bool,
    pub is_listening: bool,
    pub continuous: bool,
    /// Whether the capture bridge should stream interim results.
    pub interim_results: bool,
    pub language: String,
    pub current_page: Page,
}

/// Result of feeding one utterance (or capture event) through the interpreter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct InterpretOutcome {
    pub matched: bool,
    pub notifications: Vec<Notification>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub current_page: Page,
    pub dark_mode: bool,
    pub quiz: QuizFormData,
    pub guide: GuideFormData,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub transcript: String,
    pub is_final: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureErrorKind {
    NoSpeech,
    Aborted,
    AudioCapture,
    Network,
    NotAllowed,
    ServiceNotAllowed,
    LanguageNotSupported,
}

impl CaptureErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureErrorKind::NoSpeech => "no-speech",
            CaptureErrorKind::Aborted => "aborted",
            CaptureErrorKind::AudioCapture => "audio-capture",
            CaptureErrorKind::Network => "network",
            CaptureErrorKind::NotAllowed => "not-allowed",
            CaptureErrorKind::ServiceNotAllowed => "service-not-allowed",
            CaptureErrorKind::LanguageNotSupported => "language-not-supported",
        }
    }

    /// Fatal errors end the listening session; the user has to restart it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CaptureErrorKind::NoSpeech | CaptureErrorKind::Aborted)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    Results {
        result_index: usize,
        results: Vec<RecognitionResult>,
    },
    End,
    Error(CaptureErrorKind),
}

#[derive(Error, Debug)]
pub enum IpcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Connection refused: is quizvoxd running?")]
    ConnectionRefused,

    #[error("Connection timeout")]
    Timeout,
}
