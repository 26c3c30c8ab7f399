pub mod capture;
pub mod voice;

pub use capture::{CaptureEngine, CaptureError, ExternalCapture};
pub use voice::{normalize_transcript, ListenerState, VoiceListener};
