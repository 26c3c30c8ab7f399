use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Speech capture is not available")]
    Unavailable,

    #[error("Failed to start speech capture: {0}")]
    StartFailed(String),
}

/// The speech engine that produces recognition events.
pub trait CaptureEngine: Send {
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop capturing. Must be harmless when the engine already ended.
    fn stop(&mut self);
}

/// Capture engine living outside the daemon.
///
/// Recognition happens in another process (a browser tab, a speech bridge)
/// which pushes events over the socket. Starting and stopping only track the
/// session so stray events can be told apart from a live session.
#[derive(Debug)]
pub struct ExternalCapture {
    available: bool,
    running: bool,
    sessions_started: u64,
}

impl ExternalCapture {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            running: false,
            sessions_started: 0,
        }
    }
}

impl CaptureEngine for ExternalCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        if !self.available {
            return Err(CaptureError::Unavailable);
        }
        if self.running {
            return Err(CaptureError::StartFailed(
                "capture session already running".to_string(),
            ));
        }

        self.running = true;
        self.sessions_started += 1;
        info!("Capture session #{} started", self.sessions_started);
        Ok(())
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!("Capture session #{} stopped", self.sessions_started);
        }
    }
}
