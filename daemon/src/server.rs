use shared::ipc::{Command, Response};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::rate_limit::CommandRateLimiter;
use crate::state::DaemonState;

/// Largest request accepted on the socket.
pub const MAX_REQUEST_BYTES: u64 = 64 * 1024;

pub struct DaemonServer {
    socket_path: PathBuf,
    state: Arc<Mutex<DaemonState>>,
    limiter: Arc<CommandRateLimiter>,
    operation_timeout: Duration,
}

impl DaemonServer {
    pub fn new(
        socket_path: PathBuf,
        state: Arc<Mutex<DaemonState>>,
        limiter: CommandRateLimiter,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            socket_path,
            state,
            limiter: Arc::new(limiter),
            operation_timeout,
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn bind(&self) -> anyhow::Result<UnixListener> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)?;
        }
        if let Some(parent) = self.socket_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Starting socket server at {}", self.socket_path.display());
        let listener = UnixListener::bind(&self.socket_path)?;
        debug!("Listener bound successfully");
        Ok(listener)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = self.bind()?;
        self.serve(listener).await
    }

    pub async fn serve(&self, listener: UnixListener) -> anyhow::Result<()> {
        loop {
            debug!("Waiting for connection...");
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("Connection accepted");
                    let state = Arc::clone(&self.state);
                    let limiter = Arc::clone(&self.limiter);
                    let operation_timeout = self.operation_timeout;
                    tokio::spawn(async move {
                        if let Err(e) =
                            Self::handle_connection(state, limiter, operation_timeout, stream).await
                        {
                            error!("Error handling connection: {}", e);
                        } else {
                            debug!("Connection handled successfully");
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }

    async fn handle_connection(
        state: Arc<Mutex<DaemonState>>,
        limiter: Arc<CommandRateLimiter>,
        operation_timeout: Duration,
        mut stream: UnixStream,
    ) -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        let mut reader = (&mut stream).take(MAX_REQUEST_BYTES);
        timeout(operation_timeout, reader.read_to_end(&mut buffer))
            .await
            .map_err(|_| anyhow::anyhow!("Timed out reading request"))??;

        if buffer.is_empty() {
            return Ok(());
        }

        let response = match serde_json::from_slice::<Command>(&buffer) {
            Ok(command) => {
                if limiter.check() {
                    info!("Received command: {:?}", command);
                    process_command(&state, command).await
                } else {
                    warn!("Rate limit exceeded, rejecting {:?}", command);
                    Response::Error("Rate limit exceeded, try again shortly".to_string())
                }
            }
            Err(e) => {
                warn!("Malformed request: {}", e);
                Response::Error(format!("Malformed request: {}", e))
            }
        };

        let response_json = serde_json::to_vec(&response)?;
        timeout(operation_timeout, stream.write_all(&response_json))
            .await
            .map_err(|_| anyhow::anyhow!("Timed out writing response"))??;
        stream.shutdown().await?;

        info!("Sent response: {:?}", response);

        Ok(())
    }
}

/// Apply one command to the daemon state.
pub async fn process_command(state: &Mutex<DaemonState>, command: Command) -> Response {
    let mut state = state.lock().await;

    match command {
        Command::Start => Response::Notified(state.activate()),
        Command::Stop => Response::Notified(state.deactivate()),
        Command::Toggle => Response::Notified(state.toggle()),
        Command::Status => Response::Status(state.get_status()),
        Command::Transcript(text) => match state.handle_transcript(&text) {
            Ok(outcome) => Response::Interpreted(outcome),
            Err(e) => Response::Error(e.to_string()),
        },
        Command::Capture(event) => Response::Interpreted(state.handle_capture_event(&event)),
        Command::Form => Response::Form(state.form()),
        Command::Chat { persona, message } => match state.chat(persona, &message) {
            Ok(()) => Response::Ok,
            Err(e) => Response::Error(e.to_string()),
        },
        Command::ChatReply { persona, reply } => match state.chat_reply(persona, &reply) {
            Ok(()) => Response::Ok,
            Err(e) => Response::Error(e.to_string()),
        },
        Command::ResetChat(persona) => match state.reset_chat(persona) {
            Ok(()) => Response::Ok,
            Err(e) => Response::Error(e.to_string()),
        },
    }
}

impl Drop for DaemonServer {
    fn drop(&mut self) {
        if self.socket_path.exists() {
            let _ = std::fs::remove_file(&self.socket_path);
        }
    }
}
