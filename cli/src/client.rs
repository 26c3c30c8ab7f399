use shared::ipc::{default_socket_path, Command, IpcError, Response};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::{timeout, Duration};
use tracing::warn;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DaemonClient {
    socket_path: PathBuf,
    connect_timeout: Duration,
    operation_timeout: Duration,
}

impl DaemonClient {
    pub fn new(socket_path: Option<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.unwrap_or_else(default_socket_path),
            connect_timeout: CONNECT_TIMEOUT,
            operation_timeout: OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, operation: Duration) -> Self {
        self.connect_timeout = connect;
        self.operation_timeout = operation;
        self
    }

    pub async fn send_command(&self, cmd: Command) -> Result<Response, IpcError> {
        let mut stream =
            match timeout(self.connect_timeout, UnixStream::connect(&self.socket_path)).await {
                Ok(Ok(stream)) => stream,
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(IpcError::ConnectionRefused);
                }
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
                    return Err(IpcError::ConnectionRefused);
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    warn!(
                        "Connection timeout: failed to connect to daemon at {} within {:?}",
                        self.socket_path.display(),
                        self.connect_timeout
                    );
                    return Err(IpcError::Timeout);
                }
            };

        let command_json = serde_json::to_vec(&cmd)?;

        // The daemon reads until EOF, so close our half once the request is out.
        let write = async {
            stream.write_all(&command_json).await?;
            stream.shutdown().await
        };
        match timeout(self.operation_timeout, write).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "Write timeout: failed to send command to daemon within {:?}",
                    self.operation_timeout
                );
                return Err(IpcError::Timeout);
            }
        }

        let mut buffer = Vec::new();
        match timeout(self.operation_timeout, stream.read_to_end(&mut buffer)).await {
            Ok(result) => {
                result?;
            }
            Err(_) => {
                warn!(
                    "Read timeout: failed to receive response from daemon within {:?}",
                    self.operation_timeout
                );
                return Err(IpcError::Timeout);
            }
        }

        let response: Response = serde_json::from_slice(&buffer)?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::StatusInfo;
    use shared::model::Page;
    use tokio::net::UnixListener;

    /// Accept one connection, read the full request and answer with `respond`.
    fn mock_daemon<F>(listener: UnixListener, respond: F)
    where
        F: FnOnce(Command) -> Response + Send + 'static,
    {
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buffer = Vec::new();
            stream.read_to_end(&mut buffer).await.unwrap();
            let command: Command = serde_json::from_slice(&buffer).unwrap();

            let response_json = serde_json::to_vec(&respond(command)).unwrap();
            stream.write_all(&response_json).await.unwrap();
            stream.shutdown().await.unwrap();
        });
    }

    #[test]
    fn test_daemon_client_default_path() {
        let client = DaemonClient::new(None);
        assert_eq!(client.socket_path, default_socket_path());
        assert_eq!(client.connect_timeout, CONNECT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_send_command_socket_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let client = DaemonClient::new(Some(dir.path().join("missing.sock")));
        let result = client.send_command(Command::Start).await;
        assert!(matches!(result, Err(IpcError::ConnectionRefused)));
    }

    #[tokio::test]
    async fn test_send_command_with_mock_server() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("quizvoxd.sock");
        let listener = UnixListener::bind(&socket).unwrap();
        mock_daemon(listener, |command| match command {
            Command::Start => Response::Ok,
            _ => Response::Error("unknown".to_string()),
        });

        let client = DaemonClient::new(Some(socket));
        let result = client.send_command(Command::Start).await;
        assert!(matches!(result, Ok(Response::Ok)));
    }

    #[tokio::test]
    async fn test_send_command_status() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("quizvoxd.sock");
        let listener = UnixListener::bind(&socket).unwrap();
        mock_daemon(listener, |command| {
            assert!(matches!(command, Command::Status));
            Response::Status(StatusInfo {
                is_running: true,
                is_listening: false,
                continuous: true,
                interim_results: true,
                language: "en-US".to_string(),
                current_page: Page::Guides,
            })
        });

        let client = DaemonClient::new(Some(socket));
        match client.send_command(Command::Status).await {
            Ok(Response::Status(info)) => {
                assert!(info.is_running);
                assert!(!info.is_listening);
                assert_eq!(info.language, "en-US");
                assert_eq!(info.current_page, Page::Guides);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_long_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("quizvoxd.sock");
        let listener = UnixListener::bind(&socket).unwrap();
        mock_daemon(listener, |command| match command {
            Command::Transcript(text) => Response::Error(format!("{} bytes", text.len())),
            _ => Response::Ok,
        });

        let text = format!("set source text to {}", "lorem ipsum ".repeat(400));
        let client = DaemonClient::new(Some(socket));
        let result = client.send_command(Command::Transcript(text.clone())).await;
        assert_eq!(
            result.unwrap(),
            Response::Error(format!("{} bytes", text.len()))
        );
    }

    #[tokio::test]
    async fn test_send_command_error_response() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("quizvoxd.sock");
        let listener = UnixListener::bind(&socket).unwrap();
        mock_daemon(listener, |_| Response::Error("test error".to_string()));

        let client = DaemonClient::new(Some(socket));
        let result = client.send_command(Command::Form).await;
        assert!(matches!(result, Ok(Response::Error(_))));
    }

    #[tokio::test]
    async fn test_send_command_timeout_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("quizvoxd.sock");
        let listener = UnixListener::bind(&socket).unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer).await;

            // Never answer.
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = DaemonClient::new(Some(socket))
            .with_timeouts(Duration::from_secs(1), Duration::from_millis(200));
        let result = client.send_command(Command::Status).await;
        assert!(matches!(result, Err(IpcError::Timeout)));
    }

    #[test]
    fn test_send_command_refused_blocking() {
        let dir = tempfile::tempdir().unwrap();
        let client = DaemonClient::new(Some(dir.path().join("nobody.sock")));
        let result = tokio_test::block_on(client.send_command(Command::Status));
        assert!(matches!(result, Err(IpcError::ConnectionRefused)));
    }
}
