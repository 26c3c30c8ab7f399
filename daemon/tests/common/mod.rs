// Common test helpers for quizvox daemon tests
//
// This module provides utilities for:
// - Building daemon state wired to a generation channel
// - Running a socket server on a temporary path
// - Test output formatting

#![allow(dead_code)]

use quizvoxd::config::Config;
use quizvoxd::{CommandRateLimiter, DaemonServer, DaemonState, GenerationDispatcher, GenerationRequest};
use shared::ipc::{Command, Response};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Daemon state with default config and the receiving end of its generation channel.
pub fn daemon_state() -> (DaemonState, UnboundedReceiver<GenerationRequest>) {
    daemon_state_with(Config::default())
}

pub fn daemon_state_with(config: Config) -> (DaemonState, UnboundedReceiver<GenerationRequest>) {
    let (dispatcher, rx) = GenerationDispatcher::channel();
    let state = DaemonState::new(config, dispatcher).expect("voice commands should compile");
    (state, rx)
}

/// A server listening on `<dir>/quizvoxd.sock`.
pub struct TestServer {
    pub socket_path: PathBuf,
    pub requests: UnboundedReceiver<GenerationRequest>,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn start_server(dir: &Path, config: Config) -> TestServer {
    let socket_path = dir.join("quizvoxd.sock");
    let limiter = CommandRateLimiter::from_config(&config.rate_limit).expect("valid rate limit");
    let (state, requests) = daemon_state_with(config);

    let server = DaemonServer::new(
        socket_path.clone(),
        Arc::new(Mutex::new(state)),
        limiter,
        Duration::from_secs(2),
    );
    let listener = server.bind().expect("bind test socket");
    let handle = tokio::spawn(async move {
        let _ = server.serve(listener).await;
    });

    TestServer {
        socket_path,
        requests,
        handle,
    }
}

/// Send raw bytes and read the daemon's reply.
pub async fn send_raw(socket_path: &Path, payload: &[u8]) -> Response {
    let mut stream = UnixStream::connect(socket_path).await.expect("connect");
    stream.write_all(payload).await.expect("write request");
    stream.shutdown().await.expect("close write half");

    let mut buffer = Vec::new();
    stream.read_to_end(&mut buffer).await.expect("read response");
    serde_json::from_slice(&buffer).expect("response is valid JSON")
}

pub async fn send(socket_path: &Path, command: &Command) -> Response {
    let payload = serde_json::to_vec(command).expect("serialize command");
    send_raw(socket_path, &payload).await
}

/// Print a section header
pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}", "=".repeat(60));
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("\nℹ {}", message);
}
