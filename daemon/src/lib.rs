pub mod app;
pub mod command;
pub mod config;
pub mod listener;
pub mod rate_limit;
pub mod server;
pub mod sessions;
pub mod state;
pub mod voice_commands;

pub use app::{AppState, GenerationDispatcher, GenerationRequest};
pub use command::{CommandInterpreter, CommandPattern};
pub use rate_limit::CommandRateLimiter;
pub use server::DaemonServer;
pub use sessions::SessionRegistry;
pub use state::DaemonState;
