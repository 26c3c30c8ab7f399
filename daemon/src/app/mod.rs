pub mod generation;
pub mod notify;
pub mod state;

pub use generation::{GenerationDispatcher, GenerationRequest};
pub use notify::Notifier;
pub use state::AppState;
