pub mod interpreter;
pub mod pattern;

pub use interpreter::CommandInterpreter;
pub use pattern::{Action, CommandPattern, Template, TemplateError, WILDCARD};
