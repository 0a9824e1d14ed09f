//! Tool system for function calling.

pub mod arguments;
pub mod tool;
pub mod trip;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;
