//! Text generation driving the agent-execution loop.

pub mod text;

pub use text::{generate_text, GenerateTextResult, GenerationStep, DEFAULT_MAX_TOOL_TURNS};
