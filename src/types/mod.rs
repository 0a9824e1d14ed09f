//! Core types shared across the crate.

pub mod generation;
pub mod message;

pub use generation::{FinishReason, GenerationSettings, Usage};
pub use message::{
    AgentToolCall, AgentToolResult, ChatRole, ChatTurn, ContentPart, ModelMessage, Role,
};
