// src/prompt/mod.rs
// Prompt assembly for persona replies

pub mod builder;

pub use builder::{build_conversation_context, build_prompt, AssembledPrompt, ConversationTurn};
