// src/api/http/mod.rs

pub mod chat;
pub mod handlers;
pub mod router;

pub use chat::{ChatRequest, ChatResponse, AGENT_OFFLINE_REPLY, HONEYPOT_AGENT_ID};
pub use router::http_router;
