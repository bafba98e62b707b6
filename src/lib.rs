// src/lib.rs

pub mod api;
pub mod config;
pub mod forensics;
pub mod llm;
pub mod persona;
pub mod pipeline;
pub mod prompt;
pub mod server;
pub mod state;
