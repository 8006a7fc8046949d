//! OpenAI-compatible chat-completions backend.

mod client;
mod config;
mod dto;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
