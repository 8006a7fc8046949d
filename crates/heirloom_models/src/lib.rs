//! Generative backend integrations for Heirloom.
//!
//! Currently ships an OpenAI-compatible chat-completions client, which also
//! works against any server exposing the same `/chat/completions` surface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{OpenAiClient, OpenAiConfig};
