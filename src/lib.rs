//! phigen: one-shot Phi-3 chat completion over llama.cpp.
//!
//! The crate wraps a locally stored GGUF build of
//! `microsoft/Phi-3-mini-4k-instruct` behind a single operation:
//! [`inference::generate_reply`] loads the model and tokenizer, renders a
//! system-then-user conversation through the Phi-3 instruct template, and
//! returns a greedy completion bounded to the configured token budget.
//!
//! All model loading, tokenization, sampling and generation is delegated to
//! the `llama_cpp` backend.

pub mod chat;
pub mod config;
pub mod inference;

pub use config::Settings;
pub use inference::{generate_reply, GenerateRequest};
