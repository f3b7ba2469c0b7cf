//! Chat conversation types and prompt templates.
//!
//! A [`Conversation`] is an ordered list of role-tagged turns. A
//! [`ChatTemplate`] renders a conversation into the literal prompt string a
//! model was instruction-tuned on; tokenization of that string stays with
//! the inference backend.

mod conversation;
mod template;

pub use conversation::{Conversation, Message, Role};
pub use template::{ChatTemplate, Phi3InstructTemplate};
