use super::{Conversation, Role};

/// Renders a conversation into the literal prompt a model expects.
pub trait ChatTemplate {
    /// Renders all turns, ending with the header that cues the model to
    /// produce the assistant's reply.
    fn apply(&self, conversation: &Conversation) -> String;

    /// Sequences that terminate a generated reply
    fn stop_sequences(&self) -> Vec<String>;
}

/// Phi-3 Instruct Template
///
/// Format:
/// <|system|>
/// {content}<|end|>
/// <|user|>
/// {content}<|end|>
/// <|assistant|>
#[derive(Clone, Debug, Default)]
pub struct Phi3InstructTemplate;

impl Phi3InstructTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl ChatTemplate for Phi3InstructTemplate {
    fn apply(&self, conversation: &Conversation) -> String {
        let mut prompt = String::new();

        for message in conversation.messages() {
            let role = match message.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            };

            prompt.push_str(&format!("<|{}|>\n{}<|end|>\n", role, message.content));
        }

        prompt.push_str("<|assistant|>\n");

        prompt
    }

    fn stop_sequences(&self) -> Vec<String> {
        vec![
            "<|end|>".to_string(),
            "<|endoftext|>".to_string(),
        ]
    }
}
