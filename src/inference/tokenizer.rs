use std::error::Error;
use std::sync::Arc;

use llama_cpp::{LlamaModel, Token};

/// Tokenizer handle for a loaded model artifact.
///
/// Encoding and decoding are delegated entirely to the backend's vocabulary
/// for the same artifact the model was loaded from; nothing is reimplemented
/// here.
pub struct Tokenizer {
    model: Arc<LlamaModel>,
}

impl Tokenizer {
    /// Resolves the tokenizer that matches the loaded model
    pub fn for_model(model: Arc<LlamaModel>) -> Self {
        Self { model }
    }

    /// Converts text into the model's token representation.
    ///
    /// Special tokens in the text (chat template markers) are parsed as
    /// such rather than as literal content.
    pub fn encode(&self, text: &str) -> Result<Vec<Token>, Box<dyn Error + Send + Sync>> {
        let tokens = self.model.tokenize_bytes(text, true, true)?;
        Ok(tokens)
    }

    /// Converts generated tokens back into text
    pub fn decode(&self, tokens: &[Token]) -> String {
        let mut text = String::new();
        for token in tokens {
            text.push_str(&self.model.token_to_piece(*token));
        }
        text
    }
}
