use std::error::Error;
use std::sync::Arc;

use llama_cpp::standard_sampler::{SamplerStage, StandardSampler};
use llama_cpp::{LlamaModel, SessionParams};
use tracing::{debug, info};

use crate::chat::{ChatTemplate, Conversation};
use super::options::GenerationOptions;
use super::tokenizer::Tokenizer;
use super::types::InferenceError;

/// The result of one generation pass
#[derive(Clone, Debug)]
pub struct Generation {
    /// The generated text; includes the rendered prompt only when
    /// `return_full_text` was requested
    pub text: String,
}

/// A text-generation pipeline.
///
/// Pairs a loaded model, its tokenizer and a chat template behind a single
/// text-in/text-out call. Each call creates its own seeded session, so
/// repeated calls with the same inputs and greedy decoding reproduce the
/// same output.
pub struct TextGenerationPipeline {
    model: Arc<LlamaModel>,
    tokenizer: Tokenizer,
    template: Box<dyn ChatTemplate + Send + Sync>,
    /// Context window for sessions created by this pipeline
    context_size: usize,
}

impl TextGenerationPipeline {
    /// Creates a pipeline bound to the given model and tokenizer handles
    pub fn new(
        model: Arc<LlamaModel>,
        tokenizer: Tokenizer,
        template: Box<dyn ChatTemplate + Send + Sync>,
        context_size: usize,
    ) -> Self {
        Self {
            model,
            tokenizer,
            template,
            context_size,
        }
    }

    /// Runs one generation pass over the conversation.
    ///
    /// The seed applies only to the session created for this call; no
    /// process-wide RNG state is touched. Backend failures during prompt
    /// ingestion or completion propagate to the caller unchanged.
    ///
    /// # Arguments
    ///
    /// * `conversation` - The turns to render into the prompt
    /// * `options` - Generation bounds and decoding mode
    /// * `seed` - Seed for this call's session
    pub fn run(
        &self,
        conversation: &Conversation,
        options: &GenerationOptions,
        seed: u32,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        options.validate()?;

        if conversation.is_empty() {
            return Err(Box::new(InferenceError::Validation(
                "conversation must contain at least one turn".to_string(),
            )));
        }
        if conversation.has_blank_turn() {
            return Err(Box::new(InferenceError::Validation(
                "conversation turns must be non-empty strings".to_string(),
            )));
        }

        let prompt = self.template.apply(conversation);
        debug!(prompt_chars = prompt.len(), "Rendered prompt");

        // The prompt and the token budget must both fit the context window
        let prompt_tokens = self.tokenizer.encode(&prompt)?;
        if prompt_tokens.len() + options.max_new_tokens > self.context_size {
            return Err(Box::new(InferenceError::Validation(format!(
                "prompt ({} tokens) plus max_new_tokens ({}) exceeds the context window ({})",
                prompt_tokens.len(),
                options.max_new_tokens,
                self.context_size
            ))));
        }

        let session_params = SessionParams {
            seed,
            n_ctx: self.context_size as u32,
            n_batch: 512,
            ..Default::default()
        };
        let mut session = self.model.create_session(session_params)?;
        info!(seed, context_size = self.context_size, "Session created");

        session.advance_context(&prompt)?;
        debug!(prompt_tokens = prompt_tokens.len(), "Context advanced with prompt");

        // Greedy decoding unless sampling was explicitly enabled
        let sampler = if options.do_sample {
            StandardSampler::new_softmax(vec![SamplerStage::Temperature(options.temperature)], 1)
        } else {
            StandardSampler::new_greedy()
        };

        let completions = session.start_completing_with(sampler, options.max_new_tokens)?;

        let mut generated = Vec::new();
        for token in completions {
            generated.push(token);
            if generated.len() >= options.max_new_tokens {
                break;
            }
        }
        info!(generated_tokens = generated.len(), "Completion finished");

        let mut text = self.tokenizer.decode(&generated);

        // The model may emit a literal stop marker before the handle ends
        for stop in self.template.stop_sequences() {
            if let Some(at) = text.find(&stop) {
                text.truncate(at);
            }
        }

        let text = if options.return_full_text {
            format!("{}{}", prompt, text)
        } else {
            text
        };

        Ok(Generation { text })
    }
}
