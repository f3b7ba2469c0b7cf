//! # Inference Module
//!
//! Provides the single operation this crate exists for: load the pretrained
//! Phi-3 artifact and its tokenizer, wrap them in a text-generation
//! pipeline, and return the model's reply to a two-turn conversation.
//!
//! ## Key Components
//!
//! - [`generate_reply`]: The top-level orchestrator
//! - [`GenerateRequest`]: User message plus defaulted system message,
//!   temperature and seed
//! - [`GenerationOptions`]: The typed generation record
//! - [`TextGenerationPipeline`]: Model + tokenizer + template behind one
//!   text-in/text-out call
//!
//! Model loading, tokenization, sampling and generation are owned by the
//! `llama_cpp` backend; this module is orchestration glue.

use std::error::Error;
use std::sync::Arc;

use llama_cpp::{LlamaModel, LlamaParams};
use tracing::info;

use crate::chat::{Conversation, Phi3InstructTemplate};
use crate::config::Settings;

pub mod options;
pub mod pipeline;
pub mod tokenizer;
pub mod types;

pub use options::GenerationOptions;
pub use pipeline::{Generation, TextGenerationPipeline};
pub use tokenizer::Tokenizer;
pub use types::{GenerateRequest, InferenceError, DEFAULT_SEED, DEFAULT_SYSTEM_MESSAGE};

/// Generates the model's reply to a single request.
///
/// The call sequence is fixed: validate the request, load the model
/// artifact named by the settings, resolve its tokenizer, assemble the
/// system-then-user conversation, and run one bounded greedy generation
/// pass. Only newly generated text is returned; the prompt is not echoed.
///
/// Each call loads the model fresh and drops it on return. No state
/// persists across invocations, at the cost of repeated load latency.
///
/// # Arguments
///
/// * `settings` - Application settings naming the artifact and bounds
/// * `request` - The user message with optional system message,
///   temperature and seed overrides
///
/// # Errors
///
/// Returns [`InferenceError::Validation`] for malformed inputs and
/// [`InferenceError::Resource`] when the artifact cannot be resolved or
/// loaded. Backend failures during generation propagate unchanged.
pub fn generate_reply(
    settings: &Settings,
    request: &GenerateRequest,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    request.validate()?;

    let model_path = settings.models.directory.join(&settings.models.filename);
    if !model_path.exists() {
        return Err(Box::new(InferenceError::Resource(format!(
            "model artifact not found at {}",
            model_path.display()
        ))));
    }

    let model_params = LlamaParams {
        n_gpu_layers: settings.inference.n_gpu_layers,
        use_mmap: settings.inference.use_mmap,
        use_mlock: settings.inference.use_mlock,
        ..Default::default()
    };

    info!(path = %model_path.display(), "Loading model");
    let model = LlamaModel::load_from_file(&model_path, model_params).map_err(|e| {
        InferenceError::Resource(format!(
            "failed to load model from {}: {}",
            model_path.display(),
            e
        ))
    })?;
    let model = Arc::new(model);
    info!("Model loaded");

    // The tokenizer comes from the same artifact the model was loaded from
    let tokenizer = Tokenizer::for_model(Arc::clone(&model));

    let mut conversation = Conversation::with_system(&request.system_message);
    conversation.push_user(&request.user_message);

    let pipeline = TextGenerationPipeline::new(
        model,
        tokenizer,
        Box::new(Phi3InstructTemplate::new()),
        settings.inference.context_size,
    );

    let options = GenerationOptions {
        max_new_tokens: settings.inference.max_new_tokens,
        return_full_text: false,
        temperature: request.temperature,
        do_sample: false,
    };

    let generation = pipeline.run(&conversation, &options, request.seed)?;
    Ok(generation.text)
}
