use std::error::Error;
use std::fmt;

/// System message used when the caller does not supply one
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful AI assistant.";

/// Seed applied to each generation session unless the caller overrides it
pub const DEFAULT_SEED: u32 = 0;

/// Errors produced by the inference orchestrator.
///
/// Failures inside the backend's generation call are not wrapped here; they
/// propagate to the caller unchanged as boxed errors.
#[derive(Debug)]
pub enum InferenceError {
    /// The model artifact could not be resolved or loaded
    Resource(String),
    /// The request or generation options are malformed
    Validation(String),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InferenceError::Resource(msg) => write!(f, "Resource error: {}", msg),
            InferenceError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl Error for InferenceError {}

/// A single text-generation request.
///
/// Defaults: the standard system message, temperature 0.0 (greedy
/// decoding), seed 0. The seed is part of the request, so determinism is
/// scoped to the call rather than to process-wide RNG state.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
    /// The user's message
    pub user_message: String,
    /// System framing for the exchange
    pub system_message: String,
    /// Sampling temperature; only shapes output when sampling is enabled
    pub temperature: f32,
    /// Seed for the generation session
    pub seed: u32,
}

impl GenerateRequest {
    /// Creates a request with the default system message, temperature 0.0
    /// and seed 0.
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            temperature: 0.0,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = system_message.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the request invariants: non-empty messages and a finite,
    /// non-negative temperature.
    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.user_message.trim().is_empty() {
            return Err(InferenceError::Validation(
                "user_message must not be empty".to_string(),
            ));
        }
        if self.system_message.trim().is_empty() {
            return Err(InferenceError::Validation(
                "system_message must not be empty".to_string(),
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(InferenceError::Validation(format!(
                "temperature must be a non-negative number, got: {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_match_contract() {
        let request = GenerateRequest::new("Hello");
        assert_eq!(request.system_message, DEFAULT_SYSTEM_MESSAGE);
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.seed, 0);
    }

    #[test]
    fn empty_user_message_fails_validation() {
        let request = GenerateRequest::new("   ");
        let err = request.validate().unwrap_err();
        assert!(matches!(err, InferenceError::Validation(_)));
    }

    #[test]
    fn negative_temperature_fails_validation() {
        let request = GenerateRequest::new("Hello").with_temperature(-0.5);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, InferenceError::Validation(_)));
    }

    #[test]
    fn non_finite_temperature_fails_validation() {
        let request = GenerateRequest::new("Hello").with_temperature(f32::NAN);
        assert!(request.validate().is_err());
    }

    #[test]
    fn builder_overrides_apply() {
        let request = GenerateRequest::new("Hello")
            .with_system_message("Be terse.")
            .with_temperature(0.7)
            .with_seed(42);
        assert_eq!(request.system_message, "Be terse.");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.seed, 42);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn error_display_names_the_kind() {
        let resource = InferenceError::Resource("missing weights".to_string());
        let validation = InferenceError::Validation("bad input".to_string());
        assert_eq!(resource.to_string(), "Resource error: missing weights");
        assert_eq!(validation.to_string(), "Validation error: bad input");
    }
}
