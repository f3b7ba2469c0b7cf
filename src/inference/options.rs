use super::types::InferenceError;

/// Options governing one generation pass.
///
/// A closed record: these fields are the full set of recognized options.
#[derive(Clone, Debug)]
pub struct GenerationOptions {
    /// Upper bound on newly generated tokens
    pub max_new_tokens: usize,
    /// When set, the rendered prompt is prepended to the returned text
    pub return_full_text: bool,
    /// Sampling temperature; ignored under greedy decoding
    pub temperature: f32,
    /// When false, decoding is greedy (always the highest-probability token)
    pub do_sample: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 500,
            return_full_text: false,
            temperature: 0.0,
            do_sample: false,
        }
    }
}

impl GenerationOptions {
    /// Checks option invariants before a session is created
    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.max_new_tokens == 0 {
            return Err(InferenceError::Validation(
                "max_new_tokens must be greater than 0".to_string(),
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
    fn defaults_are_the_fixed_generation_record() {
        let options = GenerationOptions::default();
        assert_eq!(options.max_new_tokens, 500);
        assert!(!options.return_full_text);
        assert_eq!(options.temperature, 0.0);
        assert!(!options.do_sample);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_token_budget_rejected() {
        let options = GenerationOptions { max_new_tokens: 0, ..Default::default() };
        assert!(options.validate().is_err());
    }

    #[test]
    fn negative_temperature_rejected() {
        let options = GenerationOptions { temperature: -1.0, ..Default::default() };
        assert!(options.validate().is_err());
    }
}
