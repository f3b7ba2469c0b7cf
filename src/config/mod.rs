// Required external crates for configuration management and serialization
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for locating the pretrained model artifact
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Directory where model files are stored
    pub directory: PathBuf,
    /// Filename of the GGUF artifact inside the models directory
    pub filename: String,
}

/// Configuration for model inference parameters
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    /// Upper bound on newly generated tokens per call
    pub max_new_tokens: usize,
    /// Size of the context window for inference
    pub context_size: usize,
    /// Number of layers to offload to the GPU (0 = CPU only)
    pub n_gpu_layers: u32,
    /// Whether to memory-map the model file
    pub use_mmap: bool,
    /// Whether to lock model pages in memory
    pub use_mlock: bool,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Optional log directory
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Model-related settings
    pub models: ModelConfig,
    /// Inference-related settings
    pub inference: InferenceConfig,
    /// Logging-related settings
    pub logging: LoggingConfig,
}

impl Settings {
    /// Creates a new Settings instance by loading config from multiple sources
    /// in the following order of precedence (highest to lowest):
    /// 1. Environment variables prefixed with PHIGEN_
    /// 2. Local config file (local.toml) if present
    /// 3. Default config file (default.toml)
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(
                format!("Failed to get current directory: {}", e)
            ))?
            .join("config");

        if !config_dir.exists() {
            return Err(ConfigError::Message(
                format!("Config directory not found at: {}", config_dir.display())
            ));
        }

        let default_config = config_dir.join("default.toml");
        if !default_config.exists() {
            return Err(ConfigError::Message(
                format!("Default configuration file not found at: {}", default_config.display())
            ));
        }

        let local_config = config_dir.join("local.toml");

        // Convert paths to strings and keep them alive
        let default_config_path = default_config.to_string_lossy();
        let local_config_path = local_config.to_string_lossy();

        let settings = Config::builder()
            .add_source(File::with_name(&default_config_path))
            .add_source(File::with_name(&local_config_path).required(false))
            .add_source(Environment::with_prefix("PHIGEN").separator("_"))
            .build()?
            .try_deserialize::<Settings>()?;

        // Validate settings after loading
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        // Create models directory if it doesn't exist
        if !self.models.directory.exists() {
            std::fs::create_dir_all(&self.models.directory).map_err(|e| {
                ConfigError::Message(format!(
                    "Failed to create models directory at {}: {}",
                    self.models.directory.display(), e
                ))
            })?;
        }

        if self.models.filename.trim().is_empty() {
            return Err(ConfigError::Message(
                "Model filename must not be empty".to_string()
            ));
        }

        if self.inference.max_new_tokens == 0 {
            return Err(ConfigError::Message(
                "max_new_tokens must be greater than 0".to_string()
            ));
        }

        if self.inference.context_size == 0 {
            return Err(ConfigError::Message(
                "context_size must be greater than 0".to_string()
            ));
        }

        // The generation bound must leave room for at least one prompt token
        if self.inference.max_new_tokens >= self.inference.context_size {
            return Err(ConfigError::Message(format!(
                "max_new_tokens ({}) must be smaller than context_size ({})",
                self.inference.max_new_tokens, self.inference.context_size
            )));
        }

        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        // Create log file directory if configured and doesn't exist
        if let Some(log_file) = &self.logging.file {
            if let Some(parent) = log_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ConfigError::Message(format!(
                            "Failed to create log directory at {}: {}",
                            parent.display(), e
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }
}
