use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use phigen::config::Settings;
use phigen::inference::{self, GenerateRequest, DEFAULT_SEED, DEFAULT_SYSTEM_MESSAGE};

/// Generate a Phi-3 chat completion for a single prompt
#[derive(Parser)]
#[command(name = "phigen", version, about)]
struct Cli {
    /// The user message to send to the model
    prompt: String,

    /// System message framing the conversation
    #[arg(long, default_value = DEFAULT_SYSTEM_MESSAGE)]
    system: String,

    /// Sampling temperature; 0.0 keeps decoding fully greedy
    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    /// Seed for the generation session
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u32,
}

/// Main entry point for the phigen binary
///
/// Loads settings, initializes logging, runs a single inference call and
/// prints the generated reply to stdout.
///
/// # Errors
/// Returns an error if configuration loading, model loading or generation
/// fails; the process exits nonzero and the cause chain is printed.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load settings first
    let settings = Settings::new().context("failed to load configuration")?;

    // Initialize the subscriber before any file operations
    let file_appender = tracing_appender::rolling::RollingFileAppender::new(
        tracing_appender::rolling::Rotation::DAILY,
        // Use log directory from settings, or default to "logs"
        settings.logging.file.as_deref().unwrap_or_else(|| Path::new("logs")),
        "phigen",
    );

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        // Disable ANSI colors for cleaner log files
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_env_filter(EnvFilter::new(&settings.logging.level))
        .init();

    info!("phigen starting up");

    let models_path = settings.models.directory.join(&settings.models.filename);
    info!("Model artifact: {}", models_path.display());

    let request = GenerateRequest::new(&cli.prompt)
        .with_system_message(&cli.system)
        .with_temperature(cli.temperature)
        .with_seed(cli.seed);

    let reply = inference::generate_reply(&settings, &request)?;

    println!("{}", reply);

    Ok(())
}
