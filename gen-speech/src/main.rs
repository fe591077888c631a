//! gen-speech - Convert long text files to speech using a hosted generative TTS API

mod audio;
mod config;
mod cost;
mod text;

use anyhow::{Context, Result};
use audio::PcmSpec;
use clap::{Parser, Subcommand};
use config::GenSpeechConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tts_client::{Config as TtsConfig, SpeechRequest, TtsProvider, get_provider};

#[derive(Parser, Debug)]
#[command(name = "gen-speech")]
#[command(about = "Convert long text files to speech using a hosted generative TTS API", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the input text file
    input_file: Option<PathBuf>,

    /// Output audio file path (default: <input-name>.mp3)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Voice preset to use (overrides default from config)
    #[arg(short, long)]
    model: Option<String>,

    /// Voice name override for the provider
    #[arg(long)]
    voice: Option<String>,

    /// Delivery instructions sent ahead of each chunk
    #[arg(long)]
    instructions: Option<String>,

    /// Maximum token budget per chunk
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Seconds to wait between API calls
    #[arg(long)]
    delay: Option<u64>,

    /// Sample rate of the PCM returned by the API
    #[arg(long, default_value_t = 24000)]
    sample_rate: u32,

    /// Channel count of the PCM returned by the API
    #[arg(long, default_value_t = 1)]
    channels: u16,

    /// Print the cost estimate and exit without synthesizing
    #[arg(long, default_value_t = false)]
    estimate_only: bool,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default voice name
    SetVoice {
        /// Prebuilt voice name (provider-specific)
        voice: String,
    },
    /// Set default delivery instructions
    SetInstructions {
        /// Instructions sent ahead of each chunk
        instructions: String,
    },
    /// Set default delay between API calls
    SetDelay {
        /// Delay in seconds
        seconds: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle subcommands
    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    // Require an input file for conversion
    let input_path = args.input_file.clone().ok_or_else(|| {
        anyhow::anyhow!("Input file path is required. Run 'gen-speech --help' for usage.")
    })?;

    if !input_path.exists() {
        anyhow::bail!("Input file not found: {}", input_path.display());
    }

    // Load configuration
    let config = GenSpeechConfig::load().context("Failed to load configuration")?;

    // Determine output path; FFmpeg picks the container from the extension
    let output_path = args.output.clone().unwrap_or_else(|| {
        let stem = input_path.file_stem().unwrap_or_default();
        input_path.with_file_name(format!("{}.mp3", stem.to_string_lossy()))
    });

    // Read the whole text into memory
    let text = std::fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    if text.trim().is_empty() {
        anyhow::bail!("Input file is empty: {}", input_path.display());
    }

    // Print the cost estimate before doing anything billable
    let estimate = cost::estimate_cost(&text, &config.pricing);
    eprintln!("{}", estimate);

    if args.estimate_only {
        return Ok(());
    }

    // Split into chunks
    let max_tokens = args.max_tokens.unwrap_or(config.max_tokens);
    let chunks =
        text::split_text_to_chunks(&text, max_tokens, text::chunker::DEFAULT_TOKEN_CHARS);

    if chunks.is_empty() {
        anyhow::bail!("No text to synthesize");
    }

    eprintln!("Chunks: {}", chunks.len());

    // Fail before any billable call if the encoder is missing
    if !audio::assembler::is_ffmpeg_available() {
        anyhow::bail!("ffmpeg not found on PATH; it is required to encode the output file");
    }

    // Resolve the voice preset and provider
    let tts_config = TtsConfig::load().context("Failed to load TTS client configuration")?;
    let preset_name = args
        .model
        .clone()
        .or_else(|| config.preset.clone())
        .unwrap_or_else(|| tts_config.default_preset.clone());
    let mut preset = tts_config.get_preset(&preset_name)?.clone();

    if let Some(voice) = args.voice.clone().or_else(|| config.voice.clone()) {
        preset.voice = Some(voice);
    }

    let provider_config = tts_config.get_provider_config(&preset.provider);
    let provider = get_provider(&preset, provider_config)?;

    let instructions = args
        .instructions
        .clone()
        .unwrap_or_else(|| config.instructions.clone());
    let delay = Duration::from_secs(args.delay.unwrap_or(config.delay_secs));

    if args.debug {
        eprintln!("Input: {}", input_path.display());
        eprintln!("Output: {}", output_path.display());
        eprintln!("Provider: {}", provider.name());
        eprintln!("Model: {}", preset.model);
        eprintln!("Voice: {}", preset.voice.as_deref().unwrap_or("(provider default)"));
        eprintln!("Max tokens per chunk: {}", max_tokens);
        eprintln!("Delay between calls: {}s", delay.as_secs());
    }

    // Sequential synthesis, one call at a time
    let buffers = synthesize_chunks(provider.as_ref(), &chunks, &instructions, delay).await?;

    // Concatenate in order and encode
    let pcm = audio::concat_buffers(&buffers);
    let spec = PcmSpec {
        channels: args.channels,
        sample_rate: args.sample_rate,
        ..PcmSpec::default()
    };

    eprintln!("\nEncoding audio...");
    audio::write_audio(&pcm, &spec, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    // Get output file size
    let metadata = std::fs::metadata(&output_path)?;
    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);

    eprintln!("Output: {} ({:.1} MB)", output_path.display(), size_mb);

    Ok(())
}

/// Synthesize chunks sequentially, collecting one audio buffer per chunk.
///
/// Every call except the last is followed by an unconditional fixed delay,
/// a static rate-limiting measure. A failed call aborts the whole run.
async fn synthesize_chunks(
    provider: &dyn TtsProvider,
    chunks: &[String],
    instructions: &str,
    delay: Duration,
) -> Result<Vec<Vec<u8>>> {
    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut buffers = Vec::with_capacity(chunks.len());

    for (i, chunk) in chunks.iter().enumerate() {
        let request = SpeechRequest {
            text: chunk.clone(),
            instructions: Some(instructions.to_string()),
            voice: None,
        };

        let response = provider
            .synthesize(request)
            .await
            .with_context(|| format!("Synthesis failed on chunk {}/{}", i + 1, chunks.len()))?;

        buffers.push(response.audio);
        pb.inc(1);

        if i + 1 < chunks.len() && !delay.is_zero() {
            pb.set_message(format!("waiting {}s", delay.as_secs()));
            tokio::time::sleep(delay).await;
            pb.set_message("");
        }
    }

    pb.finish_with_message("Synthesis complete");

    Ok(buffers)
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = GenSpeechConfig::load()?;
            println!("Configuration file: {:?}", GenSpeechConfig::config_path()?);
            println!();
            if let Some(preset) = &config.preset {
                println!("preset = \"{}\"", preset);
            } else {
                println!("preset = (tts client default)");
            }
            if let Some(voice) = &config.voice {
                println!("voice = \"{}\"", voice);
            } else {
                println!("voice = (preset default)");
            }
            println!("instructions = \"{}\"", config.instructions);
            println!("delay_secs = {}", config.delay_secs);
            println!("max_tokens = {}", config.max_tokens);
        }
        ConfigAction::SetVoice { voice } => {
            let mut config = GenSpeechConfig::load()?;
            config.voice = Some(voice.clone());
            config.save()?;
            println!("Default voice set to: {}", voice);
        }
        ConfigAction::SetInstructions { instructions } => {
            let mut config = GenSpeechConfig::load()?;
            config.instructions = instructions.clone();
            config.save()?;
            println!("Default instructions set to: {}", instructions);
        }
        ConfigAction::SetDelay { seconds } => {
            let mut config = GenSpeechConfig::load()?;
            config.delay_secs = *seconds;
            config.save()?;
            println!("Default delay set to: {}s", seconds);
        }
    }
    Ok(())
}
