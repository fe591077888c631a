//! Cost estimation for speech synthesis runs.
//!
//! An order-of-magnitude budgeting aid, printed before synthesis starts.
//! Input is billed per text token, output per second of generated audio.

use serde::{Deserialize, Serialize};
use std::fmt;

// Default pricing constants
const DEFAULT_TOKEN_CHARS: f64 = 4.0;
const DEFAULT_INPUT_PRICE_PER_MILLION: f64 = 0.50;
const DEFAULT_WORDS_PER_SECOND: f64 = 2.0;
const DEFAULT_OUTPUT_TOKENS_PER_SECOND: f64 = 32.0;
const DEFAULT_OUTPUT_PRICE_PER_MILLION: f64 = 10.0;

/// Pricing model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricing {
    /// Average characters per input token
    #[serde(default = "default_token_chars")]
    pub token_chars: f64,

    /// USD per million input tokens
    #[serde(default = "default_input_price")]
    pub input_price_per_million: f64,

    /// Spoken words per second of audio
    #[serde(default = "default_words_per_second")]
    pub words_per_second: f64,

    /// Audio tokens billed per second of output
    #[serde(default = "default_output_tokens_per_second")]
    pub output_tokens_per_second: f64,

    /// USD per million output tokens
    #[serde(default = "default_output_price")]
    pub output_price_per_million: f64,
}

fn default_token_chars() -> f64 {
    DEFAULT_TOKEN_CHARS
}

fn default_input_price() -> f64 {
    DEFAULT_INPUT_PRICE_PER_MILLION
}

fn default_words_per_second() -> f64 {
    DEFAULT_WORDS_PER_SECOND
}

fn default_output_tokens_per_second() -> f64 {
    DEFAULT_OUTPUT_TOKENS_PER_SECOND
}

fn default_output_price() -> f64 {
    DEFAULT_OUTPUT_PRICE_PER_MILLION
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            token_chars: default_token_chars(),
            input_price_per_million: default_input_price(),
            words_per_second: default_words_per_second(),
            output_tokens_per_second: default_output_tokens_per_second(),
            output_price_per_million: default_output_price(),
        }
    }
}

/// Deterministic cost estimate for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    /// Character count of the input text
    pub num_chars: usize,
    /// Approximate input tokens (chars / token_chars)
    pub num_input_tokens: f64,
    /// USD for the input side
    pub input_cost: f64,
    /// Whitespace-delimited word count
    pub num_words: usize,
    /// Estimated seconds of generated audio
    pub audio_seconds: f64,
    /// Approximate output tokens (audio_seconds * tokens/sec)
    pub num_output_tokens: f64,
    /// USD for the output side
    pub output_cost: f64,
    /// input_cost + output_cost
    pub total_cost: f64,
}

/// Estimate the cost of synthesizing `text`.
pub fn estimate_cost(text: &str, pricing: &Pricing) -> CostEstimate {
    let num_chars = text.chars().count();
    let num_input_tokens = num_chars as f64 / pricing.token_chars;
    let input_cost = num_input_tokens / 1_000_000.0 * pricing.input_price_per_million;

    let num_words = text.split_whitespace().count();
    let audio_seconds = num_words as f64 / pricing.words_per_second;
    let num_output_tokens = audio_seconds * pricing.output_tokens_per_second;
    let output_cost = num_output_tokens / 1_000_000.0 * pricing.output_price_per_million;

    CostEstimate {
        num_chars,
        num_input_tokens,
        input_cost,
        num_words,
        audio_seconds,
        num_output_tokens,
        output_cost,
        total_cost: input_cost + output_cost,
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Text: {} chars (~{:.0} input tokens), {} words (~{:.0}s of audio)",
            self.num_chars, self.num_input_tokens, self.num_words, self.audio_seconds
        )?;
        writeln!(f, "Input cost:  ${:.4}", self.input_cost)?;
        writeln!(f, "Output cost: ${:.4}", self.output_cost)?;
        write!(f, "Estimated total: ${:.4} (order-of-magnitude only)", self.total_cost)
    }
}
