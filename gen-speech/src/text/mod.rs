//! Text processing module for TTS: fixed-width chunking.

pub mod chunker;

pub use chunker::split_text_to_chunks;
