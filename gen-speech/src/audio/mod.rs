//! Audio assembly module: PCM concatenation and compressed-file export.

pub mod assembler;

pub use assembler::{PcmSpec, concat_buffers, write_audio};
