//! Audio assembly abstraction.
//!
//! The `AudioAssembler` trait owns everything that requires decoding audio
//! bytes: probing clip durations and concatenating clips into the final
//! audiobook artifact. The core never decodes audio anywhere else.

pub mod wav;

pub use wav::WavAssembler;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::types::AudioClip;

/// Contract for audio concatenation backends.
pub trait AudioAssembler: Send + Sync {
    /// Decode one clip's bytes and report its duration in milliseconds.
    fn clip_duration_ms(&self, data: &[u8]) -> Result<u64>;

    /// Concatenate `clips` in the given order into a single artifact at
    /// `output_path`.
    ///
    /// Implementations must write atomically: on failure no file may be left
    /// at `output_path`, corrupt or otherwise.
    fn assemble(&self, clips: &[AudioClip], output_path: &Path) -> Result<PathBuf>;
}

/// Shared handle to any assembler implementation.
pub type AssemblerHandle = Arc<dyn AudioAssembler>;
