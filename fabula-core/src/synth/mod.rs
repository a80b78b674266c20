//! Speech synthesis abstraction.
//!
//! The `SpeechSynthesizer` trait decouples the pipeline from any specific
//! engine (network TTS, local neural model, the bundled tone stub). The
//! trait is synchronous by design — the pipeline wraps each call in
//! `spawn_blocking`, so engines are free to block on I/O or inference.

pub mod tone;

pub use tone::ToneSynthesizer;

use std::sync::Arc;

use crate::error::Result;
use crate::types::{VoiceCharacteristics, VoiceInfo};

/// Contract for speech synthesis engines.
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` with the given voice into a single encoded audio buffer.
    ///
    /// # Errors
    /// Returns an error when the engine cannot produce audio; the pipeline
    /// treats any single failure as fatal to the whole run.
    fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        characteristics: &VoiceCharacteristics,
    ) -> Result<Vec<u8>>;

    /// Enumerate the engine's available voices.
    fn list_voices(&self) -> Result<Vec<VoiceInfo>>;
}

/// Shared handle to any synthesizer implementation.
pub type SynthHandle = Arc<dyn SpeechSynthesizer>;
