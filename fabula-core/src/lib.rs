//! # fabula-core
//!
//! Prose-manuscript to audiobook engine SDK.
//!
//! ## Architecture
//!
//! ```text
//! Manuscript → DialogueSegmenter → CharacterAnalyzer → voice mapping
//!                                                           │
//!                                      SpeechSynthesizer (spawn_blocking fan-out)
//!                                                           │
//!                                            AudioAssembler → audiobook file
//! ```
//!
//! Every stage is a trait resolved by id from a [`ComponentRegistry`], so
//! callers can swap segmentation heuristics, profilers, synthesis engines
//! and container formats independently.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod assembly;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod profiler;
pub mod segmenter;
pub mod synth;
pub mod types;

// Convenience re-exports for downstream crates
pub use assembly::{AssemblerHandle, AudioAssembler, WavAssembler};
pub use config::PipelineConfig;
pub use error::{FabulaError, Result};
pub use pipeline::{ComponentRegistry, Pipeline, RunSummary};
pub use profiler::{BasicCharacterAnalyzer, CharacterAnalyzer, StatisticalCharacterAnalyzer};
pub use segmenter::{AttributedSegmenter, DialogueSegmenter, LiteralQuoteSegmenter};
pub use synth::{SpeechSynthesizer, SynthHandle, ToneSynthesizer};
pub use types::{
    AudioClip, CharacterProfile, SpeakerType, TextSegment, VoiceCharacteristics, VoiceInfo,
};
