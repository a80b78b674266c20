//! Dialogue segmentation.
//!
//! A segmenter splits raw prose into an ordered sequence of narration and
//! dialogue spans. The `DialogueSegmenter` trait is the extensibility point:
//! swap in `LiteralQuoteSegmenter` (default) or `AttributedSegmenter` without
//! touching the pipeline.
//!
//! ## Contract
//!
//! Segmentation is pure, deterministic and total — no input text is an
//! error. Concatenating the output texts in order reproduces the input up to
//! whitespace trimming at segment boundaries. Empty and whitespace-only
//! input yields **zero segments** in every strategy.

pub mod attributed;
pub mod literal;

pub use attributed::AttributedSegmenter;
pub use literal::LiteralQuoteSegmenter;

use crate::types::TextSegment;

/// Trait for all segmentation strategies.
pub trait DialogueSegmenter: Send + Sync {
    /// Split `text` into speaker-attributed segments in narrative order.
    fn segment(&self, text: &str) -> Vec<TextSegment>;
}

/// Push a trimmed narration segment, dropping empty runs.
fn push_narration(segments: &mut Vec<TextSegment>, run: &str) {
    let trimmed = run.trim();
    if !trimmed.is_empty() {
        segments.push(TextSegment::narration(trimmed));
    }
}
