//! Character profiling.
//!
//! An analyzer aggregates the segment sequence into one `CharacterProfile`
//! per distinct speaker name and derives a voice assignment for each. Both
//! strategies are pure given the fixed rule tables in [`crate::lexicon`];
//! accumulation runs over a `BTreeMap` so the output order is stable, but
//! only the output *content* is contractual. Sample dialogue stays in
//! first-seen order.

pub mod basic;
pub mod statistical;

pub use basic::BasicCharacterAnalyzer;
pub use statistical::StatisticalCharacterAnalyzer;

use crate::types::{CharacterProfile, TextSegment};

/// Trait for all profiling strategies.
pub trait CharacterAnalyzer: Send + Sync {
    /// Aggregate `segments` into per-character profiles with voice
    /// assignments.
    fn analyze(&self, segments: &[TextSegment]) -> Vec<CharacterProfile>;
}

/// Truncate a dialogue excerpt to `budget` characters, marking the cut.
fn sample_excerpt(text: &str, budget: usize) -> String {
    if text.chars().count() > budget {
        let cut: String = text.chars().take(budget).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_excerpts_pass_through() {
        assert_eq!(sample_excerpt("Hello.", 100), "Hello.");
    }

    #[test]
    fn long_excerpts_are_truncated_with_marker() {
        let long = "a".repeat(120);
        let excerpt = sample_excerpt(&long, 100);
        assert_eq!(excerpt.len(), 103);
        assert!(excerpt.ends_with("..."));
    }
}
