//! Literal-quote segmentation with no attribution attempt.

use regex::Regex;

use super::{push_narration, DialogueSegmenter};
use crate::types::{TextSegment, UNATTRIBUTED_NAME};

/// Segmenter that treats every double-quoted span as dialogue.
///
/// No speaker attribution is attempted: every quoted span is labelled with
/// the generic `"character"` name at confidence 1.0. Multi-character scenes
/// therefore collapse into one undifferentiated character bucket — a known
/// fidelity trade-off of this strategy, not a bug. Use
/// [`AttributedSegmenter`](super::AttributedSegmenter) when per-speaker
/// voices matter.
pub struct LiteralQuoteSegmenter {
    dialogue: Regex,
}

impl LiteralQuoteSegmenter {
    pub fn new() -> Self {
        Self {
            dialogue: Regex::new(r#""([^"]*)""#).expect("static dialogue pattern"),
        }
    }
}

impl Default for LiteralQuoteSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueSegmenter for LiteralQuoteSegmenter {
    fn segment(&self, text: &str) -> Vec<TextSegment> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut cursor = 0;

        for quoted in self.dialogue.find_iter(text) {
            if quoted.start() > cursor {
                push_narration(&mut segments, &text[cursor..quoted.start()]);
            }

            // Strip the surrounding quote characters; skip empty quotes but
            // still advance past them.
            let inner = text[quoted.start() + 1..quoted.end() - 1].trim();
            if !inner.is_empty() {
                segments.push(TextSegment::dialogue(inner, UNATTRIBUTED_NAME, 1.0));
            }

            cursor = quoted.end();
        }

        if cursor < text.len() {
            push_narration(&mut segments, &text[cursor..]);
        }

        // No quotes at all (or nothing but empty quotes): the whole input is
        // one narration segment.
        if segments.is_empty() {
            segments.push(TextSegment::narration(text.trim()));
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpeakerType;

    fn segmenter() -> LiteralQuoteSegmenter {
        LiteralQuoteSegmenter::new()
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(segmenter().segment("").is_empty());
        assert!(segmenter().segment("   \n\n  ").is_empty());
    }

    #[test]
    fn quoteless_input_is_one_narration_segment() {
        let segments = segmenter().segment("It was a dark and stormy night.");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].speaker_type, SpeakerType::Narrator);
        assert_eq!(segments[0].text, "It was a dark and stormy night.");
    }

    #[test]
    fn quoted_spans_become_unattributed_dialogue() {
        let segments = segmenter().segment(r#"He said, "Hello there." She smiled."#);
        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].speaker_type, SpeakerType::Narrator);
        assert_eq!(segments[0].text, "He said,");

        assert_eq!(segments[1].speaker_type, SpeakerType::Character);
        assert_eq!(segments[1].speaker_name, UNATTRIBUTED_NAME);
        assert_eq!(segments[1].text, "Hello there.");
        assert!((segments[1].confidence - 1.0).abs() < f32::EPSILON);

        assert_eq!(segments[2].speaker_type, SpeakerType::Narrator);
        assert_eq!(segments[2].text, "She smiled.");
    }

    #[test]
    fn empty_quotes_are_skipped_but_advance_the_scan() {
        let segments = segmenter().segment(r#"Before "" after."#);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Before");
        assert_eq!(segments[1].text, "after.");
    }

    #[test]
    fn adjacent_quotes_each_get_a_segment() {
        let segments = segmenter().segment(r#""First.""Second.""#);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "First.");
        assert_eq!(segments[1].text, "Second.");
        assert!(segments
            .iter()
            .all(|s| s.speaker_type == SpeakerType::Character));
    }

    #[test]
    fn concatenated_output_reproduces_input_words() {
        let input = r#"Anna looked up. "Is anyone there?" Nothing moved. "Hello?""#;
        let segments = segmenter().segment(input);

        let rebuilt: Vec<&str> = segments
            .iter()
            .flat_map(|s| s.text.split_whitespace())
            .collect();
        let original: Vec<&str> = input
            .split_whitespace()
            .map(|w| w.trim_matches('"'))
            .filter(|w| !w.is_empty())
            .collect();
        assert_eq!(rebuilt, original);
    }
}
