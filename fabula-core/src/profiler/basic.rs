//! Name-based character profiling with no linguistic inference.

use std::collections::BTreeMap;

use tracing::debug;

use super::{sample_excerpt, CharacterAnalyzer};
use crate::lexicon::{
    matches_female_name, DEFAULT_MALE_VOICE, FEMALE_YOUNGER_VOICE, NARRATOR_VOICE,
};
use crate::types::{
    CharacterProfile, SpeakerType, TextSegment, VoiceCharacteristics,
};

/// How many dialogue excerpts to keep per character.
const MAX_SAMPLES: usize = 3;
/// Character budget per kept excerpt.
const SAMPLE_BUDGET: usize = 100;

struct Accumulator {
    speaker_type: SpeakerType,
    dialogue_count: usize,
    samples: Vec<String>,
}

/// Analyzer that assigns voices from the name string alone.
///
/// Narrator profiles get the narrator voice; any name containing a
/// recognized female given name gets the female default voice; everyone
/// else gets the male default. Every observed name is emitted.
pub struct BasicCharacterAnalyzer;

impl BasicCharacterAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn assign_voice(name: &str, speaker_type: SpeakerType) -> &'static str {
        if speaker_type == SpeakerType::Narrator {
            return NARRATOR_VOICE;
        }
        if matches_female_name(name) {
            FEMALE_YOUNGER_VOICE
        } else {
            DEFAULT_MALE_VOICE
        }
    }
}

impl Default for BasicCharacterAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterAnalyzer for BasicCharacterAnalyzer {
    fn analyze(&self, segments: &[TextSegment]) -> Vec<CharacterProfile> {
        let mut accumulators: BTreeMap<&str, Accumulator> = BTreeMap::new();

        for segment in segments {
            let entry = accumulators
                .entry(segment.speaker_name.as_str())
                .or_insert_with(|| Accumulator {
                    speaker_type: segment.speaker_type,
                    dialogue_count: 0,
                    samples: Vec::new(),
                });

            entry.speaker_type = segment.speaker_type;
            entry.dialogue_count += 1;

            if segment.speaker_type == SpeakerType::Character
                && entry.samples.len() < MAX_SAMPLES
            {
                entry.samples.push(sample_excerpt(&segment.text, SAMPLE_BUDGET));
            }
        }

        debug!(characters = accumulators.len(), "basic analysis complete");

        accumulators
            .into_iter()
            .map(|(name, accum)| CharacterProfile {
                name: name.to_string(),
                character_type: accum.speaker_type,
                voice_id: Self::assign_voice(name, accum.speaker_type).to_string(),
                voice_characteristics: VoiceCharacteristics::default(),
                dialogue_count: accum.dialogue_count,
                sample_dialogue: accum.samples,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NARRATOR_NAME;

    fn analyzer() -> BasicCharacterAnalyzer {
        BasicCharacterAnalyzer::new()
    }

    fn find<'a>(profiles: &'a [CharacterProfile], name: &str) -> &'a CharacterProfile {
        profiles
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing profile for {name}"))
    }

    #[test]
    fn one_profile_per_distinct_name() {
        let segments = vec![
            TextSegment::narration("The sun rose."),
            TextSegment::dialogue("Good morning.", "Mary", 0.8),
            TextSegment::dialogue("Indeed.", "John", 0.7),
            TextSegment::dialogue("Again.", "Mary", 0.7),
        ];

        let profiles = analyzer().analyze(&segments);
        assert_eq!(profiles.len(), 3);
        assert_eq!(find(&profiles, "Mary").dialogue_count, 2);
        assert_eq!(find(&profiles, "John").dialogue_count, 1);
        assert_eq!(find(&profiles, NARRATOR_NAME).dialogue_count, 1);
    }

    #[test]
    fn narrator_gets_narrator_voice() {
        let segments = vec![TextSegment::narration("Once upon a time.")];
        let profiles = analyzer().analyze(&segments);
        assert_eq!(profiles[0].voice_id, NARRATOR_VOICE);
        assert_eq!(profiles[0].character_type, SpeakerType::Narrator);
    }

    #[test]
    fn female_name_match_selects_female_voice() {
        let segments = vec![
            TextSegment::dialogue("Hello.", "Mary", 0.8),
            TextSegment::dialogue("Hi.", "John", 0.8),
        ];
        let profiles = analyzer().analyze(&segments);
        assert_eq!(find(&profiles, "Mary").voice_id, FEMALE_YOUNGER_VOICE);
        assert_eq!(find(&profiles, "John").voice_id, DEFAULT_MALE_VOICE);
    }

    #[test]
    fn samples_only_hold_dialogue_in_first_seen_order() {
        let segments = vec![
            TextSegment::dialogue("First line.", "Mary", 0.8),
            TextSegment::narration("Mary paused."),
            TextSegment::dialogue("Second line.", "Mary", 0.8),
            TextSegment::dialogue("Third line.", "Mary", 0.8),
            TextSegment::dialogue("Fourth line.", "Mary", 0.8),
        ];
        let profiles = analyzer().analyze(&segments);
        let mary = find(&profiles, "Mary");
        assert_eq!(
            mary.sample_dialogue,
            vec!["First line.", "Second line.", "Third line."]
        );
    }

    #[test]
    fn long_samples_are_truncated() {
        let long = "word ".repeat(40);
        let segments = vec![TextSegment::dialogue(long.trim(), "John", 0.8)];
        let profiles = analyzer().analyze(&segments);
        let sample = &find(&profiles, "John").sample_dialogue[0];
        assert!(sample.ends_with("..."));
        assert_eq!(sample.chars().count(), SAMPLE_BUDGET + 3);
    }

    #[test]
    fn analysis_is_idempotent() {
        let segments = vec![
            TextSegment::narration("Dawn."),
            TextSegment::dialogue("Hello.", "Mary", 0.8),
            TextSegment::dialogue("Hi.", "John", 0.7),
        ];
        let first = analyzer().analyze(&segments);
        let second = analyzer().analyze(&segments);
        assert_eq!(first, second);
    }
}
