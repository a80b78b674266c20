//! Lexicon-driven character profiling over accumulated speech.
//!
//! Extends the name heuristic with marker scans over the concatenation of a
//! character's dialogue: gendered endearments, age-register phrases, line
//! length and vocabulary diversity. Confidence grows with observed dialogue
//! volume and stays below 1.0.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{sample_excerpt, CharacterAnalyzer};
use crate::lexicon::{
    matches_female_name, voice_for_profile, FEMALE_SPEECH_MARKERS, NARRATOR_VOICE,
    OLDER_SPEECH_MARKERS, YOUNGER_SPEECH_MARKERS,
};
use crate::types::{
    AgeCategory, CharacterProfile, Gender, SpeakerType, TextSegment, VoiceCharacteristics,
};

/// How many dialogue excerpts to keep per character.
const MAX_SAMPLES: usize = 5;
/// Character budget per kept excerpt.
const SAMPLE_BUDGET: usize = 150;

/// Words-per-line average above this marks a character "talkative".
const TALKATIVE_THRESHOLD: f64 = 20.0;
/// Words-per-line average below this marks a character "reserved".
const RESERVED_THRESHOLD: f64 = 5.0;
/// Distinct-to-total word ratio above this marks a character "articulate".
const ARTICULATE_THRESHOLD: f64 = 0.7;

/// A name-lexicon hit outweighs a single speech marker.
const NAME_MATCH_WEIGHT: u32 = 2;
const MARKER_WEIGHT: u32 = 1;

#[derive(Default)]
struct Accumulator {
    speaker_type: Option<SpeakerType>,
    dialogue_count: usize,
    samples: Vec<String>,
    speech: Vec<String>,
    word_count: usize,
    vocabulary: BTreeSet<String>,
}

/// Analyzer that profiles characters from their accumulated speech.
pub struct StatisticalCharacterAnalyzer;

impl StatisticalCharacterAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn profile_speech(name: &str, accum: &Accumulator) -> VoiceCharacteristics {
        if accum.speaker_type == Some(SpeakerType::Narrator) {
            return VoiceCharacteristics {
                gender: Gender::Neutral,
                age_category: AgeCategory::Adult,
                personality_traits: Vec::new(),
                confidence_score: 0.0,
            };
        }

        let all_speech = accum.speech.join(" ").to_lowercase();

        let mut gender_score = 0u32;
        if matches_female_name(name) {
            gender_score += NAME_MATCH_WEIGHT;
        }
        for marker in FEMALE_SPEECH_MARKERS {
            if all_speech.contains(marker) {
                gender_score += MARKER_WEIGHT;
            }
        }
        let gender = if gender_score > 0 {
            Gender::Female
        } else {
            Gender::Male
        };

        let older = OLDER_SPEECH_MARKERS
            .iter()
            .filter(|m| all_speech.contains(*m))
            .count();
        let younger = YOUNGER_SPEECH_MARKERS
            .iter()
            .filter(|m| all_speech.contains(*m))
            .count();
        let age_category = if older > younger {
            AgeCategory::Older
        } else if younger > 0 {
            AgeCategory::Younger
        } else {
            AgeCategory::Adult
        };

        let mut personality_traits = Vec::new();
        if accum.word_count > 0 {
            let words_per_line = accum.word_count as f64 / accum.dialogue_count as f64;
            if words_per_line > TALKATIVE_THRESHOLD {
                personality_traits.push("talkative".to_string());
            } else if words_per_line < RESERVED_THRESHOLD {
                personality_traits.push("reserved".to_string());
            }

            let diversity = accum.vocabulary.len() as f64 / accum.word_count as f64;
            if diversity > ARTICULATE_THRESHOLD {
                personality_traits.push("articulate".to_string());
            }
        }

        // More observed lines, more confidence — capped below 1.0.
        let count = accum.dialogue_count as f32;
        let confidence_score = if accum.dialogue_count >= 5 {
            (0.5 + count * 0.1).min(0.9)
        } else {
            0.3 + count * 0.1
        };

        VoiceCharacteristics {
            gender,
            age_category,
            personality_traits,
            confidence_score,
        }
    }
}

impl Default for StatisticalCharacterAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterAnalyzer for StatisticalCharacterAnalyzer {
    fn analyze(&self, segments: &[TextSegment]) -> Vec<CharacterProfile> {
        let mut accumulators: BTreeMap<&str, Accumulator> = BTreeMap::new();

        for segment in segments {
            let entry = accumulators
                .entry(segment.speaker_name.as_str())
                .or_default();

            entry.speaker_type = Some(segment.speaker_type);
            entry.dialogue_count += 1;

            if segment.speaker_type == SpeakerType::Character {
                entry.speech.push(segment.text.clone());

                if entry.samples.len() < MAX_SAMPLES {
                    entry.samples.push(sample_excerpt(&segment.text, SAMPLE_BUDGET));
                }

                for word in segment.text.to_lowercase().split_whitespace() {
                    entry.word_count += 1;
                    entry.vocabulary.insert(word.to_string());
                }
            }
        }

        debug!(
            characters = accumulators.len(),
            "statistical analysis complete"
        );

        accumulators
            .into_iter()
            .filter(|(_, accum)| accum.dialogue_count > 0)
            .map(|(name, accum)| {
                let characteristics = Self::profile_speech(name, &accum);
                let voice_id = if accum.speaker_type == Some(SpeakerType::Narrator) {
                    NARRATOR_VOICE.to_string()
                } else {
                    voice_for_profile(characteristics.gender, characteristics.age_category)
                        .to_string()
                };

                CharacterProfile {
                    name: name.to_string(),
                    character_type: accum.speaker_type.unwrap_or(SpeakerType::Character),
                    voice_id,
                    voice_characteristics: characteristics,
                    dialogue_count: accum.dialogue_count,
                    sample_dialogue: accum.samples,
                }
            })
            .collect()
    }
}
