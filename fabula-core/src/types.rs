//! Core value types shared by every pipeline stage.
//!
//! `TextSegment` is the segmenter's output and the unit of synthesis; its
//! position in the produced sequence is the narrative order and is preserved
//! through profiling, synthesis and assembly.

use serde::{Deserialize, Serialize};

/// Reserved speaker name for narration runs.
pub const NARRATOR_NAME: &str = "narrator";

/// Speaker name used when dialogue cannot be attributed to anyone.
pub const UNATTRIBUTED_NAME: &str = "character";

/// Who is speaking in a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerType {
    /// Narrative prose between dialogue spans.
    Narrator,
    /// A quoted dialogue span.
    Character,
}

/// A contiguous span of narrative or dialogue text with speaker attribution.
///
/// Structural equality only — two segments with the same fields are the same
/// segment. `text` is always non-empty after trimming; the segmenters drop
/// empty runs instead of emitting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub speaker_type: SpeakerType,
    pub speaker_name: String,
    /// Attribution confidence in [0.0, 1.0].
    pub confidence: f32,
}

impl TextSegment {
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker_type: SpeakerType::Narrator,
            speaker_name: NARRATOR_NAME.to_string(),
            confidence: 1.0,
        }
    }

    pub fn dialogue(text: impl Into<String>, speaker_name: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            speaker_type: SpeakerType::Character,
            speaker_name: speaker_name.into(),
            confidence,
        }
    }
}

/// Inferred gender of a character's voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    /// Narrator voices are gender-neutral by convention.
    Neutral,
    Unknown,
}

/// Inferred age register of a character's speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    Younger,
    Adult,
    Older,
    Unknown,
}

/// The inferred voice attribute bag attached to a character profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCharacteristics {
    pub gender: Gender,
    pub age_category: AgeCategory,
    pub personality_traits: Vec<String>,
    /// How much dialogue supported this profile, in [0.0, 1.0).
    pub confidence_score: f32,
}

impl Default for VoiceCharacteristics {
    fn default() -> Self {
        Self {
            gender: Gender::Unknown,
            age_category: AgeCategory::Unknown,
            personality_traits: Vec::new(),
            confidence_score: 0.0,
        }
    }
}

/// Aggregated statistics and voice assignment for one speaker name.
///
/// One profile exists per distinct `speaker_name` observed in the segment
/// sequence, created on first occurrence and finalized once after the full
/// scan. Narrator profiles are emitted too, not filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub character_type: SpeakerType,
    pub voice_id: String,
    pub voice_characteristics: VoiceCharacteristics,
    /// Segments attributed to this name, across both speaker types.
    pub dialogue_count: usize,
    /// First few dialogue excerpts, truncated with an ellipsis marker.
    pub sample_dialogue: Vec<String>,
}

/// One synthesized audio buffer, ready for assembly.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub text: String,
    pub speaker_name: String,
    pub voice_id: String,
    pub duration_ms: u64,
}

/// One row of a synthesis engine's voice inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub id: String,
    pub display_name: String,
    pub gender: String,
    pub locale: String,
}
