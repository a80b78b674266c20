//! Voice-mapping merge.
//!
//! The effective speaker → voice table for one run is built in priority
//! order: profiler-derived assignments first, then explicit overrides on
//! top. Lookup falls back to the narrator's voice, then to a hardcoded
//! default when even the narrator is unmapped.

use std::collections::HashMap;

use crate::lexicon::NARRATOR_VOICE;
use crate::types::{CharacterProfile, NARRATOR_NAME};

/// Voice used when a speaker resolves to nothing at all.
pub const DEFAULT_VOICE: &str = NARRATOR_VOICE;

/// Merge profiler assignments and explicit overrides into one mapping.
pub fn build_voice_mapping(
    characters: &[CharacterProfile],
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut mapping = HashMap::new();

    for character in characters {
        if !character.voice_id.is_empty() {
            mapping.insert(character.name.clone(), character.voice_id.clone());
        }
    }

    for (name, voice_id) in overrides {
        mapping.insert(name.clone(), voice_id.clone());
    }

    mapping
}

/// Resolve the voice for one speaker, with narrator and default fallbacks.
pub fn resolve_voice<'a>(mapping: &'a HashMap<String, String>, speaker_name: &str) -> &'a str {
    mapping
        .get(speaker_name)
        .or_else(|| mapping.get(NARRATOR_NAME))
        .map(String::as_str)
        .unwrap_or(DEFAULT_VOICE)
}
