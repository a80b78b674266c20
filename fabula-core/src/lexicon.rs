//! Fixed rule tables for attribution and profiling heuristics.
//!
//! Everything here is a closed, hand-maintained lookup table. No statistical
//! model is trained anywhere in the crate; these lists *are* the model.

use crate::types::{AgeCategory, Gender};

/// Honorifics stripped word-by-word during speaker-name normalization.
pub const HONORIFICS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "professor", "sir", "madam", "lord", "lady",
];

/// Speech verbs recognized in attribution cues, in either
/// "Name said" or "said Name" word order.
pub const SPEECH_VERBS: &[&str] = &[
    "said",
    "says",
    "replied",
    "asked",
    "whispered",
    "shouted",
    "exclaimed",
    "muttered",
    "declared",
];

/// Given names that code a speaker as female when matched case-insensitively
/// by substring against the speaker name.
pub const FEMALE_NAMES: &[&str] = &[
    "alice",
    "anna",
    "betty",
    "carol",
    "catherine",
    "donna",
    "dorothy",
    "elizabeth",
    "emma",
    "helen",
    "jane",
    "jennifer",
    "karen",
    "kimberly",
    "laura",
    "linda",
    "lisa",
    "margaret",
    "maria",
    "mary",
    "michelle",
    "nancy",
    "patricia",
    "ruth",
    "sandra",
    "sarah",
    "sharon",
    "susan",
];

/// Endearments and exclamations that nudge the gender score female.
pub const FEMALE_SPEECH_MARKERS: &[&str] = &[
    "oh my",
    "goodness",
    "darling",
    "sweetheart",
    "dear",
    "gracious",
    "lovely",
    "wonderful",
    "beautiful",
];

/// Phrases that mark an older speech register.
pub const OLDER_SPEECH_MARKERS: &[&str] = &[
    "back in my day",
    "when i was young",
    "years ago",
    "in my time",
    "child",
    "young man",
    "young woman",
    "my dear",
    "sonny",
    "whippersnapper",
    "nowadays",
    "these days",
];

/// Phrases that mark a younger speech register.
pub const YOUNGER_SPEECH_MARKERS: &[&str] = &[
    "awesome",
    "cool",
    "totally",
    "like",
    "whatever",
    "dude",
    "omg",
    "seriously",
    "no way",
    "for real",
];

// Voice identifiers follow the Edge-neural naming scheme so that profiles
// drop straight into an Edge-style engine without remapping.

pub const NARRATOR_VOICE: &str = "en-US-AriaNeural";
pub const DEFAULT_MALE_VOICE: &str = "en-US-BrandonNeural";
pub const DEFAULT_FEMALE_VOICE: &str = "en-US-AvaNeural";
pub const MALE_YOUNGER_VOICE: &str = "en-US-DavisNeural";
pub const MALE_OLDER_VOICE: &str = "en-US-GuyNeural";
pub const FEMALE_YOUNGER_VOICE: &str = "en-US-JennyNeural";
pub const FEMALE_OLDER_VOICE: &str = "en-US-NancyNeural";

/// Select a voice id from the gender × age matrix.
///
/// Narrator voices do not pass through here — callers route NARRATOR-typed
/// profiles directly to [`NARRATOR_VOICE`].
pub fn voice_for_profile(gender: Gender, age: AgeCategory) -> &'static str {
    match (gender, age) {
        (Gender::Female, AgeCategory::Older) => FEMALE_OLDER_VOICE,
        (Gender::Female, AgeCategory::Younger) => FEMALE_YOUNGER_VOICE,
        (Gender::Female, _) => DEFAULT_FEMALE_VOICE,
        (_, AgeCategory::Older) => MALE_OLDER_VOICE,
        (_, AgeCategory::Younger) => MALE_YOUNGER_VOICE,
        (_, _) => DEFAULT_MALE_VOICE,
    }
}

/// True when the name contains a recognized female given name.
pub fn matches_female_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    FEMALE_NAMES.iter().any(|n| lower.contains(n))
}
