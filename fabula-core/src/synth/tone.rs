//! `ToneSynthesizer` — placeholder engine that renders spoken text as tones.
//!
//! Used during development and in tests before a real TTS engine is wired
//! in. Output is a deterministic 16-bit mono WAV: duration scales with word
//! count and pitch is derived from the voice id, so distinct voices remain
//! audibly distinct and the full pipeline can be exercised end-to-end.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use super::SpeechSynthesizer;
use crate::error::Result;
use crate::lexicon::{
    DEFAULT_FEMALE_VOICE, DEFAULT_MALE_VOICE, FEMALE_OLDER_VOICE, FEMALE_YOUNGER_VOICE,
    MALE_OLDER_VOICE, MALE_YOUNGER_VOICE, NARRATOR_VOICE,
};
use crate::types::{VoiceCharacteristics, VoiceInfo};

const SAMPLE_RATE: u32 = 16_000;
const MS_PER_WORD: u64 = 180;
const AMPLITUDE: f32 = 0.3;

/// Tone-based stub engine.
pub struct ToneSynthesizer;

impl ToneSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Map a voice id to a stable pitch in the 180–400 Hz band.
    fn pitch_for(voice_id: &str) -> f32 {
        let hash: u32 = voice_id
            .bytes()
            .fold(2166136261u32, |acc, b| (acc ^ u32::from(b)).wrapping_mul(16777619));
        180.0 + (hash % 220) as f32
    }
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer for ToneSynthesizer {
    fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        _characteristics: &VoiceCharacteristics,
    ) -> Result<Vec<u8>> {
        let words = text.split_whitespace().count().max(1) as u64;
        let duration_ms = words * MS_PER_WORD;
        let sample_count = (duration_ms * u64::from(SAMPLE_RATE)) / 1000;
        let pitch = Self::pitch_for(voice_id);

        debug!(words, duration_ms, pitch, "rendering tone clip");

        let spec = WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for n in 0..sample_count {
            let t = n as f32 / SAMPLE_RATE as f32;
            let sample = (t * pitch * 2.0 * std::f32::consts::PI).sin() * AMPLITUDE;
            writer.write_sample((sample * f32::from(i16::MAX)) as i16)?;
        }
        writer.finalize()?;

        Ok(cursor.into_inner())
    }

    fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        let rows = [
            (NARRATOR_VOICE, "Aria (narrator)", "neutral"),
            (DEFAULT_MALE_VOICE, "Brandon", "male"),
            (DEFAULT_FEMALE_VOICE, "Ava", "female"),
            (MALE_YOUNGER_VOICE, "Davis", "male"),
            (MALE_OLDER_VOICE, "Guy", "male"),
            (FEMALE_YOUNGER_VOICE, "Jenny", "female"),
            (FEMALE_OLDER_VOICE, "Nancy", "female"),
        ];

        Ok(rows
            .iter()
            .map(|(id, display_name, gender)| VoiceInfo {
                id: (*id).to_string(),
                display_name: (*display_name).to_string(),
                gender: (*gender).to_string(),
                locale: "en-US".to_string(),
            })
            .collect())
    }
}
