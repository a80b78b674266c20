//! WAV concatenation with inter-clip silence.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, info};

use super::AudioAssembler;
use crate::error::{FabulaError, Result};
use crate::types::AudioClip;

/// Default silence inserted between clips.
pub const DEFAULT_SILENCE_GAP_MS: u64 = 500;

/// Assembler that concatenates 16-bit PCM WAV clips.
///
/// All clips in a run must share one format (rate, channels, bit depth).
/// The output is written to a temporary sibling path and renamed into place
/// only once fully written, so a failed run never leaves a partial file.
pub struct WavAssembler {
    silence_gap_ms: u64,
}

impl WavAssembler {
    pub fn new(silence_gap_ms: u64) -> Self {
        Self { silence_gap_ms }
    }

    fn decode(data: &[u8]) -> Result<(WavSpec, Vec<i16>)> {
        let mut reader = WavReader::new(Cursor::new(data))?;
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(FabulaError::Assembly(format!(
                "unsupported clip format: {:?} at {} bits (want 16-bit PCM)",
                spec.sample_format, spec.bits_per_sample
            )));
        }
        let samples = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok((spec, samples))
    }
}

impl Default for WavAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_SILENCE_GAP_MS)
    }
}

impl AudioAssembler for WavAssembler {
    fn clip_duration_ms(&self, data: &[u8]) -> Result<u64> {
        let reader = WavReader::new(Cursor::new(data))?;
        let spec = reader.spec();
        let frames = u64::from(reader.duration());
        Ok(frames * 1000 / u64::from(spec.sample_rate))
    }

    fn assemble(&self, clips: &[AudioClip], output_path: &Path) -> Result<PathBuf> {
        if clips.is_empty() {
            return Err(FabulaError::NothingToAssemble);
        }

        let (spec, mut combined) = Self::decode(&clips[0].data)?;
        let gap_len =
            (self.silence_gap_ms * u64::from(spec.sample_rate) / 1000) as usize * spec.channels as usize;

        for clip in &clips[1..] {
            let (clip_spec, samples) = Self::decode(&clip.data)?;
            if clip_spec != spec {
                return Err(FabulaError::Assembly(format!(
                    "mismatched clip format for '{}': {:?} vs {:?}",
                    clip.speaker_name, clip_spec, spec
                )));
            }
            combined.extend(std::iter::repeat(0i16).take(gap_len));
            combined.extend(samples);
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling temp path, rename into place on success.
        let file_name = output_path
            .file_name()
            .ok_or_else(|| {
                FabulaError::Assembly(format!("invalid output path: {}", output_path.display()))
            })?
            .to_os_string();
        let mut tmp_name = file_name;
        tmp_name.push(".part");
        let tmp_path = output_path.with_file_name(tmp_name);

        let write_result = (|| -> Result<()> {
            let mut writer = WavWriter::create(&tmp_path, spec)?;
            for sample in &combined {
                writer.write_sample(*sample)?;
            }
            writer.finalize()?;
            Ok(())
        })();

        if let Err(e) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, output_path)?;

        debug!(samples = combined.len(), "wrote assembled audio");
        info!(path = %output_path.display(), clips = clips.len(), "audiobook assembled");

        Ok(output_path.to_path_buf())
    }
}
