//! Pipeline orchestration.
//!
//! ```text
//!   manuscript text
//!        │
//!   ┌────▼─────────┐   ┌──────────────┐   ┌──────────────┐   ┌───────────┐
//!   │  segmenter   ├──►│   analyzer   ├──►│ synthesizer  ├──►│ assembler │
//!   │ (dialogue)   │   │ (characters) │   │ (concurrent) │   │  (concat) │
//!   └──────────────┘   └──────────────┘   └──────────────┘   └───────────┘
//!                                                                  │
//!                                                           audiobook file
//! ```
//!
//! The orchestrator resolves all four stage implementations from the
//! registry up front, so a misconfigured run fails before any text is
//! touched. Synthesis fans out over tokio blocking threads while keeping
//! narrative order: clips land in their segment's original position no
//! matter which finishes first.

pub mod registry;
pub mod voices;

pub use registry::ComponentRegistry;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::assembly::AssemblerHandle;
use crate::config::PipelineConfig;
use crate::error::{FabulaError, Result};
use crate::profiler::CharacterAnalyzer;
use crate::segmenter::DialogueSegmenter;
use crate::synth::SynthHandle;
use crate::types::{AudioClip, CharacterProfile, TextSegment, VoiceCharacteristics, VoiceInfo};

/// What a pipeline run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub segment_count: usize,
    pub characters: Vec<CharacterProfile>,
    /// `None` for dry runs, which stop after profiling.
    pub output_path: Option<PathBuf>,
}

/// The audiobook pipeline: segment, profile, synthesize, assemble.
pub struct Pipeline {
    segmenter: Box<dyn DialogueSegmenter>,
    analyzer: Box<dyn CharacterAnalyzer>,
    synthesizer: SynthHandle,
    assembler: AssemblerHandle,
    config: PipelineConfig,
}

impl Pipeline {
    /// Resolve every configured stage from `registry`.
    ///
    /// # Errors
    /// Fails with [`FabulaError::UnknownComponent`] when any strategy id in
    /// the configuration has no registered constructor.
    pub fn from_registry(registry: &ComponentRegistry, config: PipelineConfig) -> Result<Self> {
        let segmenter = registry.create_segmenter(&config.parser, &config)?;
        let analyzer = registry.create_analyzer(&config.analyzer, &config)?;
        let synthesizer = registry.create_synthesizer(&config.synthesizer, &config)?;
        let assembler = registry.create_assembler(&config.assembler, &config)?;
        Ok(Self {
            segmenter,
            analyzer,
            synthesizer,
            assembler,
            config,
        })
    }

    /// Run the full pipeline over `text`, writing the audiobook to
    /// `output_target`.
    ///
    /// With `dry_run` the text is still segmented and profiled (so the
    /// summary reports what a real run would synthesize) but no audio is
    /// produced and nothing is written.
    pub async fn run(&self, text: &str, output_target: &Path, dry_run: bool) -> Result<RunSummary> {
        let segments = self.segmenter.segment(text);
        info!(segments = segments.len(), "manuscript segmented");

        let characters = self.analyzer.analyze(&segments);
        info!(characters = characters.len(), "characters profiled");

        let mapping = voices::build_voice_mapping(&characters, &self.config.voice_overrides);

        if dry_run {
            info!("dry run, skipping synthesis and assembly");
            return Ok(RunSummary {
                segment_count: segments.len(),
                characters,
                output_path: None,
            });
        }

        let clips = self
            .synthesize_all(&segments, &mapping, &characters)
            .await?;
        info!(clips = clips.len(), "segments synthesized");

        let output_path = self.assembler.assemble(&clips, output_target)?;

        Ok(RunSummary {
            segment_count: segments.len(),
            characters,
            output_path: Some(output_path),
        })
    }

    /// Synthesize the first `max_segments` segments of `text` and return the
    /// raw audio buffers, without touching the filesystem. Intended for
    /// auditioning voice assignments.
    pub fn preview(&self, text: &str, max_segments: usize) -> Result<Vec<Vec<u8>>> {
        let segments = self.segmenter.segment(text);
        let characters = self.analyzer.analyze(&segments);
        let mapping = voices::build_voice_mapping(&characters, &self.config.voice_overrides);
        let traits = characteristics_by_name(&characters);

        segments
            .iter()
            .take(max_segments)
            .map(|segment| {
                let voice = voices::resolve_voice(&mapping, &segment.speaker_name);
                let chars = traits
                    .get(segment.speaker_name.as_str())
                    .cloned()
                    .unwrap_or_default();
                self.synthesizer.synthesize(&segment.text, voice, &chars)
            })
            .collect()
    }

    /// Enumerate the configured engine's voices.
    pub fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        self.synthesizer.list_voices()
    }

    /// Fan segments out over blocking threads and collect clips back in
    /// narrative order.
    ///
    /// Every spawned task acquires a semaphore permit before synthesizing,
    /// so at most `synthesis_concurrency` engine calls run at once. Any
    /// failure aborts the run; when several segments fail, the error names
    /// the earliest one.
    async fn synthesize_all(
        &self,
        segments: &[TextSegment],
        mapping: &HashMap<String, String>,
        characters: &[CharacterProfile],
    ) -> Result<Vec<AudioClip>> {
        let permits = self
            .config
            .synthesis_concurrency
            .unwrap_or(Semaphore::MAX_PERMITS);
        let semaphore = Arc::new(Semaphore::new(permits));
        let traits = characteristics_by_name(characters);

        let mut set: JoinSet<(usize, Result<AudioClip>)> = JoinSet::new();
        for (index, segment) in segments.iter().enumerate() {
            let synth = Arc::clone(&self.synthesizer);
            let assembler = Arc::clone(&self.assembler);
            let semaphore = Arc::clone(&semaphore);
            let text = segment.text.clone();
            let speaker = segment.speaker_name.clone();
            let voice = voices::resolve_voice(mapping, &segment.speaker_name).to_string();
            let chars = traits
                .get(segment.speaker_name.as_str())
                .cloned()
                .unwrap_or_default();

            set.spawn(async move {
                // The semaphore never closes within this function's scope.
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => return (index, Err(FabulaError::Other(e.into()))),
                };
                debug!(index, speaker = %speaker, voice = %voice, "synthesizing segment");
                let result = tokio::task::spawn_blocking(move || {
                    let data = synth.synthesize(&text, &voice, &chars)?;
                    let duration_ms = assembler.clip_duration_ms(&data)?;
                    Ok(AudioClip {
                        data,
                        text,
                        speaker_name: speaker,
                        voice_id: voice,
                        duration_ms,
                    })
                })
                .await;
                match result {
                    Ok(clip) => (index, clip),
                    Err(e) => (index, Err(FabulaError::Other(e.into()))),
                }
            });
        }

        let mut clips: Vec<Option<AudioClip>> = (0..segments.len()).map(|_| None).collect();
        let mut first_failure: Option<(usize, FabulaError)> = None;
        while let Some(joined) = set.join_next().await {
            let (index, result) = joined.map_err(|e| FabulaError::Other(e.into()))?;
            match result {
                Ok(clip) => clips[index] = Some(clip),
                Err(e) => {
                    if first_failure.as_ref().map_or(true, |(i, _)| index < *i) {
                        first_failure = Some((index, e));
                    }
                }
            }
        }

        if let Some((index, source)) = first_failure {
            return Err(FabulaError::Synthesis {
                index,
                source: source.into(),
            });
        }

        // Every slot is filled once no task failed.
        Ok(clips.into_iter().flatten().collect())
    }
}

fn characteristics_by_name(
    characters: &[CharacterProfile],
) -> HashMap<&str, VoiceCharacteristics> {
    characters
        .iter()
        .map(|p| (p.name.as_str(), p.voice_characteristics.clone()))
        .collect()
}
