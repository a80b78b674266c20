//! Strategy registry.
//!
//! Maps string ids to component constructors for each pipeline stage. The
//! registry is an explicitly constructed value owned by the pipeline's
//! caller — there is no process-wide registry state. Unknown ids are
//! configuration errors surfaced before a run starts, never silently
//! defaulted.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assembly::{AssemblerHandle, WavAssembler};
use crate::config::PipelineConfig;
use crate::error::{FabulaError, Result};
use crate::profiler::{BasicCharacterAnalyzer, CharacterAnalyzer, StatisticalCharacterAnalyzer};
use crate::segmenter::{AttributedSegmenter, DialogueSegmenter, LiteralQuoteSegmenter};
use crate::synth::{SynthHandle, ToneSynthesizer};

type SegmenterCtor = Box<dyn Fn(&PipelineConfig) -> Box<dyn DialogueSegmenter> + Send + Sync>;
type AnalyzerCtor = Box<dyn Fn(&PipelineConfig) -> Box<dyn CharacterAnalyzer> + Send + Sync>;
type SynthCtor = Box<dyn Fn(&PipelineConfig) -> SynthHandle + Send + Sync>;
type AssemblerCtor = Box<dyn Fn(&PipelineConfig) -> AssemblerHandle + Send + Sync>;

/// Registry of pluggable strategy implementations, keyed by id.
#[derive(Default)]
pub struct ComponentRegistry {
    segmenters: HashMap<String, SegmenterCtor>,
    analyzers: HashMap<String, AnalyzerCtor>,
    synthesizers: HashMap<String, SynthCtor>,
    assemblers: HashMap<String, AssemblerCtor>,
}

impl ComponentRegistry {
    /// Empty registry with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all bundled strategies registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_segmenter("literal", |_| Box::new(LiteralQuoteSegmenter::new()));
        registry.register_segmenter("attributed", |_| Box::new(AttributedSegmenter::new()));
        registry.register_analyzer("basic", |_| Box::new(BasicCharacterAnalyzer::new()));
        registry.register_analyzer("statistical", |_| {
            Box::new(StatisticalCharacterAnalyzer::new())
        });
        registry.register_synthesizer("tone", |_| Arc::new(ToneSynthesizer::new()));
        registry.register_assembler("wav", |config| {
            Arc::new(WavAssembler::new(config.silence_gap_ms))
        });
        registry
    }

    pub fn register_segmenter<F>(&mut self, id: &str, ctor: F)
    where
        F: Fn(&PipelineConfig) -> Box<dyn DialogueSegmenter> + Send + Sync + 'static,
    {
        self.segmenters.insert(id.to_string(), Box::new(ctor));
    }

    pub fn register_analyzer<F>(&mut self, id: &str, ctor: F)
    where
        F: Fn(&PipelineConfig) -> Box<dyn CharacterAnalyzer> + Send + Sync + 'static,
    {
        self.analyzers.insert(id.to_string(), Box::new(ctor));
    }

    pub fn register_synthesizer<F>(&mut self, id: &str, ctor: F)
    where
        F: Fn(&PipelineConfig) -> SynthHandle + Send + Sync + 'static,
    {
        self.synthesizers.insert(id.to_string(), Box::new(ctor));
    }

    pub fn register_assembler<F>(&mut self, id: &str, ctor: F)
    where
        F: Fn(&PipelineConfig) -> AssemblerHandle + Send + Sync + 'static,
    {
        self.assemblers.insert(id.to_string(), Box::new(ctor));
    }

    pub fn create_segmenter(
        &self,
        id: &str,
        config: &PipelineConfig,
    ) -> Result<Box<dyn DialogueSegmenter>> {
        let ctor = self
            .segmenters
            .get(id)
            .ok_or_else(|| unknown("parser", id, self.segmenters.keys()))?;
        Ok(ctor(config))
    }

    pub fn create_analyzer(
        &self,
        id: &str,
        config: &PipelineConfig,
    ) -> Result<Box<dyn CharacterAnalyzer>> {
        let ctor = self
            .analyzers
            .get(id)
            .ok_or_else(|| unknown("analyzer", id, self.analyzers.keys()))?;
        Ok(ctor(config))
    }

    pub fn create_synthesizer(&self, id: &str, config: &PipelineConfig) -> Result<SynthHandle> {
        let ctor = self
            .synthesizers
            .get(id)
            .ok_or_else(|| unknown("synthesizer", id, self.synthesizers.keys()))?;
        Ok(ctor(config))
    }

    pub fn create_assembler(&self, id: &str, config: &PipelineConfig) -> Result<AssemblerHandle> {
        let ctor = self
            .assemblers
            .get(id)
            .ok_or_else(|| unknown("assembler", id, self.assemblers.keys()))?;
        Ok(ctor(config))
    }

    pub fn segmenter_ids(&self) -> Vec<&str> {
        sorted_ids(self.segmenters.keys())
    }

    pub fn analyzer_ids(&self) -> Vec<&str> {
        sorted_ids(self.analyzers.keys())
    }

    pub fn synthesizer_ids(&self) -> Vec<&str> {
        sorted_ids(self.synthesizers.keys())
    }

    pub fn assembler_ids(&self) -> Vec<&str> {
        sorted_ids(self.assemblers.keys())
    }
}

fn sorted_ids<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = keys.map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

fn unknown<'a>(
    kind: &'static str,
    id: &str,
    known: impl Iterator<Item = &'a String>,
) -> FabulaError {
    FabulaError::UnknownComponent {
        kind,
        id: id.to_string(),
        known: sorted_ids(known).join(", "),
    }
}
