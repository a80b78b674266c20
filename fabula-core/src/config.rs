//! Pipeline configuration.
//!
//! Every field defaults, so `PipelineConfig::default()` is a working
//! configuration. A JSON config file can override any subset of fields;
//! CLI flags are applied on top by the caller.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FabulaError, Result};

/// Configuration consumed by the pipeline orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Segmenter strategy id. Default: `"literal"`.
    pub parser: String,
    /// Profiler strategy id. Default: `"basic"`.
    pub analyzer: String,
    /// Synthesis strategy id. Default: `"tone"`.
    pub synthesizer: String,
    /// Assembly strategy id. Default: `"wav"`.
    pub assembler: String,
    /// Output container format / file extension. Default: `"wav"`.
    pub output_format: String,
    /// Explicit speaker-name → voice-id overrides. These always win over
    /// profiler-derived assignments.
    pub voice_overrides: HashMap<String, String>,
    /// Concurrent synthesis ceiling. `None` means unbounded — fine for
    /// lightweight engines; heavyweight model-loading engines should set a
    /// small fixed value.
    pub synthesis_concurrency: Option<usize>,
    /// Silence inserted between assembled clips, in milliseconds.
    pub silence_gap_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parser: "literal".to_string(),
            analyzer: "basic".to_string(),
            synthesizer: "tone".to_string(),
            assembler: "wav".to_string(),
            output_format: "wav".to_string(),
            voice_overrides: HashMap::new(),
            synthesis_concurrency: None,
            silence_gap_ms: crate::assembly::wav::DEFAULT_SILENCE_GAP_MS,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| FabulaError::Config(format!("{}: {e}", path.display())))
    }
}
