use thiserror::Error;

/// All errors produced by fabula-core.
#[derive(Debug, Error)]
pub enum FabulaError {
    #[error("unknown {kind} '{id}' (known: {known})")]
    UnknownComponent {
        kind: &'static str,
        id: String,
        known: String,
    },

    #[error("synthesis failed for segment {index}: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("audio assembly error: {0}")]
    Assembly(String),

    #[error("no audio clips to assemble")]
    NothingToAssemble,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("WAV codec error: {0}")]
    Codec(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FabulaError>;
