//! Fabula command line entry point.
//!
//! Thin shell over `fabula-core`: parses arguments, loads the optional JSON
//! configuration, applies flag overrides on top and hands the manuscript to
//! the pipeline.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fabula_core::{ComponentRegistry, Pipeline, PipelineConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "fabula", version, about = "Turn a prose manuscript into an audiobook")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a manuscript text file into an audiobook.
    Convert(ConvertArgs),
    /// List the voices offered by a synthesis engine.
    ListVoices {
        /// Synthesizer strategy id to query.
        #[arg(long, default_value = "tone")]
        synth: String,
    },
    /// List the registered strategy ids for every pipeline stage.
    ListComponents,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Manuscript file (plain text).
    input: PathBuf,

    /// Output audiobook path. Defaults to the input path with the configured
    /// output format's extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Segmenter strategy id (overrides the config file).
    #[arg(long)]
    parser: Option<String>,

    /// Profiler strategy id (overrides the config file).
    #[arg(long)]
    analyzer: Option<String>,

    /// Concurrent synthesis ceiling (overrides the config file).
    #[arg(long)]
    concurrency: Option<usize>,

    /// Segment and profile the manuscript, then stop before synthesis.
    #[arg(long)]
    dry_run: bool,
}

impl ConvertArgs {
    fn effective_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(parser) = &self.parser {
            config.parser = parser.clone();
        }
        if let Some(analyzer) = &self.analyzer {
            config.analyzer = analyzer.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.synthesis_concurrency = Some(concurrency);
        }
        Ok(config)
    }
}

fn default_output_path(input: &Path, output_format: &str) -> PathBuf {
    input.with_extension(output_format)
}

async fn convert(args: ConvertArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        bail!("input file not found: {}", args.input.display());
    }
    if args.input.extension().and_then(|e| e.to_str()) != Some("txt") {
        bail!(
            "expected a .txt manuscript, got: {}",
            args.input.display()
        );
    }

    let config = args.effective_config()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &config.output_format));

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!(
        input = %args.input.display(),
        parser = %config.parser,
        analyzer = %config.analyzer,
        synthesizer = %config.synthesizer,
        "starting conversion"
    );

    let registry = ComponentRegistry::with_defaults();
    let pipeline = Pipeline::from_registry(&registry, config)?;
    let summary = pipeline.run(&text, &output, args.dry_run).await?;

    println!("Segments: {}", summary.segment_count);
    println!("Cast ({} speakers):", summary.characters.len());
    for character in &summary.characters {
        println!(
            "  {:<20} {:>4} segments  voice {}",
            character.name, character.dialogue_count, character.voice_id
        );
    }
    match summary.output_path {
        Some(path) => println!("Audiobook written to {}", path.display()),
        None => println!("Dry run, no audio produced."),
    }
    Ok(())
}

fn list_voices(synth_id: &str) -> anyhow::Result<()> {
    let registry = ComponentRegistry::with_defaults();
    let synth = registry.create_synthesizer(synth_id, &PipelineConfig::default())?;
    for voice in synth.list_voices()? {
        println!(
            "{:<24} {:<16} {:<8} {}",
            voice.id, voice.display_name, voice.gender, voice.locale
        );
    }
    Ok(())
}

fn list_components() {
    let registry = ComponentRegistry::with_defaults();
    println!("parsers:      {}", registry.segmenter_ids().join(", "));
    println!("analyzers:    {}", registry.analyzer_ids().join(", "));
    println!("synthesizers: {}", registry.synthesizer_ids().join(", "));
    println!("assemblers:   {}", registry.assembler_ids().join(", "));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fabula=info".parse().expect("static filter")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert(args).await,
        Command::ListVoices { synth } => list_voices(&synth),
        Command::ListComponents => {
            list_components();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_args_parse_with_overrides() {
        let cli = Cli::try_parse_from([
            "fabula",
            "convert",
            "book.txt",
            "--parser",
            "attributed",
            "--concurrency",
            "4",
            "--dry-run",
        ])
        .expect("parse args");

        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert_eq!(args.input, PathBuf::from("book.txt"));
        assert!(args.dry_run);

        let config = args.effective_config().expect("build config");
        assert_eq!(config.parser, "attributed");
        assert_eq!(config.analyzer, "basic");
        assert_eq!(config.synthesis_concurrency, Some(4));
    }

    #[test]
    fn default_output_swaps_extension() {
        assert_eq!(
            default_output_path(Path::new("dir/book.txt"), "wav"),
            PathBuf::from("dir/book.wav")
        );
    }

    #[test]
    fn config_file_and_flags_compose() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"analyzer": "statistical", "silence_gap_ms": 250}}"#)
            .expect("write config");

        let cli = Cli::try_parse_from([
            "fabula",
            "convert",
            "book.txt",
            "--config",
            file.path().to_str().expect("utf-8 path"),
            "--analyzer",
            "basic",
        ])
        .expect("parse args");
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };

        let config = args.effective_config().expect("build config");
        // Flag beats file, file beats default.
        assert_eq!(config.analyzer, "basic");
        assert_eq!(config.silence_gap_ms, 250);
    }

    #[tokio::test]
    async fn convert_rejects_missing_input() {
        let cli = Cli::try_parse_from(["fabula", "convert", "no-such-file.txt"])
            .expect("parse args");
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        let err = convert(args).await.expect_err("missing input must fail");
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn convert_rejects_non_txt_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.pdf");
        std::fs::write(&path, "not text").expect("write file");

        let cli = Cli::try_parse_from([
            "fabula",
            "convert",
            path.to_str().expect("utf-8 path"),
        ])
        .expect("parse args");
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        let err = convert(args).await.expect_err("non-txt input must fail");
        assert!(err.to_string().contains(".txt"));
    }
}
