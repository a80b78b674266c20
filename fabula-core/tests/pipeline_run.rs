//! End-to-end pipeline runs against the bundled strategies.

use std::fs;
use std::sync::Arc;

use fabula_core::synth::SynthHandle;
use fabula_core::{
    AudioAssembler, ComponentRegistry, DialogueSegmenter, FabulaError, Pipeline, PipelineConfig,
    SpeechSynthesizer, ToneSynthesizer, VoiceCharacteristics, VoiceInfo, WavAssembler,
};

const STORY: &str = "The rain had not let up for three days.\n\n\
\"We should have left on Monday,\" said Mary. \"The river will be over the bridge by now.\"\n\n\
John folded the map without looking up. \"Then we go around,\" John said. \"Another day, no more.\"\n\n\
Outside, the water kept rising.";

fn full_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.parser = "attributed".to_string();
    config.analyzer = "statistical".to_string();
    config
}

#[tokio::test]
async fn full_run_writes_a_playable_audiobook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("story.wav");

    let registry = ComponentRegistry::with_defaults();
    let pipeline = Pipeline::from_registry(&registry, full_config()).expect("resolve pipeline");

    let summary = pipeline.run(STORY, &out, false).await.expect("run pipeline");

    assert!(summary.segment_count >= 6, "got {}", summary.segment_count);
    assert_eq!(summary.output_path.as_deref(), Some(out.as_path()));

    let names: Vec<&str> = summary.characters.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"narrator"), "names: {names:?}");
    assert!(names.contains(&"Mary"), "names: {names:?}");
    assert!(names.contains(&"John"), "names: {names:?}");

    // The artifact must decode as real audio with nonzero length.
    let probe = WavAssembler::default();
    let total_ms = probe
        .clip_duration_ms(&fs::read(&out).expect("read output"))
        .expect("probe output");
    assert!(total_ms > 1_000, "suspiciously short output: {total_ms}ms");
}

#[tokio::test]
async fn dry_run_reports_cast_without_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("story.wav");

    let registry = ComponentRegistry::with_defaults();
    let pipeline = Pipeline::from_registry(&registry, full_config()).expect("resolve pipeline");

    let summary = pipeline.run(STORY, &out, true).await.expect("dry run");

    assert!(summary.output_path.is_none());
    assert!(summary.characters.len() >= 3);
    assert!(!out.exists());
    assert!(
        fs::read_dir(dir.path()).expect("read dir").next().is_none(),
        "dry run must not write anything"
    );
}

#[tokio::test]
async fn voice_override_reaches_the_synthesized_clips() {
    struct RecordingSynth {
        inner: ToneSynthesizer,
        seen: std::sync::Mutex<Vec<(String, String)>>,
    }

    impl SpeechSynthesizer for RecordingSynth {
        fn synthesize(
            &self,
            text: &str,
            voice_id: &str,
            characteristics: &VoiceCharacteristics,
        ) -> fabula_core::Result<Vec<u8>> {
            self.seen
                .lock()
                .expect("lock")
                .push((text.to_string(), voice_id.to_string()));
            self.inner.synthesize(text, voice_id, characteristics)
        }

        fn list_voices(&self) -> fabula_core::Result<Vec<VoiceInfo>> {
            self.inner.list_voices()
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("story.wav");

    let recorder = Arc::new(RecordingSynth {
        inner: ToneSynthesizer::new(),
        seen: std::sync::Mutex::new(Vec::new()),
    });
    let handle: SynthHandle = Arc::clone(&recorder) as SynthHandle;

    let mut registry = ComponentRegistry::with_defaults();
    registry.register_synthesizer("recording", move |_| Arc::clone(&handle));

    let mut config = full_config();
    config.synthesizer = "recording".to_string();
    config
        .voice_overrides
        .insert("Mary".to_string(), "custom-mary-voice".to_string());

    let pipeline = Pipeline::from_registry(&registry, config).expect("resolve pipeline");
    pipeline.run(STORY, &out, false).await.expect("run pipeline");

    let seen = recorder.seen.lock().expect("lock");
    let mary_calls: Vec<&(String, String)> = seen
        .iter()
        .filter(|(text, _)| text.contains("left on Monday") || text.contains("over the bridge"))
        .collect();
    assert_eq!(mary_calls.len(), 2, "calls: {seen:?}");
    assert!(
        mary_calls.iter().all(|(_, voice)| voice == "custom-mary-voice"),
        "calls: {seen:?}"
    );
}

#[tokio::test]
async fn failing_segment_aborts_the_run_by_earliest_index() {
    struct PoisonSynth;

    impl SpeechSynthesizer for PoisonSynth {
        fn synthesize(
            &self,
            text: &str,
            voice_id: &str,
            characteristics: &VoiceCharacteristics,
        ) -> fabula_core::Result<Vec<u8>> {
            if text.contains("bridge") {
                return Err(FabulaError::Other(anyhow::anyhow!("engine refused")));
            }
            ToneSynthesizer::new().synthesize(text, voice_id, characteristics)
        }

        fn list_voices(&self) -> fabula_core::Result<Vec<VoiceInfo>> {
            Ok(Vec::new())
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("story.wav");

    let mut registry = ComponentRegistry::with_defaults();
    registry.register_synthesizer("poison", |_| Arc::new(PoisonSynth));
    let mut config = full_config();
    config.synthesizer = "poison".to_string();

    let pipeline = Pipeline::from_registry(&registry, config).expect("resolve pipeline");
    let err = pipeline.run(STORY, &out, false).await;

    match err {
        Err(FabulaError::Synthesis { index, .. }) => {
            // "The river will be over the bridge by now." is Mary's second
            // quote, early in the manuscript.
            assert!(index < 5, "index: {index}");
        }
        other => panic!("expected synthesis error, got {other:?}"),
    }
    assert!(!out.exists());
}

#[tokio::test]
async fn clips_keep_narrative_order_under_concurrency() {
    // A synthesizer with per-voice pitches makes order verifiable: the
    // output must start with the narrator clip's exact samples.
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("story.wav");

    let registry = ComponentRegistry::with_defaults();
    let mut config = full_config();
    config.synthesis_concurrency = Some(2);
    let pipeline = Pipeline::from_registry(&registry, config).expect("resolve pipeline");

    let segmenter = fabula_core::AttributedSegmenter::new();
    let first = segmenter.segment(STORY).remove(0);
    let first_clip = ToneSynthesizer::new()
        .synthesize(
            &first.text,
            "en-US-AriaNeural",
            &VoiceCharacteristics::default(),
        )
        .expect("synthesize reference clip");

    pipeline.run(STORY, &out, false).await.expect("run pipeline");

    let output = fs::read(&out).expect("read output");
    // WAV data chunks start at byte 44 for both buffers.
    assert_eq!(&output[44..first_clip.len()], &first_clip[44..]);
}
