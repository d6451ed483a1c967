//! Single-flight and lifecycle behaviour of the speech player

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jrai_ai::{AiError, Language, SpeechSynthesizer};
use tokio::sync::Notify;
use tokio::time::timeout;

use crate::decoder::{AudioBuffer, PCM_SAMPLE_RATE};
use crate::error::AudioError;
use crate::output::{AudioOutput, ContextState};
use crate::playback::{NO_AUDIO_NOTICE, OutputFactory, PlaybackOutcome, PlaybackState, SpeechPlayer};

fn pcm(samples: &[i16]) -> String {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}

enum Reply {
    Audio(String),
    Nothing,
    Error,
    Never,
}

struct FakeSynthesizer {
    reply: Reply,
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<(String, Language)>>,
}

impl FakeSynthesizer {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn gated(reply: Reply, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(reply)
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Option<String>, AiError> {
        self.calls.lock().unwrap().push((text.to_string(), language));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Audio(payload) => Ok(Some(payload.clone())),
            Reply::Nothing => Ok(None),
            Reply::Error => Err(AiError::RateLimitExceeded),
            Reply::Never => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct Probe {
    created: AtomicUsize,
    resumed: AtomicUsize,
    played: Mutex<Vec<AudioBuffer>>,
}

/// Output that suspends itself after every clip
struct FakeOutput {
    probe: Arc<Probe>,
    state: Mutex<ContextState>,
}

#[async_trait]
impl AudioOutput for FakeOutput {
    fn state(&self) -> ContextState {
        *self.state.lock().unwrap()
    }

    async fn resume(&self) -> Result<(), AudioError> {
        self.probe.resumed.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = ContextState::Running;
        Ok(())
    }

    async fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        assert_eq!(self.state(), ContextState::Running);
        self.probe.played.lock().unwrap().push(buffer.clone());
        *self.state.lock().unwrap() = ContextState::Suspended;
        Ok(())
    }
}

fn factory(probe: Arc<Probe>) -> OutputFactory {
    Box::new(move || -> Result<Box<dyn AudioOutput>, AudioError> {
        probe.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeOutput {
            probe: probe.clone(),
            state: Mutex::new(ContextState::Suspended),
        }))
    })
}

fn player(synthesizer: FakeSynthesizer, probe: Arc<Probe>) -> SpeechPlayer {
    SpeechPlayer::new(Arc::new(synthesizer), factory(probe), PCM_SAMPLE_RATE)
}

#[tokio::test]
async fn speak_plays_decoded_audio() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Audio(pcm(&[16384, -32768]))), probe.clone());

    let outcome = player.speak("Aba", Language::Jrai).await;

    assert!(matches!(outcome, PlaybackOutcome::Played { .. }));
    assert_eq!(player.state(), PlaybackState::Idle);
    let played = probe.played.lock().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].samples, [0.5, -1.0]);
    assert_eq!(played[0].sample_rate, 24_000);
}

#[tokio::test]
async fn language_flag_reaches_synthesizer() {
    let probe = Arc::new(Probe::default());
    let synthesizer = Arc::new(FakeSynthesizer::new(Reply::Audio(pcm(&[1]))));
    let player = SpeechPlayer::new(synthesizer.clone(), factory(probe), PCM_SAMPLE_RATE);

    player.speak("con ba ba", Language::Viet).await;

    let calls = synthesizer.calls.lock().unwrap();
    assert_eq!(*calls, [("con ba ba".to_string(), Language::Viet)]);
}

#[tokio::test]
async fn output_is_created_once_and_resumed_before_every_play() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Audio(pcm(&[100, 200]))), probe.clone());

    for _ in 0..3 {
        let outcome = player.speak("Ia", Language::Jrai).await;
        assert!(matches!(outcome, PlaybackOutcome::Played { .. }));
    }

    assert_eq!(probe.created.load(Ordering::SeqCst), 1);
    assert_eq!(probe.resumed.load(Ordering::SeqCst), 3);
    assert_eq!(probe.played.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn output_is_not_created_before_first_play() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Nothing), probe.clone());

    player.speak("Ia", Language::Jrai).await;
    assert_eq!(probe.created.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_audio_returns_to_idle_with_notice() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Nothing), probe.clone());

    let outcome = player.speak("Ia", Language::Jrai).await;
    assert_eq!(outcome, PlaybackOutcome::NoAudio(NO_AUDIO_NOTICE.to_string()));
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(probe.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_audio_counts_as_missing() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Audio(String::new())), probe);

    let outcome = player.speak("Ia", Language::Jrai).await;
    assert!(matches!(outcome, PlaybackOutcome::NoAudio(_)));
}

#[tokio::test]
async fn synthesis_failure_returns_to_idle_with_notice() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Error), probe);

    let outcome = player.speak("Ia", Language::Viet).await;
    assert!(matches!(outcome, PlaybackOutcome::NoAudio(_)));
    assert_eq!(player.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn corrupt_audio_fails_without_playing() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Audio("%%%".to_string())), probe.clone());

    let outcome = player.speak("Ia", Language::Jrai).await;
    assert!(matches!(outcome, PlaybackOutcome::Failed(_)));
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(probe.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn request_while_busy_is_dropped() {
    let probe = Arc::new(Probe::default());
    let gate = Arc::new(Notify::new());
    let player = Arc::new(player(
        FakeSynthesizer::gated(Reply::Audio(pcm(&[1, 2, 3])), gate.clone()),
        probe.clone(),
    ));

    let first = tokio::spawn({
        let player = player.clone();
        async move { player.speak("Aba", Language::Jrai).await }
    });

    timeout(Duration::from_secs(2), async {
        while player.state() != PlaybackState::Requesting {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("first request never started");

    assert_eq!(player.speak("Ia", Language::Jrai).await, PlaybackOutcome::Busy);
    assert_eq!(player.play_clip(&pcm(&[1])).await, PlaybackOutcome::Busy);

    gate.notify_one();
    let outcome = timeout(Duration::from_secs(2), first).await.unwrap().unwrap();
    assert!(matches!(outcome, PlaybackOutcome::Played { .. }));
    assert_eq!(probe.played.lock().unwrap().len(), 1);
    assert_eq!(player.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn abandoned_request_releases_the_player() {
    let probe = Arc::new(Probe::default());
    let player = player(FakeSynthesizer::new(Reply::Never), probe);

    let result = timeout(Duration::from_millis(20), player.speak("Aba", Language::Jrai)).await;
    assert!(result.is_err());
    assert_eq!(player.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn stored_clip_skips_synthesis() {
    let probe = Arc::new(Probe::default());
    let synthesizer = Arc::new(FakeSynthesizer::new(Reply::Error));
    let player = SpeechPlayer::new(synthesizer.clone(), factory(probe.clone()), PCM_SAMPLE_RATE);

    let outcome = player.play_clip(&pcm(&[0; 2400])).await;

    assert_eq!(
        outcome,
        PlaybackOutcome::Played {
            duration: Duration::from_millis(100)
        }
    );
    assert!(synthesizer.calls.lock().unwrap().is_empty());
    assert_eq!(probe.played.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn factory_failure_is_reported() {
    let player = SpeechPlayer::new(
        Arc::new(FakeSynthesizer::new(Reply::Audio(pcm(&[1])))),
        Box::new(|| -> Result<Box<dyn AudioOutput>, AudioError> {
            Err(AudioError::Unavailable("no device".to_string()))
        }),
        PCM_SAMPLE_RATE,
    );

    let outcome = player.speak("Aba", Language::Jrai).await;
    assert!(matches!(outcome, PlaybackOutcome::Failed(_)));
    assert_eq!(player.state(), PlaybackState::Idle);
}
