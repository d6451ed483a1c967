
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jrai_ai::{AiError, Explainer, Language, SpeechSynthesizer};
use jrai_audio::playback::OutputFactory;
use jrai_audio::{AudioError, AudioOutput, WavOutput};
use jrai_config::Config;
use jrai_core::storage::MemoryStorage;
use jrai_core::{DictionaryStore, SearchOptions};
use jrai_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

pub const ADMIN_SECRET: &str = "test-secret";

/// 16384 and -16384 as little-endian PCM
pub const CLIP: &str = "AEAAwA==";

pub struct FakeSynthesizer {
    pub audio: Option<String>,
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        _language: Language,
    ) -> Result<Option<String>, AiError> {
        Ok(self.audio.clone())
    }
}

pub struct FailingExplainer;

#[async_trait]
impl Explainer for FailingExplainer {
    async fn request_explanation(&self, _headword: &str, _gloss: &str) -> Result<String, AiError> {
        Err(AiError::AuthenticationError)
    }
}

/// Event loop running against an in-memory dictionary
pub struct Harness {
    pub tx: AsyncSender<AppEvent>,
    pub rx: AsyncReceiver<AppEvent>,
    pub state: Arc<AppState>,
    pub dir: TempDir,
    cancel: CancellationToken,
    task: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    pub fn start(synthesized: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::new();
        config.admin_secret = ADMIN_SECRET.to_string();
        config.audio.output_dir = dir.path().join("audio").to_string_lossy().into_owned();

        let store = DictionaryStore::load(
            Box::new(MemoryStorage::new()),
            "jrai_dictionary_v3",
            SearchOptions::default(),
        );
        let output_dir = config.audio.output_dir.clone();
        let factory: OutputFactory = Box::new(move || -> Result<Box<dyn AudioOutput>, AudioError> {
            Ok(Box::new(WavOutput::new(output_dir.clone())))
        });
        let synthesizer = Arc::new(FakeSynthesizer {
            audio: synthesized.map(str::to_string),
        });

        let state = Arc::new(AppState::with_parts(
            config,
            store,
            synthesizer,
            Arc::new(FailingExplainer),
            factory,
        ));

        let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async(64);
        let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async(256);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(event_loop(
            state.clone(),
            ui_to_app_rx,
            app_to_ui_tx,
            cancel.clone(),
        ));

        Self {
            tx: ui_to_app_tx,
            rx: app_to_ui_rx,
            state,
            dir,
            cancel,
            task,
        }
    }

    pub async fn send(&self, event: AppEvent) {
        self.tx.send(event).await.unwrap();
    }

    pub async fn next(&self) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("no event from the app within 2s")
            .unwrap()
    }

    pub async fn notice(&self) -> String {
        match self.next().await {
            AppEvent::Notice(text) => text,
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    pub async fn stop(self) {
        self.cancel.cancel();
        self.task.await.unwrap().unwrap();
    }
}
