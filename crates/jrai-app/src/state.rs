use std::sync::Arc;
use std::time::Duration;

use jrai_ai::{Explainer, GeminiClient, SpeechSynthesizer};
use jrai_audio::playback::OutputFactory;
use jrai_audio::{AudioError, AudioOutput, SpeechPlayer, WavOutput};
use jrai_config::Config;
use jrai_core::DictionaryStore;
use jrai_core::admin::AdminGate;
use jrai_core::quiz::QuizSession;
use jrai_core::storage::FileStorage;
use tokio::sync::{Mutex, RwLock};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: Mutex<DictionaryStore>,
    /// Current learning-tab batch
    pub quiz: Mutex<QuizSession>,
    pub player: Arc<SpeechPlayer>,
    pub explainer: Arc<dyn Explainer>,
    pub admin: AdminGate,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let storage = FileStorage::new(&config.storage.data_dir);
        tracing::info!("Dictionary storage in {}", storage.root().display());
        let store = DictionaryStore::load(
            Box::new(storage),
            config.storage.storage_key.clone(),
            config.search.clone(),
        );

        if !config.ai.is_configured() {
            tracing::warn!(
                "GEMINI_API_KEY not set, explanations and pronunciation will be unavailable"
            );
        }
        let gemini = Arc::new(
            GeminiClient::new(
                config.ai.api_key.clone(),
                &config.ai.base_url,
                Duration::from_secs(config.ai.timeout_seconds),
            )?
            .with_models(config.ai.text_model.clone(), config.ai.tts_model.clone())
            .with_voices(config.ai.jrai_voice.clone(), config.ai.viet_voice.clone()),
        );

        let output_dir = config.audio.output_dir.clone();
        let factory: OutputFactory = Box::new(move || -> Result<Box<dyn AudioOutput>, AudioError> {
            Ok(Box::new(WavOutput::new(output_dir.clone())))
        });

        Ok(Self::with_parts(config, store, gemini.clone(), gemini, factory))
    }

    pub fn with_parts(
        config: Config,
        store: DictionaryStore,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        explainer: Arc<dyn Explainer>,
        output_factory: OutputFactory,
    ) -> Self {
        let player = SpeechPlayer::new(synthesizer, output_factory, config.audio.sample_rate);
        let admin = AdminGate::new(config.admin_secret.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            store: Mutex::new(store),
            quiz: Mutex::new(QuizSession::default()),
            player: Arc::new(player),
            explainer,
            admin,
        }
    }
}
