use jrai_ai::Language;
use jrai_audio::PlaybackOutcome;
use jrai_types::{AppEvent, Side};
use kanal::AsyncSender;

use crate::state::AppState;

/// Pronounce arbitrary text. Runs in its own task so the event loop keeps
/// serving the shell; the player drops requests that overlap a playback.
pub fn handle_speak(
    state: &AppState,
    text: String,
    side: Side,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) {
    let language = match side {
        Side::Jrai => Language::Jrai,
        Side::Viet => Language::Viet,
    };
    let player = state.player.clone();
    let tx = app_to_ui_tx.clone();

    tokio::spawn(async move {
        let outcome = player.speak(&text, language).await;
        report(&tx, &text, outcome).await;
    });
}

/// Pronounce a dictionary headword, using its stored recording when present
pub async fn handle_play_entry(
    state: &AppState,
    headword: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let entry = state.store.lock().await.get(&headword).cloned();
    let Some(entry) = entry else {
        app_to_ui_tx
            .send(AppEvent::Notice(format!("'{headword}' is not in the dictionary")))
            .await?;
        return Ok(());
    };

    let player = state.player.clone();
    let tx = app_to_ui_tx.clone();

    tokio::spawn(async move {
        let outcome = match &entry.audio {
            Some(clip) => player.play_clip(clip).await,
            None => player.speak(&entry.headword_jrai, Language::Jrai).await,
        };
        report(&tx, &entry.headword_jrai, outcome).await;
    });

    Ok(())
}

async fn report(tx: &AsyncSender<AppEvent>, text: &str, outcome: PlaybackOutcome) {
    let notice = match outcome {
        PlaybackOutcome::Played { duration } => {
            format!("Played '{}' ({:.1}s)", text, duration.as_secs_f32())
        }
        PlaybackOutcome::Busy => {
            tracing::debug!("Dropped pronunciation request for '{}'", text);
            return;
        }
        PlaybackOutcome::NoAudio(notice) => notice,
        PlaybackOutcome::Failed(reason) => format!("Playback failed: {reason}"),
    };

    if let Err(e) = tx.send(AppEvent::Notice(notice)).await {
        tracing::error!("Failed to send playback notice: {}", e);
    }
}
