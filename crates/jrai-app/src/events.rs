use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use jrai_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod data;
pub mod explain;
pub mod quiz;
pub mod search;
pub mod speech;
pub mod words;

use data::{handle_export, handle_import, handle_reset};
use explain::handle_explain;
use quiz::{handle_answer, handle_check, handle_draw, handle_start_test};
use search::handle_search;
use speech::{handle_play_entry, handle_speak};
use words::handle_add_word;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if matches!(event, AppEvent::Shutdown) {
            tracing::info!("Shutdown requested from shell");
            cancel.cancel();
            break;
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Search(query) => handle_search(&state, query, app_to_ui_tx).await?,
        AppEvent::AddWord { jrai, viet } => {
            handle_add_word(&state, jrai, viet, app_to_ui_tx).await?
        }
        AppEvent::Import { path } => handle_import(&state, path, app_to_ui_tx).await?,
        AppEvent::Export {
            secret,
            target,
            scope,
        } => handle_export(&state, secret, target, scope, app_to_ui_tx).await?,
        AppEvent::ResetDictionary { confirmed } => {
            handle_reset(&state, confirmed, app_to_ui_tx).await?
        }
        AppEvent::DrawQuiz => handle_draw(&state, app_to_ui_tx).await?,
        AppEvent::StartTest => handle_start_test(&state, app_to_ui_tx).await?,
        AppEvent::Answer { index, text } => {
            handle_answer(&state, index, text, app_to_ui_tx).await?
        }
        AppEvent::CheckAnswers => handle_check(&state, app_to_ui_tx).await?,
        AppEvent::Speak { text, side } => handle_speak(&state, text, side, app_to_ui_tx),
        AppEvent::PlayEntry { headword } => {
            handle_play_entry(&state, headword, app_to_ui_tx).await?
        }
        AppEvent::Explain { headword } => handle_explain(&state, headword, app_to_ui_tx).await?,
        AppEvent::Shutdown => {}
        AppEvent::ShowSearch(_)
        | AppEvent::ShowQuiz(_)
        | AppEvent::ShowExplanation { .. }
        | AppEvent::Notice(_) => {
            // Shell-only events, ignore in backend
        }
    }

    Ok(())
}
