use jrai_types::AppEvent;
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_explain(
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

    let explainer = state.explainer.clone();
    let tx = app_to_ui_tx.clone();

    tokio::spawn(async move {
        let text = explainer
            .explain(&entry.headword_jrai, &entry.gloss_viet)
            .await;
        let event = AppEvent::ShowExplanation {
            headword: entry.headword_jrai,
            text,
        };
        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to send explanation: {}", e);
        }
    });

    Ok(())
}
