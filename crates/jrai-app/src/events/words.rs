use jrai_core::WordEntry;
use jrai_types::AppEvent;
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_add_word(
    state: &AppState,
    jrai: String,
    viet: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let entry = WordEntry::new(jrai.trim(), viet.trim());
    let notice = {
        let mut store = state.store.lock().await;
        let replaced = store.get(&entry.headword_jrai).is_some();
        match store.add(entry.clone()) {
            Ok(()) if replaced => {
                format!("Updated '{}' = '{}'", entry.headword_jrai, entry.gloss_viet)
            }
            Ok(()) => format!("Added '{}' = '{}'", entry.headword_jrai, entry.gloss_viet),
            Err(e) => {
                tracing::error!("Failed to add '{}': {}", entry.headword_jrai, e);
                format!("Could not save '{}': {}", entry.headword_jrai, e)
            }
        }
    };

    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}
