use jrai_core::{SearchOutcome, WordEntry};
use jrai_types::{AppEvent, DisplayResult, SearchView};
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_search(
    state: &AppState,
    query: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let outcome = state.store.lock().await.search(&query);

    let view = match outcome {
        SearchOutcome::EmptyQuery => SearchView::EmptyQuery,
        SearchOutcome::NoMatch => {
            tracing::debug!("No entry matches '{}'", query);
            SearchView::NoMatch(query)
        }
        SearchOutcome::Found(entries) => {
            tracing::debug!("'{}' matched {} entries", query, entries.len());
            SearchView::Results(entries.iter().map(display_result).collect())
        }
    };

    app_to_ui_tx.send(AppEvent::ShowSearch(view)).await?;
    Ok(())
}

pub fn display_result(entry: &WordEntry) -> DisplayResult {
    DisplayResult {
        jrai: entry.headword_jrai.clone(),
        viet: entry.gloss_viet.clone(),
        has_audio: entry.audio.is_some(),
    }
}
