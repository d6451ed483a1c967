use jrai_core::dictionary::data_uri;
use jrai_types::{AppEvent, ExportScope, ExportTarget};
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_import(
    state: &AppState,
    path: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let json = match tokio::fs::read_to_string(&path).await {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to read import file {}: {}", path, e);
            let notice = format!("Could not read {path}: {e}");
            app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
            return Ok(());
        }
    };

    let result = state.store.lock().await.import_from(&json);
    let notice = match result {
        Ok(report) if report.rejected.is_empty() => {
            format!("Imported {} entries from {}", report.imported, path)
        }
        Ok(report) => {
            let rejected: Vec<String> = report
                .rejected
                .iter()
                .map(|r| format!("  {}: {}", r.id, r.reason))
                .collect();
            format!(
                "Imported {} entries from {}, skipped {} invalid records:\n{}",
                report.imported,
                path,
                report.rejected.len(),
                rejected.join("\n")
            )
        }
        Err(e) => {
            tracing::warn!("Import from {} rejected: {}", path, e);
            format!("Import failed, dictionary unchanged: {e}")
        }
    };

    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}

pub async fn handle_export(
    state: &AppState,
    secret: String,
    target: ExportTarget,
    scope: ExportScope,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if let Err(e) = state.admin.verify(&secret) {
        tracing::warn!("Export refused: {}", e);
        app_to_ui_tx
            .send(AppEvent::Notice("Wrong admin secret, nothing exported".to_string()))
            .await?;
        return Ok(());
    }

    let exported = {
        let store = state.store.lock().await;
        match scope {
            ExportScope::Additions => store.export_additions(),
            ExportScope::All => store.export_all(),
        }
    };
    let json = match exported {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize export: {}", e);
            app_to_ui_tx
                .send(AppEvent::Notice(format!("Export failed: {e}")))
                .await?;
            return Ok(());
        }
    };

    let notice = match target {
        ExportTarget::DataUri => data_uri(&json),
        ExportTarget::File(path) => match tokio::fs::write(&path, &json).await {
            Ok(()) => {
                tracing::info!("Exported {} bytes to {}", json.len(), path);
                format!("Exported dictionary to {path}")
            }
            Err(e) => {
                tracing::error!("Failed to write export {}: {}", path, e);
                format!("Could not write {path}: {e}")
            }
        },
    };

    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}

pub async fn handle_reset(
    state: &AppState,
    confirmed: bool,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let result = state.store.lock().await.reset(confirmed);
    let notice = match result {
        Ok(true) => "Dictionary restored to the default word list".to_string(),
        Ok(false) => "Reset cancelled".to_string(),
        Err(e) => {
            tracing::error!("Reset failed: {}", e);
            format!("Reset failed: {e}")
        }
    };

    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}
