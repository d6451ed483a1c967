use std::sync::Arc;

use jrai_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Both directions between the terminal shell and the event loop
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            // Results and notices rendered by the shell
            app_to_ui: kanal::bounded_async(256),
            // One event per shell line
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Owns the shared state and the shutdown token of the running shell
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Start the event loop and the shell.
    ///
    /// A `quit` handled by the event loop cancels the shared token, which
    /// also stops the shell through its child token.
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.clone(),
        ));

        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Stop both tasks, e.g. on ctrl-c
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
