use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_io::{Bridge, BridgeConnection};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::page_loop;
use crate::state::AppState;

/// Application controller for task spawning and lifecycle
pub struct AppController {
    connections: (
        AsyncSender<BridgeConnection>,
        AsyncReceiver<BridgeConnection>,
    ),
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            connections: kanal::bounded_async(16),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, bridge: Bridge) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Bridge accept loop
        tasks.spawn(bridge.run(
            self.connections.0.clone(),
            self.cancel_token.child_token(),
        ));

        // One session per connected page
        tasks.spawn(dispatch_pages(
            self.state.clone(),
            self.connections.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

async fn dispatch_pages(
    state: Arc<AppState>,
    connections: AsyncReceiver<BridgeConnection>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut pages = JoinSet::new();

    // Closing the channel ends the receive loop below
    let closer = tokio::spawn({
        let connections = connections.clone();
        async move {
            cancel.cancelled().await;
            let _ = connections.close();
        }
    });

    while let Ok(conn) = connections.recv().await {
        while let Some(joined) = pages.try_join_next() {
            if let Err(e) = joined {
                tracing::error!("Page session panicked: {}", e);
            }
        }

        tracing::info!("Page connected: {}", conn.peer);

        let peer = conn.peer;
        let state = state.clone();
        let token = conn.closed.clone();
        pages.spawn(async move {
            if let Err(e) = page_loop(state, conn.events, conn.updates, token).await {
                tracing::warn!("Page {} session failed: {}", peer, e);
            }
            tracing::info!("Page disconnected: {}", peer);
        });
    }

    closer.abort();
    pages.shutdown().await;
    Ok(())
}
