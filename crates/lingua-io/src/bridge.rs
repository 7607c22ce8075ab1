//! WebSocket bridge to the browser shim. Each page opens one connection and
//! exchanges JSON text frames: `PageEvent` in, `UiUpdate` out.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use kanal::{AsyncReceiver, AsyncSender};
use lingua_types::{PageEvent, UiUpdate};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

const CHANNEL_CAPACITY: usize = 64;

/// One connected page
pub struct BridgeConnection {
    pub peer: SocketAddr,
    /// Closed when the page disconnects
    pub events: AsyncReceiver<PageEvent>,
    pub updates: AsyncSender<UiUpdate>,
    /// Cancelled when the socket goes away
    pub closed: CancellationToken,
}

pub struct Bridge {
    listener: TcpListener,
}

impl Bridge {
    pub async fn bind(addr: &str) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept pages until `cancel` fires, handing each one to `connections`
    pub async fn run(
        self,
        connections: AsyncSender<BridgeConnection>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        tracing::info!("Browser bridge listening on ws://{}", self.local_addr()?);

        loop {
            let (stream, peer) = tokio::select! {
                _ = cancel.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!("Bridge accept failed: {}", e);
                        continue;
                    }
                },
            };

            tracing::debug!("Page connected from {}", peer);

            let connections = connections.clone();
            let cancel = cancel.child_token();
            tokio::spawn(async move {
                if let Err(e) = serve_page(stream, peer, connections, cancel).await {
                    tracing::warn!("Bridge connection {} failed: {}", peer, e);
                }
            });
        }

        tracing::info!("Browser bridge stopped");
        Ok(())
    }
}

async fn serve_page(
    stream: TcpStream,
    peer: SocketAddr,
    connections: AsyncSender<BridgeConnection>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    let (mut write, mut read) = ws_stream.split();

    let (events_tx, events_rx) = kanal::bounded_async::<PageEvent>(CHANNEL_CAPACITY);
    let (updates_tx, updates_rx) = kanal::bounded_async::<UiUpdate>(CHANNEL_CAPACITY);

    connections
        .send(BridgeConnection {
            peer,
            events: events_rx,
            updates: updates_tx,
            closed: cancel.clone(),
        })
        .await?;

    // Closing this handle stops the writer once the reader is done
    let updates_closer = updates_rx.clone();

    // Writer: session updates to the page
    let writer = tokio::spawn(async move {
        while let Ok(update) = updates_rx.recv().await {
            let json = match serde_json::to_string(&update) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode UI update: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::text(json)).await {
                tracing::debug!("Bridge write failed: {}", e);
                break;
            }
        }

        let _ = write.close().await;
    });

    // Reader: page events to the session
    loop {
        let msg = tokio::select! {
            _ = cancel.cancelled() => break,
            msg = read.next() => msg,
        };

        match msg {
            Some(Ok(Message::Text(text))) => {
                match serde_json::from_str::<PageEvent>(text.as_str()) {
                    Ok(event) => {
                        if events_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Ignoring malformed page event: {}", e),
                }
            }
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::debug!("Bridge read failed: {}", e);
                break;
            }
        }
    }

    tracing::debug!("Page {} disconnected", peer);
    drop(events_tx);
    cancel.cancel();
    let _ = updates_closer.close();
    let _ = writer.await;

    Ok(())
}
