//! WebSocket Client
//!
//! Connects to the backend, decodes inbound lifecycle events from JSON text
//! frames and forwards outbound snapshots. Delivery order and acknowledgement
//! are whatever the socket gives us.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::network::protocol::{LocalSnapshot, NetworkEvent, OutboundMessage};

/// Queue depth of each direction.
const CHANNEL_CAPACITY: usize = 256;

/// Transport failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Handshake or socket failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Outbound queue is full.
    #[error("outbound queue full")]
    QueueFull,

    /// Connection task has ended.
    #[error("connection closed")]
    Closed,
}

/// Live connection to the backend.
#[derive(Debug)]
pub struct TransportHandle {
    /// Outbound snapshots
    pub outgoing: mpsc::Sender<LocalSnapshot>,
    incoming: mpsc::Receiver<NetworkEvent>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl TransportHandle {
    /// Queue a snapshot without waiting.
    pub fn send(&self, snapshot: LocalSnapshot) -> Result<(), TransportError> {
        self.outgoing.try_send(snapshot).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => TransportError::Closed,
        })
    }

    /// Every event received since the last drain, in arrival order.
    pub fn drain(&mut self) -> Vec<NetworkEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.incoming.try_recv() {
            events.push(event);
        }
        events
    }

    /// Whether the reader is still running.
    pub fn is_connected(&self) -> bool {
        !self.reader.is_finished()
    }

    /// Stop both connection tasks.
    pub fn close(self) {
        self.reader.abort();
        self.writer.abort();
        info!("Transport closed");
    }
}

/// Decode one text frame. Anything that is not a known event is `None`.
pub fn decode_frame(text: &str) -> Option<NetworkEvent> {
    match NetworkEvent::from_json(text) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("Skipping undecodable frame: {} - {}", e, text);
            None
        }
    }
}

/// Connect to `url` and spawn the reader and writer tasks.
pub async fn connect(url: &str) -> Result<TransportHandle, TransportError> {
    info!("Connecting to {}...", url);
    let (ws_stream, _) = connect_async(url).await?;
    info!("WebSocket connected");

    let (mut write, mut read) = ws_stream.split();
    let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<LocalSnapshot>(CHANNEL_CAPACITY);
    let (incoming_tx, incoming_rx) = mpsc::channel::<NetworkEvent>(CHANNEL_CAPACITY);

    let reader = tokio::spawn(async move {
        while let Some(msg_result) = read.next().await {
            match msg_result {
                Ok(Message::Text(text)) => {
                    let Some(event) = decode_frame(&text) else {
                        continue;
                    };
                    debug!("Received {} for {}", event.kind(), event.id());
                    if incoming_tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => {
                    info!("Server closed connection");
                    break;
                }
                Err(e) => {
                    error!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        debug!("Reader task ended");
    });

    let writer = tokio::spawn(async move {
        while let Some(snapshot) = outgoing_rx.recv().await {
            let json = match OutboundMessage::PlayerUpdate(snapshot).to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to encode snapshot: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::Text(json)).await {
                error!("Failed to send snapshot: {}", e);
                break;
            }
        }
        debug!("Writer task ended");
    });

    Ok(TransportHandle {
        outgoing: outgoing_tx,
        incoming: incoming_rx,
        reader,
        writer,
    })
}
