use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{SinkError, StreamFailure};
use crate::types::Row;

/// Destination for a streamed query.
#[async_trait]
pub trait RowSink: Send {
    async fn write(&mut self, row: Row) -> Result<(), SinkError>;

    /// Called with the source stream's error before the query resolves as failed.
    async fn fail(&mut self, error: &StreamFailure);

    /// Called once the source is exhausted. Resolves the query.
    async fn end(&mut self) -> Result<(), SinkError>;
}

/// Item delivered through a `ChannelSink`.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Row(Row),
    Error(StreamFailure),
    End,
}

/// Forwards streamed rows into a tokio channel.
/// A dropped receiver makes the next write fail.
pub struct ChannelSink {
    tx: mpsc::Sender<StreamEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<StreamEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver draining it.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<StreamEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl RowSink for ChannelSink {
    async fn write(&mut self, row: Row) -> Result<(), SinkError> {
        self.tx
            .send(StreamEvent::Row(row))
            .await
            .map_err(|_| SinkError::new("stream receiver was dropped"))
    }

    async fn fail(&mut self, error: &StreamFailure) {
        // Observers may already be gone.
        let _ = self.tx.send(StreamEvent::Error(error.clone())).await;
    }

    async fn end(&mut self) -> Result<(), SinkError> {
        self.tx
            .send(StreamEvent::End)
            .await
            .map_err(|_| SinkError::new("stream receiver was dropped"))
    }
}
