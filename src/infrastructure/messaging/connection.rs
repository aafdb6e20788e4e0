use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use lapin::{Channel, Connection, ConnectionProperties};
use tokio::sync::Mutex;

/// Owns the process-wide broker connection.
///
/// Nothing connects until the first channel is requested; a dropped
/// connection is replaced on the next request. Connecting is bounded by
/// `connect_timeout` and happens outside the lock, so a stalled broker never
/// queues other callers behind it. Callers get a fresh channel each time and
/// are responsible for closing it.
pub struct AmqpConnectionManager {
    url: String,
    connect_timeout: Duration,
    connection: Mutex<Option<Arc<Connection>>>,
}

impl AmqpConnectionManager {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
            connection: Mutex::new(None),
        }
    }

    pub async fn open_channel(&self) -> anyhow::Result<Channel> {
        let conn = self.connection().await?;
        tokio::time::timeout(self.connect_timeout, conn.create_channel())
            .await
            .map_err(|_| anyhow!("amqp_create_channel timed out after {:?}", self.connect_timeout))?
            .context("amqp_create_channel")
    }

    async fn connection(&self) -> anyhow::Result<Arc<Connection>> {
        if let Some(conn) = self.live().await {
            return Ok(conn);
        }

        let conn = tokio::time::timeout(
            self.connect_timeout,
            Connection::connect(&self.url, ConnectionProperties::default()),
        )
        .await
        .map_err(|_| anyhow!("amqp_connect timed out after {:?}", self.connect_timeout))?
        .context("amqp_connect")?;
        let conn = Arc::new(conn);

        let mut guard = self.connection.lock().await;
        if let Some(existing) = guard.as_ref().filter(|c| c.status().connected()) {
            // another caller reconnected first
            let existing = existing.clone();
            drop(guard);
            if let Err(err) = conn.close(200, "superseded").await {
                tracing::debug!(error = ?err, "amqp_close_superseded_failed");
            }
            return Ok(existing);
        }
        tracing::info!("amqp_connected");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    async fn live(&self) -> Option<Arc<Connection>> {
        let guard = self.connection.lock().await;
        let conn = guard.as_ref()?;
        if conn.status().connected() {
            return Some(conn.clone());
        }
        tracing::warn!("amqp_connection_lost_reconnecting");
        None
    }

    pub async fn close(&self) {
        let conn = self.connection.lock().await.take();
        if let Some(conn) = conn {
            if let Err(err) = conn.close(200, "shutdown").await {
                tracing::warn!(error = ?err, "amqp_close_failed");
            }
        }
    }
}
