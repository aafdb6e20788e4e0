//! In-memory reply queue for exercising `PendingRequest` without a broker.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::Stream;
use tokio::sync::mpsc;

use super::pending::ReplyDelivery;

pub type Journal = Arc<Mutex<Vec<String>>>;

pub struct MemoryDelivery {
    pub correlation_id: Option<String>,
    pub body: Vec<u8>,
    pub journal: Journal,
}

impl MemoryDelivery {
    pub fn new(journal: &Journal, correlation_id: Option<&str>, body: &[u8]) -> Self {
        Self {
            correlation_id: correlation_id.map(str::to_string),
            body: body.to_vec(),
            journal: journal.clone(),
        }
    }

    fn note(&self, action: &str) {
        self.journal.lock().unwrap().push(format!(
            "{action}:{}",
            self.correlation_id.as_deref().unwrap_or("-")
        ));
    }
}

#[async_trait]
impl ReplyDelivery for MemoryDelivery {
    fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    async fn accept(&self) -> anyhow::Result<()> {
        self.note("ack");
        Ok(())
    }

    async fn discard(&self) -> anyhow::Result<()> {
        self.note("reject");
        Ok(())
    }
}

pub fn memory_queue() -> (
    mpsc::UnboundedSender<MemoryDelivery>,
    impl Stream<Item = anyhow::Result<MemoryDelivery>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel::<MemoryDelivery>();
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|d| (Ok(d), rx))
    });
    (tx, stream)
}
