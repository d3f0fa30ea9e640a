// Display feed - Fans live fill updates out to every connected client
use crate::application::live_update::{DisplaySink, FillUpdate};
use tokio::sync::broadcast;

const FEED_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct DisplayFeed {
    tx: broadcast::Sender<FillUpdate>,
}

impl DisplayFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FillUpdate> {
        self.tx.subscribe()
    }
}

impl Default for DisplayFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for DisplayFeed {
    fn publish(&self, update: FillUpdate) {
        // No subscribers is fine, nobody is looking at the table
        let _ = self.tx.send(update);
    }
}
