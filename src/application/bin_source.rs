// Source trait for the bin locations drawn on maps
use crate::domain::bin::BinRecord;
use async_trait::async_trait;

#[async_trait]
pub trait BinSource: Send + Sync {
    /// Current bin records, in display order
    async fn bin_locations(&self) -> anyhow::Result<Vec<BinRecord>>;
}
