// Bin board - The displayed bin records, shared by maps, search and the live loop
use crate::application::bin_source::BinSource;
use crate::domain::bin::BinRecord;
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct BinBoard {
    bins: Mutex<Vec<BinRecord>>,
}

impl BinBoard {
    pub fn new(bins: Vec<BinRecord>) -> Self {
        Self {
            bins: Mutex::new(bins),
        }
    }

    pub fn snapshot(&self) -> Vec<BinRecord> {
        self.bins.lock().clone()
    }

    /// Mutate the records in place under the board lock
    pub fn update<R>(&self, f: impl FnOnce(&mut [BinRecord]) -> R) -> R {
        f(&mut self.bins.lock())
    }

    /// Case-insensitive match against each row's visible text; blank terms match everything
    pub fn search(&self, term: &str) -> Vec<BinRecord> {
        let term = term.trim().to_lowercase();
        self.bins
            .lock()
            .iter()
            .filter(|bin| term.is_empty() || bin.row_text().to_lowercase().contains(&term))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BinSource for BinBoard {
    async fn bin_locations(&self) -> anyhow::Result<Vec<BinRecord>> {
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bin::Coordinate;

    fn board() -> BinBoard {
        BinBoard::new(vec![
            BinRecord::new(
                "BIN-001".to_string(),
                Coordinate::new(40.7128, -74.0060),
                Some("123 Green Street".to_string()),
                75.0,
            ),
            BinRecord::new(
                "BIN-002".to_string(),
                Coordinate::new(40.7218, -74.0100),
                Some("9 Harbor Lane".to_string()),
                40.0,
            ),
            BinRecord::new(
                "BIN-003".to_string(),
                Coordinate::new(40.7058, -74.0160),
                None,
                95.0,
            ),
        ])
    }

    fn ids(bins: Vec<BinRecord>) -> Vec<String> {
        bins.into_iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let board = board();
        assert_eq!(ids(board.search("green")), vec!["BIN-001"]);
        assert_eq!(ids(board.search("bin-00")).len(), 3);
    }

    #[test]
    fn test_search_matches_status_labels() {
        let board = board();
        assert_eq!(ids(board.search("nearly full")), vec!["BIN-001"]);
        assert_eq!(ids(board.search("ok")), vec!["BIN-002"]);
        assert_eq!(ids(board.search("95%")), vec!["BIN-003"]);
    }

    #[test]
    fn test_blank_search_keeps_all_rows() {
        assert_eq!(board().search("  ").len(), 3);
    }

    #[tokio::test]
    async fn test_bin_source_reflects_updates() {
        let board = board();
        board.update(|bins| {
            bins[1].apply_perturbation(50.0);
        });
        let bins = board.bin_locations().await.unwrap();
        assert_eq!(bins[1].fill_percent(), 90.0);
    }
}
