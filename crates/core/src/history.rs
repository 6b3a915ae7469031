//! Most-recent-first record of successful generations for one session.
//!
//! Items are appended exactly once and never mutated or removed. There is no
//! cap: the ledger lives as long as the session.

use crate::image_processing::{GeneratedImage, SourceImage};
use chrono::{DateTime, Utc};

/// Style id recorded for generations made from a custom prompt.
pub const CUSTOM_STYLE_ID: &str = "custom";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Creation time in milliseconds since the epoch, as a string.
    pub id: String,
    pub original: SourceImage,
    pub result: GeneratedImage,
    /// Preset id, or [`CUSTOM_STYLE_ID`].
    pub style_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct HistoryLedger {
    items: Vec<HistoryItem>,
    last_id: Option<i64>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a generation at the given time and returns the new item's id.
    ///
    /// Ids derive from the timestamp; two items created in the same
    /// millisecond get consecutive ids.
    pub fn record(
        &mut self,
        original: SourceImage,
        result: GeneratedImage,
        style_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> String {
        let mut millis = created_at.timestamp_millis();
        if let Some(last) = self.last_id {
            if millis <= last {
                millis = last + 1;
            }
        }
        self.last_id = Some(millis);

        let id = millis.to_string();
        self.append(HistoryItem {
            id: id.clone(),
            original,
            result,
            style_id: style_id.into(),
            created_at,
        });
        id
    }

    /// Inserts at the front. Only [`HistoryLedger::record`] assigns ids.
    fn append(&mut self, item: HistoryItem) {
        self.items.insert(0, item);
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The stored (original, result) pair for an item.
    pub fn select(&self, id: &str) -> Option<(&SourceImage, &GeneratedImage)> {
        self.get(id).map(|item| (&item.original, &item.result))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
