//! Recently viewed archive items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ArchiveItem;

/// An archive item the reader opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    pub title: String,
    pub path: String,
    /// When the item was opened, stored as Unix milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Newest-first list of opened items, unique by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentlyViewed {
    items: Vec<RecentItem>,
}

impl RecentlyViewed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item at the front, dropping any older entry with the same
    /// path and anything beyond `limit`.
    pub fn record(&mut self, item: &ArchiveItem, at: DateTime<Utc>, limit: usize) {
        self.items.retain(|i| i.path != item.path);
        self.items.insert(
            0,
            RecentItem {
                title: item.title.clone(),
                path: item.path.clone(),
                timestamp: at,
            },
        );
        self.items.truncate(limit);
    }

    /// The first `count` items for display.
    pub fn display(&self, count: usize) -> &[RecentItem] {
        &self.items[..count.min(self.items.len())]
    }

    pub fn items(&self) -> &[RecentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(n: usize) -> ArchiveItem {
        ArchiveItem {
            title: format!("Problem {n}"),
            path: format!("/archive/physics/{n}"),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_newest_first_and_dedup() {
        let mut recent = RecentlyViewed::new();
        recent.record(&item(1), at(1), 10);
        recent.record(&item(2), at(2), 10);
        recent.record(&item(1), at(3), 10);

        let paths: Vec<_> = recent.items().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/archive/physics/1", "/archive/physics/2"]);
        assert_eq!(recent.items()[0].timestamp, at(3));
    }

    #[test]
    fn test_limit_and_display() {
        let mut recent = RecentlyViewed::new();
        for n in 0..15 {
            recent.record(&item(n), at(n as i64), 10);
        }
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.items()[0].title, "Problem 14");
        assert_eq!(recent.display(5).len(), 5);
        assert_eq!(recent.display(5)[4].title, "Problem 10");

        assert!(RecentlyViewed::new().display(5).is_empty());
    }

    #[test]
    fn test_serializes_as_plain_list_with_millis() {
        let mut recent = RecentlyViewed::new();
        recent.record(&item(7), at(2), 10);
        let value = serde_json::to_value(&recent).unwrap();
        assert_eq!(value[0]["timestamp"], 2000);
        assert_eq!(value[0]["path"], "/archive/physics/7");

        let back: RecentlyViewed = serde_json::from_value(value).unwrap();
        assert_eq!(back, recent);
    }
}
