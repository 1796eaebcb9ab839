//! Site-wide portal statistics

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::payload;

/// Aggregate counters over every stored portal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_views: i64,
    pub total_portals: usize,
    pub categories: BTreeMap<String, usize>,
}

impl GlobalStats {
    /// Build stats from `(views, payload)` pairs
    ///
    /// Negative view counts are ignored. Portals are grouped by their
    /// celebration type, with untyped portals counted as `general`.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a Value)>,
    {
        let mut stats = GlobalStats::default();

        for (views, payload) in rows {
            stats.total_views += views.max(0);
            stats.total_portals += 1;
            *stats
                .categories
                .entry(payload::celebration_type(payload))
                .or_insert(0) += 1;
        }

        stats
    }

    /// Categories ordered by portal count, most popular first
    pub fn categories_by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self
            .categories
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
