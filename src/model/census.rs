//! Per-class pixel census.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pixel count per legend label.
///
/// Holds exactly one entry per legend label, in legend order, including
/// labels that matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassCensus {
    counts: IndexMap<String, u64>,
}

impl ClassCensus {
    /// Build from labels and their counts, paired positionally.
    pub(crate) fn from_counts<'a>(
        labels: impl IntoIterator<Item = &'a str>,
        counts: &[u64],
    ) -> Self {
        let counts = labels
            .into_iter()
            .zip(counts.iter().copied())
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        Self { counts }
    }

    /// Count for a label, or `None` if the label is not in the legend.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.counts.get(label).copied()
    }

    /// Iterate `(label, count)` pairs in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the census has no labels (empty legend).
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels with at least one matched pixel, in legend order.
    pub fn detected(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, _)| label)
            .collect()
    }

    /// Detected labels that also appear in `tracked`, in legend order.
    pub fn detected_among<S: AsRef<str>>(&self, tracked: &[S]) -> Vec<&str> {
        self.detected()
            .into_iter()
            .filter(|label| tracked.iter().any(|t| t.as_ref() == *label))
            .collect()
    }

    /// Total number of pixels that matched any label.
    pub fn total_matched(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
