//! Legend data model: class label to the exact color the classifier paints it with.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Color;
use crate::error::Result;

/// Mapping from class label to legend color.
///
/// Labels are unique. Iteration follows insertion order (or document order
/// when deserialized), which is the order every downstream pass uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Legend {
    entries: IndexMap<String, Color>,
}

impl Legend {
    /// Create an empty legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, returning the legend for chaining.
    pub fn with(mut self, label: impl Into<String>, color: impl Into<Color>) -> Self {
        self.insert(label, color);
        self
    }

    /// Insert or replace an entry, returning the previous color for the label.
    pub fn insert(&mut self, label: impl Into<String>, color: impl Into<Color>) -> Option<Color> {
        self.entries.insert(label.into(), color.into())
    }

    /// Color assigned to a label.
    pub fn color_of(&self, label: &str) -> Option<Color> {
        self.entries.get(label).copied()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the legend has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(label, color)` pairs in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.entries.iter().map(|(label, color)| (label.as_str(), *color))
    }

    /// Iterate labels in legend order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Parse a legend from a JSON object of `"label": [r, g, b]` entries.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<L, C> FromIterator<(L, C)> for Legend
where
    L: Into<String>,
    C: Into<Color>,
{
    fn from_iter<I: IntoIterator<Item = (L, C)>>(iter: I) -> Self {
        let mut legend = Self::new();
        for (label, color) in iter {
            legend.insert(label, color);
        }
        legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_document_order() {
        let legend = Legend::from_json(r#"{"zebra": [1, 1, 1], "ant": [2, 2, 2], "moth": [3, 3, 3]}"#)
            .unwrap();
        let labels: Vec<&str> = legend.labels().collect();
        assert_eq!(labels, vec!["zebra", "ant", "moth"]);
    }

    #[test]
    fn test_insert_replaces_color() {
        let mut legend = Legend::new().with("dog", [0, 128, 0]);
        let previous = legend.insert("dog", [1, 2, 3]);
        assert_eq!(previous, Some(Color::new(0, 128, 0)));
        assert_eq!(legend.len(), 1);
        assert_eq!(legend.color_of("dog"), Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn test_json_shape() {
        let legend = Legend::new().with("dog", [0, 128, 0]).with("cat", [128, 0, 0]);
        let value: serde_json::Value = serde_json::from_str(&legend.to_json().unwrap()).unwrap();
        assert_eq!(value["dog"], serde_json::json!([0, 128, 0]));
        assert_eq!(value["cat"], serde_json::json!([128, 0, 0]));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Legend::from_json(r#"{"dog": [0, 128]}"#).is_err());
        assert!(Legend::from_json("[]").is_err());
    }
}
