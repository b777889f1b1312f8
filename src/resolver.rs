//! Exact color to label lookup built once per legend.
//!
//! The resolver indexes the legend by color so each pixel is classified
//! with a single hash lookup instead of a scan over every legend entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CensusError, Result};
use crate::model::{Color, Legend};

/// What to do when two legend labels share one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with a configuration error
    #[default]
    Reject,
    /// The earliest label in legend order claims the color; later labels
    /// keep their census entry but never match
    FirstSeenWins,
}

/// Pre-indexed legend lookup.
#[derive(Debug, Clone)]
pub struct LegendResolver {
    labels: Vec<String>,
    colors: Vec<Color>,
    index: HashMap<Color, usize>,
}

impl LegendResolver {
    /// Index a legend, rejecting duplicate colors.
    pub fn new(legend: &Legend) -> Result<Self> {
        Self::with_policy(legend, DuplicatePolicy::Reject)
    }

    /// Index a legend with an explicit duplicate-color policy.
    pub fn with_policy(legend: &Legend, policy: DuplicatePolicy) -> Result<Self> {
        let mut labels = Vec::with_capacity(legend.len());
        let mut colors = Vec::with_capacity(legend.len());
        let mut index = HashMap::with_capacity(legend.len());

        for (class, (label, color)) in legend.iter().enumerate() {
            if let Some(&owner) = index.get(&color) {
                let owner: &String = &labels[owner];
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(CensusError::configuration(format!(
                            "labels '{}' and '{}' share color {}",
                            owner, label, color
                        )));
                    }
                    DuplicatePolicy::FirstSeenWins => {
                        log::warn!(
                            "Legend color {} of '{}' already belongs to '{}', '{}' will never match",
                            color,
                            label,
                            owner,
                            label
                        );
                    }
                }
            } else {
                index.insert(color, class);
            }
            labels.push(label.to_string());
            colors.push(color);
        }

        log::trace!(
            "Indexed legend: {} labels, {} distinct colors",
            labels.len(),
            index.len()
        );

        Ok(Self {
            labels,
            colors,
            index,
        })
    }

    /// Label painted with exactly this color, if any.
    pub fn label_for(&self, color: Color) -> Option<&str> {
        self.class_of(color).map(|class| self.labels[class].as_str())
    }

    /// Position of the matching label in legend order.
    #[inline]
    pub fn class_of(&self, color: Color) -> Option<usize> {
        self.index.get(&color).copied()
    }

    /// Legend color at a legend position.
    #[inline]
    pub fn color(&self, class: usize) -> Color {
        self.colors[class]
    }

    /// Iterate labels in legend order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Number of labels, duplicates included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the legend was empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
