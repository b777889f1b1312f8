//! Legend and census JSON files.

use std::path::Path;

use crate::error::Result;
use crate::model::{ClassCensus, Legend};

/// Read a legend file of `"label": [r, g, b]` entries.
pub fn read_legend(path: &Path) -> Result<Legend> {
    let json = std::fs::read_to_string(path)?;
    let legend = Legend::from_json(&json)?;
    log::debug!("Read {} legend entries from {:?}", legend.len(), path);
    Ok(legend)
}

/// Write a census as a JSON object.
pub fn write_census(census: &ClassCensus, path: &Path) -> Result<()> {
    std::fs::write(path, census.to_json()?)?;
    log::debug!("Wrote census of {} classes to {:?}", census.len(), path);
    Ok(())
}
