//! Notebook document model.
//!
//! A notebook is a JSON document with a top-level `cells` array. Each cell
//! carries a type discriminator and a `source` made of string fragments that
//! concatenate into the cell's text. The first cell is reserved for page
//! metadata: it is never rendered, and its source is the only input to
//! metadata promotion.
//!
//! All fields this tool does not interpret are preserved through
//! `#[serde(flatten)]`, so a document survives a parse/serialize round trip
//! intact for the external renderer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed notebook document. Cell order is preserved end-to-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,

    /// Top-level fields we don't interpret (nbformat, metadata, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One ordered unit within a notebook document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Kind discriminator (`markdown`, `code`, ...).
    #[serde(default)]
    pub cell_type: String,

    /// Text fragments meant to be concatenated.
    #[serde(default)]
    pub source: Vec<String>,

    /// Per-cell fields we don't interpret (outputs, execution_count, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// Parse a notebook from raw JSON content.
    pub fn from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Content is not a notebook document")
    }

    /// Concatenated source of the reserved header cell, if any.
    pub fn header_source(&self) -> Option<String> {
        self.cells.first().map(|cell| cell.source.concat())
    }

    /// Remove the reserved header cell. The remaining cells keep their order.
    ///
    /// A no-op on documents with no cells.
    pub fn strip_header(&mut self) {
        if !self.cells.is_empty() {
            self.cells.remove(0);
        }
    }

    /// Serialize back to JSON for the external renderer.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize notebook document")
    }
}
