//! Notebook documents and metadata promotion.
//!
//! - **document**: the cell-based JSON model
//! - **header**: fast-path extraction of the metadata-bearing region
//! - **meta**: header decoding, record merging, and the templating gate

pub mod document;
pub mod header;
pub mod meta;

pub use document::Notebook;
pub use meta::MetadataRecord;
