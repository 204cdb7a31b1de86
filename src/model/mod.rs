//! Document model types for chunking input and output.
//!
//! This module defines the intermediate representation (IR) that bridges
//! external parsing backends and the chunker. The model is format-agnostic
//! and can represent content from any office document (PDF, DOCX, PPTX,
//! images run through OCR).

mod chunk;
mod headers;
mod item;
mod table;
mod tree;

pub use chunk::Chunk;
pub use headers::HeaderSnapshot;
pub use item::{BoundingBox, DocumentItem, ItemBody, Provenance};
pub use table::{Table, TableCell, TableRow};
pub use tree::DocumentTree;
