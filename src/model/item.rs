//! Document item types.

use super::Table;
use serde::{Deserialize, Serialize};

/// A single item in a document tree.
///
/// Items are produced by an external parsing backend and consumed
/// read-only: the chunker never edits an item's text or provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentItem {
    /// Stable reference id, unique within the document
    pub id: String,

    /// Page/bounding-box provenance records
    pub prov: Vec<Provenance>,

    /// The typed content of the item
    pub body: ItemBody,
}

impl DocumentItem {
    /// Create a new item with the given id and body.
    pub fn new(id: impl Into<String>, body: ItemBody) -> Self {
        Self {
            id: id.into(),
            prov: Vec::new(),
            body,
        }
    }

    /// Attach a provenance record and return self.
    pub fn with_prov(mut self, prov: Provenance) -> Self {
        self.prov.push(prov);
        self
    }

    /// Plain-text rendering of the item.
    ///
    /// Tables render as markdown with a cell-text fallback; pictures
    /// render as their caption or an empty string. A malformed item with
    /// no text renders as empty text, never an error.
    pub fn text(&self) -> String {
        match &self.body {
            ItemBody::Heading { text, .. } => text.clone(),
            ItemBody::Paragraph { text } => text.clone(),
            ItemBody::ListItem { text } => text.clone(),
            ItemBody::Code { text } => text.clone(),
            ItemBody::Table(table) => table.render_text(),
            ItemBody::Picture { caption } => caption.clone().unwrap_or_default(),
        }
    }

    /// Check if this item is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.body, ItemBody::Heading { .. })
    }

    /// Check if this item is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self.body, ItemBody::ListItem { .. })
    }

    /// Check if this item is a table.
    pub fn is_table(&self) -> bool {
        matches!(self.body, ItemBody::Table(_))
    }

    /// Get the heading level (0 = document title) or None.
    pub fn heading_level(&self) -> Option<u32> {
        match self.body {
            ItemBody::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    /// First page this item appears on, if provenance is present.
    pub fn first_page(&self) -> Option<u32> {
        self.prov.iter().map(|p| p.page_no).min()
    }

    /// Last page this item appears on, if provenance is present.
    pub fn last_page(&self) -> Option<u32> {
        self.prov.iter().map(|p| p.page_no).max()
    }
}

/// The typed content of a document item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemBody {
    /// A section heading
    Heading {
        /// Heading text
        text: String,
        /// Heading level (0 = document title, 1 = top section, increasing = deeper)
        level: u32,
    },

    /// A paragraph of text
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// A single list item
    ListItem {
        /// List item text
        text: String,
    },

    /// A code block
    Code {
        /// Code text
        text: String,
    },

    /// A table
    Table(Table),

    /// A picture reference
    Picture {
        /// Caption or alternative text
        caption: Option<String>,
    },
}

/// Where an item appears in the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Page number (1-indexed)
    pub page_no: u32,

    /// Bounding box on the page, if layout analysis produced one
    pub bbox: Option<BoundingBox>,
}

impl Provenance {
    /// Create a provenance record without a bounding box.
    pub fn page(page_no: u32) -> Self {
        Self {
            page_no,
            bbox: None,
        }
    }

    /// Create a provenance record with a bounding box.
    pub fn new(page_no: u32, bbox: BoundingBox) -> Self {
        Self {
            page_no,
            bbox: Some(bbox),
        }
    }
}

/// An axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub l: f64,
    /// Top edge
    pub t: f64,
    /// Right edge
    pub r: f64,
    /// Bottom edge
    pub b: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(l: f64, t: f64, r: f64, b: f64) -> Self {
        Self { l, t, r, b }
    }
}
