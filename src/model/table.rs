//! Table types.

use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Table caption
    pub caption: Option<String>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            caption: None,
        }
    }

    /// Create a table with header rows.
    pub fn with_header(header_rows: u8) -> Self {
        Self {
            header_rows,
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..n]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[n..]
    }

    /// Render the table as markdown.
    ///
    /// Produces a pipe table with a separator line after the header
    /// (or after the first row when no header is declared).
    pub fn to_markdown(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let width = self
            .rows
            .iter()
            .map(|r| r.cells.len())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return String::new();
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let separator_after = (self.header_rows as usize).max(1).min(self.rows.len());

        for (i, row) in self.rows.iter().enumerate() {
            lines.push(row.to_markdown(width));
            if i + 1 == separator_after {
                let sep: Vec<&str> = (0..width).map(|_| "---").collect();
                lines.push(format!("| {} |", sep.join(" | ")));
            }
        }

        lines.join("\n")
    }

    /// Check if rows have inconsistent cell counts.
    pub fn is_ragged(&self) -> bool {
        let mut counts = self.rows.iter().map(|r| r.cells.len());
        match counts.next() {
            Some(first) => counts.any(|c| c != first),
            None => false,
        }
    }

    /// Render the table as plain text, falling back to cell text.
    ///
    /// Uses the markdown rendering when the table has a consistent grid;
    /// ragged tables (uneven cell counts from imperfect layout analysis)
    /// fall back to joining the non-empty cell texts with spaces, and
    /// finally to the caption.
    pub fn render_text(&self) -> String {
        if !self.is_ragged() {
            let markdown = self.to_markdown();
            if !markdown.trim().is_empty() {
                return markdown;
            }
        }

        let cell_texts: Vec<String> = self
            .rows
            .iter()
            .flat_map(|r| &r.cells)
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();
        if !cell_texts.is_empty() {
            return cell_texts.join(" ");
        }

        self.caption.clone().unwrap_or_default()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Render the row as a markdown table line padded to `width` columns.
    fn to_markdown(&self, width: usize) -> String {
        let mut cells: Vec<String> = self
            .cells
            .iter()
            .map(|c| c.text.replace('|', "\\|").replace('\n', " "))
            .collect();
        cells.resize(width, String::new());
        format!("| {} |", cells.join(" | "))
    }
}

/// A table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
