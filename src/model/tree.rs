//! Document tree types.

use super::{DocumentItem, ItemBody, Provenance, Table};
use serde::{Deserialize, Serialize};

/// An ordered document-item tree produced by an external parsing backend.
///
/// Items are stored in document order as recovered by layout analysis.
/// Tables additionally live in a side registry: some backends register a
/// table there without linking it into the body order (typically
/// headerless tables at the top of page 1), so the flattener reconciles
/// the registry against the traversal (see [`crate::chunker`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Document name (usually the source file stem)
    pub name: String,

    /// Items in document order
    items: Vec<DocumentItem>,

    /// Table registry; may contain tables absent from `items`
    tables: Vec<DocumentItem>,

    next_id: u64,
}

impl DocumentTree {
    /// Create a new empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            tables: Vec::new(),
            next_id: 0,
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("#/{}/{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a heading item.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u32) -> &mut DocumentItem {
        let id = self.fresh_id("headings");
        self.push(DocumentItem::new(
            id,
            ItemBody::Heading {
                text: text.into(),
                level,
            },
        ))
    }

    /// Add a document title (heading at level 0).
    pub fn add_title(&mut self, text: impl Into<String>) -> &mut DocumentItem {
        self.add_heading(text, 0)
    }

    /// Add a paragraph item.
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut DocumentItem {
        let id = self.fresh_id("texts");
        self.push(DocumentItem::new(id, ItemBody::Paragraph { text: text.into() }))
    }

    /// Add a list item.
    pub fn add_list_item(&mut self, text: impl Into<String>) -> &mut DocumentItem {
        let id = self.fresh_id("texts");
        self.push(DocumentItem::new(id, ItemBody::ListItem { text: text.into() }))
    }

    /// Add a code block.
    pub fn add_code(&mut self, text: impl Into<String>) -> &mut DocumentItem {
        let id = self.fresh_id("texts");
        self.push(DocumentItem::new(id, ItemBody::Code { text: text.into() }))
    }

    /// Add a table, linked into the body order and the table registry.
    pub fn add_table(&mut self, table: Table) -> &mut DocumentItem {
        let id = self.fresh_id("tables");
        let item = DocumentItem::new(id, ItemBody::Table(table));
        self.tables.push(item.clone());
        self.push(item)
    }

    /// Register a table only in the side registry, not in body order.
    ///
    /// Models backends whose layout analysis lost the reading-order
    /// position of a table; the flattener must reconcile it.
    pub fn register_table(&mut self, table: Table) -> &mut DocumentItem {
        let id = self.fresh_id("tables");
        self.tables.push(DocumentItem::new(id, ItemBody::Table(table)));
        self.tables.last_mut().unwrap()
    }

    /// Add a picture item.
    pub fn add_picture(&mut self, caption: Option<String>) -> &mut DocumentItem {
        let id = self.fresh_id("pictures");
        self.push(DocumentItem::new(id, ItemBody::Picture { caption }))
    }

    fn push(&mut self, item: DocumentItem) -> &mut DocumentItem {
        self.items.push(item);
        self.items.last_mut().unwrap()
    }

    /// Attach a provenance record to the most recently added item.
    pub fn set_prov(&mut self, prov: Provenance) {
        if let Some(item) = self.items.last_mut() {
            item.prov.push(prov);
        }
    }

    /// Iterate items in document order.
    pub fn iter_items(&self) -> impl Iterator<Item = &DocumentItem> {
        self.items.iter()
    }

    /// Tables in the side registry.
    pub fn registered_tables(&self) -> &[DocumentItem] {
        &self.tables
    }

    /// Number of items in body order.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the tree has no items at all (registry included).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    #[test]
    fn test_build_tree() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("Title");
        tree.add_paragraph("Body");
        tree.set_prov(Provenance::page(1));

        assert_eq!(tree.item_count(), 2);
        let items: Vec<_> = tree.iter_items().collect();
        assert!(items[0].is_heading());
        assert_eq!(items[1].first_page(), Some(1));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut tree = DocumentTree::new("doc");
        tree.add_paragraph("a");
        tree.add_paragraph("b");
        let ids: Vec<_> = tree.iter_items().map(|i| i.id.clone()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_registry_only_table() {
        let mut tree = DocumentTree::new("doc");
        tree.add_paragraph("text");
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["x"]));
        tree.register_table(table);

        assert_eq!(tree.item_count(), 1);
        assert_eq!(tree.registered_tables().len(), 1);
    }

    #[test]
    fn test_linked_table_in_both() {
        let mut tree = DocumentTree::new("doc");
        tree.add_table(Table::new());
        assert_eq!(tree.item_count(), 1);
        assert_eq!(tree.registered_tables().len(), 1);
        assert_eq!(
            tree.iter_items().next().unwrap().id,
            tree.registered_tables()[0].id
        );
    }
}
