//! Tree flattening.
//!
//! Walks the document tree in document order, maintaining the active
//! heading stack, and emits a flat list of items paired with copied
//! header snapshots. Also reconciles tables that only exist in the side
//! registry, so imperfect upstream ordering cannot lose content.

use std::collections::HashSet;

use crate::model::{DocumentItem, DocumentTree, HeaderSnapshot, ItemBody};

use super::ChunkOptions;

/// An item paired with the headings active at its position.
#[derive(Debug, Clone)]
pub struct FlatItem {
    /// The document item (cloned, read-only)
    pub item: DocumentItem,

    /// Snapshot of the heading stack at this item
    pub headers: HeaderSnapshot,
}

/// Flatten a document tree into `(item, header_snapshot)` pairs.
///
/// Headings update the running stack before taking their own snapshot,
/// so a heading's snapshot includes itself and its ancestors. With
/// `merge_list_items` enabled, consecutive list items collapse into one
/// pseudo-item (their texts joined by the delimiter); the default is off
/// because a merged pseudo-item can no longer be split back apart by the
/// token budget without duplicating items.
pub fn flatten(tree: &DocumentTree, options: &ChunkOptions) -> Vec<FlatItem> {
    let mut flat: Vec<FlatItem> = Vec::with_capacity(tree.item_count());
    let mut current = HeaderSnapshot::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut list_buffer: Vec<DocumentItem> = Vec::new();

    for item in tree.iter_items() {
        visited.insert(item.id.clone());

        if options.merge_list_items {
            if item.is_list_item() {
                list_buffer.push(item.clone());
                continue;
            }
            flush_list_buffer(&mut list_buffer, &current, options, &mut flat);
        }

        if let ItemBody::Heading { text, level } = &item.body {
            current.observe(*level, text.clone());
        }
        flat.push(FlatItem {
            item: item.clone(),
            headers: current.clone(),
        });
    }

    flush_list_buffer(&mut list_buffer, &current, options, &mut flat);

    reconcile_tables(tree, &visited, &mut flat);

    flat
}

/// Emit buffered consecutive list items as one merged pseudo-item.
fn flush_list_buffer(
    buffer: &mut Vec<DocumentItem>,
    current: &HeaderSnapshot,
    options: &ChunkOptions,
    flat: &mut Vec<FlatItem>,
) {
    if buffer.is_empty() {
        return;
    }

    let merged_text = buffer
        .iter()
        .map(|i| i.text())
        .collect::<Vec<_>>()
        .join(&options.delimiter);
    let mut merged = DocumentItem::new(
        buffer[0].id.clone(),
        ItemBody::ListItem { text: merged_text },
    );
    merged.prov = buffer.iter().flat_map(|i| i.prov.clone()).collect();

    flat.push(FlatItem {
        item: merged,
        headers: current.clone(),
    });
    buffer.clear();
}

/// Append registry tables the primary traversal never visited.
///
/// Such tables lost their reading-order position upstream. They get an
/// empty header snapshot and are inserted by provenance page order:
/// before the first flattened item that starts on a later page. A table
/// with no provenance is placed at the front, matching the common case
/// of a headerless table at the top of page 1.
fn reconcile_tables(tree: &DocumentTree, visited: &HashSet<String>, flat: &mut Vec<FlatItem>) {
    for table in tree.registered_tables() {
        if visited.contains(&table.id) {
            continue;
        }

        log::debug!("reconciling registry-only table {}", table.id);
        let position = match table.first_page() {
            Some(page) => flat
                .iter()
                .position(|f| matches!(f.item.first_page(), Some(p) if p > page))
                .unwrap_or(flat.len()),
            None => 0,
        };
        flat.insert(
            position,
            FlatItem {
                item: table.clone(),
                headers: HeaderSnapshot::new(),
            },
        );
    }
}
