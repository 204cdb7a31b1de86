//! Chunk materialization.

use crate::model::{BoundingBox, Chunk, DocumentItem, ItemBody, Provenance};

use super::flatten::FlatItem;
use super::section::Section;
use super::ChunkOptions;

/// Build a chunk from a run of accumulated sections.
pub fn build_chunk(sections: &[Section], options: &ChunkOptions) -> Chunk {
    let text = sections
        .iter()
        .map(|s| s.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(&options.delimiter);

    let items: Vec<&FlatItem> = sections.iter().flat_map(|s| &s.items).collect();

    Chunk {
        source_items: items.iter().map(|f| f.item.clone()).collect(),
        text,
        used_headers: collect_used_headers(&items),
        page_range: page_range(items.iter().map(|f| &f.item)),
    }
}

/// Build a chunk for one piece of an oversized section's split text.
///
/// All pieces share the parent section's items and header context: the
/// text is split, not the items.
pub fn build_split_chunk(section: &Section, text: String) -> Chunk {
    let items: Vec<&FlatItem> = section.items.iter().collect();
    Chunk {
        source_items: section.items.iter().map(|f| f.item.clone()).collect(),
        text,
        used_headers: collect_used_headers(&items),
        page_range: page_range(section.items.iter().map(|f| &f.item)),
    }
}

/// Headers used across the given items, deduplicated in first-seen
/// order, level-sorted within each snapshot.
fn collect_used_headers(items: &[&FlatItem]) -> Vec<String> {
    let mut used: Vec<String> = Vec::new();
    for flat_item in items {
        for text in flat_item.headers.texts() {
            if !text.is_empty() && !used.iter().any(|u| u == text) {
                used.push(text.to_string());
            }
        }
    }
    used
}

/// First and last page across the items' provenance records.
fn page_range<'a>(items: impl Iterator<Item = &'a DocumentItem>) -> Option<(u32, u32)> {
    let mut first: Option<u32> = None;
    let mut last: Option<u32> = None;
    for item in items {
        if let Some(page) = item.first_page() {
            first = Some(first.map_or(page, |f| f.min(page)));
        }
        if let Some(page) = item.last_page() {
            last = Some(last.map_or(page, |l| l.max(page)));
        }
    }
    match (first, last) {
        (Some(f), Some(l)) => Some((f, l)),
        _ => None,
    }
}

/// Synthesize the single placeholder chunk for a document with no
/// usable content, so downstream consumers always receive at least one
/// chunk.
pub fn placeholder_chunk() -> Chunk {
    let item = DocumentItem::new(
        "#/texts/placeholder",
        ItemBody::Paragraph { text: ".".into() },
    )
    .with_prov(Provenance::new(1, BoundingBox::new(0.0, 0.0, 1.0, 1.0)));

    Chunk {
        source_items: vec![item],
        text: ".".into(),
        used_headers: Vec::new(),
        page_range: Some((1, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::flatten::flatten;
    use crate::chunker::section::segment;
    use crate::model::{DocumentTree, Provenance};

    #[test]
    fn test_placeholder_chunk() {
        let chunk = placeholder_chunk();
        assert_eq!(chunk.text, ".");
        assert_eq!(chunk.source_items.len(), 1);
        assert_eq!(chunk.page_range, Some((1, 1)));
    }

    #[test]
    fn test_used_headers_dedup_first_seen() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("Policy");
        tree.add_paragraph("intro");
        tree.add_heading("Scope", 1);
        tree.add_paragraph("details");

        let options = ChunkOptions::new(512);
        let sections = segment(flatten(&tree, &options), &options);
        let chunk = build_chunk(&sections, &options);
        assert_eq!(chunk.used_headers, vec!["Policy", "Scope"]);
    }

    #[test]
    fn test_page_range_spans_sections() {
        let mut tree = DocumentTree::new("doc");
        tree.add_paragraph("a");
        tree.set_prov(Provenance::page(2));
        tree.add_paragraph("b");
        tree.set_prov(Provenance::page(5));

        let options = ChunkOptions::new(512);
        let sections = segment(flatten(&tree, &options), &options);
        let chunk = build_chunk(&sections, &options);
        assert_eq!(chunk.page_range, Some((2, 5)));
    }

    #[test]
    fn test_no_prov_no_page_range() {
        let mut tree = DocumentTree::new("doc");
        tree.add_paragraph("a");

        let options = ChunkOptions::new(512);
        let sections = segment(flatten(&tree, &options), &options);
        let chunk = build_chunk(&sections, &options);
        assert_eq!(chunk.page_range, None);
    }
}
