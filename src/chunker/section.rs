//! Section segmentation and orphan-heading merging.

use super::flatten::FlatItem;
use super::ChunkOptions;

/// Rendered text length under which a lone heading counts as a bare
/// label rather than a heading that already absorbed a paragraph.
const ORPHAN_TEXT_LIMIT: usize = 30;

/// A contiguous run of items bounded by heading boundaries.
#[derive(Debug, Clone)]
pub struct Section {
    /// Items in the section, with their header snapshots
    pub items: Vec<FlatItem>,

    /// Rendered section text (heading path line plus body)
    pub text: String,

    /// The heading path line prefixing `text`, if the section starts
    /// with a heading
    pub heading_line: Option<String>,

    /// Section body text without the heading path line
    pub body_text: String,
}

impl Section {
    /// Render a section from its items.
    ///
    /// When the section introduces a heading, the full active heading
    /// path (title first, joined `", "`) becomes the first line, and the
    /// heading item's own text is not repeated in the body. Empty item
    /// renderings (e.g. uncaptioned pictures) are skipped in the text
    /// but kept in `items`.
    fn render(items: Vec<FlatItem>, options: &ChunkOptions) -> Self {
        let heading_line = items
            .first()
            .filter(|f| f.item.is_heading())
            .map(|f| f.headers.path_line());

        let body_start = usize::from(heading_line.is_some());
        let body_text = items[body_start..]
            .iter()
            .map(|f| f.item.text())
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join(&options.delimiter);

        let text = match &heading_line {
            Some(line) if !body_text.is_empty() => {
                format!("{}{}{}", line, options.delimiter, body_text)
            }
            Some(line) => line.clone(),
            None => body_text.clone(),
        };

        Self {
            items,
            text,
            heading_line,
            body_text,
        }
    }

    /// Heading level at the section's first item, i.e. the deepest level
    /// in its first snapshot. None when no heading is active there.
    pub fn first_level(&self) -> Option<u32> {
        self.items.first().and_then(|f| f.headers.deepest_level())
    }

    /// Deepest heading level active anywhere in the section.
    pub fn deepest_level(&self) -> Option<u32> {
        self.items
            .iter()
            .filter_map(|f| f.headers.deepest_level())
            .max()
    }

    /// Check if this is a lone short heading with no body of its own.
    fn is_orphan_heading(&self) -> bool {
        if self.items.len() != 1 || !self.items[0].item.is_heading() {
            return false;
        }
        self.items[0].item.text().chars().count() <= ORPHAN_TEXT_LIMIT
    }
}

/// Cut the flattened sequence into sections at heading boundaries.
///
/// A leading run of non-heading items forms an implicit section without
/// a heading.
pub fn segment(flat: Vec<FlatItem>, options: &ChunkOptions) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Vec<FlatItem> = Vec::new();

    for flat_item in flat {
        if flat_item.item.is_heading() && !current.is_empty() {
            sections.push(Section::render(current, options));
            current = Vec::new();
        }
        current.push(flat_item);
    }
    if !current.is_empty() {
        sections.push(Section::render(current, options));
    }

    sections
}

/// Fold orphan headings into the following section.
///
/// Scans backward so chained orphans collapse in one pass. An orphan is
/// kept separate only when the next section opens with a strictly
/// shallower heading: merging there would nest a higher-level section
/// under a label that does not own it.
pub fn merge_orphans(mut sections: Vec<Section>, options: &ChunkOptions) -> Vec<Section> {
    if sections.len() < 2 {
        return sections;
    }

    for i in (0..sections.len() - 1).rev() {
        if !sections[i].is_orphan_heading() {
            continue;
        }

        let current_level = sections[i].deepest_level();
        let next_level = sections[i + 1].first_level();
        if let (Some(next), Some(current)) = (next_level, current_level) {
            if next < current {
                continue;
            }
        }

        let next = sections.remove(i + 1);
        let orphan = &mut sections[i];
        orphan.text = format!("{}{}{}", orphan.text, options.delimiter, next.text);
        orphan.body_text = if orphan.body_text.is_empty() {
            next.text
        } else {
            format!("{}{}{}", orphan.body_text, options.delimiter, next.text)
        };
        orphan.items.extend(next.items);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::flatten::flatten;
    use crate::model::DocumentTree;

    fn options() -> ChunkOptions {
        ChunkOptions::new(512)
    }

    fn sections_for(tree: &DocumentTree) -> Vec<Section> {
        let opts = options();
        segment(flatten(tree, &opts), &opts)
    }

    #[test]
    fn test_segment_at_headings() {
        let mut tree = DocumentTree::new("doc");
        tree.add_heading("A", 1);
        tree.add_paragraph("a body");
        tree.add_heading("B", 1);
        tree.add_paragraph("b body");

        let sections = sections_for(&tree);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, "A\na body");
        assert_eq!(sections[1].text, "B\nb body");
    }

    #[test]
    fn test_implicit_leading_section() {
        let mut tree = DocumentTree::new("doc");
        tree.add_paragraph("preamble");
        tree.add_heading("A", 1);
        tree.add_paragraph("a body");

        let sections = sections_for(&tree);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading_line, None);
        assert_eq!(sections[0].text, "preamble");
        assert_eq!(sections[0].first_level(), None);
    }

    #[test]
    fn test_heading_path_in_text() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("Policy");
        tree.add_paragraph("intro");
        tree.add_heading("Scope", 1);
        tree.add_paragraph("details");

        let sections = sections_for(&tree);
        assert_eq!(sections[1].text, "Policy, Scope\ndetails");
    }

    #[test]
    fn test_orphan_merges_into_deeper_next() {
        // "Policy" is a lone short title; the next section opens at
        // level 1 (not shallower), so the orphan folds forward.
        let mut tree = DocumentTree::new("doc");
        tree.add_title("Policy");
        tree.add_heading("Scope", 1);
        tree.add_paragraph("details");

        let opts = options();
        let sections = merge_orphans(sections_for(&tree), &opts);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items.len(), 3);
        assert_eq!(sections[0].text, "Policy\nPolicy, Scope\ndetails");
    }

    #[test]
    fn test_orphan_kept_before_shallower_next() {
        // A deep orphan heading followed by a shallower section must not
        // absorb it.
        let mut tree = DocumentTree::new("doc");
        tree.add_heading("A", 1);
        tree.add_paragraph("a body");
        tree.add_heading("A.1", 2);
        tree.add_heading("B", 1);
        tree.add_paragraph("b body");

        let opts = options();
        let sections = merge_orphans(sections_for(&tree), &opts);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].items.len(), 1);
    }

    #[test]
    fn test_chained_orphans_fold_once() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("T");
        tree.add_heading("A", 1);
        tree.add_heading("A.1", 2);
        tree.add_paragraph("body");

        let opts = options();
        let sections = merge_orphans(sections_for(&tree), &opts);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items.len(), 4);
    }

    #[test]
    fn test_long_heading_not_orphan() {
        let mut tree = DocumentTree::new("doc");
        tree.add_heading("A heading that is long enough to read as a full sentence", 1);
        tree.add_heading("Next", 1);
        tree.add_paragraph("body");

        let opts = options();
        let sections = merge_orphans(sections_for(&tree), &opts);
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_orphan_merge_idempotent() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("T");
        tree.add_heading("A", 1);
        tree.add_heading("A.1", 2);
        tree.add_paragraph("body");
        tree.add_heading("B", 1);
        tree.add_paragraph("b body");

        let opts = options();
        let once = merge_orphans(sections_for(&tree), &opts);
        let twice = merge_orphans(once.clone(), &opts);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.items.len(), b.items.len());
        }
    }

    #[test]
    fn test_last_section_never_orphan_merged() {
        let mut tree = DocumentTree::new("doc");
        tree.add_paragraph("body");
        tree.add_heading("Trailing", 1);

        let opts = options();
        let sections = merge_orphans(sections_for(&tree), &opts);
        assert_eq!(sections.len(), 2);
    }
}
