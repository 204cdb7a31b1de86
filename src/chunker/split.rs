//! Oversized-content splitting.
//!
//! Fallback for a section whose own rendered text already exceeds the
//! token budget. A lone table splits along row boundaries so each piece
//! stays a readable table fragment; anything else goes through a
//! token-aware text splitter. Item references are shared across the
//! resulting pieces: text is split, not items.

use text_splitter::{ChunkConfig, TextSplitter};

use crate::model::{Chunk, ItemBody, Table};
use crate::tokenize::{TokenCounter, TokenCounterSizer, Tokenizer};

use super::emit;
use super::section::Section;
use super::ChunkOptions;

/// Split one over-budget section into chunks.
///
/// Returns an empty list (with a warning) when the mandatory heading
/// prefix alone consumes the whole budget; losing that content is
/// preferred over emitting an unbounded chunk.
pub fn split_oversized<T: Tokenizer>(
    section: &Section,
    counter: &TokenCounter<T>,
    options: &ChunkOptions,
) -> Vec<Chunk> {
    let prefix_tokens = match &section.heading_line {
        Some(line) => counter.count(line) + counter.count(&options.delimiter),
        None => 0,
    };
    let available = options.max_tokens.saturating_sub(prefix_tokens);
    if available == 0 {
        log::warn!(
            "heading prefix exhausts the token budget ({} tokens); dropping section content: {:?}",
            prefix_tokens,
            section.heading_line
        );
        return Vec::new();
    }

    if let Some(table) = lone_table(section) {
        if !table.is_ragged() {
            let pieces = split_table_rows(table, counter, available);
            return assemble(section, pieces, options);
        }
    }

    let sizer = TokenCounterSizer::new(counter);
    let config = ChunkConfig::new(available).with_sizer(sizer);
    let splitter = TextSplitter::new(config);
    let pieces: Vec<String> = splitter
        .chunks(&section.body_text)
        .map(|s| s.to_string())
        .collect();
    assemble(section, pieces, options)
}

/// The section's single table, when its only non-heading item is one.
fn lone_table(section: &Section) -> Option<&Table> {
    let mut tables = section.items.iter().filter_map(|f| match &f.item.body {
        ItemBody::Table(table) => Some(table),
        _ => None,
    });
    let table = tables.next()?;
    if tables.next().is_some() {
        return None;
    }

    let non_heading = section
        .items
        .iter()
        .filter(|f| !f.item.is_heading())
        .count();
    (non_heading == 1).then_some(table)
}

/// Partition a table's markdown rendering into row groups within budget.
///
/// The header block (header rows plus separator line) repeats at the top
/// of every group. A single row that alone exceeds the budget is emitted
/// as its own oversized group; that exception is logged.
fn split_table_rows<T: Tokenizer>(
    table: &Table,
    counter: &TokenCounter<T>,
    budget: usize,
) -> Vec<String> {
    let markdown = table.to_markdown();
    if counter.count(&markdown) <= budget {
        return vec![markdown];
    }

    let lines: Vec<&str> = markdown.lines().collect();
    // Header rows plus the separator line; when the table declares no
    // header the separator still follows the first row.
    let header_len = ((table.header_rows as usize).max(1) + 1).min(lines.len());
    let header_block = lines[..header_len].join("\n");
    let header_tokens = counter.count(&header_block);

    let mut groups: Vec<String> = Vec::new();
    let mut group: Vec<&str> = Vec::new();
    let mut group_tokens = header_tokens;

    for line in &lines[header_len..] {
        let line_tokens = counter.count(line);

        if header_tokens + line_tokens > budget && group.is_empty() {
            log::warn!(
                "table row alone exceeds the token budget ({} > {}); emitting oversized",
                header_tokens + line_tokens,
                budget
            );
            groups.push(format!("{}\n{}", header_block, line));
            continue;
        }

        if group_tokens + line_tokens > budget && !group.is_empty() {
            groups.push(format!("{}\n{}", header_block, group.join("\n")));
            group.clear();
            group_tokens = header_tokens;
        }

        group.push(line);
        group_tokens += line_tokens;
    }

    if !group.is_empty() {
        groups.push(format!("{}\n{}", header_block, group.join("\n")));
    }

    if groups.is_empty() {
        vec![markdown]
    } else {
        groups
    }
}

/// Turn split text pieces into chunks carrying the parent section's
/// items and heading prefix.
fn assemble(section: &Section, pieces: Vec<String>, options: &ChunkOptions) -> Vec<Chunk> {
    pieces
        .into_iter()
        .filter(|piece| !piece.trim().is_empty())
        .map(|piece| {
            let text = match &section.heading_line {
                Some(line) => format!("{}{}{}", line, options.delimiter, piece),
                None => piece,
            };
            emit::build_split_chunk(section, text)
        })
        .collect()
}
