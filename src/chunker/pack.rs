//! Token-bounded section packing.
//!
//! The central algorithm: merges consecutive sections into chunks
//! honoring the token budget and the heading-level tie-break. The
//! budget alone would let an unrelated top-level section bleed into a
//! chunk dominated by a deep sub-section merely because both are small;
//! a section opening at a strictly shallower level therefore always
//! starts a new chunk.

use crate::model::Chunk;
use crate::tokenize::{TokenCounter, Tokenizer};

use super::section::Section;
use super::{emit, split, ChunkOptions};

/// Pack sections into token-bounded chunks.
pub fn pack<T: Tokenizer>(
    sections: Vec<Section>,
    counter: &TokenCounter<T>,
    options: &ChunkOptions,
) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut accumulated: Vec<Section> = Vec::new();
    let mut accumulated_text = String::new();
    let mut accumulated_level: Option<u32> = None;

    for section in sections {
        if !accumulated.is_empty() {
            let candidate = join_nonempty(&accumulated_text, &section.text, &options.delimiter);
            let over_budget = counter.count(&candidate) > options.max_tokens;
            let shallower_level = matches!(
                (section.first_level(), accumulated_level),
                (Some(current), Some(deepest)) if current < deepest
            );

            if over_budget || shallower_level || !options.merge_peers {
                chunks.push(emit::build_chunk(&accumulated, options));
                accumulated.clear();
                accumulated_text.clear();
                accumulated_level = None;
            } else {
                accumulated_text = candidate;
                accumulated_level = accumulated_level.max(section.deepest_level());
                accumulated.push(section);
                continue;
            }
        }

        // Fresh accumulator. A section that alone exceeds the budget
        // goes straight to the oversized-content splitter.
        if counter.count(&section.text) > options.max_tokens {
            chunks.extend(split::split_oversized(&section, counter, options));
            continue;
        }

        accumulated_text = section.text.clone();
        accumulated_level = section.deepest_level();
        accumulated.push(section);
    }

    if !accumulated.is_empty() {
        chunks.push(emit::build_chunk(&accumulated, options));
    }

    log::debug!("packed {} chunk(s)", chunks.len());
    chunks
}

fn join_nonempty(left: &str, right: &str, delimiter: &str) -> String {
    if left.is_empty() {
        right.to_string()
    } else if right.is_empty() {
        left.to_string()
    } else {
        format!("{left}{delimiter}{right}")
    }
}
