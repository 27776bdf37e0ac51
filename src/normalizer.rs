//! Header normalizing: repair out-of-range header anchors, then make every
//! header anchor unique across the document.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

use crate::error::Error;
use crate::registry::IdRegistry;
use crate::rewrite;
use crate::types::{AnchorId, Block, id_in_range};

/// Walk blocks in document order and rename every later block that
/// declares an id already seen. The first declaration stays canonical.
/// Pointer occurrences are rewritten within the renamed block's own line
/// range only: the canonical block and any sibling duplicates still to be
/// processed keep keying off the old id. Returns the number of renamed
/// headers.
///
/// # Errors
///
/// Returns `Error::IdSpaceExhausted` if minting runs out of identifiers.
pub fn dedup_header_ids(
    lines: &mut [String],
    blocks: &[Block],
    registry: &mut IdRegistry,
) -> Result<u32, Error> {
    let mut seen: HashSet<AnchorId> = HashSet::new();
    let mut renamed = 0_u32;

    for block in blocks {
        if seen.insert(block.id.clone()) {
            continue;
        }
        let fresh = registry.mint()?;
        rewrite::replace_header_anchor(lines, block, fresh);
        rewrite::replace_pointer_in_range(lines, block.start, block.end, &block.id, fresh);
        renamed = renamed.saturating_add(1);
    }

    return Ok(renamed);
}

/// Whether a declared header id lies outside the accepted range.
fn header_out_of_range(id: &AnchorId) -> bool {
    return match id.as_value() {
        None => true,
        Some(value) => !id_in_range(value),
    };
}

/// Rename every block whose declared id is outside the accepted range,
/// minting one fresh id per distinct offending literal. An out-of-range
/// anchor is assumed to be a corruption of a real identifier that may be
/// referenced anywhere, so pointer occurrences are rewritten across the
/// whole document, not just the block's own range. The parsed block ids
/// are refreshed in place (boundaries never move, so nothing else needs
/// re-deriving). Returns the number of repaired headers.
///
/// # Errors
///
/// Returns `Error::IdSpaceExhausted` if minting runs out of identifiers.
pub fn repair_out_of_range_headers(
    lines: &mut [String],
    blocks: &mut [Block],
    registry: &mut IdRegistry,
) -> Result<u32, Error> {
    let mut remap_by_literal: HashMap<String, i64> = HashMap::new();
    let mut repaired = 0_u32;

    for block in blocks.iter_mut() {
        if !header_out_of_range(&block.id) {
            continue;
        }
        let fresh = match remap_by_literal.entry(block.id.to_string()) {
            Entry::Occupied(slot) => *slot.get(),
            Entry::Vacant(slot) => *slot.insert(registry.mint()?),
        };
        rewrite::replace_header_anchor(lines, block, fresh);
        rewrite::replace_pointer_globally(lines, &block.id, fresh);
        block.id = AnchorId::Value(fresh);
        repaired = repaired.saturating_add(1);
    }

    return Ok(repaired);
}
