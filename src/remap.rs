//! Remap engine: mint replacement ids for each non-canonical duplicate
//! group and rewrite its headers and internal references.

use std::collections::HashMap;

use crate::error::Error;
use crate::groups::{self, OwnerGroup};
use crate::registry::IdRegistry;
use crate::rewrite;
use crate::types::{AnchorId, Block};

/// Rewrite every non-canonical group. The first occurrence of each owner
/// id (ordinal 0) is never touched, nor is any block outside a confirmed
/// group span. Returns the number of rewritten header anchors.
///
/// # Errors
///
/// Returns `Error::IdSpaceExhausted` if minting runs out of identifiers.
pub fn rewrite_duplicate_groups(
    lines: &mut [String],
    blocks: &[Block],
    duplicate_groups: &[OwnerGroup],
    owner_class: u64,
    registry: &mut IdRegistry,
) -> Result<u32, Error> {
    let mut rewritten = 0_u32;

    for group in duplicate_groups {
        if group.ordinal == 0 {
            continue;
        }
        let confirmed = groups::confirm_members(lines, blocks, group, owner_class);
        if confirmed.is_empty() {
            continue;
        }
        let applied = rewrite_one_group(lines, blocks, group.owner_id, &confirmed, registry)?;
        rewritten = rewritten.saturating_add(applied);
    }

    return Ok(rewritten);
}

/// Mint and apply one group's remap table: a fresh id for the owner, then
/// one for every confirmed member whose declared id is already in use.
fn rewrite_one_group(
    lines: &mut [String],
    blocks: &[Block],
    owner_id: i64,
    confirmed: &[usize],
    registry: &mut IdRegistry,
) -> Result<u32, Error> {
    let mut remap: HashMap<i64, i64> = HashMap::new();
    remap.insert(owner_id, registry.mint()?);

    // Members collide with the canonical group's ids by construction of
    // the duplication; each colliding declared id gets its own fresh id.
    for &index in confirmed {
        let Some(block) = blocks.get(index) else {
            continue;
        };
        let Some(old_id) = block.id.as_value() else {
            continue;
        };
        if remap.contains_key(&old_id) || !registry.contains(old_id) {
            continue;
        }
        let fresh = registry.mint()?;
        remap.insert(old_id, fresh);
    }

    let mut rewritten = 0_u32;
    for &index in confirmed {
        let Some(block) = blocks.get(index) else {
            continue;
        };
        let Some(old_id) = block.id.as_value() else {
            continue;
        };
        let Some(&fresh) = remap.get(&old_id) else {
            continue;
        };
        rewrite::replace_header_anchor(lines, block, fresh);
        rewritten = rewritten.saturating_add(1);
    }

    // References are confined to the group's own spans; ids outside the
    // table are left alone.
    for &index in confirmed {
        let Some(block) = blocks.get(index) else {
            continue;
        };
        for (&old_id, &fresh) in &remap {
            rewrite::replace_pointer_in_range(
                lines,
                block.start,
                block.end,
                &AnchorId::Value(old_id),
                fresh,
            );
        }
    }

    return Ok(rewritten);
}
