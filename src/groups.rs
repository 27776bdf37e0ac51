//! Group building: partition repeated GameObject occurrences into ownership
//! groups and confirm members by their explicit binding lines.

use std::collections::HashMap;

use regex::Regex;

use crate::types::Block;

/// Class tag Unity assigns to GameObject blocks.
pub const GAMEOBJECT_CLASS: u64 = 1;

/// One occurrence of a repeated owner id plus the blocks tentatively
/// assigned to it by position.
#[derive(Debug)]
pub struct OwnerGroup {
    /// Indices of candidate member blocks, the owner itself included.
    pub candidates: Vec<usize>,
    /// Zero-based occurrence ordinal; ordinal 0 is the canonical one.
    pub ordinal: usize,
    /// The repeated owner identifier as originally declared.
    pub owner_id: i64,
}

/// Scan a block's body for a binding line naming the owner id.
fn block_binds_to_owner(lines: &[String], block: &Block, binding: &Regex, owner_id: i64) -> bool {
    for line in lines.iter().skip(block.start).take(block.end.saturating_sub(block.start)) {
        let Some(caps) = binding.captures(line) else {
            continue;
        };
        let token = caps.get(1).map_or("", |m| return m.as_str());
        if token.parse::<i64>() == Ok(owner_id) {
            return true;
        }
    }
    return false;
}

/// Partition owner-class occurrences of each repeated id into groups.
/// Occurrence `j` tentatively owns every block from itself up to (not
/// including) occurrence `j + 1`; the last occurrence extends to the end
/// of the document. Ids declared only once produce no group. Built as a
/// single adjacency pass: owner id to ordered occurrence indices.
pub fn build_owner_groups(blocks: &[Block], owner_class: u64) -> Vec<OwnerGroup> {
    let mut occurrence_order: Vec<i64> = Vec::new();
    let mut occurrences: HashMap<i64, Vec<usize>> = HashMap::new();
    for (index, block) in blocks.iter().enumerate() {
        if block.class_tag != owner_class {
            continue;
        }
        let Some(owner_id) = block.id.as_value() else {
            continue;
        };
        let slots = occurrences.entry(owner_id).or_default();
        if slots.is_empty() {
            occurrence_order.push(owner_id);
        }
        slots.push(index);
    }

    let mut groups: Vec<OwnerGroup> = Vec::new();
    for owner_id in occurrence_order {
        let Some(slots) = occurrences.get(&owner_id) else {
            continue;
        };
        if slots.len() < 2 {
            continue;
        }
        for (ordinal, &start_index) in slots.iter().enumerate() {
            let end_index = slots.get(ordinal.saturating_add(1)).copied().unwrap_or(blocks.len());
            groups.push(OwnerGroup {
                candidates: (start_index..end_index).collect(),
                ordinal,
                owner_id,
            });
        }
    }

    return groups;
}

/// Confirm which candidates belong to a group: the owner block itself, or
/// any block whose body carries an explicit `m_GameObject` binding naming
/// the owner's id. Everything else belongs to an unrelated owner or is
/// free-standing, and is dropped to stop runaway inclusion of trailing
/// blocks.
///
/// # Panics
///
/// Panics if the hardcoded binding regex is invalid (compile-time invariant).
pub fn confirm_members(
    lines: &[String],
    blocks: &[Block],
    group: &OwnerGroup,
    owner_class: u64,
) -> Vec<usize> {
    let binding =
        Regex::new(r"^\s*m_GameObject:\s*\{\s*fileID:\s*(-?\d+)\s*\}").expect("valid regex");
    let mut confirmed: Vec<usize> = Vec::new();

    for &index in &group.candidates {
        let Some(block) = blocks.get(index) else {
            continue;
        };
        if block.class_tag == owner_class && block.id.as_value() == Some(group.owner_id) {
            confirmed.push(index);
            continue;
        }
        if block_binds_to_owner(lines, block, &binding, group.owner_id) {
            confirmed.push(index);
        }
    }

    return confirmed;
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::parser;

    fn doc(text: &str) -> Vec<String> {
        return text.lines().map(String::from).collect();
    }

    const REPEATED_OWNER: &str = "\
--- !u!1 &100
GameObject:
--- !u!4 &200
Transform:
  m_GameObject: {fileID: 100}
--- !u!1 &100
GameObject:
--- !u!4 &210
Transform:
  m_GameObject: {fileID: 100}
--- !u!4 &220
Transform:
  m_GameObject: {fileID: 900}
";

    #[test]
    fn occurrences_split_the_document_into_spans() {
        let lines = doc(REPEATED_OWNER);
        let blocks = parser::parse_blocks(&lines);
        let groups = build_owner_groups(&blocks, GAMEOBJECT_CLASS);
        assert_eq!(groups.len(), 2, "two occurrences, two groups");

        let first = groups.first().unwrap();
        assert_eq!((first.owner_id, first.ordinal), (100, 0), "first group identity");
        assert_eq!(first.candidates, vec![0, 1], "first span");

        let second = groups.get(1).unwrap();
        assert_eq!((second.owner_id, second.ordinal), (100, 1), "second group identity");
        assert_eq!(second.candidates, vec![2, 3, 4], "last span runs to document end");
    }

    #[test]
    fn unbound_candidates_are_dropped() {
        let lines = doc(REPEATED_OWNER);
        let blocks = parser::parse_blocks(&lines);
        let groups = build_owner_groups(&blocks, GAMEOBJECT_CLASS);
        let second = groups.get(1).unwrap();
        let confirmed = confirm_members(&lines, &blocks, second, GAMEOBJECT_CLASS);
        assert_eq!(
            confirmed,
            vec![2, 3],
            "owner and its bound member stay; the block bound to 900 drops"
        );
    }

    #[test]
    fn unique_owner_ids_produce_no_groups() {
        let lines = doc("\
--- !u!1 &100
GameObject:
--- !u!1 &101
GameObject:
");
        let blocks = parser::parse_blocks(&lines);
        assert!(build_owner_groups(&blocks, GAMEOBJECT_CLASS).is_empty(), "no repetition");
    }
}
