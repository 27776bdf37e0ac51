//! Block parsing: split the scene's line buffer into header-delimited blocks.

use regex::Regex;

use crate::types::{AnchorId, Block};

/// Split `lines` into ordered blocks by scanning for `--- !u!<class> &<id>`
/// header lines, trailing text permitted. Each header closes the previous
/// block; the final block closes at end of document. A document with no
/// headers yields an empty list (the caller reports it as unsupported).
///
/// # Panics
///
/// Panics if the hardcoded header regex is invalid (compile-time invariant).
pub fn parse_blocks(lines: &[String]) -> Vec<Block> {
    let header = Regex::new(r"^---\s*!u!(\d+)\s*&(-?\d+)").expect("valid regex");
    let mut blocks: Vec<Block> = Vec::new();
    let mut open: Option<(u64, AnchorId, usize)> = None;

    for (index, line) in lines.iter().enumerate() {
        let Some(caps) = header.captures(line) else {
            continue;
        };
        let Some(class_tag) = parse_class_tag(&caps) else {
            continue;
        };
        let id = AnchorId::parse(caps.get(2).map_or("", |m| return m.as_str()));
        if let Some((prev_class, prev_id, prev_start)) = open.take() {
            blocks.push(Block {
                class_tag: prev_class,
                end: index,
                id: prev_id,
                start: prev_start,
            });
        }
        open = Some((class_tag, id, index));
    }

    if let Some((class_tag, id, start)) = open {
        blocks.push(Block { class_tag, end: lines.len(), id, start });
    }

    return blocks;
}

/// Extract the class tag capture as a number. A tag that somehow exceeds
/// 64 bits disqualifies the line as a header.
fn parse_class_tag(caps: &regex::Captures<'_>) -> Option<u64> {
    return caps.get(1)?.as_str().parse::<u64>().ok();
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        return text.lines().map(String::from).collect();
    }

    #[test]
    fn blocks_partition_the_document() {
        let lines = doc("\
--- !u!1 &100
GameObject:
  m_Name: Player
--- !u!4 &200
Transform:
  m_GameObject: {fileID: 100}
");
        let blocks = parse_blocks(&lines);
        assert_eq!(blocks.len(), 2, "expected two blocks");

        let first = blocks.first().unwrap();
        assert_eq!(first.class_tag, 1, "first class tag");
        assert_eq!(first.id, AnchorId::Value(100), "first id");
        assert_eq!((first.start, first.end), (0, 3), "first range");

        let second = blocks.get(1).unwrap();
        assert_eq!(second.class_tag, 4, "second class tag");
        assert_eq!(second.id, AnchorId::Value(200), "second id");
        assert_eq!((second.start, second.end), (3, 6), "second range");
    }

    #[test]
    fn headerless_document_yields_no_blocks() {
        let lines = doc("just some text\nwith no headers\n");
        assert!(parse_blocks(&lines).is_empty(), "expected no blocks");
    }

    #[test]
    fn negative_anchor_parses() {
        let lines = doc("--- !u!114 &-765432\nMonoBehaviour:\n");
        let blocks = parse_blocks(&lines);
        let only = blocks.first().unwrap();
        assert_eq!(only.id, AnchorId::Value(-765_432), "negative id");
    }

    #[test]
    fn overflow_anchor_keeps_its_literal() {
        let lines = doc("--- !u!1 &99999999999999999999\nGameObject:\n");
        let blocks = parse_blocks(&lines);
        let only = blocks.first().unwrap();
        assert_eq!(
            only.id,
            AnchorId::Overflow("99999999999999999999".to_string()),
            "overflow literal"
        );
    }

    #[test]
    fn preamble_before_first_header_is_not_a_block() {
        let lines = doc("\
%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1 &100
GameObject:
");
        let blocks = parse_blocks(&lines);
        assert_eq!(blocks.len(), 1, "expected one block");
        assert_eq!(blocks.first().unwrap().start, 2, "block starts at header");
    }

    #[test]
    fn trailing_header_text_is_kept_out_of_the_id() {
        let lines = doc("--- !u!1 &100 stripped\nGameObject:\n");
        let blocks = parse_blocks(&lines);
        assert_eq!(blocks.first().unwrap().id, AnchorId::Value(100), "id");
    }
}
