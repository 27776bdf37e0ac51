//! Shared line-buffer rewrite primitives. Every edit is a same-line
//! substitution; block boundaries never move.

use regex::{Captures, Regex};

use crate::types::{AnchorId, Block};

/// Replace the `&<id>` anchor on a block's header line with `new_id`,
/// keeping the class marker and any trailing text intact.
///
/// # Panics
///
/// Panics if the hardcoded anchor regex is invalid (compile-time invariant).
pub fn replace_header_anchor(lines: &mut [String], block: &Block, new_id: i64) {
    let anchor = Regex::new(r"&(-?\d+)").expect("valid regex");
    let Some(header) = lines.get_mut(block.start) else {
        return;
    };
    *header = anchor.replace(header, format!("&{new_id}")).into_owned();
    return;
}

/// Replace every pointer-field occurrence of `old` across the whole
/// document. Returns the number of rewritten occurrences.
pub fn replace_pointer_globally(lines: &mut [String], old: &AnchorId, new_id: i64) -> u32 {
    let end = lines.len();
    return replace_pointer_in_range(lines, 0, end, old, new_id);
}

/// Replace every pointer-field occurrence of `old` within `[start, end)`
/// with `new_id`. Tokens naming any other id are left alone. Returns the
/// number of rewritten occurrences.
///
/// # Panics
///
/// Panics if the hardcoded pointer regex is invalid (compile-time invariant).
pub fn replace_pointer_in_range(
    lines: &mut [String],
    start: usize,
    end: usize,
    old: &AnchorId,
    new_id: i64,
) -> u32 {
    let pointer = Regex::new(r"(\bfileID:\s*)(-?\d+)").expect("valid regex");
    let needle = old.to_string();
    let mut rewritten = 0_u32;

    for line in lines.iter_mut().skip(start).take(end.saturating_sub(start)) {
        if !line.contains(&needle) {
            continue;
        }
        *line = pointer
            .replace_all(line, |caps: &Captures<'_>| {
                let prefix = caps.get(1).map_or("", |m| return m.as_str());
                let token = caps.get(2).map_or("", |m| return m.as_str());
                if old.matches_token(token) {
                    rewritten = rewritten.saturating_add(1);
                    return format!("{prefix}{new_id}");
                }
                return caps.get(0).map_or_else(String::new, |m| return m.as_str().to_string());
            })
            .into_owned();
    }

    return rewritten;
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        return text.lines().map(String::from).collect();
    }

    #[test]
    fn anchor_replacement_preserves_trailing_text() {
        let mut lines = doc("--- !u!1 &100 stripped\nGameObject:\n");
        let block = Block { class_tag: 1, end: 2, id: AnchorId::Value(100), start: 0 };
        replace_header_anchor(&mut lines, &block, 777);
        assert_eq!(
            lines.first().unwrap(),
            "--- !u!1 &777 stripped",
            "anchor rewritten in place"
        );
    }

    #[test]
    fn ranged_replacement_stops_at_the_range_end() {
        let mut lines = doc("\
  m_GameObject: {fileID: 100}
  m_Father: {fileID: 100}
  m_Other: {fileID: 100}
");
        let count = replace_pointer_in_range(&mut lines, 0, 2, &AnchorId::Value(100), 777);
        assert_eq!(count, 2, "two occurrences inside the range");
        assert_eq!(lines.get(2).unwrap(), "  m_Other: {fileID: 100}", "outside untouched");
    }

    #[test]
    fn tokens_naming_other_ids_are_untouched() {
        let mut lines = doc("  m_Children: [{fileID: 1001}, {fileID: 100}]\n");
        let count = replace_pointer_globally(&mut lines, &AnchorId::Value(100), 777);
        assert_eq!(count, 1, "only the exact id matches");
        assert_eq!(
            lines.first().unwrap(),
            "  m_Children: [{fileID: 1001}, {fileID: 777}]",
            "substring ids left alone"
        );
    }
}
