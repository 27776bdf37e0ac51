//! Pointer-token sanitizing: find malformed fileID tokens anywhere in the
//! document and remap each distinct bad literal to one fresh identifier.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use regex::{Captures, Regex};

use crate::error::Error;
use crate::registry::IdRegistry;
use crate::types::id_in_range;

/// Mint one fresh id for each not-yet-seen malformed literal on a line.
/// Minting first-seen literals up front keeps the later substitution pass
/// infallible.
fn mint_for_new_bad_literals(
    token: &Regex,
    line: &str,
    remap_by_literal: &mut HashMap<String, i64>,
    registry: &mut IdRegistry,
) -> Result<(), Error> {
    for caps in token.captures_iter(line) {
        let digits = caps.get(2).map_or("", |m| return m.as_str());
        let suffix = caps.get(3).map_or("", |m| return m.as_str());
        if !token_is_malformed(digits, suffix) {
            continue;
        }
        if let Entry::Vacant(slot) = remap_by_literal.entry(format!("{digits}{suffix}")) {
            slot.insert(registry.mint()?);
        }
    }
    return Ok(());
}

/// Scan every line for malformed pointer tokens and rewrite them in place.
/// Each distinct bad literal (digits plus any trailing letters) is minted
/// exactly one fresh id the first time it is seen, and every identical
/// occurrence anywhere in the document maps to that same id. Returns the
/// number of rewritten occurrences.
///
/// # Errors
///
/// Returns `Error::IdSpaceExhausted` if minting runs out of identifiers.
///
/// # Panics
///
/// Panics if the hardcoded token regex is invalid (compile-time invariant).
pub fn sanitize_pointer_tokens(
    lines: &mut [String],
    registry: &mut IdRegistry,
) -> Result<u32, Error> {
    let token = Regex::new(r"(\bfileID:\s*)(-?\d+)([A-Za-z]+)?").expect("valid regex");
    let mut remap_by_literal: HashMap<String, i64> = HashMap::new();
    let mut rewritten = 0_u32;

    for line in lines.iter_mut() {
        if !line.contains("fileID:") {
            continue;
        }
        mint_for_new_bad_literals(&token, line, &mut remap_by_literal, registry)?;
        *line = token
            .replace_all(line, |caps: &Captures<'_>| {
                return substitute_token(caps, &remap_by_literal, &mut rewritten);
            })
            .into_owned();
    }

    return Ok(rewritten);
}

/// Rewrite one matched token if its literal was remapped; otherwise echo
/// the match unchanged.
fn substitute_token(
    caps: &Captures<'_>,
    remap_by_literal: &HashMap<String, i64>,
    rewritten: &mut u32,
) -> String {
    let prefix = caps.get(1).map_or("", |m| return m.as_str());
    let digits = caps.get(2).map_or("", |m| return m.as_str());
    let suffix = caps.get(3).map_or("", |m| return m.as_str());
    let Some(fresh) = remap_by_literal.get(&format!("{digits}{suffix}")) else {
        return caps.get(0).map_or_else(String::new, |m| return m.as_str().to_string());
    };
    *rewritten = rewritten.saturating_add(1);
    return format!("{prefix}{fresh}");
}

/// A token is malformed if it carries trailing letters, its digits do not
/// parse as a 64-bit integer, or the parsed value falls outside the
/// accepted 32-bit range. Values between the two bounds are suspicious in
/// scene files even though they fit 64 bits.
fn token_is_malformed(digits: &str, suffix: &str) -> bool {
    if !suffix.is_empty() {
        return true;
    }
    return match digits.parse::<i64>() {
        Err(_) => true,
        Ok(value) => !id_in_range(value),
    };
}
