//! The repair pipeline: sanitize pointer tokens, normalize headers, then
//! rewrite duplicated owner groups. Edits never add or remove lines, so
//! block boundaries are parsed once and stay valid for the whole run.

use serde::Serialize;

use crate::error::Error;
use crate::groups;
use crate::normalizer;
use crate::parser;
use crate::registry::{DEFAULT_MINT_BASE, IdRegistry};
use crate::remap;
use crate::sanitizer;

/// Tunables for one repair run.
#[derive(Debug, Clone)]
pub struct RepairOptions {
    /// Probe base for minting fresh ids.
    pub mint_base: i64,
    /// Class tag of the owner ("GameObject") block kind.
    pub owner_class: u64,
}

impl Default for RepairOptions {
    /// Unity scene defaults: the GameObject class tag and a mint base far
    /// above hand-assigned ids.
    fn default() -> Self {
        return Self { mint_base: DEFAULT_MINT_BASE, owner_class: groups::GAMEOBJECT_CLASS };
    }
}

/// Per-pass change counts for one run over a scene buffer.
#[derive(Debug, Default, Serialize)]
pub struct RepairReport {
    /// Headers renamed by de-duplication.
    pub duplicate_headers: u32,
    /// Header anchors rewritten by the group remap engine.
    pub group_rewrites: u32,
    /// Out-of-range header anchors repaired.
    pub header_repairs: u32,
    /// Malformed pointer tokens rewritten.
    pub sanitized_tokens: u32,
}

impl RepairReport {
    /// Total number of applied changes across all passes. Zero means the
    /// scene was analyzed and nothing needed fixing.
    pub fn total(&self) -> u32 {
        return self
            .duplicate_headers
            .saturating_add(self.group_rewrites)
            .saturating_add(self.header_repairs)
            .saturating_add(self.sanitized_tokens);
    }
}

/// Run the full pipeline over an in-memory line buffer. Edits are always
/// same-line substitutions; the buffer never gains or loses lines.
///
/// # Errors
///
/// Returns `Error::UnsupportedDocument` if the buffer contains no block
/// headers, or `Error::IdSpaceExhausted` if minting runs out of ids.
pub fn repair_lines(lines: &mut [String], options: &RepairOptions) -> Result<RepairReport, Error> {
    let mut blocks = parser::parse_blocks(lines);
    if blocks.is_empty() {
        return Err(Error::UnsupportedDocument);
    }
    let mut registry = IdRegistry::collect(&blocks, options.mint_base);

    // The sanitizer never touches header lines, and header repair
    // refreshes the parsed ids in place, so later passes always see
    // current anchor values without a re-parse.
    let sanitized_tokens = sanitizer::sanitize_pointer_tokens(lines, &mut registry)?;
    let header_repairs =
        normalizer::repair_out_of_range_headers(lines, &mut blocks, &mut registry)?;
    let duplicate_headers = normalizer::dedup_header_ids(lines, &blocks, &mut registry)?;

    // De-duplication leaves the parsed ids stale on purpose: grouping
    // keys off the ids as declared before renaming cut the textual ties
    // between duplicated owners and the members still binding to them.
    let duplicate_groups = groups::build_owner_groups(&blocks, options.owner_class);
    let group_rewrites = remap::rewrite_duplicate_groups(
        lines,
        &blocks,
        &duplicate_groups,
        options.owner_class,
        &mut registry,
    )?;

    return Ok(RepairReport { duplicate_headers, group_rewrites, header_repairs, sanitized_tokens });
}
