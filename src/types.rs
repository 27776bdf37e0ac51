/// Core domain types for scene blocks and their declared identifiers.
use std::fmt;

/// Upper bound of the accepted identifier range. Scene ids beyond the
/// 32-bit range are treated as corruption even when they parse as 64-bit.
pub const ID_MAX: i64 = 2_147_483_647;

/// Lower bound of the accepted identifier range.
pub const ID_MIN: i64 = -2_147_483_648;

/// A declared identifier as it appears in a header anchor.
/// Digits that do not fit a signed 64-bit integer keep only their literal
/// form; such anchors are repaired before any pass that needs a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnchorId {
    /// A digit literal too large for a signed 64-bit integer.
    Overflow(String),
    /// A parsed in-range value.
    Value(i64),
}

impl AnchorId {
    /// The parsed value, if the literal fit in 64 bits.
    pub fn as_value(&self) -> Option<i64> {
        return match self {
            AnchorId::Overflow(_) => None,
            AnchorId::Value(value) => Some(*value),
        };
    }

    /// Whether a pointer-field token names this identifier. Parsed values
    /// compare numerically; overflow literals compare textually.
    pub fn matches_token(&self, token: &str) -> bool {
        return match self {
            AnchorId::Overflow(literal) => token == literal,
            AnchorId::Value(value) => token.parse::<i64>() == Ok(*value),
        };
    }

    /// Parse a decimal literal, falling back to `Overflow` when the digits
    /// exceed the signed 64-bit range.
    pub fn parse(literal: &str) -> Self {
        return match literal.parse::<i64>() {
            Err(_) => AnchorId::Overflow(literal.to_string()),
            Ok(value) => AnchorId::Value(value),
        };
    }
}

impl fmt::Display for AnchorId {
    /// The identifier exactly as it would appear in the document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            AnchorId::Overflow(literal) => write!(f, "{literal}"),
            AnchorId::Value(value) => write!(f, "{value}"),
        };
    }
}

/// A contiguous header-delimited unit of the scene document.
/// Ranges are half-open `[start, end)`; together they partition the
/// header-bearing region of the document.
#[derive(Debug, Clone)]
pub struct Block {
    /// Numeric Unity class tag from the `!u!<tag>` marker (1 = GameObject).
    pub class_tag: u64,
    /// Exclusive end line index of the block.
    pub end: usize,
    /// Identifier declared in the header's `&<fileID>` anchor.
    pub id: AnchorId,
    /// Line index of the header line.
    pub start: usize,
}

/// Whether a parsed identifier value lies in the accepted range.
pub fn id_in_range(value: i64) -> bool {
    return (ID_MIN..=ID_MAX).contains(&value);
}
