//! The shortcode body grammar: splitting the text between the delimiters
//! into an identifier and an attribute list.

mod attributes;

pub use attributes::parse_attributes;

use crate::node::{Attributes, Shortcode};

/// Parse the text between the delimiters into a node.
///
/// Returns None for anything that is not a complete, well-formed body: an
/// empty or all-whitespace body, or an attribute section that yields no
/// attributes despite containing non-whitespace text. Failure is a normal
/// outcome: the caller falls back to ordinary text handling.
pub fn parse_inner(inner: &str) -> Option<Shortcode> {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return None;
    }

    // A body with no whitespace at all is a bare identifier.
    let Some(split_at) = trimmed.find(char::is_whitespace) else {
        return Some(Shortcode {
            identifier: trimmed.to_string(),
            attributes: Attributes::new(),
        });
    };

    // Split at the first whitespace run: identifier before, the attribute
    // string after, verbatim past the first whitespace character.
    let identifier = &trimmed[..split_at];
    let raw = trimmed[split_at..]
        .strip_prefix(char::is_whitespace)
        .unwrap_or(&trimmed[split_at..]);

    let attributes = attributes::parse_attributes(raw);
    if attributes.is_empty() && !raw.trim().is_empty() {
        // Non-trivial attribute text that parsed to nothing must not
        // silently become "no attributes".
        return None;
    }

    Some(Shortcode {
        identifier: identifier.to_string(),
        attributes,
    })
}

/// Lookahead counterpart of [`parse_inner`]: answers well-formedness without
/// building a node or an attribute map. Kept in lockstep with `parse_inner`.
pub fn is_well_formed(inner: &str) -> bool {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return false;
    }
    let Some(split_at) = trimmed.find(char::is_whitespace) else {
        return true;
    };
    let raw = &trimmed[split_at..];
    raw.trim().is_empty() || attributes::matches_any(raw)
}
