use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::Attributes;

/// One attribute token: a word-and-hyphen key, `=`, then a double-quoted,
/// single-quoted, or unquoted value. Quoted values are matched as a single
/// token and may contain whitespace and `=`; an unquoted value runs to the
/// next whitespace or `}`.
static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\w-]*=\s*(?:"[^"]*"|'[^']*'|[^}\s]+)"#).unwrap());

/// Parse a raw attribute string such as `a="b" c=2 e='3'` into an ordered
/// key → value map.
///
/// Tokens that do not match the grammar (no `=` at all) are dropped. A
/// repeated key overwrites the earlier value but keeps its original
/// position. Returns an empty map when nothing matches, including for
/// empty or whitespace-only input.
pub fn parse_attributes(raw: &str) -> Attributes {
    let mut attributes = Attributes::new();
    for token in ATTRIBUTE.find_iter(raw.trim()) {
        // The key/value split happens at the first `=` of the token, so an
        // unquoted value may itself contain `=` (URL query strings).
        let Some((key, value)) = token.as_str().split_once('=') else {
            continue;
        };
        attributes.insert(
            key.trim().to_string(),
            strip_double_quotes(value.trim()).to_string(),
        );
    }
    attributes
}

/// Whether at least one attribute token matches the grammar. Allocation-free
/// twin of [`parse_attributes`] for lookahead checks.
pub(crate) fn matches_any(raw: &str) -> bool {
    ATTRIBUTE.is_match(raw)
}

/// Strip exactly one outer pair of double quotes. Single quotes are part of
/// the value.
fn strip_double_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
