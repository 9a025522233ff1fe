use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute map for a shortcode. Keys keep first-insertion order; writing
/// an existing key again overwrites its value without moving the key.
pub type Attributes = IndexMap<String, String>;

/// A recognized shortcode occurrence: a name plus flat string attributes.
///
/// Nodes are only produced by successful recognition of a complete,
/// well-formed occurrence; there are no partial nodes. A node carries no
/// reference back into the source buffer it was recognized from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcode {
    /// The shortcode name, case-sensitive, never empty, no interior
    /// whitespace.
    pub identifier: String,
    /// `key="value"` pairs in parse order; may be empty.
    pub attributes: Attributes,
}

impl Shortcode {
    pub fn new(identifier: impl Into<String>) -> Self {
        Shortcode {
            identifier: identifier.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute insertion, mainly for constructing expected
    /// values in tests.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
