use crate::config::Config;
use crate::node::Shortcode;

/// Renders nodes back into canonical delimiter-wrapped text.
///
/// Attribute values are always double-quoted on output, regardless of how
/// they were originally written, so re-serializing a recognized occurrence
/// normalizes it: `id=3` comes back as `id="3"`.
#[derive(Debug, Clone)]
pub struct Serializer {
    config: Config,
}

impl Serializer {
    pub fn new(config: Config) -> Self {
        Serializer { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Canonical text for a node. Total: every well-formed node renders.
    pub fn serialize(&self, node: &Shortcode) -> String {
        let mut out = String::new();
        out.push_str(&self.config.start_block);
        out.push(' ');
        out.push_str(&node.identifier);
        for (key, value) in &node.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            // A double quote inside the value is emitted as-is; the grammar
            // has no way to round-trip it.
            out.push_str(value);
            out.push('"');
        }
        out.push(' ');
        out.push_str(&self.config.end_block);
        out
    }
}
