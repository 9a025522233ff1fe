use serde::Deserialize;

/// Where the host pipeline applies shortcode recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Recognize occurrences at block boundaries (standalone shortcodes).
    Block,
    /// Recognize occurrences inside inline text runs.
    Inline,
}

/// Delimiter and placement configuration.
///
/// Fixed for the lifetime of one parsing run: the recognizer and serializer
/// are bound to a `Config` at construction and apply it uniformly to every
/// occurrence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Literal opening delimiter.
    pub start_block: String,
    /// Literal closing delimiter.
    pub end_block: String,
    /// Block-level or inline-level placement in the host document model.
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_block: "[[".to_string(),
            end_block: "]]".to_string(),
            mode: Mode::Block,
        }
    }
}
