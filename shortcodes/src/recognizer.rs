use crate::config::Config;
use crate::grammar;
use crate::node::Shortcode;

/// A successful recognition: the byte length consumed from the buffer and
/// the node produced. The host advances its cursor past `consumed` and
/// places the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognized {
    /// Total bytes consumed, start delimiter through end delimiter
    /// inclusive.
    pub consumed: usize,
    pub node: Shortcode,
}

/// Attempts to consume shortcode occurrences at specific buffer positions.
///
/// A Recognizer is bound to one [`Config`] at construction and is stateless
/// afterwards: every call operates purely on its arguments, so one instance
/// can be shared across buffers and threads.
#[derive(Debug, Clone)]
pub struct Recognizer {
    config: Config,
}

impl Recognizer {
    pub fn new(config: Config) -> Self {
        Recognizer { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Byte offset of the next start-delimiter occurrence at or after
    /// `from` (which must lie on a character boundary).
    ///
    /// A pure forward substring search: it does not check that a well-formed
    /// occurrence actually follows. Hosts use it to schedule recognition
    /// attempts instead of probing every position.
    pub fn locate(&self, buffer: &str, from: usize) -> Option<usize> {
        if from > buffer.len() {
            return None;
        }
        buffer[from..]
            .find(self.config.start_block.as_str())
            .map(|pos| from + pos)
    }

    /// Try to consume a complete occurrence starting exactly at the
    /// beginning of `buffer`.
    ///
    /// Returns None, leaving the buffer for ordinary text handling, when
    /// the start delimiter is absent, no end delimiter follows anywhere in
    /// the buffer, or the body between the delimiters is not well-formed.
    pub fn recognize(&self, buffer: &str) -> Option<Recognized> {
        let span = self.delimited_span(buffer)?;
        let node = grammar::parse_inner(span.inner)?;
        Some(Recognized {
            consumed: span.consumed,
            node,
        })
    }

    /// Lookahead form of [`Recognizer::recognize`]: reports whether an
    /// occurrence would be consumed, without allocating a node.
    pub fn matches(&self, buffer: &str) -> bool {
        match self.delimited_span(buffer) {
            Some(span) => grammar::is_well_formed(span.inner),
            None => false,
        }
    }

    /// Find the delimiter pair at the start of the buffer. The end-delimiter
    /// search is unbounded within the buffer.
    fn delimited_span<'a>(&self, buffer: &'a str) -> Option<DelimitedSpan<'a>> {
        let start = self.config.start_block.as_str();
        let end = self.config.end_block.as_str();
        if !buffer.starts_with(start) {
            return None;
        }
        let end_pos = buffer[start.len()..].find(end)? + start.len();
        Some(DelimitedSpan {
            inner: &buffer[start.len()..end_pos],
            consumed: end_pos + end.len(),
        })
    }
}

struct DelimitedSpan<'a> {
    /// Everything strictly between the delimiters, unparsed.
    inner: &'a str,
    /// Full occurrence length, both delimiters included.
    consumed: usize,
}
