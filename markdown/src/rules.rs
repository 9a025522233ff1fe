//! Inline recognition rules and the scan driver.
//!
//! Rules are consulted in priority order; the driver's terminal stage is the
//! raw-text fallback, which claims every byte no rule recognizes. Ordinary
//! text can therefore never shadow a registered rule.

use std::ops::Range;

use shortcodes::Recognizer;

use crate::document::InlineNode;
use crate::warning::ParseWarning;

/// One inline recognition rule consulted by the pipeline at candidate
/// positions inside a text run.
pub trait InlineRule {
    /// Next candidate byte offset at or after `from`, so the driver can
    /// jump between positions worth attempting instead of probing every
    /// byte.
    fn locate(&self, text: &str, from: usize) -> Option<usize>;

    /// Attempt recognition exactly at `at`. None leaves the position to
    /// lower-priority rules and ultimately to the raw-text fallback.
    fn recognize(&self, text: &str, at: usize) -> Option<RuleMatch>;

    /// Diagnostic for a candidate at `at` that failed [`InlineRule::recognize`].
    fn diagnose(&self, _text: &str, _at: usize) -> Option<Diagnosis> {
        None
    }
}

/// A successful rule application.
pub struct RuleMatch {
    /// Bytes consumed from the run.
    pub consumed: usize,
    pub node: InlineNode,
}

/// Why a candidate did not recognize, with the span it covered.
pub struct Diagnosis {
    pub message: String,
    pub span: Range<usize>,
}

/// The shortcode recognition rule.
pub struct ShortcodeRule<'a> {
    recognizer: &'a Recognizer,
}

impl<'a> ShortcodeRule<'a> {
    pub fn new(recognizer: &'a Recognizer) -> Self {
        ShortcodeRule { recognizer }
    }
}

impl InlineRule for ShortcodeRule<'_> {
    fn locate(&self, text: &str, from: usize) -> Option<usize> {
        self.recognizer.locate(text, from)
    }

    fn recognize(&self, text: &str, at: usize) -> Option<RuleMatch> {
        let found = self.recognizer.recognize(&text[at..])?;
        Some(RuleMatch {
            consumed: found.consumed,
            node: InlineNode::Shortcode(found.node),
        })
    }

    fn diagnose(&self, text: &str, at: usize) -> Option<Diagnosis> {
        diagnose_candidate(self.recognizer, &text[at..]).map(|d| Diagnosis {
            message: d.message,
            span: at + d.span.start..at + d.span.end,
        })
    }
}

/// Explain why the text at a candidate position failed recognition. Returns
/// None when the position does not even open with the start delimiter.
pub(crate) fn diagnose_candidate(recognizer: &Recognizer, text: &str) -> Option<Diagnosis> {
    let config = recognizer.config();
    let start = config.start_block.as_str();
    let end = config.end_block.as_str();
    if !text.starts_with(start) {
        return None;
    }
    match text[start.len()..].find(end) {
        None => Some(Diagnosis {
            message: format!("'{}' has no matching '{}'", start, end),
            span: 0..start.len(),
        }),
        Some(pos) => Some(Diagnosis {
            message: "shortcode body is malformed".to_string(),
            span: 0..start.len() + pos + end.len(),
        }),
    }
}

/// Scan one text run with the rule list, filling gaps and failed candidates
/// with raw text.
pub(crate) fn scan_run(
    text: &str,
    rules: &[Box<dyn InlineRule + '_>],
    base: usize,
    file_id: usize,
    warnings: &mut Vec<ParseWarning>,
) -> Vec<InlineNode> {
    let mut nodes: Vec<InlineNode> = Vec::new();
    let mut raw_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        // Jump to the earliest candidate any rule reports.
        let Some(pos) = rules.iter().filter_map(|r| r.locate(text, cursor)).min() else {
            break;
        };

        // The first rule in priority order wins the position.
        if let Some(found) = rules.iter().find_map(|r| r.recognize(text, pos)) {
            if pos > raw_start {
                nodes.push(InlineNode::Text(text[raw_start..pos].to_string()));
            }
            nodes.push(found.node);
            cursor = pos + found.consumed;
            raw_start = cursor;
        } else {
            if let Some(d) = rules.iter().find_map(|r| r.diagnose(text, pos)) {
                warnings.push(
                    ParseWarning::new(
                        d.message,
                        base + d.span.start..base + d.span.end,
                        file_id,
                    )
                    .with_note("the text was kept as ordinary content"),
                );
            }
            // The candidate stays raw text; resume after its first character.
            cursor = pos + text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    if raw_start < text.len() {
        nodes.push(InlineNode::Text(text[raw_start..].to_string()));
    }
    nodes
}
