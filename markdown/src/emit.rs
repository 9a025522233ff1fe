use shortcodes::Serializer;

use crate::document::{Document, DocumentNode, InlineNode};

/// Renders a document tree back to markdown text.
///
/// Shortcode nodes render through the canonical serializer, so emitted
/// occurrences are normalized: attribute values always come back
/// double-quoted.
pub struct Emitter<'a> {
    serializer: &'a Serializer,
}

impl<'a> Emitter<'a> {
    pub fn new(serializer: &'a Serializer) -> Self {
        Emitter { serializer }
    }

    pub fn emit(&self, document: &Document) -> String {
        let mut out = String::new();
        for (idx, node) in document.nodes.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            self.emit_block(node, &mut out);
        }
        out
    }

    fn emit_block(&self, node: &DocumentNode, out: &mut String) {
        match node {
            DocumentNode::Paragraph(inlines) => {
                self.emit_inlines(inlines, out);
                out.push('\n');
            }
            DocumentNode::Heading { level, content } => {
                for _ in 0..*level {
                    out.push('#');
                }
                out.push(' ');
                self.emit_inlines(content, out);
                out.push('\n');
            }
            DocumentNode::CodeBlock { language, content } => {
                out.push_str("```");
                if let Some(lang) = language {
                    out.push_str(lang);
                }
                out.push('\n');
                out.push_str(content);
                out.push_str("```\n");
            }
            DocumentNode::Blockquote(document) => {
                let inner = self.emit(document);
                for line in inner.lines() {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            DocumentNode::OrderedList { start, items } => {
                for (idx, item) in items.iter().enumerate() {
                    out.push_str(&format!("{}. ", start + idx as u64));
                    out.push_str(&self.emit(item));
                }
            }
            DocumentNode::UnorderedList { items } => {
                for item in items {
                    out.push_str("- ");
                    out.push_str(&self.emit(item));
                }
            }
            DocumentNode::Shortcode(shortcode) => {
                out.push_str(&self.serializer.serialize(shortcode));
                out.push('\n');
            }
            DocumentNode::HorizontalRule => out.push_str("---\n"),
        }
    }

    fn emit_inlines(&self, inlines: &[InlineNode], out: &mut String) {
        for inline in inlines {
            self.emit_inline(inline, out);
        }
    }

    fn emit_inline(&self, inline: &InlineNode, out: &mut String) {
        match inline {
            InlineNode::Text(s) => out.push_str(s),
            InlineNode::CodeSpan(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            InlineNode::Strong(children) => {
                out.push_str("**");
                self.emit_inlines(children, out);
                out.push_str("**");
            }
            InlineNode::Emphasis(children) => {
                out.push('*');
                self.emit_inlines(children, out);
                out.push('*');
            }
            InlineNode::Link { dest, content, .. } => {
                out.push('[');
                self.emit_inlines(content, out);
                out.push_str("](");
                out.push_str(dest);
                out.push(')');
            }
            InlineNode::Image { dest, alt, .. } => {
                out.push_str("![");
                self.emit_inlines(alt, out);
                out.push_str("](");
                out.push_str(dest);
                out.push(')');
            }
            InlineNode::Shortcode(shortcode) => {
                out.push_str(&self.serializer.serialize(shortcode));
            }
            InlineNode::SoftBreak | InlineNode::HardBreak => out.push('\n'),
        }
    }
}
