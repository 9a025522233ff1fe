use shortcodes::Shortcode;

/// A parsed markdown document with shortcode occurrences lifted into
/// structured nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub nodes: Vec<DocumentNode>,
}

impl Document {
    pub fn empty() -> Self {
        Document { nodes: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All shortcode nodes in document order, block-level and inline.
    pub fn shortcodes(&self) -> Vec<&Shortcode> {
        let mut found = Vec::new();
        collect_block_shortcodes(&self.nodes, &mut found);
        found
    }
}

/// A block-level node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Paragraph(Vec<InlineNode>),
    Heading {
        level: u8,
        content: Vec<InlineNode>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    Blockquote(Document),
    OrderedList {
        start: u64,
        items: Vec<Document>,
    },
    UnorderedList {
        items: Vec<Document>,
    },
    /// A standalone shortcode recognized at a block boundary.
    Shortcode(Shortcode),
    HorizontalRule,
}

/// Inline elements within a line of text. Inline types nest freely.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text(String),
    CodeSpan(String),
    Strong(Vec<InlineNode>),
    Emphasis(Vec<InlineNode>),
    Link {
        dest: String,
        title: String,
        content: Vec<InlineNode>,
    },
    Image {
        dest: String,
        title: String,
        alt: Vec<InlineNode>,
    },
    /// A shortcode recognized inside a text run (inline placement).
    Shortcode(Shortcode),
    SoftBreak,
    HardBreak,
}

fn collect_block_shortcodes<'a>(nodes: &'a [DocumentNode], found: &mut Vec<&'a Shortcode>) {
    for node in nodes {
        match node {
            DocumentNode::Shortcode(shortcode) => found.push(shortcode),
            DocumentNode::Paragraph(inlines)
            | DocumentNode::Heading {
                content: inlines, ..
            } => collect_inline_shortcodes(inlines, found),
            DocumentNode::Blockquote(document) => {
                collect_block_shortcodes(&document.nodes, found);
            }
            DocumentNode::OrderedList { items, .. } | DocumentNode::UnorderedList { items } => {
                for item in items {
                    collect_block_shortcodes(&item.nodes, found);
                }
            }
            DocumentNode::CodeBlock { .. } | DocumentNode::HorizontalRule => {}
        }
    }
}

fn collect_inline_shortcodes<'a>(inlines: &'a [InlineNode], found: &mut Vec<&'a Shortcode>) {
    for inline in inlines {
        match inline {
            InlineNode::Shortcode(shortcode) => found.push(shortcode),
            InlineNode::Strong(children) | InlineNode::Emphasis(children) => {
                collect_inline_shortcodes(children, found);
            }
            InlineNode::Link { content, .. } => collect_inline_shortcodes(content, found),
            InlineNode::Image { alt, .. } => collect_inline_shortcodes(alt, found),
            _ => {}
        }
    }
}
