use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd};
use shortcodes::{Config, Mode, Recognizer, Serializer};

use crate::document::{Document, DocumentNode, InlineNode};
use crate::rules::{self, InlineRule, ShortcodeRule};
use crate::warning::ParseWarning;

/// The host parsing pipeline.
///
/// Holds the configuration-bound recognizer and serializer for one run;
/// both are immutable once constructed, so a pipeline can be reused across
/// documents and shared across threads.
pub struct Pipeline {
    recognizer: Recognizer,
    serializer: Serializer,
    mode: Mode,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let mode = config.mode;
        Pipeline {
            recognizer: Recognizer::new(config.clone()),
            serializer: Serializer::new(config),
            mode,
        }
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// Parse markdown source into a document tree.
    ///
    /// Never fails: text that looks like a shortcode but does not recognize
    /// stays ordinary content and is reported as a warning.
    pub fn parse(&self, source: &str, file_id: usize) -> (Document, Vec<ParseWarning>) {
        let events: Vec<(Event<'_>, Range<usize>)> =
            CmarkParser::new_ext(source, Options::empty())
                .into_offset_iter()
                .collect();
        ParseState::new(self, file_id).run(&events)
    }

    /// Inline rules in priority order. The scan driver's terminal raw-text
    /// stage is the fallback, so the shortcode rule always runs first.
    fn inline_rules(&self) -> Vec<Box<dyn InlineRule + '_>> {
        vec![Box::new(ShortcodeRule::new(&self.recognizer))]
    }
}

// ---------------------------------------------------------------------------
// Parse state
// ---------------------------------------------------------------------------

struct ParseState<'p> {
    pipeline: &'p Pipeline,
    file_id: usize,
    rules: Vec<Box<dyn InlineRule + 'p>>,
    warnings: Vec<ParseWarning>,
}

/// Adjacent Text events merged back into one run. pulldown-cmark splits
/// text at bracket characters, and recognition must see the run whole.
struct TextRun {
    text: String,
    start: usize,
}

impl TextRun {
    fn new() -> Self {
        TextRun {
            text: String::new(),
            start: 0,
        }
    }

    fn push(&mut self, s: &str, range: &Range<usize>) {
        if self.text.is_empty() {
            self.start = range.start;
        }
        self.text.push_str(s);
    }
}

impl<'p> ParseState<'p> {
    fn new(pipeline: &'p Pipeline, file_id: usize) -> Self {
        ParseState {
            pipeline,
            file_id,
            rules: pipeline.inline_rules(),
            warnings: Vec::new(),
        }
    }

    fn run(mut self, events: &[(Event<'_>, Range<usize>)]) -> (Document, Vec<ParseWarning>) {
        let mut i = 0;
        let nodes = self.collect_blocks(events, &mut i, None);
        (Document { nodes }, self.warnings)
    }

    /// Walk block-level events, stopping after the matching End tag when one
    /// is given (blockquotes, list items).
    fn collect_blocks(
        &mut self,
        events: &[(Event<'_>, Range<usize>)],
        i: &mut usize,
        is_end: Option<&dyn Fn(&TagEnd) -> bool>,
    ) -> Vec<DocumentNode> {
        let mut nodes = Vec::new();

        while *i < events.len() {
            let (ev, range) = &events[*i];
            match ev {
                Event::End(tag_end) if is_end.is_some_and(|f| f(tag_end)) => {
                    *i += 1;
                    break;
                }

                Event::Start(Tag::Paragraph) => {
                    let span = range.clone();
                    *i += 1;
                    let inlines =
                        self.collect_inlines(events, i, &|e| matches!(e, TagEnd::Paragraph));
                    self.push_paragraph(&mut nodes, inlines, span);
                }

                Event::Start(Tag::Heading { level, .. }) => {
                    let level = heading_level_to_u8(level);
                    *i += 1;
                    let content =
                        self.collect_inlines(events, i, &|e| matches!(e, TagEnd::Heading(_)));
                    nodes.push(DocumentNode::Heading { level, content });
                }

                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        pulldown_cmark::CodeBlockKind::Fenced(lang) => {
                            let lang = lang.to_string();
                            if lang.is_empty() { None } else { Some(lang) }
                        }
                        pulldown_cmark::CodeBlockKind::Indented => None,
                    };
                    *i += 1;
                    let content =
                        collect_text_until(events, i, |e| matches!(e, TagEnd::CodeBlock));
                    nodes.push(DocumentNode::CodeBlock { language, content });
                }

                Event::Start(Tag::BlockQuote(_)) => {
                    *i += 1;
                    let inner = self.collect_blocks(
                        events,
                        i,
                        Some(&|e| matches!(e, TagEnd::BlockQuote(_))),
                    );
                    nodes.push(DocumentNode::Blockquote(Document { nodes: inner }));
                }

                Event::Start(Tag::List(start)) => {
                    let start = *start;
                    *i += 1;
                    let items = self.collect_list_items(events, i);
                    nodes.push(match start {
                        Some(n) => DocumentNode::OrderedList { start: n, items },
                        None => DocumentNode::UnorderedList { items },
                    });
                }

                Event::Rule => {
                    nodes.push(DocumentNode::HorizontalRule);
                    *i += 1;
                }

                // Tight list items carry inline content without a paragraph
                // wrapper.
                Event::Text(_)
                | Event::Code(_)
                | Event::SoftBreak
                | Event::HardBreak
                | Event::Start(
                    Tag::Strong | Tag::Emphasis | Tag::Link { .. } | Tag::Image { .. },
                ) => {
                    let span = range.clone();
                    let inlines = self.collect_bare_inlines(events, i);
                    self.push_paragraph(&mut nodes, inlines, span);
                }

                _ => {
                    *i += 1;
                }
            }
        }

        nodes
    }

    fn collect_list_items(
        &mut self,
        events: &[(Event<'_>, Range<usize>)],
        i: &mut usize,
    ) -> Vec<Document> {
        let mut items = Vec::new();

        while *i < events.len() {
            let (ev, _) = &events[*i];
            match ev {
                Event::End(TagEnd::List(_)) => {
                    *i += 1;
                    break;
                }
                Event::Start(Tag::Item) => {
                    *i += 1;
                    let nodes =
                        self.collect_blocks(events, i, Some(&|e| matches!(e, TagEnd::Item)));
                    items.push(Document { nodes });
                }
                _ => {
                    *i += 1;
                }
            }
        }

        items
    }

    /// Collect inline nodes until the matching End tag, consuming it.
    fn collect_inlines(
        &mut self,
        events: &[(Event<'_>, Range<usize>)],
        i: &mut usize,
        is_end: &dyn Fn(&TagEnd) -> bool,
    ) -> Vec<InlineNode> {
        let mut inlines = Vec::new();
        let mut run = TextRun::new();

        while *i < events.len() {
            let (ev, _) = &events[*i];
            if let Event::End(tag_end) = ev {
                if is_end(tag_end) {
                    *i += 1;
                    break;
                }
            }
            if !self.inline_step(events, i, &mut run, &mut inlines) {
                // No inline meaning; don't merge text across dropped content.
                self.flush_run(&mut run, &mut inlines);
                *i += 1;
            }
        }

        self.flush_run(&mut run, &mut inlines);
        inlines
    }

    /// Collect inline content up to the first block-structure event, which
    /// is left for the caller.
    fn collect_bare_inlines(
        &mut self,
        events: &[(Event<'_>, Range<usize>)],
        i: &mut usize,
    ) -> Vec<InlineNode> {
        let mut inlines = Vec::new();
        let mut run = TextRun::new();

        while *i < events.len() {
            if !self.inline_step(events, i, &mut run, &mut inlines) {
                break;
            }
        }

        self.flush_run(&mut run, &mut inlines);
        inlines
    }

    /// Handle one inline-level event. Returns false, without consuming,
    /// for events that do not belong to inline content.
    fn inline_step(
        &mut self,
        events: &[(Event<'_>, Range<usize>)],
        i: &mut usize,
        run: &mut TextRun,
        inlines: &mut Vec<InlineNode>,
    ) -> bool {
        let (ev, range) = &events[*i];
        match ev {
            Event::Text(s) => {
                run.push(s, range);
                *i += 1;
            }
            Event::Code(s) => {
                self.flush_run(run, inlines);
                inlines.push(InlineNode::CodeSpan(s.to_string()));
                *i += 1;
            }
            Event::SoftBreak => {
                self.flush_run(run, inlines);
                inlines.push(InlineNode::SoftBreak);
                *i += 1;
            }
            Event::HardBreak => {
                self.flush_run(run, inlines);
                inlines.push(InlineNode::HardBreak);
                *i += 1;
            }
            Event::Start(Tag::Strong) => {
                self.flush_run(run, inlines);
                *i += 1;
                let children = self.collect_inlines(events, i, &|e| matches!(e, TagEnd::Strong));
                inlines.push(InlineNode::Strong(children));
            }
            Event::Start(Tag::Emphasis) => {
                self.flush_run(run, inlines);
                *i += 1;
                let children =
                    self.collect_inlines(events, i, &|e| matches!(e, TagEnd::Emphasis));
                inlines.push(InlineNode::Emphasis(children));
            }
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                let dest = dest_url.to_string();
                let title = title.to_string();
                self.flush_run(run, inlines);
                *i += 1;
                let content = self.collect_inlines(events, i, &|e| matches!(e, TagEnd::Link));
                inlines.push(InlineNode::Link {
                    dest,
                    title,
                    content,
                });
            }
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                let dest = dest_url.to_string();
                let title = title.to_string();
                self.flush_run(run, inlines);
                *i += 1;
                let alt = self.collect_inlines(events, i, &|e| matches!(e, TagEnd::Image));
                inlines.push(InlineNode::Image { dest, title, alt });
            }
            _ => return false,
        }
        true
    }

    /// Close out a pending text run. In inline placement the run is scanned
    /// by the rule list; in block placement it stays one text node.
    fn flush_run(&mut self, run: &mut TextRun, inlines: &mut Vec<InlineNode>) {
        if run.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut run.text);
        match self.pipeline.mode {
            Mode::Inline => {
                let nodes = rules::scan_run(
                    &text,
                    &self.rules,
                    run.start,
                    self.file_id,
                    &mut self.warnings,
                );
                inlines.extend(nodes);
            }
            Mode::Block => inlines.push(InlineNode::Text(text)),
        }
    }

    /// Finish a paragraph: in block placement, occurrences at the paragraph
    /// start are promoted to standalone nodes first.
    fn push_paragraph(
        &mut self,
        nodes: &mut Vec<DocumentNode>,
        inlines: Vec<InlineNode>,
        span: Range<usize>,
    ) {
        if inlines.is_empty() {
            return;
        }
        match self.pipeline.mode {
            Mode::Block => nodes.extend(self.promote_block_occurrences(inlines, span)),
            Mode::Inline => nodes.push(DocumentNode::Paragraph(inlines)),
        }
    }

    /// Block-mode placement: consume occurrences from the paragraph's start,
    /// one per iteration. The first position that does not recognize stops
    /// promotion; whatever remains stays an ordinary paragraph.
    fn promote_block_occurrences(
        &mut self,
        mut inlines: Vec<InlineNode>,
        span: Range<usize>,
    ) -> Vec<DocumentNode> {
        let recognizer = self.pipeline.recognizer();
        let mut out = Vec::new();
        let mut offset = span.start;

        loop {
            let Some(InlineNode::Text(text)) = inlines.first() else {
                break;
            };
            match recognizer.recognize(text) {
                Some(found) => {
                    let rest = text[found.consumed..].trim_start();
                    offset += text.len() - rest.len();
                    let rest = rest.to_string();
                    out.push(DocumentNode::Shortcode(found.node));
                    if rest.is_empty() {
                        inlines.remove(0);
                        // Drop the break separating this occurrence from the
                        // next one.
                        while matches!(
                            inlines.first(),
                            Some(InlineNode::SoftBreak | InlineNode::HardBreak)
                        ) {
                            inlines.remove(0);
                        }
                    } else {
                        inlines[0] = InlineNode::Text(rest);
                    }
                }
                None => {
                    if let Some(d) = rules::diagnose_candidate(recognizer, text) {
                        self.warnings.push(
                            ParseWarning::new(
                                d.message,
                                offset + d.span.start..offset + d.span.end,
                                self.file_id,
                            )
                            .with_note("the text was kept as ordinary content"),
                        );
                    }
                    break;
                }
            }
        }

        if !inlines.is_empty() {
            out.push(DocumentNode::Paragraph(inlines));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn heading_level_to_u8(level: &HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Collect all text content until a matching End tag.
fn collect_text_until(
    events: &[(Event<'_>, Range<usize>)],
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ev, _) = &events[*i];
        match ev {
            Event::End(tag_end) if is_end(tag_end) => {
                *i += 1;
                break;
            }
            Event::Text(s) => {
                text.push_str(s);
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    text
}
