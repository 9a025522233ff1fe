use markdown::{Document, DocumentNode, Emitter, InlineNode, ParseWarning, Pipeline};
use shortcodes::{Config, Mode, Shortcode};

fn parse(source: &str) -> (Document, Vec<ParseWarning>) {
    Pipeline::new(Config::default()).parse(source, 0)
}

fn parse_inline(source: &str) -> (Document, Vec<ParseWarning>) {
    let config = Config {
        mode: Mode::Inline,
        ..Config::default()
    };
    Pipeline::new(config).parse(source, 0)
}

fn paragraph(text: &str) -> DocumentNode {
    DocumentNode::Paragraph(vec![InlineNode::Text(text.to_string())])
}

fn emit(pipeline: &Pipeline, document: &Document) -> String {
    Emitter::new(pipeline.serializer()).emit(document)
}

#[test]
fn block_shortcode_without_attributes() {
    let (document, warnings) = parse("Drum and Bass\n\n[[ Youtube ]]");
    assert_eq!(
        document.nodes,
        vec![
            paragraph("Drum and Bass"),
            DocumentNode::Shortcode(Shortcode::new("Youtube")),
        ]
    );
    assert!(warnings.is_empty());
}

#[test]
fn block_shortcode_with_attributes() {
    let (document, warnings) = parse(
        "Drum and Bass\n\n[[ Youtube id=3 share_code=\"abc\" share-code=\"def\" ]]\n\nTest sentence",
    );
    assert_eq!(
        document.nodes,
        vec![
            paragraph("Drum and Bass"),
            DocumentNode::Shortcode(
                Shortcode::new("Youtube")
                    .with_attribute("id", "3")
                    .with_attribute("share_code", "abc")
                    .with_attribute("share-code", "def")
            ),
            paragraph("Test sentence"),
        ]
    );
    assert!(warnings.is_empty());
}

#[test]
fn block_shortcode_with_custom_delimiters() {
    let config = Config {
        start_block: "{{%".to_string(),
        end_block: "%}}".to_string(),
        ..Config::default()
    };
    let (document, warnings) = Pipeline::new(config)
        .parse("Drum and Bass\n\n{{% Youtube id=3 share-code=\"abc\" %}}\n\nTest sentence", 0);
    assert_eq!(
        document.nodes,
        vec![
            paragraph("Drum and Bass"),
            DocumentNode::Shortcode(
                Shortcode::new("Youtube")
                    .with_attribute("id", "3")
                    .with_attribute("share-code", "abc")
            ),
            paragraph("Test sentence"),
        ]
    );
    assert!(warnings.is_empty());
}

#[test]
fn consecutive_block_shortcodes_in_one_paragraph() {
    let (document, _) = parse("[[ First ]]\n[[ Second id=2 ]]");
    assert_eq!(
        document.nodes,
        vec![
            DocumentNode::Shortcode(Shortcode::new("First")),
            DocumentNode::Shortcode(Shortcode::new("Second").with_attribute("id", "2")),
        ]
    );
}

#[test]
fn trailing_text_after_block_shortcode_stays_a_paragraph() {
    let (document, _) = parse("[[ Youtube ]] and then some");
    assert_eq!(
        document.nodes,
        vec![
            DocumentNode::Shortcode(Shortcode::new("Youtube")),
            paragraph("and then some"),
        ]
    );
}

#[test]
fn text_before_occurrence_keeps_the_paragraph_ordinary() {
    let (document, _) = parse("watch this: [[ Youtube ]]");
    assert_eq!(document.nodes, vec![paragraph("watch this: [[ Youtube ]]")]);
}

#[test]
fn empty_body_stays_text_and_warns() {
    let (document, warnings) = parse("Before\n\n[[ ]]\n\nAfter");
    assert_eq!(
        document.nodes,
        vec![paragraph("Before"), paragraph("[[ ]]"), paragraph("After")]
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "shortcode body is malformed");
}

#[test]
fn unterminated_occurrence_stays_text_and_warns() {
    let (document, warnings) = parse("[[ Youtube");
    assert_eq!(document.nodes, vec![paragraph("[[ Youtube")]);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "'[[' has no matching ']]'");
}

#[test]
fn inline_mode_splits_the_text_run() {
    let (document, warnings) = parse_inline("Watch [[ Youtube id=3 ]] now");
    assert_eq!(
        document.nodes,
        vec![DocumentNode::Paragraph(vec![
            InlineNode::Text("Watch ".to_string()),
            InlineNode::Shortcode(Shortcode::new("Youtube").with_attribute("id", "3")),
            InlineNode::Text(" now".to_string()),
        ])]
    );
    assert!(warnings.is_empty());
}

#[test]
fn inline_mode_recognizes_inside_emphasis() {
    let (document, _) = parse_inline("*see [[ Youtube ]]*");
    assert_eq!(
        document.nodes,
        vec![DocumentNode::Paragraph(vec![InlineNode::Emphasis(vec![
            InlineNode::Text("see ".to_string()),
            InlineNode::Shortcode(Shortcode::new("Youtube")),
        ])])]
    );
}

#[test]
fn inline_mode_leaves_code_spans_alone() {
    let (document, warnings) = parse_inline("`[[ Youtube ]]`");
    assert_eq!(
        document.nodes,
        vec![DocumentNode::Paragraph(vec![InlineNode::CodeSpan(
            "[[ Youtube ]]".to_string()
        )])]
    );
    assert!(warnings.is_empty());
}

#[test]
fn code_blocks_are_never_scanned() {
    let (document, warnings) = parse("```\n[[ Youtube ]]\n```");
    assert_eq!(
        document.nodes,
        vec![DocumentNode::CodeBlock {
            language: None,
            content: "[[ Youtube ]]\n".to_string(),
        }]
    );
    assert!(warnings.is_empty());
}

#[test]
fn block_mode_does_not_recognize_mid_paragraph() {
    let (document, warnings) = parse_inline("a [[ Youtube ]] b");
    assert_eq!(document.nodes.len(), 1);
    assert!(warnings.is_empty());

    let (document, _) = parse("a [[ Youtube ]] b");
    assert_eq!(document.nodes, vec![paragraph("a [[ Youtube ]] b")]);
}

#[test]
fn emit_normalizes_unquoted_values() {
    let pipeline = Pipeline::new(Config::default());
    let (document, _) = pipeline.parse("Drum and Bass\n\n[[ Youtube id=3 ]]\n\nTest sentence", 0);
    assert_eq!(
        emit(&pipeline, &document),
        "Drum and Bass\n\n[[ Youtube id=\"3\" ]]\n\nTest sentence\n"
    );
}

#[test]
fn emit_is_idempotent_after_normalization() {
    let pipeline = Pipeline::new(Config::default());
    let source = "Intro\n\n[[ Youtube id=3 e='x' ]]\n\n# Title\n\ndone";
    let (document, _) = pipeline.parse(source, 0);
    let once = emit(&pipeline, &document);
    let (document, _) = pipeline.parse(&once, 0);
    let twice = emit(&pipeline, &document);
    assert_eq!(once, twice);
}

#[test]
fn emit_round_trips_canonical_block_document() {
    let pipeline = Pipeline::new(Config::default());
    let source = "Drum and Bass\n\n[[ Youtube id=\"3\" ]]\n\nTest sentence\n";
    let (document, _) = pipeline.parse(source, 0);
    assert_eq!(emit(&pipeline, &document), source);
}

#[test]
fn inline_emit_keeps_surrounding_text() {
    let config = Config {
        mode: Mode::Inline,
        ..Config::default()
    };
    let pipeline = Pipeline::new(config);
    let (document, _) = pipeline.parse("Watch [[ Youtube id=3 ]] now", 0);
    assert_eq!(
        emit(&pipeline, &document),
        "Watch [[ Youtube id=\"3\" ]] now\n"
    );
}

#[test]
fn shortcodes_accessor_walks_the_whole_tree() {
    let (document, _) = parse_inline("a [[ One ]] b\n\n> quoted [[ Two ]]\n\n- item [[ Three ]]");
    let names: Vec<&str> = document
        .shortcodes()
        .iter()
        .map(|s| s.identifier.as_str())
        .collect();
    assert_eq!(names, ["One", "Two", "Three"]);
}

#[test]
fn block_shortcode_inside_blockquote() {
    let (document, _) = parse("> [[ Youtube ]]");
    assert_eq!(
        document.nodes,
        vec![DocumentNode::Blockquote(Document {
            nodes: vec![DocumentNode::Shortcode(Shortcode::new("Youtube"))],
        })]
    );
}

#[test]
fn warning_spans_point_into_the_source() {
    let source = "Before\n\n[[ broken";
    let (_, warnings) = parse(source);
    assert_eq!(warnings.len(), 1);
    let span = warnings[0].span.clone();
    assert_eq!(&source[span], "[[");
}

#[test]
fn headings_and_rules_survive() {
    let (document, _) = parse("# Title\n\n[[ Youtube ]]\n\n---");
    assert_eq!(
        document.nodes,
        vec![
            DocumentNode::Heading {
                level: 1,
                content: vec![InlineNode::Text("Title".to_string())],
            },
            DocumentNode::Shortcode(Shortcode::new("Youtube")),
            DocumentNode::HorizontalRule,
        ]
    );
}
