use pretty_assertions::assert_eq;
use serde_json::json;
use usfm2json::{
    DiagnosticKind, DiscardMarkers, LeveledHandler, LineRecord, Node, ParseOptions, Renderer,
    UsfmParser, UsfmRenderer, MAX_NESTING,
};

const SAMPLE: &str = include_str!("fixtures/sample.usfm");

fn sample_parser() -> UsfmParser {
    UsfmParser::new(ParseOptions {
        log_diagnostics: false,
        ..Default::default()
    })
    .with_handler(LeveledHandler::new("s"))
    .with_element_hook(DiscardMarkers::new(["f", "x"]))
}

#[test]
fn sample_document_records() {
    let document = sample_parser().parse(SAMPLE).expect("sample should parse");

    let actual = serde_json::to_value(&document.records).expect("records should serialize");
    let expected = json!([
        {
            "tag": "id",
            "tagClass": "id",
            "contentRaw": "JHN Example fixture",
            "content": ["JHN Example fixture"]
        },
        { "tag": "h", "tagClass": "h", "contentRaw": "John", "content": ["John"] },
        {
            "tag": "mt1",
            "tagClass": "mt",
            "level": 1,
            "contentRaw": "The Gospel of \\bd John\\bd*",
            "content": ["The Gospel of ", { "tag": "bd", "content": ["John"] }]
        },
        { "tag": "c", "tagClass": "c", "num": 1, "contentRaw": "1" },
        {
            "tag": "s1",
            "tagClass": "s",
            "level": 1,
            "contentRaw": "The Word",
            "content": ["The Word"]
        },
        { "tag": "p", "tagClass": "p" },
        {
            "tag": "v",
            "tagClass": "v",
            "num": 1,
            "contentRaw": "1 In the beginning was the \\w Word|lemma=\"logos\" strong=\"G3056\"\\w*, and the Word was with \\nd God\\nd*.",
            "content": [
                "In the beginning was the ",
                {
                    "tag": "w",
                    "params": { "lemma": "logos", "strong": "G3056" },
                    "content": ["Word"]
                },
                ", and the Word was with ",
                { "tag": "nd", "content": ["God"] },
                "."
            ]
        },
        {
            "tag": "v",
            "tagClass": "v",
            "num": 2,
            "contentRaw": "2 He was in the beginning\\f + \\fr 1:2 \\ft Or \\it from\\it* the start\\f* with God.",
            "content": ["He was in the beginning", " with God."]
        },
        {
            "tag": "q1",
            "tagClass": "q",
            "level": 1,
            "contentRaw": "All things \\add were\\* made",
            "content": ["All things ", { "tag": "add", "content": ["were"] }, " made"]
        },
        {
            "tag": "q2",
            "tagClass": "q",
            "level": 2,
            "contentRaw": "through him \\z* indeed",
            "content": ["through him \\z* indeed"]
        },
        { "tag": "b", "tagClass": "b" }
    ]);
    assert_eq!(actual, expected);
}

#[test]
fn sample_document_diagnostics() {
    let document = sample_parser().parse(SAMPLE).expect("sample should parse");

    assert_eq!(document.diagnostics.len(), 1);
    let diagnostic = &document.diagnostics[0];
    assert_eq!(diagnostic.line, 11);
    assert_eq!(diagnostic.column, 12);
    assert_eq!(
        diagnostic.kind,
        DiagnosticKind::UnmatchedCloser {
            marker: "z".to_string(),
            open: None,
        }
    );
}

#[test]
fn streamed_records_match_collected_records() {
    let parser = sample_parser();
    let collected = parser.parse(SAMPLE).expect("sample should parse");

    let mut streamed: Vec<LineRecord> = Vec::new();
    let diagnostics = parser
        .parse_with(SAMPLE, |record| streamed.push(record))
        .expect("sample should parse");

    assert_eq!(streamed, collected.records);
    assert_eq!(diagnostics, collected.diagnostics);
}

#[test]
fn bare_parser_sends_everything_to_fallback() {
    let parser = UsfmParser::bare(ParseOptions {
        log_diagnostics: false,
        ..Default::default()
    });
    let document = parser.parse(SAMPLE).expect("sample should parse");

    let chapter = &document.records[3];
    assert_eq!(chapter.tag, "c");
    assert_eq!(chapter.number, None);
    assert_eq!(chapter.content.as_ref().map(Vec::len), Some(1));

    let heading = &document.records[4];
    assert_eq!(heading.tag_class, "s");
    assert_eq!(heading.level, Some(1));

    let footnoted = &document.records[7];
    let texts = footnoted
        .content
        .as_ref()
        .map(|nodes| nodes.iter().filter_map(|n| n.as_text()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(texts.first().copied(), Some("2 He was in the beginning"));
    assert!(footnoted
        .content
        .as_ref()
        .is_some_and(|nodes| nodes.iter().any(|n| n.as_element().is_some_and(|e| e.name == "f"))));
}

#[test]
fn deeply_nested_openers_parse_render_and_drop() {
    let line = format!("\\p {}", "\\a ".repeat(100_000));
    let document = sample_parser().parse(&line).expect("line should parse");

    assert_eq!(document.diagnostics.len(), 1);
    assert!(matches!(
        &document.diagnostics[0].kind,
        DiagnosticKind::NestingTooDeep { marker, limit } if marker == "a" && *limit == MAX_NESTING
    ));

    let mut depth = 0;
    let mut level = document.records[0].content.as_deref().unwrap_or_default();
    while let Some(Node::Element(element)) = level.first() {
        depth += 1;
        level = element.children.as_slice();
    }
    assert_eq!(depth, MAX_NESTING);

    let rendered = UsfmRenderer.render(&document).expect("rendering should work");
    assert!(rendered.ends_with("\\a*\n"));
    drop(document);

    let reparsed = sample_parser().parse(&rendered).expect("rendered line should parse");
    assert_eq!(reparsed.diagnostics.len(), 1);
}
