//! Integration tests for input providers and the scrape pipeline.

use std::fs;
use std::path::PathBuf;

use sieve_common::warning::has_warned;
use sieve_scrape::{
    FileSource, InlineSource, InputProvider, LiveDocumentSource, LoadError, Node, ParserConfig,
    ScrapeError, Scraper, SuppressionRule, UrlSource, source_for,
};

const COURSES: &str = r#"
<div class="courselist-c"><span class="name">Algebra</span></div>
<div class="courselist-c"><span class="name">Geometry</span></div>
"#;

/// Helper to write markup to a unique temporary file
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sieve-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn test_inline_source() {
    let source = InlineSource::new(COURSES);
    assert_eq!(source.describe(), "<inline>");
    assert_eq!(source.read().unwrap(), COURSES);
}

#[test]
fn test_live_document_source_wraps_root() {
    let source = LiveDocumentSource::new("<body><p class=\"x\">hi</p></body>");
    assert_eq!(
        source.read().unwrap(),
        "<html><body><p class=\"x\">hi</p></body></html>"
    );

    let document = Scraper::default().load(&source).unwrap();
    assert_eq!(document.nodes.len(), 1);
    assert_eq!(document.nodes[0].tag_name(), "html");
    assert_eq!(Scraper::extract_first(&document, "x").unwrap().text_content(), "hi");
}

#[test]
fn test_extract_all_matches_in_order() {
    let document = Scraper::default().load(&InlineSource::new(COURSES)).unwrap();
    let names: Vec<String> = Scraper::extract(&document, "name")
        .into_iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(names, vec!["Algebra", "Geometry"]);
    assert_eq!(Scraper::extract(&document, "courselist-c").len(), 2);
    assert!(Scraper::extract(&document, "missing").is_empty());
}

#[test]
fn test_file_source() {
    let path = temp_file("file-source.html", COURSES);
    let source = FileSource::new(&path);
    assert_eq!(source.describe(), path.display().to_string());

    let document = Scraper::default().load(&source).unwrap();
    assert_eq!(Scraper::extract(&document, "name").len(), 2);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_file_is_a_load_error() {
    let path = std::env::temp_dir().join("sieve-definitely-missing.html");
    let error = Scraper::default().load(&FileSource::new(&path)).unwrap_err();
    assert!(matches!(error, ScrapeError::Load(LoadError::File { .. })));
    assert!(error.to_string().starts_with("failed to read '"));
}

#[test]
fn test_parse_error_names_the_source() {
    let source = InlineSource::labelled("page.html", "<div>\n<p></div>");
    let error = Scraper::default().load(&source).unwrap_err();
    assert!(matches!(error, ScrapeError::Parse { .. }));
    assert_eq!(
        error.to_string(),
        "page.html: [line:2]: expected ending for tag 'p', got div"
    );
}

#[test]
fn test_scraper_applies_config() {
    let markup = r#"<div class="dup">1</div><div class="dup">2</div>"#;
    let config: ParserConfig =
        ParserConfig::new().with_rule(SuppressionRule::collapse("dup"));
    let scraper = Scraper::new(config);
    let document = scraper.load(&InlineSource::new(markup)).unwrap();
    let texts: Vec<String> = Scraper::extract(&document, "dup")
        .into_iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(texts, vec!["1", ""]);
    assert_eq!(scraper.config().rules.len(), 1);
}

#[test]
fn test_source_for_location() {
    assert_eq!(
        source_for("https://example.com/list").describe(),
        "https://example.com/list"
    );
    assert_eq!(source_for("pages/list.html").describe(), "pages/list.html");
    assert_eq!(UrlSource::new("http://a.test").describe(), "http://a.test");
}

#[test]
fn test_load_forgets_earlier_warnings() {
    let scraper = Scraper::default();
    let stray = InlineSource::new("<p>a</p></x-forgotten>");
    let document = scraper.load(&stray).unwrap();
    assert_eq!(document.nodes[1], Node::illegal("x-forgotten"));

    let _ = scraper.load(&InlineSource::new(COURSES)).unwrap();
    assert!(!has_warned(
        "Parser",
        "recovered stray closing tag </x-forgotten>"
    ));
}
