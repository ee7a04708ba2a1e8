//! Integration tests for subtree suppression rules.

use sieve_dom::{Attribute, Document, Node};
use sieve_html::{ParserConfig, SuppressionAction, SuppressionRule, parse, parse_with_config};

const COURSE_LIST: &str = include_str!("data/course-list.html");

/// Helper to parse with a config, expecting success
fn parse_config(html: &str, config: ParserConfig) -> Document {
    parse_with_config(html, config).expect("markup should parse")
}

/// Helper to get the element with the given `id`
fn by_id<'a>(document: &'a Document, id: &str) -> &'a Node {
    fn find<'a>(node: &'a Node, id: &str) -> Option<&'a Node> {
        if node.as_element().and_then(|data| data.id()) == Some(id) {
            return Some(node);
        }
        node.children().iter().find_map(|child| find(child, id))
    }
    document
        .nodes
        .iter()
        .find_map(|node| find(node, id))
        .expect("element with id")
}

#[test]
fn test_empty_rule_list_matches_plain_grammar() {
    let plain = parse(COURSE_LIST).unwrap();
    let configured = parse_config(COURSE_LIST, ParserConfig::new());
    assert_eq!(plain, configured);
}

#[test]
fn test_reference_rules_on_course_list() {
    let document = parse_config(COURSE_LIST, ParserConfig::reference());
    let main = by_id(&document, "main");
    let children = main.children();
    assert_eq!(children.len(), 6);

    // the first two notice tables are skipped, the third is kept
    assert!(children[0].children().is_empty());
    assert!(children[1].children().is_empty());
    assert!(!children[2].children().is_empty());
    assert_eq!(document.all_by_class("course").len(), 2);
    assert!(!main.text_content().contains("Notice"));

    // the repeated summary block collapses to an empty placeholder and its
    // content follows it as a sibling
    assert_eq!(children[3].tag_name(), "div");
    assert!(!children[3].children().is_empty());
    assert_eq!(children[4].tag_name(), "div");
    assert!(children[4].children().is_empty());
    assert_eq!(children[5].tag_name(), "span");
    assert_eq!(document.all_by_class("total").len(), 2);

    // the placeholder's closer ends `main`, so `main`'s own closer is stray
    let body = &document.nodes[0].children()[0];
    assert_eq!(body.children().len(), 2);
    assert_eq!(body.children()[1], Node::illegal("div"));
}

#[test]
fn test_suppressed_element_keeps_attributes() {
    let document = parse_config(COURSE_LIST, ParserConfig::reference());
    let skipped = document.first_by_class("my-infolist-body").unwrap();
    assert_eq!(skipped.tag_name(), "table");
    assert!(skipped.children().is_empty());
    assert_eq!(document.all_by_class("my-infolist-body").len(), 3);
}

#[test]
fn test_predicate_needs_exact_single_value() {
    let html = r#"<div class="ad wide"><p>kept</p></div>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("ad", "div", 5));
    let document = parse_config(html, config);
    assert_eq!(document.nodes[0].text_content(), "kept");
}

#[test]
fn test_skip_to_anchor_beyond_element() {
    let html = r#"<section><table><tr><td class="ad"><b>x</b></td></tr></table><p>next</p></section>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("ad", "tr", 1));
    let document = parse_config(html, config);

    // `</tr>` was consumed by the skip, so the row ends with the cell
    let table = &document.nodes[0].children()[0];
    assert_eq!(table.tag_name(), "table");
    let row = &table.children()[0];
    assert_eq!(row.tag_name(), "tr");
    assert_eq!(row.children().len(), 1);
    assert_eq!(row.children()[0].tag_name(), "td");
    assert!(row.children()[0].children().is_empty());
    assert_eq!(document.nodes[0].children()[1].text_content(), "next");
}

#[test]
fn test_skip_balances_nested_anchor() {
    let html = r#"<div class="wrap"><div><p>a</p></div><div/>b</div><p>c</p>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("wrap", "div", 1));
    let document = parse_config(html, config);
    assert_eq!(document.nodes.len(), 2);
    assert!(document.nodes[0].children().is_empty());
    assert_eq!(document.nodes[1].text_content(), "c");
}

#[test]
fn test_skip_from_self_closed_element_ends_enclosing_element() {
    let html = r#"<section><div><div class="ad"/><p>x</p></div><p>y</p></section>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("ad", "div", 1));
    let document = parse_config(html, config);

    // the `</div>` reached by the skip belongs to the enclosing div
    let section = &document.nodes[0];
    assert_eq!(section.children().len(), 2);
    let outer = &section.children()[0];
    assert_eq!(outer.tag_name(), "div");
    assert_eq!(outer.children().len(), 1);
    assert!(outer.children()[0].children().is_empty());
    assert_eq!(section.children()[1].text_content(), "y");
}

#[test]
fn test_skip_from_void_element_ends_enclosing_element() {
    let html = r#"<ul><li><img class="ad"><b>x</b></li><li>ok</li></ul>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("ad", "li", 1));
    let document = parse_config(html, config);
    let items = document.nodes[0].children();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].children().len(), 1);
    assert_eq!(items[0].children()[0].tag_name(), "img");
    assert_eq!(items[1].text_content(), "ok");
}

#[test]
fn test_skip_without_anchor_fails() {
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("x", "table", 1));
    let error = parse_with_config(r#"<div class="x"><p>no table</p></div>"#, config).unwrap_err();
    assert_eq!(
        error.to_string(),
        "[line:1]: unexpected end of input while skipping to </table>"
    );
}

#[test]
fn test_collapse_parses_content_as_siblings() {
    let html = r#"<div class="c">a</div><div class="c">b</div><p>after</p>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::collapse("c"));
    let document = parse_config(html, config);
    let class = || vec![Attribute::with_raw_value("class", "c")];
    assert_eq!(
        document.nodes,
        vec![
            Node::element("div", class(), vec![Node::text("a")]),
            Node::element("div", class(), Vec::new()),
            Node::text("b"),
            Node::illegal("div"),
            Node::element("p", Vec::new(), vec![Node::text("after")]),
        ]
    );
}

#[test]
fn test_collapse_inside_element() {
    let html = r#"<section><i class="c">1</i><i class="c">2</i></section>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::collapse("c"));
    let document = parse_config(html, config);
    let children = document.nodes[0].children();
    assert_eq!(children.len(), 4);
    assert!(children[1].children().is_empty());
    assert_eq!(children[2], Node::text("2"));
    assert_eq!(children[3], Node::illegal("i"));
}

#[test]
fn test_collapse_bounded_by_max_applications() {
    let html = r#"<i class="d">1</i><i class="d">2</i><i class="d">3</i>"#;
    let config =
        ParserConfig::new().with_rule(SuppressionRule::collapse("d").with_max_applications(1));
    let document = parse_config(html, config);
    assert_eq!(document.nodes.len(), 5);
    assert_eq!(document.nodes[0].text_content(), "1");
    assert!(document.nodes[1].children().is_empty());
    assert_eq!(document.nodes[2], Node::text("2"));
    assert_eq!(document.nodes[3], Node::illegal("i"));
    assert_eq!(document.nodes[4].text_content(), "3");
}

#[test]
fn test_collapse_of_self_closed_element() {
    let html = r#"<hr class="d"/><hr class="d"/><p>x</p>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::collapse("d"));
    let document = parse_config(html, config);
    assert_eq!(document.nodes.len(), 3);
    assert_eq!(document.nodes[2].text_content(), "x");
}

#[test]
fn test_first_firing_rule_wins() {
    let html = r#"<div id="a" class="z"><p>1</p></div><div id="b" class="z"><p>2</p></div>"#;
    let config = ParserConfig::new()
        .with_rule(SuppressionRule::collapse("z"))
        .with_rule(SuppressionRule::skip_to("z", "div", 1));
    let document = parse_config(html, config);

    // the collapse rule lets its first match through, so the skip fires there
    assert!(by_id(&document, "a").children().is_empty());
    // the second match is collapsed by the first rule
    assert!(by_id(&document, "b").children().is_empty());
    assert_eq!(document.nodes.len(), 4);
    assert_eq!(document.nodes[2].text_content(), "2");
    assert_eq!(document.nodes[3], Node::illegal("div"));
}

#[test]
fn test_counters_are_per_parse() {
    let html = r#"<b class="x">1</b><b class="x">2</b>"#;
    let config = ParserConfig::new().with_rule(SuppressionRule::skip_to("x", "b", 1));
    for _ in 0..2 {
        let document = parse_config(html, config.clone());
        assert_eq!(document.nodes[0].text_content(), "");
        assert_eq!(document.nodes[1].text_content(), "2");
    }
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "rules": [
            { "value": "ad", "action": { "kind": "skip_to", "anchor": "section" }, "max_applications": 1 },
            { "value": "dup", "action": { "kind": "collapse" } }
        ]
    }"#;
    let config: ParserConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config,
        ParserConfig::new()
            .with_rule(SuppressionRule::skip_to("ad", "section", 1))
            .with_rule(SuppressionRule::collapse("dup"))
    );
    assert!(matches!(
        config.rules[0].action,
        SuppressionAction::SkipTo { ref anchor } if anchor == "section"
    ));

    let empty: ParserConfig = serde_json::from_str("{}").unwrap();
    assert!(empty.rules.is_empty());
}
