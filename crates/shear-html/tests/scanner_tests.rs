//! Integration tests for the tag-soup scanner.

use quickcheck_macros::quickcheck;
use shear_html::elements::is_void;
use shear_html::{EndTag, Event, ScanError, Scanner, TagRef};

/// Helper to scan a string and return the events
fn scan(input: &str) -> Vec<Event<'_>> {
    Scanner::new(input)
        .collect::<Result<Vec<_>, _>>()
        .expect("scan should succeed")
}

fn end(name: &str, implied: bool) -> Event<'_> {
    Event::EndTag(EndTag { name, implied })
}

fn text_of<'a>(event: &Event<'a>) -> &'a str {
    match event {
        Event::Text(text) => text.text,
        other => panic!("Expected Text event, got {other:?}"),
    }
}

fn start_name<'a>(event: &Event<'a>) -> &'a str {
    match event {
        Event::StartTag(tag) => tag.name,
        other => panic!("Expected StartTag event, got {other:?}"),
    }
}

#[test]
fn test_plain_text() {
    let events = scan("Hello");
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Text(text) => {
            assert_eq!(text.text, "Hello");
            assert!(text.previous.is_none());
            assert!(text.next.is_none());
        }
        _ => panic!("Expected Text event"),
    }
}

#[test]
fn test_doctype_keeps_literal_text() {
    let events = scan("<!doctype  html>x");
    assert_eq!(events[0], Event::Doctype("<!doctype  html>"));
    assert_eq!(text_of(&events[1]), "x");
}

#[test]
fn test_comment_interior() {
    let events = scan("<!-- a -->b");
    assert_eq!(events[0], Event::Comment(" a "));
    assert_eq!(text_of(&events[1]), "b");
}

#[test]
fn test_unterminated_comment_is_fatal() {
    let mut scanner = Scanner::new("<p>x</p><!-- never closed");
    let results: Vec<_> = scanner.by_ref().collect();
    assert_eq!(
        results.last(),
        Some(&Err(ScanError::UnterminatedComment { offset: 8 }))
    );
    assert!(scanner.next().is_none());
}

#[test]
fn test_ignore_blocks() {
    let events = scan("<% if x %>y<?php echo 1 ?>");
    assert_eq!(events[0], Event::Ignore("<% if x %>"));
    assert_eq!(text_of(&events[1]), "y");
    assert_eq!(events[2], Event::Ignore("<?php echo 1 ?>"));
}

#[test]
fn test_unterminated_ignore_is_fatal() {
    let first = Scanner::new("<?php echo 1").next();
    assert_eq!(first, Some(Err(ScanError::UnterminatedIgnore { offset: 0 })));
}

#[test]
fn test_tag_inside_quoted_attribute_is_not_tokenized() {
    let events = scan(r#"<p title="</p>">x</p>"#);
    assert_eq!(events.len(), 3);
    match &events[0] {
        Event::StartTag(tag) => {
            assert_eq!(tag.name, "p");
            assert_eq!(tag.attributes[0].name, "title");
            assert_eq!(tag.attributes[0].value, Some("</p>"));
        }
        _ => panic!("Expected StartTag event"),
    }
    assert_eq!(text_of(&events[1]), "x");
    assert_eq!(events[2], end("p", false));
}

#[test]
fn test_attribute_value_forms() {
    let events = scan(r"<a title='it\'s' href=/x data-flag>");
    match &events[0] {
        Event::StartTag(tag) => {
            assert_eq!(tag.attributes.len(), 3);
            assert_eq!(tag.attributes[0].value, Some(r"it\'s"));
            assert_eq!(tag.attributes[1].value, Some("/x"));
            assert_eq!(tag.attributes[2].name, "data-flag");
            assert!(!tag.attributes[2].has_value());
        }
        _ => panic!("Expected StartTag event"),
    }
}

#[test]
fn test_valueless_is_distinct_from_empty() {
    let events = scan(r#"<input disabled value="">"#);
    match &events[0] {
        Event::StartTag(tag) => {
            assert_eq!(tag.attributes[0].value, None);
            assert_eq!(tag.attributes[1].value, Some(""));
        }
        _ => panic!("Expected StartTag event"),
    }
}

#[test]
fn test_escaped_value_is_computed_once() {
    let events = scan(r#"<p ng-class='"test"'></p>"#);
    match &events[0] {
        Event::StartTag(tag) => {
            assert_eq!(
                tag.attributes[0].escaped_value.as_deref(),
                Some("&quot;test&quot;")
            );
        }
        _ => panic!("Expected StartTag event"),
    }
}

#[test]
fn test_raw_text_is_not_tokenized() {
    let events = scan("<script>if (a<b) { x = '</p>' }</script>");
    assert_eq!(start_name(&events[0]), "script");
    assert_eq!(text_of(&events[1]), "if (a<b) { x = '</p>' }");
    assert_eq!(events[2], end("script", false));
}

#[test]
fn test_raw_text_keeps_comment_markers() {
    let events = scan("<script><!--x--></script>");
    assert_eq!(text_of(&events[1]), "<!--x-->");
}

#[test]
fn test_raw_text_close_is_case_insensitive() {
    let events = scan("<style>a{}</STYLE>b");
    assert_eq!(text_of(&events[1]), "a{}");
    assert_eq!(events[2], end("style", false));
    assert_eq!(text_of(&events[3]), "b");
}

#[test]
fn test_unterminated_raw_text_is_lenient() {
    let mut scanner = Scanner::new("<script>alert(1)");
    let events: Vec<_> = scanner
        .by_ref()
        .collect::<Result<_, _>>()
        .expect("scan should succeed");
    assert_eq!(text_of(&events[1]), "alert(1)");
    assert_eq!(events[2], end("script", true));
    assert_eq!(scanner.issues().len(), 1);
}

#[test]
fn test_closes_itself() {
    let events = scan("<ul><li>a<li>b</ul>");
    assert_eq!(start_name(&events[1]), "li");
    assert_eq!(events[3], end("li", true));
    assert_eq!(start_name(&events[4]), "li");
    assert_eq!(events[6], end("li", true));
    assert_eq!(events[7], end("ul", false));
    assert_eq!(events.len(), 8);
}

#[test]
fn test_paragraph_closes_itself() {
    let events = scan("<p>a<p>b");
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::EndTag(EndTag { implied: true, .. })))
            .count(),
        2
    );
}

#[test]
fn test_void_elements_are_never_pushed() {
    let events = scan(r"<div><img src=a><br></div>");
    assert_eq!(events.len(), 4);
    assert_eq!(events[3], end("div", false));
}

#[test]
fn test_self_closing_is_never_pushed() {
    let events = scan("<div/>x");
    match &events[0] {
        Event::StartTag(tag) => assert!(tag.self_closing),
        _ => panic!("Expected StartTag event"),
    }
    assert_eq!(events.len(), 2);
}

#[test]
fn test_source_closes_itself_but_is_not_void() {
    let events = scan("<audio><source src=a><source src=b></audio>");
    assert_eq!(events[2], end("source", true));
    assert_eq!(events[4], end("source", true));
    assert_eq!(events[5], end("audio", false));
}

#[test]
fn test_unmatched_end_tag_is_absorbed() {
    let mut scanner = Scanner::new("a</b>c");
    let events: Vec<_> = scanner
        .by_ref()
        .collect::<Result<_, _>>()
        .expect("scan should succeed");
    assert_eq!(events.len(), 2);
    assert_eq!(text_of(&events[0]), "a");
    assert_eq!(text_of(&events[1]), "c");
    assert_eq!(scanner.issues().len(), 1);
}

#[test]
fn test_end_tag_force_closes_intervening() {
    let events = scan("<div><span>x</div>");
    assert_eq!(events[3], end("span", true));
    assert_eq!(events[4], end("div", false));
}

#[test]
fn test_end_of_input_flushes_stack() {
    let events = scan("<div><p>x");
    assert_eq!(events[3], end("p", true));
    assert_eq!(events[4], end("div", true));
}

#[test]
fn test_end_tag_uses_opened_case() {
    let events = scan("<DIV>x</div>");
    assert_eq!(events[2], end("DIV", false));
}

#[test]
fn test_malformed_tag_is_text() {
    let events = scan("a < b <3 c");
    assert_eq!(events.len(), 1);
    assert_eq!(text_of(&events[0]), "a < b <3 c");
}

#[test]
fn test_html4_inline_auto_close() {
    let events: Vec<_> = Scanner::with_html5("<span><div>x</div></span>", false)
        .collect::<Result<_, _>>()
        .expect("scan should succeed");
    assert_eq!(start_name(&events[0]), "span");
    assert_eq!(events[1], end("span", true));
    assert_eq!(start_name(&events[2]), "div");
    assert_eq!(events[4], end("div", false));
    assert_eq!(events.len(), 5);
}

#[test]
fn test_html5_keeps_inline_open() {
    let events = scan("<span><div>x</div></span>");
    assert_eq!(events[3], end("div", false));
    assert_eq!(events[4], end("span", false));
}

#[test]
fn test_text_carries_neighbouring_tags() {
    let events = scan("<b>x</b>");
    match &events[1] {
        Event::Text(text) => {
            assert_eq!(
                text.previous,
                Some(TagRef {
                    name: "b",
                    closing: false
                })
            );
            assert_eq!(
                text.next,
                Some(TagRef {
                    name: "b",
                    closing: true
                })
            );
        }
        _ => panic!("Expected Text event"),
    }
}

// =============================================================================
// Properties
// =============================================================================

const FRAGMENTS: &[&str] = &[
    "<div>",
    "</div>",
    "<p>",
    "</p>",
    "<ul>",
    "</ul>",
    "<li>",
    "<br>",
    "<img src=x/>",
    "<span class=\"a b\">",
    "</span>",
    "<B>",
    "</b>",
    "<script>",
    "</script>",
    "<style>",
    "</nope>",
    "<!-- c -->",
    "<% i %>",
    "text",
    " ",
    "\n",
    "<",
    ">",
    "\"",
];

fn build(picks: &[u8]) -> String {
    picks
        .iter()
        .map(|pick| FRAGMENTS[usize::from(*pick) % FRAGMENTS.len()])
        .collect()
}

#[quickcheck]
fn prop_stack_is_empty_after_scan(picks: Vec<u8>, html5: bool) -> bool {
    let input = build(&picks);
    let mut scanner = Scanner::with_html5(&input, html5);
    let all_ok = scanner.by_ref().all(|event| event.is_ok());
    all_ok && scanner.open_elements().is_empty()
}

#[quickcheck]
fn prop_every_pushed_element_is_closed(picks: Vec<u8>, html5: bool) -> bool {
    let input = build(&picks);
    let events: Vec<_> = Scanner::with_html5(&input, html5)
        .collect::<Result<_, _>>()
        .expect("fragments never leave a comment open");
    let opened = events
        .iter()
        .filter(|event| {
            matches!(event, Event::StartTag(tag) if !tag.self_closing && !is_void(tag.name))
        })
        .count();
    let closed = events
        .iter()
        .filter(|event| matches!(event, Event::EndTag(_)))
        .count();
    opened == closed
}
