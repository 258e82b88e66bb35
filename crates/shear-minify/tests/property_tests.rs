//! Properties of the rewriter over generated tag soup.

use quickcheck_macros::quickcheck;
use shear_html::{Event, Scanner};
use shear_minify::{Options, minify};

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
    "<span class=\" a  b \">",
    "</span>",
    "<B>",
    "</b>",
    "<input disabled=\"disabled\" type=\"text\" value=\" v \">",
    "<a href='it\"s' title=\"\">",
    "</a>",
    "</nope>",
    "<!-- c -->",
    "<% i %>",
    "text",
    " ",
    "\n",
    "\"",
    "<script>x = 1</script>",
    "<script>if (a < /x/.test(b)) f()</script>",
    "<script>if (a < /script>/.test(b)) f()</script>",
    "<style>p { color : red }</style>",
    "<pre> a  b </pre>",
    "<textarea> x </textarea>",
    "<!--[if IE]><p> x </p><![endif]-->",
    "<!--[if !IE]><!-->",
    "<!--<![endif]-->",
];

const PRESERVED: &str = "<!--! keep -->";

fn build(picks: &[u8]) -> String {
    picks
        .iter()
        .map(|pick| FRAGMENTS[usize::from(*pick) % FRAGMENTS.len()])
        .collect()
}

type Shape = (String, Vec<(String, Option<String>)>);

/// Start tag names and attributes, in document order.
fn start_tags(input: &str) -> Vec<Shape> {
    Scanner::new(input)
        .filter_map(|event| match event.expect("fragments never leave a comment open") {
            Event::StartTag(tag) => Some((
                tag.name.to_string(),
                tag.attributes
                    .iter()
                    .map(|attribute| {
                        let value = attribute.escaped_value.as_deref().or(attribute.value);
                        (attribute.name.to_string(), value.map(str::to_string))
                    })
                    .collect(),
            )),
            _ => None,
        })
        .collect()
}

#[quickcheck]
fn prop_minify_is_idempotent(picks: Vec<u8>, html5: bool) -> bool {
    let options = Options {
        html5,
        ..Options::default()
    };
    let input = build(&picks);
    let once = minify(&input, &options).expect("fragments never leave a comment open");
    let twice = minify(&once, &options).expect("output never leaves a comment open");
    once == twice
}

#[quickcheck]
fn prop_preserved_comment_survives(picks: Vec<u8>, at: usize, collapse_whitespace: bool) -> bool {
    let options = Options {
        collapse_whitespace,
        ..Options::default()
    };
    let mut pieces: Vec<&str> = picks
        .iter()
        .map(|pick| FRAGMENTS[usize::from(*pick) % FRAGMENTS.len()])
        .collect();
    let at = if pieces.is_empty() { 0 } else { at % (pieces.len() + 1) };
    pieces.insert(at, PRESERVED);
    let input = pieces.concat();
    minify(&input, &options)
        .expect("fragments never leave a comment open")
        .contains(PRESERVED)
}

#[quickcheck]
fn prop_start_tags_survive_without_attribute_cleanup(picks: Vec<u8>) -> bool {
    let options = Options {
        remove_redundant_attributes: false,
        remove_empty_attributes: false,
        collapse_boolean_attributes: false,
        clean_attributes: false,
        ..Options::default()
    };
    let input = build(&picks);
    let output = minify(&input, &options).expect("fragments never leave a comment open");
    start_tags(&input) == start_tags(&output)
}
