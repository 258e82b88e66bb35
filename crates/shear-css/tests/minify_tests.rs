//! Integration tests for the stylesheet minifier.

use shear_css::{CssTokenizer, TokenKind, minify};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<(TokenKind, &str)> {
    let mut tokenizer = CssTokenizer::new(input);
    tokenizer.run();
    tokenizer
        .into_tokens()
        .into_iter()
        .map(|token| (token.kind, token.raw))
        .collect()
}

#[test]
fn test_tokens_cover_input_exactly() {
    let input = "a:hover > .b { margin: -0.5em 10% url( x.png ) \"q\\\"\" } /* c */";
    let joined: String = tokenize(input).iter().map(|(_, raw)| *raw).collect();
    assert_eq!(joined, input);
}

#[test]
fn test_dimension_keeps_number_and_unit() {
    let tokens = tokenize("0.50em");
    assert_eq!(tokens.len(), 1);
    match tokens[0].0 {
        TokenKind::Dimension { number_len, .. } => assert_eq!(number_len, 4),
        other => panic!("Expected Dimension token, got {other:?}"),
    }
}

#[test]
fn test_quoted_url_is_a_function() {
    let tokens = tokenize("url( \"a.png\")");
    assert_eq!(tokens[0], (TokenKind::Function, "url("));
    assert_eq!(tokens[1].0, TokenKind::Whitespace);
    assert_eq!(tokens[2], (TokenKind::String, "\"a.png\""));
}

#[test]
fn test_declaration_whitespace() {
    assert_eq!(minify("p { color : #FFFFFF ; }"), "p{color:#fff}");
}

#[test]
fn test_selector_combinators() {
    assert_eq!(
        minify("a > b , c  d ~ e + f { margin : 0px 0.5em }"),
        "a>b,c d~e+f{margin:0 .5em}"
    );
}

#[test]
fn test_descendant_pseudo_class_keeps_space() {
    assert_eq!(minify("a :hover { x : y }"), "a :hover{x:y}");
    assert_eq!(minify("a:hover{x:y}"), "a:hover{x:y}");
}

#[test]
fn test_comments_dropped_except_preserved() {
    assert_eq!(
        minify("/* c */ a { b : c } /*! keep */"),
        "a{b:c}/*! keep */"
    );
}

#[test]
fn test_rgb_folds_to_hex() {
    assert_eq!(minify("a { color: rgb(255, 0, 0) }"), "a{color:#f00}");
    assert_eq!(minify("a { color: rgb(18, 52, 86) }"), "a{color:#123456}");
}

#[test]
fn test_rgba_is_not_folded() {
    assert_eq!(
        minify("a { color: rgba(0, 0, 0, 0.5) }"),
        "a{color:rgba(0,0,0,.5)}"
    );
}

#[test]
fn test_font_weight_keywords() {
    assert_eq!(minify("b { font-weight: bold }"), "b{font-weight:700}");
    assert_eq!(minify("b { font-weight: normal }"), "b{font-weight:400}");
}

#[test]
fn test_named_colors_on_color_properties_only() {
    assert_eq!(
        minify("a { color: white; background: BLACK; font-family: black }"),
        "a{color:#fff;background:#000;font-family:black}"
    );
}

#[test]
fn test_calc_keeps_operator_spaces_and_units() {
    assert_eq!(
        minify("div { width: calc(100% - 0px) }"),
        "div{width:calc(100% - 0px)}"
    );
}

#[test]
fn test_media_query() {
    assert_eq!(
        minify("@media screen and (max-width : 100px) { a { color : red } }"),
        "@media screen and (max-width:100px){a{color:red}}"
    );
}

#[test]
fn test_important() {
    assert_eq!(minify("a { color: red !important }"), "a{color:red!important}");
}

#[test]
fn test_empty_statements_and_trailing_semicolons() {
    assert_eq!(minify("a{;color:red;;}"), "a{color:red}");
}

#[test]
fn test_cdo_cdc_keep_their_spaces() {
    assert_eq!(
        minify("<!-- p { color: red } -->"),
        "<!-- p{color:red} -->"
    );
}

#[test]
fn test_strings_are_untouched() {
    assert_eq!(
        minify("p::before { content: \"<!--  0.5px\" }"),
        "p::before{content:\"<!--  0.5px\"}"
    );
}

#[test]
fn test_wrapped_declarations() {
    assert_eq!(
        minify("_shear_attr{ color : red ; margin : 0.0px }"),
        "_shear_attr{color:red;margin:0}"
    );
}
