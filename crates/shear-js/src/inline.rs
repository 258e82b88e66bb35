//! Keep printed code from closing its `<script>` element early.
//!
//! An HTML parser ends a script at the first `</script`, in any case, no
//! matter where it sits in the JavaScript. Inside a string, template, or
//! regular expression literal the slash is escaped (`<\/script`), which
//! means the same thing. Anywhere else the `<` is an operator followed by a
//! regular expression, and a space goes between them.

use std::ops::Range;

use oxc::allocator::Allocator;
use oxc::ast::ast::{RegExpLiteral, StringLiteral, TemplateElement};
use oxc::ast_visit::Visit;
use oxc::parser::Parser;
use oxc::span::Span;

use crate::JsError;
use crate::print::source_type;

const SCRIPT_CLOSER: &[u8] = b"</script";

/// Break up every `</script` in `code`.
pub fn escape_script_closers(code: String, module: bool) -> Result<String, JsError> {
    let closers = closer_positions(&code);
    if closers.is_empty() {
        return Ok(code);
    }

    let literals = literal_ranges(&code, module)?;
    let mut out = String::with_capacity(code.len() + closers.len());
    let mut copied = 0;
    for at in closers {
        let slash = at + 1;
        out.push_str(&code[copied..slash]);
        if literals.iter().any(|range| range.contains(&at)) {
            out.push('\\');
        } else {
            out.push(' ');
        }
        copied = slash;
    }
    out.push_str(&code[copied..]);
    Ok(out)
}

/// Byte offsets of each `<` that starts a `</script`.
fn closer_positions(code: &str) -> Vec<usize> {
    code.as_bytes()
        .windows(SCRIPT_CLOSER.len())
        .enumerate()
        .filter(|(_, window)| window.eq_ignore_ascii_case(SCRIPT_CLOSER))
        .map(|(at, _)| at)
        .collect()
}

/// Source ranges of every string, template chunk, and regular expression.
fn literal_ranges(code: &str, module: bool) -> Result<Vec<Range<usize>>, JsError> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, source_type(module)).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(JsError::Syntax("printed script does not parse".to_string()));
    }

    let mut collector = LiteralCollector::default();
    collector.visit_program(&parsed.program);
    Ok(collector
        .spans
        .into_iter()
        .map(|span| span.start as usize..span.end as usize)
        .collect())
}

/// Visitor that records where literal text lives
#[derive(Default)]
struct LiteralCollector {
    spans: Vec<Span>,
}

impl<'a> Visit<'a> for LiteralCollector {
    fn visit_string_literal(&mut self, it: &StringLiteral<'a>) {
        self.spans.push(it.span);
    }

    fn visit_template_element(&mut self, it: &TemplateElement<'a>) {
        self.spans.push(it.span);
    }

    fn visit_reg_exp_literal(&mut self, it: &RegExpLiteral<'a>) {
        self.spans.push(it.span);
    }
}
