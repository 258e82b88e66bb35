//! Parse, optionally compress, and print a script with oxc.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions, LegalComment};
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::{JsError, JsOptions};

/// Plain JavaScript, as a classic script or an ES module.
pub fn source_type(module: bool) -> SourceType {
    SourceType::mjs().with_module(module)
}

/// Parse `source` and print it back in minify mode.
pub fn print(source: &str, options: &JsOptions) -> Result<String, JsError> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type(options.module)).parse();
    if let Some(error) = parsed.errors.first() {
        return Err(JsError::Syntax(error.to_string()));
    }
    if parsed.panicked {
        return Err(JsError::Syntax("parser stopped early".to_string()));
    }

    let mut program = parsed.program;
    if options.compress {
        let minifier = Minifier::new(MinifierOptions {
            mangle: None,
            compress: Some(CompressOptions::default()),
        });
        let _ = minifier.minify(&allocator, &mut program);
    }

    let codegen_options = CodegenOptions {
        single_quote: options.single_quote,
        comments: CommentOptions {
            normal: false,
            jsdoc: false,
            annotation: false,
            legal: LegalComment::Inline,
            ..CommentOptions::default()
        },
        ..CodegenOptions::minify()
    };
    Ok(Codegen::new().with_options(codegen_options).build(&program).code)
}
