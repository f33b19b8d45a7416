//! Artifact minification for `build.minify`.
//!
//! Both minifiers return `None` for input they cannot parse. The bundle and
//! stylesheet flushes then write the composed text unminified and log it,
//! so a component with a syntax error never costs the site its artifact.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

/// Mangle and compress a composed script bundle.
///
/// The bundle is loaded with a plain `<script defer>`, so it is parsed as
/// a classic script and its top-level names stay global.
pub fn minify_js(bundle: &str) -> Option<String> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, bundle, SourceType::cjs()).parse();
    if !parsed.errors.is_empty() {
        return None;
    }

    let mut program = parsed.program;
    let minified = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    })
    .minify(&allocator, &mut program);

    let codegen = CodegenOptions {
        minify: true,
        comments: CommentOptions::disabled(),
        ..CodegenOptions::default()
    };
    Some(
        Codegen::new()
            .with_options(codegen)
            .with_scoping(minified.scoping)
            .build(&program)
            .code,
    )
}

/// Print a composed stylesheet without whitespace.
pub fn minify_css(sheet: &str) -> Option<String> {
    let printer = PrinterOptions {
        minify: true,
        ..PrinterOptions::default()
    };
    StyleSheet::parse(sheet, ParserOptions::default())
        .ok()?
        .to_css(printer)
        .ok()
        .map(|out| out.code)
}
