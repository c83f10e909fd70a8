//! Diagnostic rendering for the mincc binary.
//!
//! Errors carry a span into the source map; this module renders them as
//! ariadne reports showing the offending source line with the token
//! underlined, falling back to plain stderr lines if report rendering
//! itself fails.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use mincc::source::SourceMap;
use mincc::token::Span;

use crate::driver::CompileError;

fn span_range(span: Span, source_len: usize) -> Range<usize> {
    if source_len == 0 {
        return 0..0;
    }
    // EOF spans are zero-width and may sit one past the end; clamp into
    // the source and widen to one byte so the underline has a target.
    let start = span.start.min(source_len - 1);
    let end = span.end.clamp(start + 1, source_len);
    start..end
}

fn print_span_report(sources: &SourceMap, span: Span, message: &str) -> std::io::Result<()> {
    let file = sources.file(span.file);
    let range = span_range(span, file.text.len());

    Report::build(ReportKind::Error, (file.name.as_str(), range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(message)
        .with_label(
            Label::new((file.name.as_str(), range))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((file.name.as_str(), Source::from(file.text.as_str())))
}

/// Prints a compilation error to stderr.
///
/// Spanned errors get a full source snippet; errors without a span (I/O
/// failures) get a single line.
pub(crate) fn report_error(sources: &SourceMap, error: &CompileError) {
    let (message, span) = error.parts();

    let Some(span) = span else {
        eprintln!("Error: {}", message);
        return;
    };

    if let Err(report_err) = print_span_report(sources, span, &message) {
        let file = sources.file(span.file);
        eprintln!(
            "Error: {}:{}:{}: {}",
            file.name, span.line, span.column, message
        );
        eprintln!("(Failed to display detailed error report: {})", report_err);
    }
}
