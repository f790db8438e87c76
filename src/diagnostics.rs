//! Terminal rendering of syntax errors.

use crate::parser::parse::SyntaxError;
use ariadne::{Config, Label, Report, ReportKind, Source};
use std::io::{self, Write};

/// Write `err` as an annotated report against `source` to stderr.
pub fn render_error(source: &str, err: &SyntaxError) -> io::Result<()> {
    report(source, err, true).eprint(Source::from(source))
}

/// Write `err` as a plain (uncoloured) report to `out`.
pub fn write_error<W: Write>(source: &str, err: &SyntaxError, out: W) -> io::Result<()> {
    report(source, err, false).write(Source::from(source), out)
}

fn report(source: &str, err: &SyntaxError, color: bool) -> Report<'static> {
    let found = err.token();
    let len = source.chars().count();
    // Eof and other empty tokens still get a one-character caret where possible
    let span = found.start..found.end.max(found.start + 1).min(len).max(found.start);

    let label = match err {
        SyntaxError::Expected { expected, .. } => format!("expected {expected}"),
        SyntaxError::Message { message, .. } => message.clone(),
    };

    Report::build(ReportKind::Error, (), found.start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("syntax error at line {}", found.line))
        .with_label(Label::new(span).with_message(label))
        .with_note(format!("found {found}"))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_source;

    fn rendered(source: &str) -> String {
        let err = parse_source(source).unwrap_err();
        let mut out = Vec::new();
        write_error(source, &err, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_names_expected_and_found() {
        let text = rendered("class A { def x : ; }");
        assert!(text.contains("syntax error at line 1"), "{text}");
        assert!(text.contains("expected a type"), "{text}");
        assert!(text.contains("found ';'"), "{text}");
    }

    #[test]
    fn test_report_at_end_of_input() {
        let text = rendered("class A {");
        assert!(text.contains("end of file"), "{text}");
    }
}
