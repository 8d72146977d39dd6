//! Diagnostic and error reporting for Tache.
//!
//! Renderers turn evaluation failures into [`Diagnostic`]s and draw them
//! against the template source with ariadne.

mod codes;
mod config;
mod diagnostic;

pub use codes::ErrorCode;
pub use config::ReportConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label, Severity};

use std::io;

use ariadne::{ColorGenerator, Label as AriadneLabel, Report, ReportKind, Source};

fn build_report<'a>(
    filename: &'a str,
    diagnostic: &Diagnostic,
    config: &ReportConfig,
) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Note => ReportKind::Advice,
    };

    let mut colors = ColorGenerator::new();
    let mut report = Report::build(kind, filename, usize::from(diagnostic.span.start))
        .with_config(config.to_ariadne())
        .with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    for label in &diagnostic.labels {
        let mut ariadne_label =
            AriadneLabel::new((filename, label.span.range())).with_message(&label.message);
        if config.color {
            ariadne_label = ariadne_label.with_color(colors.next());
        }
        report = report.with_label(ariadne_label);
    }

    for note in &diagnostic.notes {
        report = report.with_note(note);
    }

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    report.finish()
}

/// Render a diagnostic against the template source into a string.
pub fn render(
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    config: &ReportConfig,
) -> io::Result<String> {
    let mut out = Vec::new();
    build_report(filename, diagnostic, config).write((filename, Source::from(source)), &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render a diagnostic to stderr.
pub fn emit(
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    config: &ReportConfig,
) -> io::Result<()> {
    build_report(filename, diagnostic, config).eprint((filename, Source::from(source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tache_common::Span;

    #[test]
    fn test_render_plain() {
        let source = "Hello {{ shout(name) }}!";
        let span = Span::from_usize(9, 20);
        let diag = Diagnostic::error(DiagnosticKind::Eval, span, "Missing filter")
            .with_code(ErrorCode::MissingFilter)
            .with_label(Label::new(span, "`shout` is not defined"));

        let out = render(source, "greeting.mustache", &diag, &ReportConfig::plain()).unwrap();
        assert!(out.contains("E0300"), "{out}");
        assert!(out.contains("Missing filter"), "{out}");
        assert!(out.contains("`shout` is not defined"), "{out}");
        assert!(out.contains("greeting.mustache"), "{out}");
    }
}
