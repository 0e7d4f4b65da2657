//! Human-readable diagnostic reports

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use unisym_ast::{Diagnostic, Severity};

use crate::source::SourceFile;

/// Render every diagnostic of `file` as an annotated source excerpt.
/// Output is uncoloured so it can go to logs and snapshots alike.
pub fn render_diagnostics(file: &SourceFile) -> String {
    let name = file.path.display().to_string();
    let mut out = Vec::new();
    for diagnostic in &file.diagnostics {
        if render_one(&name, &file.text, diagnostic, &mut out).is_err() {
            out.extend_from_slice(format!("{}: {}\n", name, diagnostic).as_bytes());
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn render_one(name: &str, text: &str, diagnostic: &Diagnostic, out: &mut Vec<u8>) -> std::io::Result<()> {
    // ariadne counts chars, spans count bytes
    let start = char_offset(text, diagnostic.span.start);
    let end = char_offset(text, diagnostic.span.end).max(start);
    let (kind, color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
    };

    Report::build(kind, name.to_string(), start)
        .with_config(Config::default().with_color(false))
        .with_code(&diagnostic.code)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((name.to_string(), start..end))
                .with_message(&diagnostic.message)
                .with_color(color),
        )
        .finish()
        .write((name.to_string(), Source::from(text)), out)
}

fn char_offset(text: &str, byte: usize) -> usize {
    match text.get(..byte.min(text.len())) {
        Some(prefix) => prefix.chars().count(),
        None => text.char_indices().take_while(|(i, _)| *i < byte).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Analyzer, SourceInput};

    #[test]
    fn test_char_offsets() {
        let text = "é = 1";
        assert_eq!(char_offset(text, 0), 0);
        assert_eq!(char_offset(text, 2), 1);
        assert_eq!(char_offset(text, 1), 1);
        assert_eq!(char_offset(text, 100), 5);
    }

    #[test]
    fn test_report_mentions_code_and_message() {
        let analyzer = Analyzer::default();
        let analysis = analyzer
            .analyze_file(SourceInput::new("broken.cs", "class A {\n  int = 5;\n}"))
            .unwrap();
        let rendered = render_diagnostics(&analysis.source);
        assert!(rendered.contains("E-PARSE-001"), "{}", rendered);
        assert!(rendered.contains("broken.cs"), "{}", rendered);
        assert!(rendered.contains("int = 5;"), "{}", rendered);
    }

    #[test]
    fn test_clean_file_renders_nothing() {
        let analyzer = Analyzer::default();
        let analysis = analyzer
            .analyze_file(SourceInput::new("ok.ts", "export const ok = true;"))
            .unwrap();
        assert_eq!(render_diagnostics(&analysis.source), "");
    }
}
