//! Diagnostic rendering for human-readable output.
//!
//! Renders diagnostics in a format similar to Rust compiler errors:
//!
//! ```text
//! error[N006]: expected '.' after statement
//!   --> data.n3:3:18
//!    |
//!  3 |   :alice :knows :bob
//!    |                  ^^^ statement starts here
//!    |
//!    = help: terminate the statement with '.'
//! ```

use crate::diag::{Diagnostic, Severity};
use crate::span::LineIndex;

/// Render a diagnostic to a string.
///
/// # Arguments
///
/// * `diag` - The diagnostic to render
/// * `source` - The source text
/// * `filename` - Optional filename for the source location
pub fn render_diagnostic(diag: &Diagnostic, source: &str, filename: Option<&str>) -> String {
    let index = LineIndex::new(source);
    let mut output = String::new();

    // Header line: severity[code]: message
    let severity_str = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Note => "note",
    };
    output.push_str(&format!(
        "{}[{}]: {}\n",
        severity_str,
        diag.code.code(),
        diag.message
    ));

    // Location line: --> filename:line:col
    let start_loc = index.line_col(diag.span.start);
    let file = filename.unwrap_or("<input>");
    output.push_str(&format!(
        "  --> {}:{}:{}\n",
        file, start_loc.line, start_loc.col
    ));

    // Source snippet with underline
    render_source_snippet(&mut output, source, &index, diag);

    // Help text
    if let Some(help) = &diag.help {
        for line in help.lines() {
            output.push_str(&format!("   = help: {}\n", line));
        }
    }

    // Note text
    if let Some(note) = &diag.note {
        for line in note.lines() {
            output.push_str(&format!("   = note: {}\n", line));
        }
    }

    output
}

fn render_source_snippet(output: &mut String, source: &str, index: &LineIndex, diag: &Diagnostic) {
    let start_loc = index.line_col(diag.span.start);
    let end_loc = index.line_col(diag.span.end);

    // Calculate gutter width (for line numbers)
    let max_line = end_loc.line;
    let gutter_width = max_line.to_string().len();

    // Render each line with the span
    for line_num in start_loc.line..=end_loc.line {
        let line_start = index.line_start(line_num).unwrap_or(0);
        let line_end = index.line_end(line_num, source);
        let line_text = &source[line_start..line_end.min(source.len())];
        let line_text = line_text.trim_end_matches('\n');

        // Empty gutter line
        output.push_str(&format!("{:>width$} |\n", "", width = gutter_width));

        // Line with source
        output.push_str(&format!(
            "{:>width$} | {}\n",
            line_num,
            line_text,
            width = gutter_width
        ));

        // Underline
        let underline_start = if line_num == start_loc.line {
            start_loc.col as usize
        } else {
            1
        };
        let underline_end = if line_num == end_loc.line {
            end_loc.col as usize
        } else {
            line_text.len() + 1
        };

        let padding = " ".repeat(underline_start.saturating_sub(1));
        let underline_len = underline_end.saturating_sub(underline_start).max(1);
        let underline = "^".repeat(underline_len);

        // Find label for this span (if any)
        let label_text = diag
            .labels
            .iter()
            .find(|l| {
                let l_start = index.line_col(l.span.start);
                l_start.line == line_num
            })
            .map(|l| format!(" {}", l.message))
            .unwrap_or_default();

        output.push_str(&format!(
            "{:>width$} | {}{}{}\n",
            "",
            padding,
            underline,
            label_text,
            width = gutter_width
        ));
    }

    // Final empty gutter line
    output.push_str(&format!("{:>width$} |\n", "", width = gutter_width));
}

/// Render multiple diagnostics.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source: &str,
    filename: Option<&str>,
) -> String {
    diagnostics
        .iter()
        .map(|d| render_diagnostic(d, source, filename))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{DiagCode, Label};
    use crate::span::SourceSpan;

    #[test]
    fn test_render_simple() {
        let source = ":alice :knows :bob";
        let diag = Diagnostic::error(
            DiagCode::UnexpectedEof,
            "expected '.' after statement, found end of input",
            SourceSpan::new(14, 18),
        );

        let rendered = render_diagnostic(&diag, source, Some("data.n3"));
        println!("{}", rendered);

        assert!(rendered.contains("error[N007]"));
        assert!(rendered.contains("data.n3:1:15"));
        assert!(rendered.contains(":alice :knows :bob"));
    }

    #[test]
    fn test_render_with_label_and_help() {
        let source = ":a :b { :c :d :e . } .";
        let diag = Diagnostic::error(
            DiagCode::ExpectedToken,
            "expected a statement after '.' in formula",
            SourceSpan::new(17, 18),
        )
        .with_label(Label::new(SourceSpan::new(17, 18), "separator here"))
        .with_help("remove the trailing '.' or add another statement")
        .with_note("inside formulas '.' separates statements instead of terminating them");

        let rendered = render_diagnostic(&diag, source, Some("rules.n3"));
        println!("{}", rendered);

        assert!(rendered.contains("error[N006]"));
        assert!(rendered.contains("= help:"));
        assert!(rendered.contains("= note:"));
        assert!(rendered.contains("separator here"));
    }

    #[test]
    fn test_render_second_line() {
        let source = "@prefix ex: <http://example.org/> .\nex:a ex:b @BASE .";
        let diag = Diagnostic::error(
            DiagCode::ExpectedTerm,
            "expected an object, found language tag",
            SourceSpan::new(46, 51),
        );

        let rendered = render_diagnostic(&diag, source, None);
        println!("{}", rendered);

        assert!(rendered.contains("error[N008]"));
        assert!(rendered.contains("<input>:2:11"));
        assert!(rendered.contains("ex:a ex:b @BASE ."));
    }
}
