//! Diagnostic reporter that attaches source context to diagnostics.

use super::{Diagnostic, SourceLocation};

/// Collects diagnostics for one source text
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
    file: String,
    lines: Vec<String>,
}

impl DiagnosticReporter {
    pub fn new(file: &str, source: &str) -> Self {
        Self {
            diagnostics: Vec::new(),
            file: file.to_string(),
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    /// Get a specific line's content
    pub fn get_line(&self, line_num: usize) -> &str {
        line_num
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map_or("", String::as_str)
    }

    /// Report a diagnostic with automatic source line lookup
    pub fn report(&mut self, diagnostic: Diagnostic, line: usize, column: usize, length: usize) {
        self.report_with_label(diagnostic, line, column, length, "");
    }

    /// Report a diagnostic with custom label
    pub fn report_with_label(
        &mut self,
        diagnostic: Diagnostic,
        line: usize,
        column: usize,
        length: usize,
        label: &str,
    ) {
        let location = SourceLocation::new(&self.file, line, column, length);
        let source_line = self.get_line(line).to_string();

        self.diagnostics.push(
            diagnostic
                .with_location(location)
                .with_source_line(source_line)
                .with_label(column, length, label),
        );
    }

    /// Consume and return all diagnostics
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_source_line() {
        let mut reporter = DiagnosticReporter::new("prog.cpp", "int x;\ncout << y;\n");
        reporter.report(Diagnostic::error("E200", "an undeclared variable was found."), 2, 9, 1);

        let diagnostics = reporter.take_diagnostics();
        let location = diagnostics[0].location.as_ref().unwrap();
        assert_eq!((location.line, location.column, location.length), (2, 9, 1));
        assert_eq!(diagnostics[0].source_line.as_deref(), Some("cout << y;"));
        assert_eq!(diagnostics[0].labels, vec![(9, 1, String::new())]);
    }

    #[test]
    fn out_of_range_lines_are_empty() {
        let reporter = DiagnosticReporter::new("prog.cpp", "int x;");
        assert_eq!(reporter.get_line(0), "");
        assert_eq!(reporter.get_line(5), "");
    }
}
