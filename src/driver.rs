//! Driver that orchestrates the analysis pipeline.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::error::AnalysisError;
use crate::lexer::tokenize;
use crate::report::AnalysisReport;
use crate::semantic::SemanticAnalyzer;

/// Which phases run and what the report includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub show_syntax: bool,
    pub tokens_only: bool,
}

/// The analysis driver
pub struct Driver {
    file: String,
    source: String,
    options: AnalysisOptions,
}

impl Driver {
    pub fn new(file: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            source: source.into(),
            options: AnalysisOptions::default(),
        }
    }

    /// Read the source from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| AnalysisError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), source))
    }

    pub fn set_show_syntax(&mut self, enabled: bool) {
        self.options.show_syntax = enabled;
    }

    pub fn set_tokens_only(&mut self, enabled: bool) {
        self.options.tokens_only = enabled;
    }

    /// Run the pipeline. Every call starts from a fresh state.
    pub fn analyze(&self) -> AnalysisReport {
        info!("analyzing {}", self.file);

        // === Lexical Analysis ===
        let tokens = tokenize(&self.source);
        debug!("lexical phase produced {} tokens", tokens.tokens.len());

        let mut report = AnalysisReport {
            tokens,
            show_syntax: self.options.show_syntax,
            semantic: None,
        };

        if !report.tokens.is_ok() || self.options.tokens_only {
            return report;
        }

        // === Semantic Analysis ===
        report.record_semantics(SemanticAnalyzer::new(&self.source).analyze());

        report
    }

    /// Diagnostics with source context for a report of this driver's source
    pub fn diagnostics(&self, report: &AnalysisReport) -> Vec<Diagnostic> {
        let mut reporter = DiagnosticReporter::new(&self.file, &self.source);

        if let Some(ref error) = report.tokens.error {
            let (line, column) = error.position();
            reporter.report(Diagnostic::lexical(error), line, column, error.span_len());
        }

        if let Some(ref semantic) = report.semantic {
            for symbol in semantic.symbols.redeclarations() {
                if let Some(first) = semantic.symbols.lookup(&symbol.name) {
                    reporter.report_with_label(
                        Diagnostic::redeclaration(symbol, first),
                        symbol.line,
                        symbol.column,
                        symbol.name.len(),
                        "declared again here",
                    );
                }
            }

            if let Some(violation) = semantic.violation() {
                let (line, column) = violation.position();
                reporter.report(
                    Diagnostic::violation(violation),
                    line,
                    column,
                    violation.subject().len(),
                );
            }
        }

        reporter.take_diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_failure_skips_semantics() {
        let driver = Driver::new("input", "int x;\nx = 1 @ 2;\n");
        let report = driver.analyze();
        assert!(report.semantic.is_none());
        assert!(!report.is_coherent());

        let diagnostics = driver.diagnostics(&report);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "E001");
    }

    #[test]
    fn tokens_only() {
        let mut driver = Driver::new("input", "int x;");
        driver.set_tokens_only(true);
        let report = driver.analyze();
        assert_eq!(report.tokens.tokens.len(), 3);
        assert!(report.semantic.is_none());
    }

    #[test]
    fn redeclarations_warn() {
        let driver = Driver::new("input", "int b;\nstring b;\n");
        let report = driver.analyze();
        let diagnostics = driver.diagnostics(&report);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
        assert_eq!(diagnostics[0].location.as_ref().map(|l| l.line), Some(2));
    }
}
