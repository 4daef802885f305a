//! Diagnostic reporting for lexical errors and semantic violations.

mod reporter;

pub use reporter::DiagnosticReporter;

use colored::Colorize;
use std::fmt;

use crate::error::LexicalError;
use crate::semantic::{Symbol, Violation};

/// Location in source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl SourceLocation {
    pub fn new(file: &str, line: usize, column: usize, length: usize) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
            length,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "{}", "error".red().bold()),
            DiagnosticLevel::Warning => write!(f, "{}", "warning".yellow().bold()),
        }
    }
}

/// A diagnostic with source context
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub source_line: Option<String>,
    pub labels: Vec<(usize, usize, String)>, // (column, length, label)
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, code, message)
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, code, message)
    }

    fn new(level: DiagnosticLevel, code: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            code: code.to_string(),
            message: message.into(),
            location: None,
            source_line: None,
            labels: Vec::new(),
            help: None,
        }
    }

    /// Diagnostic for a tokenizer failure
    pub fn lexical(error: &LexicalError) -> Self {
        match error {
            LexicalError::UnrecognizedToken { .. } => {
                Diagnostic::error(codes::UNRECOGNIZED_TOKEN, error.to_string())
                    .with_help("only the statements of the supported subset can be analyzed")
            }
            LexicalError::MissingStreamOperand { stream, .. } => {
                Diagnostic::error(codes::MISSING_STREAM_OPERAND, error.to_string()).with_help(
                    format!("a stream statement continues on the same line, e.g. `{} << value;`", stream),
                )
            }
        }
    }

    /// Diagnostic for a failed semantic check
    pub fn violation(violation: &Violation) -> Self {
        let code = match violation {
            Violation::InvalidStreamOperator { .. } => codes::INVALID_STREAM_OPERATOR,
            Violation::MissingNamespace { .. } => codes::MISSING_NAMESPACE,
            Violation::UndeclaredIdentifier { .. } => codes::UNDECLARED_IDENTIFIER,
            Violation::IncompatibleOperands { .. } => codes::INCOMPATIBLE_OPERANDS,
            Violation::InvalidReturn { .. } => codes::INVALID_RETURN,
            Violation::MissingIoLibrary { .. } => codes::MISSING_IO_LIBRARY,
        };

        Diagnostic::error(code, violation.to_string()).with_help(violation.detail())
    }

    /// Warning for a name declared a second time
    pub fn redeclaration(symbol: &Symbol, first: &Symbol) -> Self {
        Diagnostic::warning(
            codes::REDECLARED_NAME,
            format!("'{}' is declared more than once", symbol.name),
        )
        .with_help(format!(
            "lookups use the first declaration (line {}, {})",
            first.line, first.declared_type
        ))
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }

    pub fn with_label(mut self, column: usize, length: usize, label: impl Into<String>) -> Self {
        self.labels.push((column, length, label.into()));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header: error[E001]: message
        writeln!(f, "{}[{}]: {}", self.level, self.code.cyan(), self.message)?;

        if let Some(ref loc) = self.location {
            let line_num_width = loc.line.to_string().len();
            let padding = " ".repeat(line_num_width);

            writeln!(f, "{}--> {}", padding, loc.to_string().blue())?;
            writeln!(f, "{} {}", padding, "|".blue())?;

            if let Some(ref source) = self.source_line {
                writeln!(f, "{} {} {}", loc.line.to_string().blue().bold(), "|".blue(), source)?;

                for (column, length, label) in &self.labels {
                    let underline_padding = " ".repeat(column.saturating_sub(1));
                    let underline = "^".repeat(*length);

                    let (underline, label) = match self.level {
                        DiagnosticLevel::Error => (underline.red().bold(), label.red()),
                        DiagnosticLevel::Warning => (underline.yellow().bold(), label.yellow()),
                    };

                    writeln!(
                        f,
                        "{} {} {}{} {}",
                        padding,
                        "|".blue(),
                        underline_padding,
                        underline,
                        label
                    )?;
                }
            }

            writeln!(f, "{} {}", padding, "|".blue())?;
        }

        if let Some(ref help) = self.help {
            writeln!(f, "   {} {}: {}", "=".blue(), "help".green().bold(), help)?;
        }

        Ok(())
    }
}

/// Diagnostic codes
pub mod codes {
    // Lexical errors (E0xx)
    pub const UNRECOGNIZED_TOKEN: &str = "E001";
    pub const MISSING_STREAM_OPERAND: &str = "E002";

    // Directive and stream errors (E1xx)
    pub const INVALID_STREAM_OPERATOR: &str = "E100";
    pub const MISSING_NAMESPACE: &str = "E101";

    // Name and type errors (E2xx)
    pub const UNDECLARED_IDENTIFIER: &str = "E200";
    pub const INCOMPATIBLE_OPERANDS: &str = "E201";
    pub const INVALID_RETURN: &str = "E202";

    // Library errors (E3xx)
    pub const MISSING_IO_LIBRARY: &str = "E300";

    // Warnings (W0xx)
    pub const REDECLARED_NAME: &str = "W001";
}
