//! The phase-by-phase analysis report.

use std::fmt;

use log::warn;

use crate::error::LexicalError;
use crate::lexer::TokenStream;
use crate::semantic::SemanticReport;
use crate::syntax::{grammar_tree, PRODUCTIONS};

const RULE: &str = "=============================================================================";

/// Aggregate result of one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub tokens: TokenStream,
    /// Whether the static grammar overview is part of the report
    pub show_syntax: bool,
    /// `None` when the tokenizer failed or the semantic phase was skipped
    pub semantic: Option<SemanticReport>,
}

impl AnalysisReport {
    pub fn is_coherent(&self) -> bool {
        self.tokens.is_ok() && self.semantic.as_ref().map_or(false, SemanticReport::is_coherent)
    }

    /// Attach the semantic phase outcome. A tokenizer failure there becomes
    /// the report's lexical error.
    pub fn record_semantics(&mut self, result: Result<SemanticReport, LexicalError>) {
        match result {
            Ok(semantic) => self.semantic = Some(semantic),
            Err(error) => {
                warn!("semantic phase rejected the source: {}", error);
                self.semantic = None;
                self.tokens.error = Some(error);
            }
        }
    }
}

fn write_banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", RULE)?;
    writeln!(f, "{:>51}", title)?;
    writeln!(f, "{}", RULE)?;
    writeln!(f)
}

fn write_tokens(f: &mut fmt::Formatter<'_>, stream: &TokenStream) -> fmt::Result {
    write_banner(f, " Phase 1: Lexical Analysis")?;

    for token in &stream.tokens {
        writeln!(f, "{}", token)?;
    }
    if let Some(ref error) = stream.error {
        writeln!(f, "Error: {}", error)?;
    }
    Ok(())
}

fn write_syntax(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_banner(f, " Phase 2: Syntax Analysis")?;
    write!(f, "{}", grammar_tree(PRODUCTIONS))
}

fn write_semantic(f: &mut fmt::Formatter<'_>, report: &SemanticReport) -> fmt::Result {
    write_banner(f, " Phase 3: Semantic Analysis")?;

    writeln!(f, "[Symbol Table]")?;
    writeln!(f)?;
    writeln!(f, "{:>9}{:>12}{:>8}{:>20}", "Scope", "Identifier", "Type", "Name")?;
    writeln!(f)?;
    for symbol in report.symbols.iter() {
        writeln!(
            f,
            "{:>9}{:>12}{:>8}{:>20}",
            symbol.scope.to_string(),
            symbol.kind.to_string(),
            symbol.declared_type,
            symbol.name
        )?;
    }
    writeln!(f)?;

    writeln!(f, "[Type Checking]")?;
    writeln!(f)?;
    for description in report.symbols.iter().filter_map(|s| s.description()) {
        writeln!(f, "{}", description)?;
    }
    writeln!(f)?;

    for verdict in &report.verdicts {
        if let Some(section) = verdict.check.section() {
            writeln!(f, "{}", section)?;
            writeln!(f)?;
        }
        writeln!(f, "{}", verdict)?;
        if !verdict.passed() {
            return Ok(());
        }
        writeln!(f)?;
    }

    if report.is_coherent() {
        writeln!(f, "The flow of the program is semantically coherent.")?;
    }
    Ok(())
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tokens(f, &self.tokens)?;
        if !self.tokens.is_ok() {
            return Ok(());
        }

        if self.show_syntax {
            write_syntax(f)?;
        }
        if let Some(ref semantic) = self.semantic {
            write_semantic(f, semantic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Token, TokenKind};

    fn report() -> AnalysisReport {
        AnalysisReport {
            tokens: TokenStream {
                tokens: vec![Token::new(TokenKind::Identifier, "x", 1, 1)],
                error: None,
            },
            show_syntax: false,
            semantic: None,
        }
    }

    #[test]
    fn semantic_tokenize_failure_is_reported() {
        let mut report = report();
        report.record_semantics(Err(LexicalError::UnrecognizedToken {
            text: "$".into(),
            line: 1,
            column: 3,
        }));

        assert!(report.semantic.is_none());
        assert!(!report.is_coherent());
        assert!(report.to_string().ends_with("Token(Type: IDENTIFIER, Value: 'x')\nError: unrecognized token: $\n"));
    }

    #[test]
    fn semantic_result_is_kept() {
        let mut report = report();
        report.record_semantics(Ok(SemanticReport {
            symbols: Default::default(),
            verdicts: Vec::new(),
        }));

        assert!(report.tokens.is_ok());
        assert!(report.to_string().contains("Phase 3: Semantic Analysis"));
    }
}
