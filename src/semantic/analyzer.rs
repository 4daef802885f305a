//! Semantic analyzer: builds the symbol table and runs the ordered checks.

use log::debug;

use super::checks::{run_checks, Verdict, Violation, CHECKS};
use super::declarations::Declarations;
use super::directives::DirectiveFlags;
use super::symbol_table::SymbolTable;
use crate::error::LexicalError;
use crate::lexer::{tokenize_line, Token};

/// Everything one analysis run knows about the source.
///
/// Built fresh for every run and consumed by the checks.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    /// Tokens of each source line
    pub lines: Vec<Vec<Token>>,
    pub flags: DirectiveFlags,
    pub declarations: Declarations,
}

impl AnalysisContext {
    /// Read the source once, line by line, collecting directives and declarations
    pub fn build(source: &str) -> Result<Self, LexicalError> {
        let mut context = AnalysisContext::default();

        for (index, line) in source.lines().enumerate() {
            let tokens = tokenize_line(line, index + 1)?;
            context.flags.scan_line(&tokens);
            context.declarations.scan_line(line, &tokens);
            context.lines.push(tokens);
        }

        debug!(
            "collected {} symbols and {} identifier uses",
            context.declarations.symbols.len(),
            context.declarations.free_identifiers.len()
        );
        Ok(context)
    }
}

/// Result of the semantic phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticReport {
    pub symbols: SymbolTable,
    /// Verdicts in evaluation order, ending at the first failure
    pub verdicts: Vec<Verdict>,
}

impl SemanticReport {
    pub fn is_coherent(&self) -> bool {
        self.verdicts.len() == CHECKS.len() && self.verdicts.iter().all(Verdict::passed)
    }

    pub fn violation(&self) -> Option<&Violation> {
        self.verdicts.iter().find_map(|v| v.result.as_ref().err())
    }
}

/// Semantic analyzer for one source text
pub struct SemanticAnalyzer<'a> {
    source: &'a str,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Run the analysis.
    ///
    /// Fails only if the source does not tokenize; semantic problems are
    /// reported as verdicts.
    pub fn analyze(&self) -> Result<SemanticReport, LexicalError> {
        let context = AnalysisContext::build(self.source)?;
        let verdicts = run_checks(&context);

        Ok(SemanticReport {
            symbols: context.declarations.symbols,
            verdicts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{Check, Scope, SymbolKind};

    const PROGRAM: &str = r#"#include <iostream>
using namespace std;

int main() {
    int first, second;
    int sum;
    cout << "Enter two numbers: ";
    cin >> first >> second;
    sum = first + second;
    cout << "Sum: " << sum << endl;
    return 0;
}
"#;

    fn analyze(source: &str) -> SemanticReport {
        SemanticAnalyzer::new(source).analyze().expect("source should tokenize")
    }

    fn failed_check(source: &str) -> Option<Check> {
        analyze(source).verdicts.iter().find(|v| !v.passed()).map(|v| v.check)
    }

    #[test]
    fn coherent_program() {
        let report = analyze(PROGRAM);
        assert!(report.is_coherent(), "{:?}", report.verdicts);

        let table: Vec<_> = report
            .symbols
            .iter()
            .map(|s| (s.scope, s.kind, s.declared_type.as_str(), s.name.as_str()))
            .collect();
        assert_eq!(
            table,
            vec![
                (Scope::Global, SymbolKind::Function, "int", "main"),
                (Scope::Local, SymbolKind::Variable, "int", "first"),
                (Scope::Local, SymbolKind::Variable, "int", "second"),
                (Scope::Local, SymbolKind::Variable, "int", "sum"),
            ]
        );
    }

    #[test]
    fn missing_include() {
        let source = PROGRAM.replace("#include <iostream>", "");
        let report = analyze(&source);
        assert_eq!(report.verdicts.len(), CHECKS.len());
        assert!(matches!(report.violation(), Some(Violation::MissingIoLibrary { line: 7, .. })));
    }

    #[test]
    fn missing_namespace() {
        let source = PROGRAM.replace("using namespace std;", "");
        assert_eq!(failed_check(&source), Some(Check::Namespace));
    }

    #[test]
    fn wrong_stream_operator() {
        let source = PROGRAM.replace("cin >> first", "cin << first");
        let report = analyze(&source);
        assert_eq!(report.verdicts.len(), 1);
        assert_eq!(report.verdicts[0].check, Check::StreamOperators);
    }

    #[test]
    fn undeclared_identifier() {
        let source = PROGRAM.replace("sum = first + second;", "sum = first + third;");
        let report = analyze(&source);
        assert!(matches!(
            report.violation(),
            Some(Violation::UndeclaredIdentifier { name, line: 9, .. }) if name == "third"
        ));
    }

    #[test]
    fn incompatible_operands() {
        assert_eq!(failed_check("int a; int b; a + b;"), None);
        assert_eq!(
            failed_check("int a; string b; a + b;"),
            Some(Check::OperandTypes)
        );
    }

    #[test]
    fn invalid_return() {
        let source = PROGRAM.replace("return 0;", "return \"done\";");
        assert_eq!(failed_check(&source), Some(Check::ReturnType));
    }

    #[test]
    fn runs_are_independent() {
        let first = analyze(PROGRAM);
        let second = analyze(PROGRAM);
        assert_eq!(first, second);
    }
}
