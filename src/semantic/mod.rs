//! Semantic analysis module: symbol table, scope resolution and checks.

mod analyzer;
mod checks;
mod declarations;
mod directives;
mod symbol_table;

pub use analyzer::{AnalysisContext, SemanticAnalyzer, SemanticReport};
pub use checks::{run_checks, Check, Verdict, Violation, CHECKS};
pub use declarations::{Declarations, InvalidReturn};
pub use directives::DirectiveFlags;
pub use symbol_table::{Scope, Symbol, SymbolKind, SymbolTable};
