//! cxxsema - lexical and semantic analysis for a small C++ teaching subset
//!
//! Tokenizes programs made of includes, `using namespace std;`, a `main`
//! function, declarations, `cin`/`cout` statements, arithmetic and `return`,
//! then builds a symbol table and runs an ordered list of semantic checks.

pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod report;
pub mod semantic;
pub mod syntax;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, DiagnosticLevel, SourceLocation};
pub use driver::{AnalysisOptions, Driver};
pub use error::{AnalysisError, LexicalError};
pub use report::AnalysisReport;
