//! The ordered semantic checks and their verdicts.

use std::fmt;

use log::debug;
use thiserror::Error as ThisError;

use super::analyzer::AnalysisContext;
use crate::lexer::{Token, TokenKind};

/// A failed semantic check. The display text is the stable user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Violation {
    #[error("invalid use of stream extraction (>>) or insertion (<<) operators.")]
    InvalidStreamOperator {
        stream: String,
        line: usize,
        column: usize,
    },

    #[error("namespace std missing.")]
    MissingNamespace {
        stream: String,
        line: usize,
        column: usize,
    },

    #[error("an undeclared variable was found.")]
    UndeclaredIdentifier {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("invalid operation on variables.")]
    IncompatibleOperands {
        name: String,
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    #[error("invalid return type.")]
    InvalidReturn {
        value: String,
        declared_type: String,
        line: usize,
        column: usize,
    },

    #[error("iostream library missing.")]
    MissingIoLibrary {
        stream: String,
        line: usize,
        column: usize,
    },
}

impl Violation {
    /// 1-based (line, column) of the first offending occurrence
    pub fn position(&self) -> (usize, usize) {
        match *self {
            Violation::InvalidStreamOperator { line, column, .. }
            | Violation::MissingNamespace { line, column, .. }
            | Violation::UndeclaredIdentifier { line, column, .. }
            | Violation::IncompatibleOperands { line, column, .. }
            | Violation::InvalidReturn { line, column, .. }
            | Violation::MissingIoLibrary { line, column, .. } => (line, column),
        }
    }

    /// The offending text
    pub fn subject(&self) -> &str {
        match self {
            Violation::InvalidStreamOperator { stream, .. }
            | Violation::MissingNamespace { stream, .. }
            | Violation::MissingIoLibrary { stream, .. } => stream,
            Violation::UndeclaredIdentifier { name, .. }
            | Violation::IncompatibleOperands { name, .. } => name,
            Violation::InvalidReturn { .. } => "return",
        }
    }

    /// A longer explanation naming the offending code
    pub fn detail(&self) -> String {
        match self {
            Violation::InvalidStreamOperator { stream, .. } => {
                let operator = if stream.ends_with("cin") { ">>" } else { "<<" };
                format!("'{}' must be followed by '{}'", stream, operator)
            }
            Violation::MissingNamespace { stream, .. } => format!(
                "'{}' is used without 'using namespace std;'; write 'std::{}' or add the directive",
                stream, stream
            ),
            Violation::UndeclaredIdentifier { name, .. } => {
                format!("'{}' is used but never declared", name)
            }
            Violation::IncompatibleOperands { name, expected, found, .. } => format!(
                "'{}' is declared as {} but the operation works on {}",
                name, found, expected
            ),
            Violation::InvalidReturn { value, declared_type, .. } => {
                if declared_type == "void" {
                    format!("'main' is declared void but returns '{}'", value)
                } else {
                    format!("'{}' cannot be returned from 'main' declared as {}", value, declared_type)
                }
            }
            Violation::MissingIoLibrary { stream, .. } => {
                format!("'{}' is used before '#include <iostream>'", stream)
            }
        }
    }
}

/// The semantic checks, in the order they are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    StreamOperators,
    Namespace,
    UndeclaredIdentifiers,
    OperandTypes,
    ReturnType,
    IoLibrary,
}

type CheckFn = fn(&AnalysisContext) -> Result<(), Violation>;

/// Evaluation order; the first failure ends the analysis
pub const CHECKS: [(Check, CheckFn); 6] = [
    (Check::StreamOperators, check_stream_operators),
    (Check::Namespace, check_namespace),
    (Check::UndeclaredIdentifiers, check_undeclared),
    (Check::OperandTypes, check_operand_types),
    (Check::ReturnType, check_return),
    (Check::IoLibrary, check_io_library),
];

impl Check {
    /// Report section that opens before this check's verdict
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Check::Namespace => Some("[Scope Resolution]"),
            Check::UndeclaredIdentifiers => Some("[Checking for Semantic Errors]"),
            Check::IoLibrary => Some("[Function Calls and Standard Library Use]"),
            Check::StreamOperators | Check::OperandTypes | Check::ReturnType => None,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Check::StreamOperators => {
                "The cin and cout objects use the stream extraction >> and insertion\n\
                 operators << correctly with operands of compatible types"
            }
            Check::Namespace => {
                "The program correctly uses the standard namespace for input (cin)\n\
                 and output (cout)."
            }
            Check::UndeclaredIdentifiers => "No undeclared identifiers are used.",
            Check::OperandTypes => "All operations are performed on compatible types.",
            Check::ReturnType => "The return type of the functions are valid.",
            Check::IoLibrary => {
                "The program correctly includes and uses the <iostream> library for\n\
                 input or output operations."
            }
        }
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub check: Check,
    pub result: Result<(), Violation>,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(()) => f.write_str(self.check.success_message()),
            Err(violation) => write!(f, "Error: {}", violation),
        }
    }
}

/// Run the checks in order, stopping after the first failure
pub fn run_checks(context: &AnalysisContext) -> Vec<Verdict> {
    let mut verdicts = Vec::with_capacity(CHECKS.len());

    for (check, run) in CHECKS {
        let result = run(context);
        debug!("{:?}: {}", check, if result.is_ok() { "passed" } else { "failed" });

        let failed = result.is_err();
        verdicts.push(Verdict { check, result });
        if failed {
            break;
        }
    }

    verdicts
}

fn check_stream_operators(context: &AnalysisContext) -> Result<(), Violation> {
    match &context.flags.invalid_operator {
        Some(stream) => Err(Violation::InvalidStreamOperator {
            stream: stream.text.clone(),
            line: stream.line,
            column: stream.column,
        }),
        None => Ok(()),
    }
}

fn check_namespace(context: &AnalysisContext) -> Result<(), Violation> {
    match &context.flags.invalid_std_use {
        Some(stream) => Err(Violation::MissingNamespace {
            stream: stream.text.clone(),
            line: stream.line,
            column: stream.column,
        }),
        None => Ok(()),
    }
}

fn check_undeclared(context: &AnalysisContext) -> Result<(), Violation> {
    let symbols = &context.declarations.symbols;

    match context
        .declarations
        .free_identifiers
        .iter()
        .find(|used| !symbols.contains(&used.text))
    {
        Some(used) => Err(Violation::UndeclaredIdentifier {
            name: used.text.clone(),
            line: used.line,
            column: used.column,
        }),
        None => Ok(()),
    }
}

/// Every declaration of every identifier on a line with a binary arithmetic
/// operation must share the type of the first identifier that resolves
fn check_operand_types(context: &AnalysisContext) -> Result<(), Violation> {
    let symbols = &context.declarations.symbols;

    for tokens in context.lines.iter().filter(|tokens| has_arithmetic(tokens)) {
        let mut expected: Option<&str> = None;

        for token in tokens.iter().filter(|t| t.kind == TokenKind::Identifier) {
            for symbol in symbols.lookup_all(&token.text) {
                match expected {
                    None => expected = Some(symbol.declared_type.as_str()),
                    Some(expected) if expected != symbol.declared_type => {
                        return Err(Violation::IncompatibleOperands {
                            name: token.text.clone(),
                            expected: expected.to_string(),
                            found: symbol.declared_type.clone(),
                            line: token.line,
                            column: token.column,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }

    Ok(())
}

fn has_arithmetic(tokens: &[Token]) -> bool {
    tokens.windows(3).any(|window| {
        let [left, operator, right] = window else {
            return false;
        };
        operator.kind == TokenKind::Operator
            && matches!(operator.text.as_str(), "+" | "-" | "*" | "/" | "%")
            && left.is_operand()
            && right.is_operand()
    })
}

fn check_return(context: &AnalysisContext) -> Result<(), Violation> {
    match &context.declarations.invalid_return {
        Some(invalid) => Err(Violation::InvalidReturn {
            value: invalid.value.clone(),
            declared_type: invalid.declared_type.clone(),
            line: invalid.line,
            column: invalid.column,
        }),
        None => Ok(()),
    }
}

fn check_io_library(context: &AnalysisContext) -> Result<(), Violation> {
    match &context.flags.invalid_io_use {
        Some(stream) => Err(Violation::MissingIoLibrary {
            stream: stream.text.clone(),
            line: stream.line,
            column: stream.column,
        }),
        None => Ok(()),
    }
}
