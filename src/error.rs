//! Error types shared by the analysis phases.

use std::io;
use std::path::PathBuf;

use thiserror::Error as ThisError;

/// A fatal tokenizer error. Halts the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LexicalError {
    #[error("unrecognized token: {text}")]
    UnrecognizedToken {
        text: String,
        line: usize,
        column: usize,
    },

    #[error("missing tokens after '{stream}'")]
    MissingStreamOperand {
        stream: String,
        line: usize,
        column: usize,
    },
}

impl LexicalError {
    /// 1-based (line, column) of the offending text
    pub fn position(&self) -> (usize, usize) {
        match *self {
            LexicalError::UnrecognizedToken { line, column, .. }
            | LexicalError::MissingStreamOperand { line, column, .. } => (line, column),
        }
    }

    /// Length of the offending text, for underlining
    pub fn span_len(&self) -> usize {
        match self {
            LexicalError::UnrecognizedToken { text, .. } => text.len().max(1),
            LexicalError::MissingStreamOperand { stream, .. } => stream.len(),
        }
    }
}

/// Errors that stop a run before any phase starts
#[derive(Debug, ThisError)]
pub enum AnalysisError {
    #[error("unable to open file '{}'", .path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
