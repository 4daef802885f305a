//! Token definitions for the lexer.

use std::fmt;

/// A token with its kind, text, and position in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based byte column within the line
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// `<<` or `>>`, whether or not it was classified inside a stream statement
    pub fn is_stream_operator(&self) -> bool {
        match self.kind {
            TokenKind::StreamInsertion | TokenKind::StreamExtraction => true,
            TokenKind::Operator => self.text == "<<" || self.text == ">>",
            _ => false,
        }
    }

    /// `cout`, `cin`, `std::cout` or `std::cin`
    pub fn stream(&self) -> Option<Stream> {
        if self.kind != TokenKind::Identifier {
            return None;
        }
        Stream::from_name(&self.text)
    }

    /// Something that can stand on either side of a binary arithmetic operator
    pub fn is_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier
                | TokenKind::IntegerLiteral
                | TokenKind::Keyword
                | TokenKind::FunctionName
        )
    }
}

impl fmt::Display for Token {
    /// Renders the token the way the lexical report prints it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringLiteral => write!(f, "Token(Type: {}: \"{}\")", self.kind, self.text),
            TokenKind::Comment => write!(f, "Token(Type: {}, Value: \"{}\")", self.kind, self.text),
            _ => write!(f, "Token(Type: {}, Value: '{}')", self.kind, self.text),
        }
    }
}

/// All token kinds of the analyzed language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Preprocessor,       // #include <...>
    NamespaceDirective, // using namespace std
    Keyword,
    Identifier,
    FunctionName, // main
    IntegerLiteral,
    StringLiteral,
    Operator,
    Symbol,
    Comment,
    StreamInsertion,  // << after cout
    StreamExtraction, // >> after cin
}

impl TokenKind {
    /// Label used in the token report
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Preprocessor => "PREPROCESSOR",
            TokenKind::NamespaceDirective => "NAMESPACE",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::FunctionName => "FUNCTION_NAME",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Operator | TokenKind::StreamInsertion | TokenKind::StreamExtraction => {
                "OPERATOR"
            }
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two standard streams a statement can start with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Cout { qualified: bool },
    Cin { qualified: bool },
}

impl Stream {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cout" => Some(Stream::Cout { qualified: false }),
            "std::cout" => Some(Stream::Cout { qualified: true }),
            "cin" => Some(Stream::Cin { qualified: false }),
            "std::cin" => Some(Stream::Cin { qualified: true }),
            _ => None,
        }
    }

    pub fn is_qualified(&self) -> bool {
        match *self {
            Stream::Cout { qualified } | Stream::Cin { qualified } => qualified,
        }
    }

    /// The operator text this stream must be used with
    pub fn operator(&self) -> &'static str {
        match self {
            Stream::Cout { .. } => "<<",
            Stream::Cin { .. } => ">>",
        }
    }
}

/// Type keywords that can start a declaration
pub const TYPE_KEYWORDS: &[&str] = &["void", "int", "string", "float", "char", "bool", "double"];

/// Names provided by the I/O library that never need a declaration
pub const LIBRARY_NAMES: &[&str] = &["endl", "std"];

pub fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.contains(&word)
}

/// Classify a bare word
pub fn lookup_word(word: &str) -> TokenKind {
    match word {
        _ if is_type_keyword(word) => TokenKind::Keyword,
        "return" | "if" | "else" | "while" | "for" | "true" | "false" => TokenKind::Keyword,
        "main" => TokenKind::FunctionName,
        _ => TokenKind::Identifier,
    }
}
