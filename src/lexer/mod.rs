//! Lexer module for tokenizing source lines.

mod scanner;
mod token;
mod tokenizer;

pub use scanner::Scanner;
pub use token::{is_type_keyword, lookup_word, Stream, Token, TokenKind, LIBRARY_NAMES, TYPE_KEYWORDS};
pub use tokenizer::{tokenize, tokenize_line, LineTokenizer, TokenStream};
