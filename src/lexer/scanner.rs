//! Scanner that splits a single source line into raw tokens.

use std::iter::Peekable;
use std::str::CharIndices;

use super::token::{lookup_word, Token, TokenKind};
use crate::error::LexicalError;

/// Scanner over one physical line.
///
/// Yields tokens in source order. After a comment or the first error the
/// scanner is exhausted.
pub struct Scanner<'a> {
    line: &'a str,
    line_number: usize,
    chars: Peekable<CharIndices<'a>>,
    current_offset: usize,
    start_offset: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(line: &'a str, line_number: usize) -> Self {
        Self {
            line,
            line_number,
            chars: line.char_indices().peekable(),
            current_offset: 0,
            start_offset: 0,
            finished: false,
        }
    }

    /// Scan a single token, `None` at end of line
    fn scan_token(&mut self) -> Option<Result<Token, LexicalError>> {
        self.skip_whitespace();

        let (offset, c) = self.advance()?;
        self.start_offset = offset;
        let next = self.peek();

        let token = match c {
            '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' | ':' | '.' | '?' => {
                Ok(self.make_token(TokenKind::Symbol))
            }

            '<' => {
                self.match_char('<');
                Ok(self.make_token(TokenKind::Operator))
            }
            '>' => {
                self.match_char('>');
                Ok(self.make_token(TokenKind::Operator))
            }

            '/' if next == Some('/') => Ok(self.scan_comment()),

            '+' | '-' | '*' | '/' | '%' | '=' | '!' | '&' | '|' | '^' | '~' => {
                Ok(self.make_token(TokenKind::Operator))
            }

            '#' => self.scan_preprocessor(),
            '"' => self.scan_string(),
            '0'..='9' => self.scan_number(),
            c if is_ident_start(c) => Ok(self.scan_word()),

            _ => Err(self.unrecognized()),
        };

        Some(token)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.advance();
        }
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((offset, c)) = result {
            self.current_offset = offset + c.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `expected` if the rest of the line starts with it
    fn match_str(&mut self, expected: &str) -> bool {
        if self.line[self.current_offset..].starts_with(expected) {
            for _ in expected.chars() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let text = &self.line[self.start_offset..self.current_offset];
        self.token_with_text(kind, text)
    }

    fn token_with_text(&self, kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, self.line_number, self.start_offset + 1)
    }

    /// Report the run of characters starting at the current token
    fn unrecognized(&mut self) -> LexicalError {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '"' | '\'' | ';') {
                break;
            }
            self.advance();
        }

        LexicalError::UnrecognizedToken {
            text: self.line[self.start_offset..self.current_offset].trim_end().to_string(),
            line: self.line_number,
            column: self.start_offset + 1,
        }
    }

    fn scan_comment(&mut self) -> Token {
        while self.advance().is_some() {}
        self.make_token(TokenKind::Comment)
    }

    fn scan_preprocessor(&mut self) -> Result<Token, LexicalError> {
        if !self.match_str("include") {
            return Err(self.unrecognized());
        }
        self.skip_whitespace();
        if !self.match_char('<') {
            return Err(self.unrecognized());
        }

        loop {
            match self.advance() {
                Some((_, '>')) => break,
                Some(_) => {}
                None => return Err(self.unrecognized_from_start()),
            }
        }

        Ok(self.make_token(TokenKind::Preprocessor))
    }

    fn scan_string(&mut self) -> Result<Token, LexicalError> {
        loop {
            match self.advance() {
                Some((end, '"')) => {
                    let content = &self.line[self.start_offset + 1..end];
                    return Ok(self.token_with_text(TokenKind::StringLiteral, content));
                }
                Some((_, '\\')) => {
                    self.advance();
                }
                Some(_) => {}
                None => return Err(self.unrecognized_from_start()),
            }
        }
    }

    /// An unterminated construct reaching the end of the line
    fn unrecognized_from_start(&mut self) -> LexicalError {
        let rest = &self.line[self.start_offset..];
        let end = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_whitespace() || matches!(c, '"' | '\'' | ';'))
            .map_or(rest.len(), |(i, _)| i);

        LexicalError::UnrecognizedToken {
            text: rest[..end].to_string(),
            line: self.line_number,
            column: self.start_offset + 1,
        }
    }

    fn scan_number(&mut self) -> Result<Token, LexicalError> {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // `12abc` is neither a number nor a word
        if self.peek().map_or(false, is_ident_continue) {
            return Err(self.unrecognized());
        }

        Ok(self.make_token(TokenKind::IntegerLiteral))
    }

    fn scan_word(&mut self) -> Token {
        self.consume_word();
        let line = self.line;
        let word = &line[self.start_offset..self.current_offset];

        match word {
            "using" if self.match_namespace_directive() => {
                self.make_token(TokenKind::NamespaceDirective)
            }
            "std" if self.match_qualified_stream() => self.make_token(TokenKind::Identifier),
            _ => self.make_token(lookup_word(word)),
        }
    }

    fn consume_word(&mut self) {
        while self.peek().map_or(false, is_ident_continue) {
            self.advance();
        }
    }

    /// After `using`: whitespace, `namespace`, whitespace, `std`
    fn match_namespace_directive(&mut self) -> bool {
        let checkpoint = (self.chars.clone(), self.current_offset);

        let matched = self.match_whitespace()
            && self.match_keyword("namespace")
            && self.match_whitespace()
            && self.match_keyword("std");

        if !matched {
            (self.chars, self.current_offset) = checkpoint;
        }
        matched
    }

    /// After `std`: `::cout` or `::cin`
    fn match_qualified_stream(&mut self) -> bool {
        let checkpoint = (self.chars.clone(), self.current_offset);

        let matched = self.match_str("::") && (self.match_keyword("cout") || self.match_keyword("cin"));

        if !matched {
            (self.chars, self.current_offset) = checkpoint;
        }
        matched
    }

    fn match_whitespace(&mut self) -> bool {
        let start = self.current_offset;
        self.skip_whitespace();
        self.current_offset > start
    }

    /// Match a whole word, not a prefix of a longer identifier
    fn match_keyword(&mut self, keyword: &str) -> bool {
        let Some(after) = self.line[self.current_offset..].strip_prefix(keyword) else {
            return false;
        };
        if after.chars().next().map_or(false, is_ident_continue) {
            return false;
        }
        self.match_str(keyword)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.scan_token();
        match &result {
            None | Some(Err(_)) => self.finished = true,
            Some(Ok(token)) if token.kind == TokenKind::Comment => self.finished = true,
            Some(Ok(_)) => {}
        }
        result
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_xid::UnicodeXID::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || unicode_xid::UnicodeXID::is_xid_continue(c)
}
