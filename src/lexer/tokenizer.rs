//! Line tokenizer with lookahead for chained stream statements.

use std::iter::Peekable;

use log::trace;

use super::scanner::Scanner;
use super::token::{Token, TokenKind};
use crate::error::LexicalError;

/// Tokens produced for a whole source, up to the first lexical error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub error: Option<LexicalError>,
}

impl TokenStream {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Position inside a `cout << a << b` / `cin >> a >> b` chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// An operator or an operand must follow
    AwaitingOperand,
    /// The chain continues only if `<<` or `>>` follows
    AwaitingOperator,
}

/// Tokenizes one line, classifying the operators of stream statements
pub struct LineTokenizer<'a> {
    scanner: Peekable<Scanner<'a>>,
}

impl<'a> LineTokenizer<'a> {
    pub fn new(line: &'a str, line_number: usize) -> Self {
        Self {
            scanner: Scanner::new(line, line_number).peekable(),
        }
    }

    /// Push every token of the line onto `out`.
    ///
    /// Tokens recognized before an error stay in `out`.
    pub fn tokenize_into(mut self, out: &mut Vec<Token>) -> Result<(), LexicalError> {
        while let Some(token) = self.scanner.next().transpose()? {
            if token.stream().is_some() {
                self.stream_statement(token, out)?;
            } else {
                out.push(token);
            }
        }
        Ok(())
    }

    fn stream_statement(&mut self, head: Token, out: &mut Vec<Token>) -> Result<(), LexicalError> {
        let missing = LexicalError::MissingStreamOperand {
            stream: head.text.clone(),
            line: head.line,
            column: head.column,
        };
        out.push(head);

        let mut state = StreamState::AwaitingOperand;
        loop {
            state = match state {
                StreamState::AwaitingOperand => {
                    let Some(token) = self.scanner.next().transpose()? else {
                        return Err(missing);
                    };

                    if token.is_stream_operator() {
                        out.push(classify_stream_operator(token));
                        StreamState::AwaitingOperand
                    } else {
                        out.push(token);
                        StreamState::AwaitingOperator
                    }
                }
                StreamState::AwaitingOperator => match self.scanner.peek() {
                    Some(Ok(next)) if next.is_stream_operator() => {
                        if let Some(Ok(token)) = self.scanner.next() {
                            out.push(classify_stream_operator(token));
                        }
                        StreamState::AwaitingOperand
                    }
                    _ => return Ok(()),
                },
            };
        }
    }
}

fn classify_stream_operator(mut token: Token) -> Token {
    token.kind = if token.text == "<<" {
        TokenKind::StreamInsertion
    } else {
        TokenKind::StreamExtraction
    };
    token
}

/// Tokenize one line
pub fn tokenize_line(line: &str, line_number: usize) -> Result<Vec<Token>, LexicalError> {
    let mut tokens = Vec::new();
    LineTokenizer::new(line, line_number).tokenize_into(&mut tokens)?;
    Ok(tokens)
}

/// Tokenize a whole source, stopping at the first lexical error
pub fn tokenize(source: &str) -> TokenStream {
    let mut stream = TokenStream::default();

    for (index, line) in source.lines().enumerate() {
        let first_new = stream.tokens.len();
        let result = LineTokenizer::new(line, index + 1).tokenize_into(&mut stream.tokens);

        for token in &stream.tokens[first_new..] {
            trace!("{}:{} {:?} {:?}", token.line, token.column, token.kind, token.text);
        }

        if let Err(error) = result {
            trace!("lexical error on line {}: {}", index + 1, error);
            stream.error = Some(error);
            break;
        }
    }

    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_text(line: &str) -> Vec<(TokenKind, String)> {
        tokenize_line(line, 1)
            .expect("line should tokenize")
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn chained_insertion() {
        assert_eq!(
            kinds_and_text(r#"cout << "hi" << x << y;"#),
            vec![
                (TokenKind::Identifier, "cout".into()),
                (TokenKind::StreamInsertion, "<<".into()),
                (TokenKind::StringLiteral, "hi".into()),
                (TokenKind::StreamInsertion, "<<".into()),
                (TokenKind::Identifier, "x".into()),
                (TokenKind::StreamInsertion, "<<".into()),
                (TokenKind::Identifier, "y".into()),
                (TokenKind::Symbol, ";".into()),
            ]
        );
    }

    #[test]
    fn chained_extraction_with_qualified_stream() {
        assert_eq!(
            kinds_and_text("std::cin >> a >> b;"),
            vec![
                (TokenKind::Identifier, "std::cin".into()),
                (TokenKind::StreamExtraction, ">>".into()),
                (TokenKind::Identifier, "a".into()),
                (TokenKind::StreamExtraction, ">>".into()),
                (TokenKind::Identifier, "b".into()),
                (TokenKind::Symbol, ";".into()),
            ]
        );
    }

    #[test]
    fn shift_outside_streams_stays_an_operator() {
        let tokens = kinds_and_text("x = a << 2;");
        assert_eq!(tokens[3], (TokenKind::Operator, "<<".into()));
    }

    #[test]
    fn statement_ends_at_first_non_operator() {
        let tokens = kinds_and_text("cout << a + b;");
        assert_eq!(tokens[2], (TokenKind::Identifier, "a".into()));
        assert_eq!(tokens[3], (TokenKind::Operator, "+".into()));
    }

    #[test]
    fn missing_operand() {
        assert_eq!(
            tokenize_line("  cout", 4),
            Err(LexicalError::MissingStreamOperand {
                stream: "cout".into(),
                line: 4,
                column: 3,
            })
        );
        assert!(matches!(
            tokenize_line("cout <<", 1),
            Err(LexicalError::MissingStreamOperand { .. })
        ));
    }

    #[test]
    fn tokens_before_an_error_are_kept() {
        let stream = tokenize("int x;\nx = 1 $ 2;\nint y;");
        assert!(!stream.is_ok());
        let texts: Vec<_> = stream.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["int", "x", ";", "x", "=", "1"]);
        assert_eq!(stream.error.map(|e| e.to_string()), Some("unrecognized token: $".into()));
    }

    #[test]
    fn rejoined_text_matches_the_line() {
        let line = r#"  int total = first + second ; cout << "sum" << total;  // done"#;
        let rejoined: String = tokenize_line(line, 1)
            .unwrap()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        let squeezed: String = line.chars().filter(|c| !c.is_whitespace() && *c != '"').collect();
        let rejoined: String = rejoined.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(rejoined, squeezed);
    }
}
