//! Directive and stream-operator tracking.

use crate::lexer::{Token, TokenKind};

/// State collected line by line while reading the source.
///
/// Each stream use is judged against the directives seen so far, so an
/// include placed after the first `cout` does not count for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveFlags {
    pub using_io: bool,
    pub using_std: bool,
    /// First stream used before `<iostream>` was included
    pub invalid_io_use: Option<Token>,
    /// First unqualified stream used without `using namespace std;`
    pub invalid_std_use: Option<Token>,
    /// First stream not followed by its own operator
    pub invalid_operator: Option<Token>,
}

impl DirectiveFlags {
    pub fn scan_line(&mut self, tokens: &[Token]) {
        for (i, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Preprocessor if is_iostream_include(&token.text) => {
                    self.using_io = true;
                }
                TokenKind::NamespaceDirective
                    if tokens.get(i + 1).map_or(false, |t| t.is(TokenKind::Symbol, ";")) =>
                {
                    self.using_std = true;
                }
                _ => {}
            }
        }

        for (i, token) in tokens.iter().enumerate() {
            let Some(stream) = token.stream() else {
                continue;
            };

            if !self.using_io {
                self.invalid_io_use.get_or_insert_with(|| token.clone());
            } else if !self.using_std && !stream.is_qualified() {
                self.invalid_std_use.get_or_insert_with(|| token.clone());
            } else if tokens.get(i + 1).map_or(true, |next| next.text != stream.operator()) {
                self.invalid_operator.get_or_insert_with(|| token.clone());
            }
        }
    }
}

/// `#include <iostream>`, ignoring whitespace around the header name
fn is_iostream_include(text: &str) -> bool {
    text.split_once('<')
        .and_then(|(_, rest)| rest.strip_suffix('>'))
        .map_or(false, |header| header.trim() == "iostream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_line;

    fn scan(lines: &[&str]) -> DirectiveFlags {
        let mut flags = DirectiveFlags::default();
        for (i, line) in lines.iter().enumerate() {
            flags.scan_line(&tokenize_line(line, i + 1).unwrap());
        }
        flags
    }

    #[test]
    fn well_formed_program() {
        let flags = scan(&[
            "#include <iostream>",
            "using namespace std;",
            "cout << x;",
            "cin >> x;",
        ]);
        assert!(flags.using_io && flags.using_std);
        assert_eq!(flags.invalid_io_use, None);
        assert_eq!(flags.invalid_std_use, None);
        assert_eq!(flags.invalid_operator, None);
    }

    #[test]
    fn include_spacing() {
        assert!(is_iostream_include("#include < iostream >"));
        assert!(is_iostream_include("#include<iostream>"));
        assert!(!is_iostream_include("#include <string>"));
    }

    #[test]
    fn directive_needs_semicolon() {
        assert!(!scan(&["using namespace std"]).using_std);
    }

    #[test]
    fn stream_before_include() {
        let flags = scan(&["cout << x;", "#include <iostream>"]);
        assert!(flags.using_io);
        assert_eq!(flags.invalid_io_use.map(|t| t.line), Some(1));
    }

    #[test]
    fn qualified_streams_need_no_directive() {
        let flags = scan(&["#include <iostream>", "std::cout << x;", "cin >> y;"]);
        assert_eq!(flags.invalid_operator, None);
        assert_eq!(flags.invalid_std_use.map(|t| t.text), Some("cin".to_string()));
    }

    #[test]
    fn wrong_direction() {
        let flags = scan(&["#include <iostream>", "using namespace std;", "cin << x;"]);
        assert_eq!(flags.invalid_operator.map(|t| t.text), Some("cin".to_string()));
    }
}
