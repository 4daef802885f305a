//! Declaration matching over a tokenized line.
//!
//! Recognizes `type name[, name...][()]` and `return value`, fills the
//! symbol table and records which identifiers are used rather than declared.

use log::debug;

use super::symbol_table::{Symbol, SymbolKind, SymbolTable};
use crate::lexer::{is_type_keyword, Token, TokenKind, LIBRARY_NAMES};

/// A `return` whose value does not fit the declared type of `main`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidReturn {
    pub value: String,
    pub declared_type: String,
    pub line: usize,
    pub column: usize,
}

/// Results of the declaration pass that outlive a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub symbols: SymbolTable,
    /// Identifiers that are used, not declared, in source order
    pub free_identifiers: Vec<Token>,
    pub invalid_return: Option<InvalidReturn>,
}

impl Declarations {
    pub fn scan_line(&mut self, line: &str, tokens: &[Token]) {
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];

            if token.kind == TokenKind::Keyword && is_type_keyword(&token.text) {
                if let Some(consumed) = self.declaration(&tokens[i..]) {
                    i += consumed;
                    continue;
                }
            }

            if token.is(TokenKind::Keyword, "return") {
                self.return_statement(line, token, &tokens[i + 1..]);
            } else if is_free_identifier(token) {
                self.free_identifiers.push(token.clone());
            }

            i += 1;
        }
    }

    /// Match a declaration at the start of `tokens`, returning how many
    /// tokens it spans
    fn declaration(&mut self, tokens: &[Token]) -> Option<usize> {
        let declared_type = &tokens[0];
        let mut names = vec![tokens.get(1).filter(|t| is_name(t))?];
        let mut end = 2;

        loop {
            match (tokens.get(end), tokens.get(end + 1)) {
                (Some(comma), Some(name)) if comma.is(TokenKind::Symbol, ",") && is_name(name) => {
                    names.push(name);
                    end += 2;
                }
                (Some(name), _) if is_name(name) => {
                    names.push(name);
                    end += 1;
                }
                _ => break,
            }
        }

        let is_function = matches!(
            (tokens.get(end), tokens.get(end + 1)),
            (Some(open), Some(close))
                if open.is(TokenKind::Symbol, "(") && close.is(TokenKind::Symbol, ")")
        );
        let kind = if is_function {
            end += 2;
            SymbolKind::Function
        } else {
            SymbolKind::Variable
        };

        let scope = self.symbols.next_scope();
        for name in names {
            debug!(
                "declared {} {} '{}' as {} on line {}",
                scope, kind, name.text, declared_type.text, name.line
            );
            self.symbols.push(Symbol {
                name: name.text.clone(),
                scope,
                kind,
                declared_type: declared_type.text.clone(),
                line: name.line,
                column: name.column,
            });
        }

        Some(end)
    }

    fn return_statement(&mut self, line: &str, keyword: &Token, rest: &[Token]) {
        let value = return_value(line, keyword, rest);
        if value.is_empty() || self.invalid_return.is_some() {
            return;
        }

        let conflict = self.symbols.mains().find(|main| match main.declared_type.as_str() {
            "void" => true,
            "int" => is_bool_literal(value) || is_string_literal(value) || is_float_literal(value),
            _ => false,
        });

        if let Some(main) = conflict {
            debug!("return value '{}' does not fit main's {}", value, main.declared_type);
            self.invalid_return = Some(InvalidReturn {
                value: value.to_string(),
                declared_type: main.declared_type.clone(),
                line: keyword.line,
                column: keyword.column,
            });
        }
    }
}

/// Source text after `return`, up to `;`, a comment, or the end of the line
fn return_value<'a>(line: &'a str, keyword: &Token, rest: &[Token]) -> &'a str {
    let start = keyword.column - 1 + keyword.text.len();
    let end = rest
        .iter()
        .find(|t| t.is(TokenKind::Symbol, ";") || t.kind == TokenKind::Comment)
        .map_or(line.len(), |t| t.column - 1);

    line.get(start..end).unwrap_or("").trim()
}

fn is_name(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::FunctionName) && token.stream().is_none()
}

fn is_free_identifier(token: &Token) -> bool {
    token.kind == TokenKind::Identifier
        && token.stream().is_none()
        && !LIBRARY_NAMES.contains(&token.text.as_str())
}

fn is_bool_literal(value: &str) -> bool {
    value == "true" || value == "false"
}

fn is_string_literal(value: &str) -> bool {
    value.starts_with('"')
}

fn is_float_literal(value: &str) -> bool {
    value.split_once('.').map_or(false, |(whole, fraction)| {
        whole.ends_with(|c: char| c.is_ascii_digit())
            && fraction.starts_with(|c: char| c.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_line;
    use crate::semantic::Scope;

    fn scan(source: &str) -> Declarations {
        let mut declarations = Declarations::default();
        for (i, line) in source.lines().enumerate() {
            let tokens = tokenize_line(line, i + 1).unwrap();
            declarations.scan_line(line, &tokens);
        }
        declarations
    }

    fn names(declarations: &Declarations) -> Vec<(&str, Scope, SymbolKind, &str)> {
        declarations
            .symbols
            .iter()
            .map(|s| (s.name.as_str(), s.scope, s.kind, s.declared_type.as_str()))
            .collect()
    }

    #[test]
    fn multi_variable_declaration() {
        let declarations = scan("int a, b;");
        assert_eq!(
            names(&declarations),
            vec![
                ("a", Scope::Global, SymbolKind::Variable, "int"),
                ("b", Scope::Global, SymbolKind::Variable, "int"),
            ]
        );
        assert!(declarations.free_identifiers.is_empty());
    }

    #[test]
    fn scope_is_positional() {
        let declarations = scan("int main();\nint x;\nint y;");
        assert_eq!(
            names(&declarations),
            vec![
                ("main", Scope::Global, SymbolKind::Function, "int"),
                ("x", Scope::Local, SymbolKind::Variable, "int"),
                ("y", Scope::Local, SymbolKind::Variable, "int"),
            ]
        );
    }

    #[test]
    fn initializers_are_uses() {
        let declarations = scan("int main() {\nint sum = first + second;\n}");
        let used: Vec<_> = declarations.free_identifiers.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(used, vec!["first", "second"]);
        assert_eq!(declarations.symbols.lookup("sum").unwrap().scope, Scope::Local);
    }

    #[test]
    fn streams_and_library_names_are_not_uses() {
        let declarations = scan("cout << total << endl; std::cin >> count;");
        let used: Vec<_> = declarations.free_identifiers.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(used, vec!["total", "count"]);
    }

    #[test]
    fn several_declarations_on_one_line() {
        let declarations = scan("int a; string b; a + b;");
        assert_eq!(declarations.symbols.len(), 2);
        assert_eq!(declarations.free_identifiers.len(), 2);
    }

    #[test]
    fn valid_returns() {
        assert_eq!(scan("int main() {\nreturn 0;\n}").invalid_return, None);
        assert_eq!(scan("int main() {\nreturn total;\n}").invalid_return, None);
        assert_eq!(scan("void main() {\nreturn;\n}").invalid_return, None);
        // no main yet, nothing to compare against
        assert_eq!(scan("return \"early\";").invalid_return, None);
    }

    #[test]
    fn invalid_returns() {
        for value in ["true", "\"text\"", "3.14"] {
            let source = format!("int main() {{\n  return {value};\n}}");
            let invalid = scan(&source).invalid_return.expect("return should be rejected");
            assert_eq!(invalid.value, value);
            assert_eq!((invalid.line, invalid.column), (2, 3));
        }

        let invalid = scan("void main() { return 0; }").invalid_return.unwrap();
        assert_eq!(invalid.declared_type, "void");
    }

    #[test]
    fn return_value_stops_at_comment() {
        let declarations = scan("int main() { return 1.5 // x");
        assert_eq!(declarations.invalid_return.unwrap().value, "1.5");
    }
}
