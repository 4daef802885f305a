//! Symbol table for tracking declarations.

use std::fmt;

/// Ordered list of declared symbols.
///
/// Duplicates are kept; lookups return the first declaration of a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub scope: Scope,
    pub kind: SymbolKind,
    pub declared_type: String,
    pub line: usize,
    pub column: usize,
}

/// Where a symbol lives. Anything declared once `main` is known is local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Local,
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("Global"),
            Scope::Local => f.write_str("Local"),
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => f.write_str("Variable"),
            SymbolKind::Function => f.write_str("Function"),
        }
    }
}

impl Symbol {
    /// What a variable of this type is meant to hold, for the type-checking report
    pub fn description(&self) -> Option<String> {
        if self.kind != SymbolKind::Variable {
            return None;
        }

        let holds = match self.declared_type.as_str() {
            "int" => "integers",
            "string" => "strings",
            "float" => "floating-point numbers",
            "char" => "a character",
            "bool" => "boolean values",
            "double" => "high precision floating-point numbers",
            _ => return None,
        };

        Some(format!(
            "Variable {} is declared as {}, suitable for storing {}.",
            self.name, self.declared_type, holds
        ))
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Scope for the next declaration
    pub fn next_scope(&self) -> Scope {
        if self.contains("main") {
            Scope::Local
        } else {
            Scope::Global
        }
    }

    /// First symbol with this name
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Every declaration of this name, in order
    pub fn lookup_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every symbol named `main`, in declaration order
    pub fn mains(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.name == "main")
    }

    /// Later declarations of names that were already declared
    pub fn redeclarations(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols
            .iter()
            .enumerate()
            .filter(move |(i, s)| self.symbols[..*i].iter().any(|prev| prev.name == s.name))
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, declared_type: &str, kind: SymbolKind) -> Symbol {
        Symbol {
            name: name.into(),
            scope: Scope::Global,
            kind,
            declared_type: declared_type.into(),
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn first_declaration_wins() {
        let mut table = SymbolTable::new();
        table.push(symbol("b", "int", SymbolKind::Variable));
        table.push(symbol("b", "string", SymbolKind::Variable));

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("b").unwrap().declared_type, "int");
        let types: Vec<_> = table.lookup_all("b").map(|s| s.declared_type.as_str()).collect();
        assert_eq!(types, vec!["int", "string"]);
        let redeclared: Vec<_> = table.redeclarations().map(|s| s.declared_type.as_str()).collect();
        assert_eq!(redeclared, vec!["string"]);
    }

    #[test]
    fn scope_follows_main() {
        let mut table = SymbolTable::new();
        assert_eq!(table.next_scope(), Scope::Global);
        table.push(symbol("main", "int", SymbolKind::Function));
        assert_eq!(table.next_scope(), Scope::Local);
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            symbol("c", "char", SymbolKind::Variable).description().as_deref(),
            Some("Variable c is declared as char, suitable for storing a character.")
        );
        assert_eq!(symbol("v", "void", SymbolKind::Variable).description(), None);
        assert_eq!(symbol("main", "int", SymbolKind::Function).description(), None);
    }
}
