//! Static overview of the statement forms the analyzer understands.
//!
//! Independent of the analyzed source: it documents the grammar as a tree of
//! example productions, with the statements after the `main` declaration
//! nested under it.

use std::fmt;

/// One statement form: category, token structure and an example
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production {
    pub category: &'static str,
    pub structure: &'static str,
    pub example: &'static str,
}

pub const PRODUCTIONS: &[Production] = &[
    Production {
        category: "PREPROCESSOR DIRECTIVE",
        structure: "LIBRARY",
        example: "#include <iostream>",
    },
    Production {
        category: "USING DIRECTIVE",
        structure: "USING NAMESPACE STD SEMICOLON",
        example: "using namespace std ;",
    },
    Production {
        category: "FUNCTION DECLARATION",
        structure: "INT IDENTIFIER OPEN_PAREN CLOSE_PAREN OPEN_BRACE",
        example: "int main ( ) {}",
    },
    Production {
        category: "OUTPUT STATEMENT",
        structure: "COUT INSERTION STRING_LITERAL SEMICOLON",
        example: "cout << Hello World! ;",
    },
    Production {
        category: "DECLARATION",
        structure: "INT IDENTIFIER SEMICOLON",
        example: "int num1 ;",
    },
    Production {
        category: "INPUT STATEMENT",
        structure: "CIN EXTRACTION IDENTIFIER SEMICOLON",
        example: "cin >> num1 ;",
    },
    Production {
        category: "RETURN STATEMENT",
        structure: "RETURN INTEGER_LITERAL SEMICOLON",
        example: "return 0 ;",
    },
];

/// A node of the grammar tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarNode {
    pub value: String,
    pub children: Vec<GrammarNode>,
}

impl GrammarNode {
    fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<GrammarNode>) -> Self {
        self.children = children;
        self
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(depth), self.value)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for GrammarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 1)
    }
}

/// Build the tree for a list of productions
pub fn grammar_tree(productions: &[Production]) -> GrammarNode {
    let mut top_level = Vec::new();
    let mut function: Option<GrammarNode> = None;

    for production in productions {
        let node = GrammarNode::new(production.example);

        let node = match production.category {
            "FUNCTION DECLARATION" => {
                let return_type = production.structure.split(' ').next().unwrap_or("");
                let name = production.example.split(' ').nth(1).unwrap_or("");
                if let Some(previous) = function.take() {
                    top_level.push(previous);
                }
                function = Some(node.with_children(vec![
                    GrammarNode::new(return_type),
                    GrammarNode::new(name),
                ]));
                continue;
            }
            "OUTPUT STATEMENT" => operator_node(node, "INSERTION", "<<", production.example),
            "INPUT STATEMENT" => operator_node(node, "EXTRACTION", ">>", production.example),
            "RETURN STATEMENT" => {
                let value = production
                    .example
                    .trim_start_matches("return")
                    .trim_end_matches(';')
                    .trim();
                node.with_children(vec![
                    GrammarNode::new("RETURN").with_children(vec![GrammarNode::new(value)])
                ])
            }
            _ => node.with_children(vec![
                GrammarNode::new(production.structure),
                GrammarNode::new(production.example),
            ]),
        };

        match function.as_mut() {
            Some(function) => function.children.push(node),
            None => top_level.push(node),
        }
    }

    top_level.extend(function);
    GrammarNode::new("PROGRAM").with_children(top_level)
}

fn operator_node(node: GrammarNode, name: &str, operator: &str, example: &str) -> GrammarNode {
    let (left, right) = example.split_once(operator).unwrap_or((example, ""));
    node.with_children(vec![GrammarNode::new(name).with_children(vec![
        GrammarNode::new(left.trim()),
        GrammarNode::new(right.trim()),
    ])])
}
