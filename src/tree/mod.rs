/*
    This module is for the derivation trees the engine builds
*/

use std::fmt::Display;

use crate::grammar::Symbol;

// A node owns its children. Leaves are shifted input tokens; interior
// nodes are the left-hand sides of applied reductions, and their
// children read left-to-right are the rewrite that was folded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    pub symbol: Symbol,
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn leaf(symbol: Symbol) -> Self {
        ParseTree {
            symbol,
            children: Vec::new(),
        }
    }

    pub fn node(symbol: Symbol, children: Vec<ParseTree>) -> Self {
        ParseTree { symbol, children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    // The shifted tokens under this node, left to right
    pub fn leaves(&self) -> Vec<&str> {
        if self.is_leaf() {
            vec![self.symbol.text()]
        } else {
            self.children.iter().flat_map(ParseTree::leaves).collect()
        }
    }

    // Box-drawing rendering, one symbol per line
    pub fn render(&self) -> String {
        let mut lines = vec![format!("└── {}", self.symbol)];
        self.render_children(&mut lines, "    ");
        lines.join("\n")
    }

    fn render_children(&self, lines: &mut Vec<String>, prefix: &str) {
        let count = self.children.len();

        for (i, child) in self.children.iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, connector, child.symbol));

            let child_prefix = if is_last { "    " } else { "│   " };
            child.render_children(lines, &format!("{}{}", prefix, child_prefix));
        }
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
