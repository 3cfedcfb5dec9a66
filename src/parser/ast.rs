// AST (Abstract Syntax Tree) definitions for mb-script expressions

use crate::parser::lexer::{Span, TokenKind};
use crate::runtime::RuntimeValue;
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    /// Operator for a binary token kind, if it is one.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Mul => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            TokenKind::Mod => BinOp::Mod,
            TokenKind::Pow => BinOp::Pow,
            TokenKind::Equals => BinOp::Eq,
            TokenKind::NotEquals => BinOp::Ne,
            TokenKind::Less => BinOp::Lt,
            TokenKind::LessEq => BinOp::Le,
            TokenKind::Greater => BinOp::Gt,
            TokenKind::GreaterEq => BinOp::Ge,
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,  // -x
    Plus, // +x
    Not,  // !x
}

impl UnOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(UnOp::Neg),
            TokenKind::Plus => Some(UnOp::Plus),
            TokenKind::Not => Some(UnOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Plus => "+",
            UnOp::Not => "!",
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression nodes. Every child is boxed and owned by exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    StringLiteral {
        value: String,
        location: Span,
    },
    NumberLiteral {
        value: f64,
        location: Span,
    },
    BooleanLiteral {
        value: bool,
        location: Span,
    },
    NullLiteral {
        location: Span,
    },
    Identifier {
        name: String,
        location: Span,
    },
    UnaryExpr {
        op: UnOp,
        operand: Box<AstNode>,
        location: Span,
    },
    BinaryExpr {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: Span,
    },
}

impl AstNode {
    /// Display name of the node's variant
    pub fn name(&self) -> &'static str {
        match self {
            AstNode::StringLiteral { .. } => "StringLiteral",
            AstNode::NumberLiteral { .. } => "NumberLiteral",
            AstNode::BooleanLiteral { .. } => "BooleanLiteral",
            AstNode::NullLiteral { .. } => "NullLiteral",
            AstNode::Identifier { .. } => "Identifier",
            AstNode::UnaryExpr { .. } => "UnaryExpr",
            AstNode::BinaryExpr { .. } => "BinaryExpr",
        }
    }

    /// Span of the token that produced this node (the operator for unary and
    /// binary expressions).
    pub fn location(&self) -> &Span {
        match self {
            AstNode::StringLiteral { location, .. }
            | AstNode::NumberLiteral { location, .. }
            | AstNode::BooleanLiteral { location, .. }
            | AstNode::NullLiteral { location }
            | AstNode::Identifier { location, .. }
            | AstNode::UnaryExpr { location, .. }
            | AstNode::BinaryExpr { location, .. } => location,
        }
    }

    /// Evaluation hook for the future evaluator.
    // TODO: produce real values once RuntimeValue grows number/string/bool variants.
    pub fn eval(&self) -> RuntimeValue {
        RuntimeValue::Void
    }

    /// Indented tree outline, one line per node.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(0, &mut lines);
        lines
    }

    fn outline_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            AstNode::StringLiteral { value, .. } => {
                lines.push(format!("{}{} {:?}", indent, self.name(), value))
            }
            AstNode::NumberLiteral { value, .. } => {
                lines.push(format!("{}{} {}", indent, self.name(), value))
            }
            AstNode::BooleanLiteral { value, .. } => {
                lines.push(format!("{}{} {}", indent, self.name(), value))
            }
            AstNode::NullLiteral { .. } => lines.push(format!("{}{}", indent, self.name())),
            AstNode::Identifier { name, .. } => {
                lines.push(format!("{}{} {}", indent, self.name(), name))
            }
            AstNode::UnaryExpr { op, operand, .. } => {
                lines.push(format!("{}{} {}", indent, self.name(), op));
                operand.outline_into(depth + 1, lines);
            }
            AstNode::BinaryExpr {
                op, left, right, ..
            } => {
                lines.push(format!("{}{} {}", indent, self.name(), op));
                left.outline_into(depth + 1, lines);
                right.outline_into(depth + 1, lines);
            }
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::StringLiteral { value, .. } => {
                write!(f, "{{ type: {}, value: {:?} }}", self.name(), value)
            }
            AstNode::NumberLiteral { value, .. } => {
                write!(f, "{{ type: {}, value: {} }}", self.name(), value)
            }
            AstNode::BooleanLiteral { value, .. } => {
                write!(f, "{{ type: {}, value: {} }}", self.name(), value)
            }
            AstNode::NullLiteral { .. } => write!(f, "{{ type: {} }}", self.name()),
            AstNode::Identifier { name, .. } => {
                write!(f, "{{ type: {}, name: {} }}", self.name(), name)
            }
            AstNode::UnaryExpr { op, operand, .. } => write!(
                f,
                "{{ type: {}, op: {}, right: {} }}",
                self.name(),
                op,
                operand
            ),
            AstNode::BinaryExpr {
                op, left, right, ..
            } => write!(
                f,
                "{{ type: {}, left: {}, op: {}, right: {} }}",
                self.name(),
                left,
                op,
                right
            ),
        }
    }
}

/// Program root: top-level expressions in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn name(&self) -> &'static str {
        "Program"
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Evaluates each top-level expression in order and returns the last value.
    pub fn eval(&self) -> RuntimeValue {
        self.nodes
            .iter()
            .map(AstNode::eval)
            .last()
            .unwrap_or_default()
    }

    /// Outline of every top-level expression under a `Program` header.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = vec![self.name().to_string()];
        for node in &self.nodes {
            lines.extend(node.outline().into_iter().map(|line| format!("  {}", line)));
        }
        lines
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return write!(f, "[]");
        }

        writeln!(f, "[")?;
        for (i, node) in self.nodes.iter().enumerate() {
            let sep = if i + 1 < self.nodes.len() { "," } else { "" };
            writeln!(f, "  {}{}", node, sep)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> AstNode {
        AstNode::NumberLiteral {
            value,
            location: Span::default(),
        }
    }

    #[test]
    fn test_literal_rendering() {
        let s = AstNode::StringLiteral {
            value: "hi".to_string(),
            location: Span::default(),
        };
        assert_eq!(s.to_string(), "{ type: StringLiteral, value: \"hi\" }");
        assert_eq!(num(2.5).to_string(), "{ type: NumberLiteral, value: 2.5 }");
        assert_eq!(
            AstNode::NullLiteral {
                location: Span::default()
            }
            .to_string(),
            "{ type: NullLiteral }"
        );
    }

    #[test]
    fn test_nested_rendering() {
        let node = AstNode::BinaryExpr {
            op: BinOp::Add,
            left: Box::new(num(1.0)),
            right: Box::new(AstNode::UnaryExpr {
                op: UnOp::Neg,
                operand: Box::new(num(2.0)),
                location: Span::default(),
            }),
            location: Span::default(),
        };

        assert_eq!(
            node.to_string(),
            "{ type: BinaryExpr, left: { type: NumberLiteral, value: 1 }, op: +, \
             right: { type: UnaryExpr, op: -, right: { type: NumberLiteral, value: 2 } } }"
        );
        assert_eq!(
            node.outline(),
            vec![
                "BinaryExpr +",
                "  NumberLiteral 1",
                "  UnaryExpr -",
                "    NumberLiteral 2",
            ]
        );
    }

    #[test]
    fn test_program_rendering() {
        let mut program = Program::new();
        assert_eq!(program.to_string(), "[]");

        program.nodes.push(num(1.0));
        program.nodes.push(AstNode::Identifier {
            name: "x".to_string(),
            location: Span::default(),
        });

        assert_eq!(
            program.to_string(),
            "[\n  { type: NumberLiteral, value: 1 },\n  { type: Identifier, name: x }\n]"
        );
    }

    #[test]
    fn test_eval_is_void() {
        let mut program = Program::new();
        assert!(program.eval().is_void());

        program.nodes.push(num(3.0));
        assert_eq!(program.eval(), RuntimeValue::Void);
    }

    #[test]
    fn test_operator_from_token() {
        assert_eq!(BinOp::from_token(TokenKind::Pow), Some(BinOp::Pow));
        assert_eq!(BinOp::from_token(TokenKind::Not), None);
        assert_eq!(UnOp::from_token(TokenKind::Minus), Some(UnOp::Neg));
        assert_eq!(UnOp::from_token(TokenKind::Mul), None);
    }
}
