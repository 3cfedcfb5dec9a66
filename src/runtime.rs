//! Values produced by evaluating AST nodes.
//!
//! Evaluation is not implemented yet: every node evaluates to
//! [`RuntimeValue::Void`].

use std::fmt;

/// Result of evaluating a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RuntimeValue {
    #[default]
    Void,
}

impl RuntimeValue {
    pub fn is_void(&self) -> bool {
        matches!(self, RuntimeValue::Void)
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Void => write!(f, "void"),
        }
    }
}
