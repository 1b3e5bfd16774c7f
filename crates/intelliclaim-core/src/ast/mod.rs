//! Condition AST definitions

pub mod condition;
pub mod operator;

pub use condition::{ConditionNode, Literal};
pub use operator::{LogicalOp, Operator};
