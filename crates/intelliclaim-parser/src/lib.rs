//! IntelliClaim Parser - rule grammar parser
//!
//! Turns rule text such as
//! `IF PatientAge < 18 AND GuardianConsent = false THEN flag as Warning`
//! into a [`ConditionNode`](intelliclaim_core::ConditionNode) tree, or a
//! [`ParseError`] naming the offending byte offset.
//!
//! Grammar:
//!
//! ```text
//! rule       := ["IF"] condition ["THEN" action]
//! condition  := conjunct ("OR" conjunct)*
//! conjunct   := term ("AND" term)*
//! term       := "NOT" term | "(" condition ")" | comparison
//! comparison := field operator literal
//! operator   := "=" | "!=" | "<" | "<=" | ">" | ">=" | "IN" | "NOT IN"
//! literal    := number | quoted-string | boolean | null | date | list | list-name
//! ```
//!
//! `AND` binds tighter than `OR`; both are left-associative; parentheses
//! override. Parsing is pure and deterministic.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ParseError, Result};
pub use parser::{parse, parse_condition, ParsedRule};
