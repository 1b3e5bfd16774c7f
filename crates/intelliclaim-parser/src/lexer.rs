//! Rule text tokenizer
//!
//! Splits rule text into offset-carrying tokens. Comparison operators are
//! scanned as maximal runs of operator characters so that sequences like
//! `>>` or `<>` surface as a single unknown-operator error instead of two
//! half-parsed comparisons.

use crate::error::{ParseError, Result};
use chrono::NaiveDate;
use intelliclaim_core::Operator;

/// A lexed token with its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(f64),
    Date(NaiveDate),
    Str(String),
    Bool(bool),
    Null,
    /// Symbolic comparison operator (= != < <= > >=)
    Op(Operator),
    And,
    Or,
    Not,
    In,
    If,
    Then,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl Token {
    /// Short description for error messages
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Date(d) => d.format("%Y-%m-%d").to_string(),
            TokenKind::Str(s) => format!("\"{}\"", s),
            TokenKind::Bool(b) => b.to_string(),
            TokenKind::Null => "null".to_string(),
            TokenKind::Op(op) => op.as_str().to_string(),
            TokenKind::And => "AND".to_string(),
            TokenKind::Or => "OR".to_string(),
            TokenKind::Not => "NOT".to_string(),
            TokenKind::In => "IN".to_string(),
            TokenKind::If => "IF".to_string(),
            TokenKind::Then => "THEN".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
            TokenKind::LBracket => "[".to_string(),
            TokenKind::RBracket => "]".to_string(),
            TokenKind::Comma => ",".to_string(),
        }
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize rule text
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let offset = byte_offset(input, i);

        match c {
            '(' => {
                tokens.push(Token { kind: TokenKind::LParen, offset });
                i += 1;
            }
            ')' => {
                tokens.push(Token { kind: TokenKind::RParen, offset });
                i += 1;
            }
            '[' => {
                tokens.push(Token { kind: TokenKind::LBracket, offset });
                i += 1;
            }
            ']' => {
                tokens.push(Token { kind: TokenKind::RBracket, offset });
                i += 1;
            }
            ',' => {
                tokens.push(Token { kind: TokenKind::Comma, offset });
                i += 1;
            }
            '"' | '\'' => {
                let quote = c;
                let start = i + 1;
                let mut j = start;
                while j < chars.len() && chars[j] != quote {
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(ParseError::UnterminatedString { offset });
                }
                let s: String = chars[start..j].iter().collect();
                tokens.push(Token { kind: TokenKind::Str(s), offset });
                i = j + 1;
            }
            c if is_operator_char(c) => {
                let mut j = i;
                while j < chars.len() && is_operator_char(chars[j]) {
                    j += 1;
                }
                let run: String = chars[i..j].iter().collect();
                let op = match run.as_str() {
                    "=" => Operator::Eq,
                    "!=" => Operator::Ne,
                    "<" => Operator::Lt,
                    "<=" => Operator::Le,
                    ">" => Operator::Gt,
                    ">=" => Operator::Ge,
                    _ => return Err(ParseError::UnknownOperator { token: run, offset }),
                };
                tokens.push(Token { kind: TokenKind::Op(op), offset });
                i = j;
            }
            c if c.is_ascii_digit() || (c == '-' && peek_digit(&chars, i + 1)) => {
                let mut j = i + 1;
                while j < chars.len() && (chars[j].is_ascii_digit() || chars[j] == '.' || chars[j] == '-') {
                    j += 1;
                }
                let token: String = chars[i..j].iter().collect();
                let kind = if let Ok(date) = NaiveDate::parse_from_str(&token, "%Y-%m-%d") {
                    TokenKind::Date(date)
                } else if let Ok(num) = token.parse::<f64>() {
                    TokenKind::Number(num)
                } else {
                    return Err(ParseError::InvalidNumber { token, offset });
                };
                tokens.push(Token { kind, offset });
                i = j;
            }
            c if is_ident_start(c) => {
                let mut j = i + 1;
                while j < chars.len() && is_ident_char(chars[j]) {
                    j += 1;
                }
                let word: String = chars[i..j].iter().collect();
                let kind = match word.as_str() {
                    "AND" => TokenKind::And,
                    "OR" => TokenKind::Or,
                    "NOT" => TokenKind::Not,
                    "IN" => TokenKind::In,
                    "IF" => TokenKind::If,
                    "THEN" => TokenKind::Then,
                    "true" => TokenKind::Bool(true),
                    "false" => TokenKind::Bool(false),
                    "null" => TokenKind::Null,
                    _ => TokenKind::Ident(word),
                };
                tokens.push(Token { kind, offset });
                i = j;
            }
            other => {
                return Err(ParseError::UnknownOperator {
                    token: other.to_string(),
                    offset,
                });
            }
        }
    }

    Ok(tokens)
}

fn peek_digit(chars: &[char], idx: usize) -> bool {
    chars.get(idx).is_some_and(|c| c.is_ascii_digit())
}

// Token offsets are byte offsets so callers can index the original text.
fn byte_offset(input: &str, char_index: usize) -> usize {
    input
        .char_indices()
        .nth(char_index)
        .map(|(b, _)| b)
        .unwrap_or(input.len())
}
