//! Recursive-descent parser for rule conditions
//!
//! `AND` binds tighter than `OR`; both are left-associative; parentheses
//! override. An optional leading `IF` and trailing `THEN <action>` wrapper
//! is accepted (legacy rule texts read `IF ... THEN flag as Error`); the
//! action text is preserved verbatim but carries no semantics, since the
//! rule's severity already classifies a violation.

use crate::error::{ParseError, Result};
use crate::lexer::{tokenize, Token, TokenKind};
use intelliclaim_core::{ConditionNode, Literal, Operator, Value};

/// Outcome of parsing one rule text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRule {
    pub condition: ConditionNode,
    /// Text of a trailing `THEN ...` clause, if the rule carried one
    pub then_action: Option<String>,
}

/// Parse rule text into a condition tree
pub fn parse(rule_text: &str) -> Result<ParsedRule> {
    let tokens = tokenize(rule_text)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyRule);
    }
    check_paren_balance(&tokens)?;

    let mut parser = Parser {
        source: rule_text,
        tokens,
        pos: 0,
    };
    let parsed = parser.parse_rule()?;
    log::trace!("parsed condition: {}", parsed.condition);
    Ok(parsed)
}

/// Parse rule text, discarding any `THEN` clause
pub fn parse_condition(rule_text: &str) -> Result<ConditionNode> {
    parse(rule_text).map(|parsed| parsed.condition)
}

// Counting pass over the whole token stream, so that a dangling `(` deep in
// an otherwise broken rule is still reported as the parenthesis problem it
// is (the legacy authoring UI checked open/close counts the same way).
fn check_paren_balance(tokens: &[Token]) -> Result<()> {
    let mut open_stack = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::LParen => open_stack.push(token.offset),
            TokenKind::RParen => {
                if open_stack.pop().is_none() {
                    return Err(ParseError::UnbalancedParens {
                        offset: token.offset,
                    });
                }
            }
            _ => {}
        }
    }
    if let Some(offset) = open_stack.pop() {
        return Err(ParseError::UnbalancedParens { offset });
    }
    Ok(())
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn end_offset(&self) -> usize {
        self.source.len()
    }

    fn parse_rule(&mut self) -> Result<ParsedRule> {
        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::If)) {
            self.pos += 1;
            if self.peek().is_none() {
                return Err(ParseError::EmptyRule);
            }
        }

        let condition = self.parse_or()?;

        match self.peek() {
            None => Ok(ParsedRule {
                condition,
                then_action: None,
            }),
            Some(token) if matches!(token.kind, TokenKind::Then) => {
                let action_start = token.offset + "THEN".len();
                let action = self.source[action_start..].trim();
                self.pos = self.tokens.len();
                Ok(ParsedRule {
                    condition,
                    then_action: (!action.is_empty()).then(|| action.to_string()),
                })
            }
            Some(token) => Err(ParseError::TrailingInput {
                found: token.describe(),
                offset: token.offset,
            }),
        }
    }

    fn parse_or(&mut self) -> Result<ConditionNode> {
        let mut node = self.parse_and()?;
        while let Some(offset) = self
            .peek()
            .filter(|t| matches!(t.kind, TokenKind::Or))
            .map(|t| t.offset)
        {
            self.pos += 1;
            if self.at_end_of_condition() {
                return Err(ParseError::DanglingConnective {
                    connective: "OR".to_string(),
                    offset,
                });
            }
            let right = self.parse_and()?;
            node = ConditionNode::or(node, right);
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<ConditionNode> {
        let mut node = self.parse_term()?;
        while let Some(offset) = self
            .peek()
            .filter(|t| matches!(t.kind, TokenKind::And))
            .map(|t| t.offset)
        {
            self.pos += 1;
            if self.at_end_of_condition() {
                return Err(ParseError::DanglingConnective {
                    connective: "AND".to_string(),
                    offset,
                });
            }
            let right = self.parse_term()?;
            node = ConditionNode::and(node, right);
        }
        Ok(node)
    }

    // A THEN token terminates the condition just like end of input does,
    // so `IF x = 1 AND THEN ...` is a dangling connective too.
    fn at_end_of_condition(&self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => matches!(token.kind, TokenKind::Then),
        }
    }

    fn parse_term(&mut self) -> Result<ConditionNode> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => {
                return Err(ParseError::ExpectedField {
                    found: "end of input".to_string(),
                    offset: self.end_offset(),
                })
            }
        };

        match token.kind {
            TokenKind::Not => {
                self.pos += 1;
                let inner = self.parse_term()?;
                Ok(ConditionNode::not(inner))
            }
            TokenKind::LParen => {
                self.pos += 1;
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
                    return Err(ParseError::EmptyGroup {
                        offset: token.offset,
                    });
                }
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(close) if matches!(close.kind, TokenKind::RParen) => Ok(inner),
                    Some(other) => Err(ParseError::TrailingInput {
                        found: other.describe(),
                        offset: other.offset,
                    }),
                    // Unreachable after the balance pre-check, but kept total.
                    None => Err(ParseError::UnbalancedParens {
                        offset: token.offset,
                    }),
                }
            }
            TokenKind::Ident(ref field) => {
                let field = field.clone();
                self.pos += 1;
                self.parse_comparison(field)
            }
            _ => Err(ParseError::ExpectedField {
                found: token.describe(),
                offset: token.offset,
            }),
        }
    }

    fn parse_comparison(&mut self, field: String) -> Result<ConditionNode> {
        let operator = self.parse_operator(&field)?;
        let literal = self.parse_literal(operator)?;
        Ok(ConditionNode::Comparison {
            field,
            operator,
            literal,
        })
    }

    fn parse_operator(&mut self, field: &str) -> Result<Operator> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => {
                return Err(ParseError::ExpectedOperator {
                    field: field.to_string(),
                    found: "end of input".to_string(),
                    offset: self.end_offset(),
                })
            }
        };

        match token.kind {
            TokenKind::Op(op) => {
                self.pos += 1;
                Ok(op)
            }
            TokenKind::In => {
                self.pos += 1;
                Ok(Operator::In)
            }
            TokenKind::Not => {
                self.pos += 1;
                match self.peek() {
                    Some(next) if matches!(next.kind, TokenKind::In) => {
                        self.pos += 1;
                        Ok(Operator::NotIn)
                    }
                    Some(next) => Err(ParseError::ExpectedOperator {
                        field: field.to_string(),
                        found: format!("NOT {}", next.describe()),
                        offset: token.offset,
                    }),
                    None => Err(ParseError::ExpectedOperator {
                        field: field.to_string(),
                        found: "NOT".to_string(),
                        offset: token.offset,
                    }),
                }
            }
            _ => Err(ParseError::ExpectedOperator {
                field: field.to_string(),
                found: token.describe(),
                offset: token.offset,
            }),
        }
    }

    fn parse_literal(&mut self, operator: Operator) -> Result<Literal> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => {
                return Err(ParseError::ExpectedLiteral {
                    found: "end of input".to_string(),
                    offset: self.end_offset(),
                })
            }
        };

        match token.kind {
            TokenKind::Number(n) => {
                self.pos += 1;
                Ok(Literal::Value(Value::Number(n)))
            }
            TokenKind::Date(d) => {
                self.pos += 1;
                Ok(Literal::Value(Value::Date(d)))
            }
            TokenKind::Str(ref s) => {
                let s = s.clone();
                self.pos += 1;
                Ok(Literal::Value(Value::String(s)))
            }
            TokenKind::Bool(b) => {
                self.pos += 1;
                Ok(Literal::Value(Value::Bool(b)))
            }
            TokenKind::Null => {
                self.pos += 1;
                Ok(Literal::Value(Value::Null))
            }
            TokenKind::LBracket => {
                self.pos += 1;
                let items = self.parse_list_items(token.offset)?;
                Ok(Literal::Value(Value::List(items)))
            }
            // A bare identifier names a schema reference list; that only
            // makes sense for membership operators.
            TokenKind::Ident(ref name) if operator.is_membership() => {
                let name = name.clone();
                self.pos += 1;
                Ok(Literal::ListRef(name))
            }
            _ => Err(ParseError::ExpectedLiteral {
                found: token.describe(),
                offset: token.offset,
            }),
        }
    }

    fn parse_list_items(&mut self, open_offset: usize) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            let token = match self.peek() {
                Some(token) => token.clone(),
                None => return Err(ParseError::UnterminatedList { offset: open_offset }),
            };
            match token.kind {
                TokenKind::RBracket => {
                    self.pos += 1;
                    return Ok(items);
                }
                TokenKind::Comma if !items.is_empty() => {
                    self.pos += 1;
                }
                TokenKind::Number(n) => {
                    self.pos += 1;
                    items.push(Value::Number(n));
                }
                TokenKind::Date(d) => {
                    self.pos += 1;
                    items.push(Value::Date(d));
                }
                TokenKind::Str(ref s) => {
                    let s = s.clone();
                    self.pos += 1;
                    items.push(Value::String(s));
                }
                TokenKind::Bool(b) => {
                    self.pos += 1;
                    items.push(Value::Bool(b));
                }
                _ => {
                    return Err(ParseError::ExpectedLiteral {
                        found: token.describe(),
                        offset: token.offset,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelliclaim_core::LogicalOp;

    #[test]
    fn test_parse_simple_comparison() {
        let parsed = parse("ClaimAmount > 100000").unwrap();
        assert_eq!(
            parsed.condition,
            ConditionNode::comparison("ClaimAmount", Operator::Gt, Value::Number(100000.0))
        );
        assert!(parsed.then_action.is_none());
    }

    #[test]
    fn test_parse_if_then_sugar() {
        let parsed = parse("IF HospitalID NOT IN approved_hospitals THEN flag as Error").unwrap();
        assert_eq!(
            parsed.condition,
            ConditionNode::comparison(
                "HospitalID",
                Operator::NotIn,
                Literal::ListRef("approved_hospitals".to_string())
            )
        );
        assert_eq!(parsed.then_action.as_deref(), Some("flag as Error"));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let node = parse_condition("A = 1 OR B = 2 AND C = 3").unwrap();
        match node {
            ConditionNode::Logical { op, right, .. } => {
                assert_eq!(op, LogicalOp::Or);
                assert!(matches!(
                    *right,
                    ConditionNode::Logical {
                        op: LogicalOp::And,
                        ..
                    }
                ));
            }
            other => panic!("expected OR at root, got {:?}", other),
        }
    }

    #[test]
    fn test_chained_and_is_left_associative() {
        let node = parse_condition("A = 1 AND B = 2 AND C = 3").unwrap();
        match node {
            ConditionNode::Logical { left, op, .. } => {
                assert_eq!(op, LogicalOp::And);
                assert!(matches!(
                    *left,
                    ConditionNode::Logical {
                        op: LogicalOp::And,
                        ..
                    }
                ));
            }
            other => panic!("expected AND at root, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let node = parse_condition("(A = 1 OR B = 2) AND C = 3").unwrap();
        match node {
            ConditionNode::Logical { left, op, .. } => {
                assert_eq!(op, LogicalOp::And);
                assert!(matches!(
                    *left,
                    ConditionNode::Logical {
                        op: LogicalOp::Or,
                        ..
                    }
                ));
            }
            other => panic!("expected AND at root, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_connective() {
        let err = parse_condition("A > 1 AND").unwrap_err();
        assert_eq!(
            err,
            ParseError::DanglingConnective {
                connective: "AND".to_string(),
                offset: 6
            }
        );

        let err = parse_condition("A > 1 OR").unwrap_err();
        assert!(matches!(err, ParseError::DanglingConnective { ref connective, .. } if connective == "OR"));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        let err = parse_condition("A > (1").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParens { offset: 4 });

        let err = parse_condition("A > 1)").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParens { offset: 5 });
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(parse("").unwrap_err(), ParseError::EmptyRule);
        assert_eq!(parse("   ").unwrap_err(), ParseError::EmptyRule);
        assert_eq!(parse("IF").unwrap_err(), ParseError::EmptyRule);
        assert_eq!(
            parse_condition("() AND A = 1").unwrap_err(),
            ParseError::EmptyGroup { offset: 0 }
        );
    }

    #[test]
    fn test_not_term() {
        let node = parse_condition("NOT (A = 1 OR B = 2)").unwrap();
        assert!(matches!(node, ConditionNode::Not { .. }));
    }

    #[test]
    fn test_list_ref_requires_membership_operator() {
        let err = parse_condition("HospitalID = approved_hospitals").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedLiteral { .. }));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "PatientAge < 18 AND GuardianConsent = false";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }
}
