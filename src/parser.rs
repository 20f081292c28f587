//! Expression parser
//!
//! Grammar:
//! ```txt
//! expression    ::=   sum
//!                   | expression "->" sum
//!                   | expression "->" "(" sum ( "," sum )* ","? ")"
//!
//! sum           ::=   product ( ( "+" | "-" ) product )*
//! product       ::=   exponential ( ( "*" | "/" | "mod" ) exponential
//!                                 | exponential_starting_with_identifier )*
//! exponential   ::=   atom ( "^" exponential )?
//!                   | ( "-" | "+" ) exponential
//! atom          ::=   number
//!                   | identifier
//!                   | function_name "(" ( sum ( "," sum )* ","? )? ")"
//!                   | "(" expression ")"
//! ```

use thiserror::Error;

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::number::Number;
use crate::span::Span;
use crate::tokenizer::{tokenize, Token, TokenKind, TokenizerError, TokenizerErrorKind};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error(transparent)]
    TokenizerError(TokenizerErrorKind),

    #[error("Expected one of: number, identifier, parenthesized expression")]
    ExpectedPrimary,

    #[error("Missing closing parenthesis ')'")]
    MissingClosingParen,

    #[error("Trailing characters: '{0}'")]
    TrailingCharacters(String),

    #[error("Expected ',' or ')' in conversion target list")]
    ExpectedCommaOrRightParenInTargetList,

    #[error("Expected ',' or ')' in function call")]
    ExpectedCommaOrRightParenInFunctionCall,

    #[error("Empty conversion target list")]
    EmptyTargetList,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

type Result<T> = std::result::Result<T, ParseError>;

struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
}

/// Whether an identifier followed by `(` forms a function call.
///
/// Unit names may contain characters like `°` or `′`; only plain
/// alphanumeric names act as functions.
fn is_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, current: 0 }
    }

    fn expression(&mut self) -> Result<Expression> {
        let mut expr = self.sum()?;
        while let Some(arrow) = self.match_exact(TokenKind::Arrow) {
            let span_op = arrow.span;
            expr = if self.match_exact(TokenKind::LeftParen).is_some() {
                self.conversion_target_list(expr, span_op)?
            } else {
                Expression::Convert {
                    span_op,
                    value: Box::new(expr),
                    target: Box::new(self.sum()?),
                }
            };
        }
        Ok(expr)
    }

    fn conversion_target_list(&mut self, value: Expression, span_op: Span) -> Result<Expression> {
        if let Some(closing) = self.match_exact(TokenKind::RightParen) {
            return Err(ParseError {
                kind: ParseErrorKind::EmptyTargetList,
                span: span_op.extend(&closing.span),
            });
        }

        let mut targets = vec![self.sum()?];
        let mut trailing_comma = false;
        loop {
            if self.match_exact(TokenKind::Comma).is_some() {
                if self.match_exact(TokenKind::RightParen).is_some() {
                    trailing_comma = true;
                    break;
                }
                targets.push(self.sum()?);
            } else if self.match_exact(TokenKind::RightParen).is_some() {
                break;
            } else {
                return Err(ParseError {
                    kind: ParseErrorKind::ExpectedCommaOrRightParenInTargetList,
                    span: self.peek().span,
                });
            }
        }

        // A parenthesized single target without a trailing comma is just a
        // grouped conversion target, not a one-element list.
        if targets.len() == 1 && !trailing_comma {
            Ok(Expression::Convert {
                span_op,
                value: Box::new(value),
                target: Box::new(targets.remove(0)),
            })
        } else {
            Ok(Expression::MultiConvert {
                span_op,
                value: Box::new(value),
                targets,
            })
        }
    }

    fn sum(&mut self) -> Result<Expression> {
        let mut expr = self.product()?;
        while let Some(operator) =
            self.match_any(&[TokenKind::Plus, TokenKind::Minus])
        {
            let op = if operator.kind == TokenKind::Plus {
                BinaryOperator::Add
            } else {
                BinaryOperator::Sub
            };
            expr = Expression::BinaryOperator {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(self.product()?),
                span_op: Some(operator.span),
            };
        }
        Ok(expr)
    }

    fn product(&mut self) -> Result<Expression> {
        let mut expr = self.exponential()?;
        loop {
            if let Some(operator) =
                self.match_any(&[TokenKind::Multiply, TokenKind::Divide, TokenKind::Mod])
            {
                let op = match operator.kind {
                    TokenKind::Multiply => BinaryOperator::Mul,
                    TokenKind::Divide => BinaryOperator::Div,
                    _ => BinaryOperator::Mod,
                };
                expr = Expression::BinaryOperator {
                    op,
                    lhs: Box::new(expr),
                    rhs: Box::new(self.exponential()?),
                    span_op: Some(operator.span),
                };
            } else if self.peek().kind == TokenKind::Identifier {
                // Implicit multiplication, as in "5 m" or "2 sin(x)". The
                // right operand binds like an exponential, so "5 m^2" means
                // 5 · (m²).
                expr = Expression::BinaryOperator {
                    op: BinaryOperator::Mul,
                    lhs: Box::new(expr),
                    rhs: Box::new(self.exponential()?),
                    span_op: None,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn exponential(&mut self) -> Result<Expression> {
        if let Some(minus) = self.match_exact(TokenKind::Minus) {
            return Ok(Expression::UnaryOperator {
                op: UnaryOperator::Negate,
                expr: Box::new(self.exponential()?),
                span_op: minus.span,
            });
        }

        if self.match_exact(TokenKind::Plus).is_some() {
            return self.exponential();
        }

        let expr = self.atom()?;
        if let Some(caret) = self.match_exact(TokenKind::Power) {
            return Ok(Expression::BinaryOperator {
                op: BinaryOperator::Power,
                lhs: Box::new(expr),
                rhs: Box::new(self.exponential()?),
                span_op: Some(caret.span),
            });
        }
        Ok(expr)
    }

    fn atom(&mut self) -> Result<Expression> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                // The tokenizer only emits well-formed number literals.
                let value = token.lexeme.parse::<f64>().unwrap();
                Ok(Expression::Scalar(token.span, Number::from_f64(value)))
            }
            TokenKind::Identifier => {
                self.advance();
                if self.peek().kind == TokenKind::LeftParen && is_function_name(&token.lexeme) {
                    self.advance();
                    return self.function_call(token);
                }
                Ok(Expression::Identifier(token.span, token.lexeme.clone()))
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                if self.match_exact(TokenKind::RightParen).is_none() {
                    return Err(ParseError {
                        kind: ParseErrorKind::MissingClosingParen,
                        span: self.peek().span,
                    });
                }
                Ok(expr)
            }
            _ => Err(ParseError {
                kind: ParseErrorKind::ExpectedPrimary,
                span: token.span,
            }),
        }
    }

    fn function_call(&mut self, name: &Token) -> Result<Expression> {
        let mut args = vec![];
        let closing = loop {
            if let Some(closing) = self.match_exact(TokenKind::RightParen) {
                break closing;
            }

            args.push(self.sum()?);

            if self.match_exact(TokenKind::Comma).is_some() {
                continue;
            }
            match self.match_exact(TokenKind::RightParen) {
                Some(closing) => break closing,
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::ExpectedCommaOrRightParenInFunctionCall,
                        span: self.peek().span,
                    })
                }
            }
        };

        Ok(Expression::FunctionCall {
            span: name.span.extend(&closing.span),
            name: name.lexeme.clone(),
            args,
        })
    }

    fn match_exact(&mut self, kind: TokenKind) -> Option<&'a Token> {
        let token = self.peek();
        if token.kind == kind {
            self.advance();
            Some(token)
        } else {
            None
        }
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        kinds.iter().find_map(|kind| self.match_exact(*kind))
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn peek(&self) -> &'a Token {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}

pub fn parse(input: &str) -> Result<Expression> {
    let tokens = tokenize(input).map_err(|TokenizerError { kind, span }| ParseError {
        kind: ParseErrorKind::TokenizerError(kind),
        span,
    })?;

    let mut parser = Parser::new(&tokens);
    let expr = parser.expression()?;

    if !parser.is_at_end() {
        let remaining: Vec<_> = tokens[parser.current..tokens.len() - 1]
            .iter()
            .map(|t| t.lexeme.as_str())
            .collect();
        let span = parser
            .peek()
            .span
            .extend(&tokens[tokens.len() - 2].span);
        return Err(ParseError {
            kind: ParseErrorKind::TrailingCharacters(remaining.join(" ")),
            span,
        });
    }

    Ok(expr)
}
