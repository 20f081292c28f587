use thiserror::Error;

use crate::span::Span;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenizerErrorKind {
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: char },

    #[error("Expected a digit in the number's exponent")]
    ExpectedDigitInExponent,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct TokenizerError {
    pub kind: TokenizerErrorKind,
    pub span: Span,
}

type Result<T> = std::result::Result<T, TokenizerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,

    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    Mod,

    Arrow,
    Comma,

    Number,
    Identifier,

    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

fn is_identifier_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || matches!(c, '_' | '°' | '′' | '″' | '\'' | '"' | '`')
}

fn is_identifier_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || matches!(c, '°' | '′' | '″' | '\'' | '"' | '`')
}

struct Tokenizer {
    chars: Vec<char>,
    current: usize,
    token_start: usize,

    current_byte: u32,
    token_start_byte: u32,
}

impl Tokenizer {
    fn new(input: &str) -> Self {
        Tokenizer {
            chars: input.chars().collect(),
            current: 0,
            token_start: 0,
            current_byte: 0,
            token_start_byte: 0,
        }
    }

    fn scan(&mut self) -> Result<Vec<Token>> {
        let mut tokens = vec![];
        while !self.at_end() {
            self.token_start = self.current;
            self.token_start_byte = self.current_byte;
            if let Some(token) = self.scan_single()? {
                tokens.push(token);
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            span: Span::new(self.current_byte, self.current_byte),
        });

        Ok(tokens)
    }

    fn scan_single(&mut self) -> Result<Option<Token>> {
        let current_char = self.advance();

        let kind = match current_char {
            c if c.is_whitespace() => return Ok(None),
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' if self.match_char('>') => TokenKind::Arrow,
            '-' => TokenKind::Minus,
            '*' if self.match_char('*') => TokenKind::Power,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '^' => TokenKind::Power,
            c if c.is_ascii_digit()
                || (c == '.' && self.peek().is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.scan_number()?;
                TokenKind::Number
            }
            c if is_identifier_start(c) => {
                while self.peek().is_some_and(is_identifier_continue) {
                    self.advance();
                }

                if self.lexeme() == "mod" {
                    TokenKind::Mod
                } else {
                    TokenKind::Identifier
                }
            }
            character => {
                return Err(TokenizerError {
                    kind: TokenizerErrorKind::UnexpectedCharacter { character },
                    span: self.token_span(),
                })
            }
        };

        Ok(Some(Token {
            kind,
            lexeme: self.lexeme(),
            span: self.token_span(),
        }))
    }

    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Only treat 'e'/'E' as the start of an exponent part when it could
        // actually be one, so that "2e" or "5 ems" still lexes as a number
        // followed by an identifier.
        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek2()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }

            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(TokenizerError {
                    kind: TokenizerErrorKind::ExpectedDigitInExponent,
                    span: self.token_span(),
                });
            }

            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        Ok(())
    }

    fn lexeme(&self) -> String {
        self.chars[self.token_start..self.current].iter().collect()
    }

    fn token_span(&self) -> Span {
        Span::new(self.token_start_byte, self.current_byte)
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        self.current_byte += c.len_utf8() as u32;
        c
    }

    fn match_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek2(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Tokenizer::new(input).scan()
}
