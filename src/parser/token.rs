use crate::error_handling::Error::UnsupportedCharacter;
use crate::error_handling::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Token {
    Literal(char), // Letter or digit
    Star,          // *
    Concat,        // .
    Union,         // |
    LParen,        // (
    RParen,        // )
}

impl Token {
    pub(crate) fn tokenize(regex: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for (pos, ch) in regex.chars().enumerate() {
            match ch {
                '*' => tokens.push(Token::Star),
                '.' => tokens.push(Token::Concat),
                '|' => tokens.push(Token::Union),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                _ if Self::is_operand(ch) => tokens.push(Token::Literal(ch)),
                _ => return Err(UnsupportedCharacter { ch, pos }),
            }
        }
        Ok(tokens)
    }

    pub(crate) fn is_operand(ch: char) -> bool {
        ch.is_ascii_alphanumeric()
    }

    pub(crate) fn is_operator(&self) -> bool {
        matches!(self, Token::Star | Token::Concat | Token::Union)
    }

    // Binding strength used by the postfix conversion; 0 for non-operators
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Token::Star => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    pub(crate) fn as_char(&self) -> char {
        match self {
            Token::Literal(c) => *c,
            Token::Star => '*',
            Token::Concat => '.',
            Token::Union => '|',
            Token::LParen => '(',
            Token::RParen => ')',
        }
    }
}
