use crate::error_handling::Error::UnbalancedParenthesis;
use crate::error_handling::Result;
use crate::parser::token::Token;

// Converts infix regexes over letters, digits, `.`, `|`, `*` and parentheses into postfix
// notation. The operator stack and token buffer are kept between calls to reuse allocations.
pub struct RegexParser {
    m_tokens: Vec<(usize, Token)>,
    m_operators: Vec<(usize, Token)>,
}

impl RegexParser {
    pub fn new() -> RegexParser {
        Self {
            m_tokens: Vec::new(),
            m_operators: Vec::new(),
        }
    }

    pub fn to_postfix(&mut self, regex: &str) -> Result<String> {
        self.insert_concat_operators(Token::tokenize(regex)?);
        self.m_operators.clear();

        let mut output = String::with_capacity(self.m_tokens.len());
        for &(pos, token) in self.m_tokens.iter() {
            match token {
                Token::Literal(c) => output.push(c),
                Token::LParen => self.m_operators.push((pos, token)),
                Token::RParen => loop {
                    match self.m_operators.pop() {
                        Some((_, Token::LParen)) => break,
                        Some((_, operator)) => output.push(operator.as_char()),
                        None => return Err(UnbalancedParenthesis { pos }),
                    }
                },
                _ => {
                    // Left associative: pop operators binding at least as tightly
                    while let Some(&(_, top)) = self.m_operators.last() {
                        if !top.is_operator() || top.precedence() < token.precedence() {
                            break;
                        }
                        output.push(top.as_char());
                        self.m_operators.pop();
                    }
                    self.m_operators.push((pos, token));
                }
            }
        }

        while let Some((pos, operator)) = self.m_operators.pop() {
            if Token::LParen == operator {
                return Err(UnbalancedParenthesis { pos });
            }
            output.push(operator.as_char());
        }

        Ok(output)
    }

    // A `.` goes between a left operand, `)` or `*` and a right operand or `(`. The inserted
    // operator borrows the position of the token on its right.
    fn insert_concat_operators(&mut self, tokens: Vec<Token>) {
        self.m_tokens.clear();
        let mut previous: Option<Token> = None;
        for (pos, token) in tokens.into_iter().enumerate() {
            if let Some(left) = previous {
                let left_closes = matches!(left, Token::Literal(_) | Token::RParen | Token::Star);
                let right_opens = matches!(token, Token::Literal(_) | Token::LParen);
                if left_closes && right_opens {
                    self.m_tokens.push((pos, Token::Concat));
                }
            }
            self.m_tokens.push((pos, token));
            previous = Some(token);
        }
    }
}

impl Default for RegexParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Infix to postfix with implicit concatenation made explicit, e.g. `(a|b)*c` gives `ab|*c.`.
pub fn to_postfix(regex: &str) -> Result<String> {
    RegexParser::new().to_postfix(regex)
}
