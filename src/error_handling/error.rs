use crate::automaton::Violation;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    UnsupportedCharacter { ch: char, pos: usize },
    UnbalancedParenthesis { pos: usize },
    MissingOperand { operator: char, pos: usize },
    DanglingOperands { count: usize },
    EmptyExpression,
    InvalidAutomaton(Violation),
    UnrecognizedSymbol { ch: char, pos: usize },
    IOError(std::io::Error),
    YamlParsingError(serde_yaml::Error),
    MissingConfigKey(&'static str),
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    // Errors caused by the regex text itself rather than the automata built from it.
    pub fn is_malformed_regex(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedCharacter { .. }
                | Error::UnbalancedParenthesis { .. }
                | Error::MissingOperand { .. }
                | Error::DanglingOperands { .. }
                | Error::EmptyExpression
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedCharacter { ch, pos } => {
                write!(f, "unsupported character {:?} at position {}", ch, pos)
            }
            Error::UnbalancedParenthesis { pos } => {
                write!(f, "unbalanced parenthesis at position {}", pos)
            }
            Error::MissingOperand { operator, pos } => {
                write!(f, "operator '{}' at position {} is missing an operand", operator, pos)
            }
            Error::DanglingOperands { count } => {
                write!(f, "{} fragments left after the last operator", count)
            }
            Error::EmptyExpression => write!(f, "empty expression"),
            Error::InvalidAutomaton(violation) => write!(f, "invalid automaton: {}", violation),
            Error::UnrecognizedSymbol { ch, pos } => {
                write!(f, "symbol {:?} at position {} is not in the alphabet", ch, pos)
            }
            Error::IOError(e) => write!(f, "I/O error: {}", e),
            Error::YamlParsingError(e) => write!(f, "YAML error: {}", e),
            Error::MissingConfigKey(key) => write!(f, "missing config key `{}`", key),
            Error::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            Error::YamlParsingError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IOError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::State;

    #[test]
    fn test_malformed_regex_grouping() {
        assert!(Error::EmptyExpression.is_malformed_regex());
        assert!(Error::UnbalancedParenthesis { pos: 3 }.is_malformed_regex());
        assert!(Error::MissingOperand { operator: '|', pos: 1 }.is_malformed_regex());
        assert_eq!(
            false,
            Error::InvalidAutomaton(Violation::StartStateMissing(State::new(4)))
                .is_malformed_regex()
        );
        assert_eq!(false, Error::MissingConfigKey("regex").is_malformed_regex());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::UnsupportedCharacter { ch: '+', pos: 2 }.to_string(),
            "unsupported character '+' at position 2"
        );
        assert_eq!(
            Error::InvalidAutomaton(Violation::StartStateMissing(State::new(4))).to_string(),
            "invalid automaton: start state 4 is not in the state set"
        );
    }
}
