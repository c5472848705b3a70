pub(crate) mod parser;

pub use parser::to_postfix;
pub use parser::RegexParser;
