pub(crate) mod regex_parser;
pub(crate) mod token;

mod schema_parser;

pub use regex_parser::to_postfix;
pub use regex_parser::RegexParser;
pub use schema_parser::parser::read_regex_from_file;
pub use schema_parser::parser::PatternConfig;
