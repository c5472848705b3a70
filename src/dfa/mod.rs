pub(crate) mod dfa;

pub use dfa::determinize;
pub use dfa::DFA;
