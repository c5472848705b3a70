pub(crate) mod nfa;
pub(crate) mod thompson;

pub use crate::nfa::nfa::NFA;
pub use crate::nfa::thompson::build_nfa;
pub use crate::nfa::thompson::ThompsonBuilder;
