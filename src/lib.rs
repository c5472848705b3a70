pub mod automaton;
pub mod dfa;
pub mod error_handling;
pub mod nfa;
pub mod parser;

use crate::dfa::DFA;
use crate::error_handling::Error::InvalidAutomaton;
use crate::error_handling::Result;
use crate::nfa::NFA;
use crate::parser::to_postfix;

const VERSION: &str = "0.0.1";

pub fn version() -> &'static str {
    VERSION
}

/// Runs the whole pipeline: infix regex, postfix, Thompson NFA, subset-construction DFA.
///
/// Both automata are validated on the way. A failure there means a construction bug rather
/// than bad input, and is reported as `Error::InvalidAutomaton`.
pub fn compile(regex: &str) -> Result<DFA> {
    let postfix = to_postfix(regex)?;
    let nfa = NFA::from_postfix(&postfix)?;
    nfa.validate()?;

    let dfa = DFA::from_nfa(&nfa);
    dfa.validate()?;
    dfa.get_automaton()
        .check_determinism()
        .map_err(InvalidAutomaton)?;
    Ok(dfa)
}
