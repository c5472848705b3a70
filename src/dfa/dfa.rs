use crate::automaton::{Automaton, State, Transition};
use crate::error_handling::Error::{InvalidAutomaton, UnrecognizedSymbol};
use crate::error_handling::Result;
use crate::nfa::NFA;
use indexmap::IndexSet;
use std::collections::{BTreeSet, VecDeque};
use std::fmt::Debug;

// Sorted NFA state ids identifying one DFA state
type NfaStateSetKey = Box<[State]>;

/// A DFA produced by subset construction. It is not complete: a symbol with no transition
/// from the current state rejects the word.
pub struct DFA {
    automaton: Automaton,
    dfa_to_nfa_state_mapping: Vec<NfaStateSetKey>, // indexed by DFA state id
}

impl DFA {
    /// Powerset construction. DFA state 0 is the epsilon closure of the NFA start state; the
    /// other states are numbered in breadth-first discovery order, visiting symbols in
    /// alphabet order. Empty targets are skipped, so there is no dead state.
    ///
    /// The number of DFA states can grow exponentially with the number of NFA states.
    pub fn from_nfa(nfa: &NFA) -> DFA {
        let alphabet: IndexSet<char> = nfa.get_automaton().get_alphabet().clone();

        // local variables to help create the DFA; a key's index is its DFA state id
        let mut l_nfa_states_to_dfa_mapping: IndexSet<NfaStateSetKey> = IndexSet::new();
        let mut l_worklist: VecDeque<(State, BTreeSet<State>)> = VecDeque::new();

        let start_epi_closure = nfa.epsilon_closure([nfa.get_start()]);
        let (start_idx, _) =
            l_nfa_states_to_dfa_mapping.insert_full(Self::to_key(&start_epi_closure));
        let start_state = State::new(start_idx);
        l_worklist.push_back((start_state, start_epi_closure));

        let mut automaton = Automaton::new(start_state);
        for symbol in alphabet.iter() {
            automaton.add_symbol(*symbol);
        }

        // Process and add all dfa states
        while let Some((dfa_state, nfa_states)) = l_worklist.pop_front() {
            if nfa_states.iter().any(|nfa_state| nfa.is_final(*nfa_state)) {
                automaton.add_final_state(dfa_state);
            }

            for symbol in alphabet.iter() {
                let destination_nfa_states =
                    nfa.epsilon_closure(nfa.move_on_symbol(&nfa_states, *symbol));
                if destination_nfa_states.is_empty() {
                    continue;
                }

                let (destination_idx, is_new) = l_nfa_states_to_dfa_mapping
                    .insert_full(Self::to_key(&destination_nfa_states));
                let destination_dfa_state = State::new(destination_idx);
                if is_new {
                    automaton.add_state(destination_dfa_state);
                    l_worklist.push_back((destination_dfa_state, destination_nfa_states));
                }

                automaton.add_transition(
                    dfa_state,
                    Transition::new(*symbol, destination_dfa_state),
                );
            }
        }

        DFA {
            automaton,
            dfa_to_nfa_state_mapping: l_nfa_states_to_dfa_mapping.into_iter().collect(),
        }
    }

    fn to_key(nfa_states: &BTreeSet<State>) -> NfaStateSetKey {
        nfa_states.iter().copied().collect()
    }
}

impl DFA {
    pub fn get_automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn get_start(&self) -> State {
        self.automaton.get_start()
    }

    pub fn get_next_state(&self, state: State, symbol: char) -> Option<State> {
        self.automaton.get_next_state(state, symbol)
    }

    pub fn is_accept_state(&self, state: State) -> bool {
        self.automaton.is_final(state)
    }

    /// The sorted NFA states a DFA state stands for.
    pub fn nfa_states(&self, state: State) -> Option<&[State]> {
        self.dfa_to_nfa_state_mapping
            .get(state.get_id())
            .map(|key| &key[..])
    }

    pub fn validate(&self) -> Result<()> {
        self.automaton.validate().map_err(InvalidAutomaton)
    }

    pub fn is_valid(&self) -> bool {
        self.automaton.is_valid()
    }

    pub fn check_determinism(&self) -> Result<()> {
        self.automaton.check_determinism().map_err(InvalidAutomaton)
    }

    /// Symbols outside the alphabet reject the word like any other missing transition.
    pub fn check_word(&self, word: &str) -> bool {
        self.automaton.check_word(word)
    }

    /// Like `check_word`, but a symbol outside the alphabet anywhere in the word is an error,
    /// reported before any transition is taken.
    pub fn try_check_word(&self, word: &str) -> Result<bool> {
        let alphabet = self.automaton.get_alphabet();
        let unrecognized = word
            .chars()
            .enumerate()
            .find(|(_, ch)| !alphabet.contains(ch));
        if let Some((pos, ch)) = unrecognized {
            return Err(UnrecognizedSymbol { ch, pos });
        }
        Ok(self.automaton.check_word(word))
    }

    pub fn describe(&self) -> Vec<String> {
        self.automaton.describe()
    }
}

impl Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DFA{:?}", self.automaton)
    }
}

/// Subset construction over `nfa`; see `DFA::from_nfa`.
pub fn determinize(nfa: &NFA) -> DFA {
    DFA::from_nfa(nfa)
}
