use crate::automaton::{Automaton, State};
use crate::error_handling::Error::InvalidAutomaton;
use crate::error_handling::Result;
use crate::nfa::thompson::ThompsonBuilder;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// A Thompson NFA. Built once from a postfix expression and read-only afterwards.
pub struct NFA {
    automaton: Automaton,
}

impl NFA {
    pub(crate) fn new(automaton: Automaton) -> Self {
        NFA { automaton }
    }

    pub fn from_postfix(postfix: &str) -> Result<NFA> {
        ThompsonBuilder::new().build(postfix)
    }

    pub fn get_automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn get_start(&self) -> State {
        self.automaton.get_start()
    }

    pub fn is_final(&self, state: State) -> bool {
        self.automaton.is_final(state)
    }

    pub fn validate(&self) -> Result<()> {
        self.automaton.validate().map_err(InvalidAutomaton)
    }

    pub fn is_valid(&self) -> bool {
        self.automaton.is_valid()
    }

    pub fn describe(&self) -> Vec<String> {
        self.automaton.describe()
    }
}

impl NFA {
    /// Every state reachable from `states` through epsilon transitions only, `states` included.
    /// The result is ordered, so it doubles as a canonical key for the set.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = State>) -> BTreeSet<State> {
        let mut closure = BTreeSet::new();
        let mut stack: Vec<State> = states.into_iter().collect();

        while let Some(state) = stack.pop() {
            if !closure.insert(state) {
                continue;
            }
            for transition in self.automaton.get_transitions_from_state(state) {
                if transition.is_epsilon() && !closure.contains(&transition.get_to_state()) {
                    stack.push(transition.get_to_state());
                }
            }
        }

        closure
    }

    /// Targets of the `symbol` transitions leaving `states`. No epsilon closure is applied.
    pub fn move_on_symbol(&self, states: &BTreeSet<State>, symbol: char) -> BTreeSet<State> {
        let mut reached = BTreeSet::new();
        for state in states.iter() {
            for transition in self.automaton.get_transitions_from_state(*state) {
                if transition.get_symbol() == Some(symbol) {
                    reached.insert(transition.get_to_state());
                }
            }
        }
        reached
    }

    /// Simulates the NFA on `word`, tracking the full set of active states.
    pub fn accepts(&self, word: &str) -> bool {
        let mut current = self.epsilon_closure([self.get_start()]);
        for symbol in word.chars() {
            current = self.epsilon_closure(self.move_on_symbol(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|state| self.is_final(*state))
    }
}

impl Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NFA{:?}", self.automaton)
    }
}
