use indexmap::{IndexMap, IndexSet};
use std::fmt::{Debug, Display, Formatter};

// Placeholder printed for epsilon in automaton descriptions.
pub const EPSILON_DISPLAY: &str = "lambda";

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(usize);

impl State {
    pub fn new(id: usize) -> Self {
        State(id)
    }

    pub fn get_id(&self) -> usize {
        self.0
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An outgoing edge. `None` as the symbol marks an epsilon transition.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Transition {
    symbol: Option<char>,
    to_state: State,
}

impl Transition {
    pub fn new(symbol: char, to_state: State) -> Self {
        Transition {
            symbol: Some(symbol),
            to_state,
        }
    }

    pub fn epsilon(to_state: State) -> Self {
        Transition {
            symbol: None,
            to_state,
        }
    }

    pub fn get_symbol(&self) -> Option<char> {
        self.symbol
    }

    pub fn get_to_state(&self) -> State {
        self.to_state
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_none()
    }
}

impl Debug for Transition {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.symbol {
            Some(symbol) => write!(f, "-> {:?}, symbol: {:?}", self.to_state, symbol),
            None => write!(f, "-> {:?}, symbol: {}", self.to_state, "epsilon"),
        }
    }
}

/// The first structural problem found in an automaton.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    StartStateMissing(State),
    FinalStateMissing(State),
    TransitionSourceMissing(State),
    TransitionTargetMissing { from: State, to: State },
    SymbolOutsideAlphabet { from: State, symbol: char },
    EpsilonTransition { from: State },
    Nondeterministic { from: State, symbol: char },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::StartStateMissing(state) => {
                write!(f, "start state {} is not in the state set", state)
            }
            Violation::FinalStateMissing(state) => {
                write!(f, "final state {} is not in the state set", state)
            }
            Violation::TransitionSourceMissing(state) => {
                write!(f, "transition source {} is not in the state set", state)
            }
            Violation::TransitionTargetMissing { from, to } => {
                write!(f, "transition {} -> {} targets a state outside the state set", from, to)
            }
            Violation::SymbolOutsideAlphabet { from, symbol } => {
                write!(f, "transition from {} uses {:?}, which is not in the alphabet", from, symbol)
            }
            Violation::EpsilonTransition { from } => {
                write!(f, "state {} has an epsilon transition", from)
            }
            Violation::Nondeterministic { from, symbol } => {
                write!(f, "state {} has more than one transition on {:?}", from, symbol)
            }
        }
    }
}

/// States, alphabet, transition table, start and final states. Shared by the NFA and the DFA.
#[derive(Clone, Eq, PartialEq)]
pub struct Automaton {
    states: IndexSet<State>,
    alphabet: IndexSet<char>,
    transitions: IndexMap<State, Vec<Transition>>, // absent key: no outgoing transitions
    start: State,
    final_states: IndexSet<State>,
}

impl Automaton {
    // Create an automaton holding only its start state
    pub fn new(start: State) -> Self {
        let mut states = IndexSet::new();
        states.insert(start);
        Automaton {
            states,
            alphabet: IndexSet::new(),
            transitions: IndexMap::new(),
            start,
            final_states: IndexSet::new(),
        }
    }

    /// Assembles an automaton from raw parts without checking them. Use `validate` afterwards.
    pub fn from_parts(
        states: IndexSet<State>,
        alphabet: IndexSet<char>,
        transitions: IndexMap<State, Vec<Transition>>,
        start: State,
        final_states: IndexSet<State>,
    ) -> Self {
        Automaton {
            states,
            alphabet,
            transitions,
            start,
            final_states,
        }
    }

    pub fn add_state(&mut self, state: State) {
        self.states.insert(state);
    }

    pub fn add_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    pub fn add_final_state(&mut self, state: State) {
        self.final_states.insert(state);
    }

    pub fn add_transition(&mut self, from: State, transition: Transition) {
        self.transitions.entry(from).or_default().push(transition);
    }

    pub fn add_epsilon_transition(&mut self, from: State, to: State) {
        self.add_transition(from, Transition::epsilon(to));
    }

    pub fn get_states(&self) -> &IndexSet<State> {
        &self.states
    }

    pub fn get_alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    pub fn get_transitions(&self) -> &IndexMap<State, Vec<Transition>> {
        &self.transitions
    }

    pub fn get_transitions_from_state(&self, state: State) -> &[Transition] {
        self.transitions
            .get(&state)
            .map(|transitions| transitions.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_start(&self) -> State {
        self.start
    }

    pub fn get_final_states(&self) -> &IndexSet<State> {
        &self.final_states
    }

    pub fn is_final(&self, state: State) -> bool {
        self.final_states.contains(&state)
    }

    // First non-epsilon transition on `symbol` wins
    pub fn get_next_state(&self, state: State, symbol: char) -> Option<State> {
        self.get_transitions_from_state(state)
            .iter()
            .find(|transition| transition.get_symbol() == Some(symbol))
            .map(|transition| transition.get_to_state())
    }
}

impl Automaton {
    /// Checks, in order: start state, final states, then every transition's source, target and
    /// symbol. Stops at the first violation. Determinism is not checked here.
    pub fn validate(&self) -> Result<(), Violation> {
        if !self.states.contains(&self.start) {
            return Err(Violation::StartStateMissing(self.start));
        }

        for final_state in self.final_states.iter() {
            if !self.states.contains(final_state) {
                return Err(Violation::FinalStateMissing(*final_state));
            }
        }

        for (from, transitions) in self.transitions.iter() {
            if !self.states.contains(from) {
                return Err(Violation::TransitionSourceMissing(*from));
            }
            for transition in transitions.iter() {
                let to = transition.get_to_state();
                if !self.states.contains(&to) {
                    return Err(Violation::TransitionTargetMissing { from: *from, to });
                }
                if let Some(symbol) = transition.get_symbol() {
                    if !self.alphabet.contains(&symbol) {
                        return Err(Violation::SymbolOutsideAlphabet {
                            from: *from,
                            symbol,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// No epsilon transitions and at most one transition per (state, symbol).
    pub fn check_determinism(&self) -> Result<(), Violation> {
        for (from, transitions) in self.transitions.iter() {
            let mut seen = IndexSet::new();
            for transition in transitions.iter() {
                let Some(symbol) = transition.get_symbol() else {
                    return Err(Violation::EpsilonTransition { from: *from });
                };
                if !seen.insert(symbol) {
                    return Err(Violation::Nondeterministic {
                        from: *from,
                        symbol,
                    });
                }
            }
        }
        Ok(())
    }

    /// Follows the word from the start state. A missing transition rejects immediately.
    pub fn check_word(&self, word: &str) -> bool {
        let mut current_state = self.start;
        for symbol in word.chars() {
            match self.get_next_state(current_state, symbol) {
                Some(next_state) => current_state = next_state,
                None => return false,
            }
        }
        self.is_final(current_state)
    }

    /// Line-oriented dump: states, alphabet, start, final states, then one `p(state, symbol) ->
    /// target` line per transition.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![
            format!("States: {}", join(self.states.iter())),
            format!("Alphabet: {}", join(self.alphabet.iter())),
            format!("StartingState: {}", self.start),
            format!("FinalStates: {}", join(self.final_states.iter())),
            "Transitions:".to_string(),
        ];

        for state in self.states.iter() {
            for transition in self.get_transitions_from_state(*state) {
                let symbol = match transition.get_symbol() {
                    Some(symbol) => symbol.to_string(),
                    None => EPSILON_DISPLAY.to_string(),
                };
                lines.push(format!(
                    "p({}, {}) -> {}",
                    state,
                    symbol,
                    transition.get_to_state()
                ));
            }
        }

        lines
    }
}

fn join<T: Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

impl Display for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe().join("\n"))
    }
}

impl Debug for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "( start: {:?}, accept: {:?}, states: {:?}, alphabet: {:?}, transitions: {{\n",
            self.start, self.final_states, self.states, self.alphabet
        )?;

        for (from, transitions) in self.transitions.iter() {
            if transitions.is_empty() {
                continue;
            }
            write!(f, "\t{:?}:\n", from)?;
            for transition in transitions.iter() {
                write!(f, "\t\t{:?}\n", transition)?;
            }
        }

        write!(f, "}} )")
    }
}
