use crate::automaton::{Automaton, State, Transition};
use crate::error_handling::Error::{
    DanglingOperands, EmptyExpression, MissingOperand, UnbalancedParenthesis,
};
use crate::error_handling::Result;
use crate::nfa::nfa::NFA;
use crate::parser::token::Token;
use indexmap::{IndexMap, IndexSet};

// A partial automaton on the construction stack. Every fragment has exactly one accept state
// and owns a state-id range no other fragment touches.
struct Fragment {
    states: IndexSet<State>,
    alphabet: IndexSet<char>,
    transitions: IndexMap<State, Vec<Transition>>,
    start: State,
    accept: State,
}

impl Fragment {
    fn new(start: State, accept: State) -> Self {
        let mut states = IndexSet::new();
        states.insert(start);
        states.insert(accept);
        Fragment {
            states,
            alphabet: IndexSet::new(),
            transitions: IndexMap::new(),
            start,
            accept,
        }
    }

    fn add_transition(&mut self, from: State, transition: Transition) {
        self.transitions.entry(from).or_default().push(transition);
    }

    fn add_epsilon_transition(&mut self, from: State, to: State) {
        self.add_transition(from, Transition::epsilon(to));
    }

    // Take over the states, symbols and transitions of `other`. State ranges never overlap,
    // so transition lists are appended rather than replaced.
    fn absorb(&mut self, other: Fragment) {
        self.states.extend(other.states);
        self.alphabet.extend(other.alphabet);
        for (from, transitions) in other.transitions {
            self.transitions.entry(from).or_default().extend(transitions);
        }
    }

    fn into_automaton(self) -> Automaton {
        let mut final_states = IndexSet::new();
        final_states.insert(self.accept);
        Automaton::from_parts(
            self.states,
            self.alphabet,
            self.transitions,
            self.start,
            final_states,
        )
    }
}

/// Builds an NFA from a postfix expression with the Thompson construction.
///
/// State ids come from a counter owned by the builder, starting at 0 and growing by 2 for
/// every literal, `|` and `*`. Concatenation allocates nothing. A builder is consumed by
/// `build`, so ids are never shared between automata.
pub struct ThompsonBuilder {
    next_state: usize,
    stack: Vec<Fragment>,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        ThompsonBuilder {
            next_state: 0,
            stack: Vec::new(),
        }
    }

    pub fn build(mut self, postfix: &str) -> Result<NFA> {
        for (pos, token) in Token::tokenize(postfix)?.into_iter().enumerate() {
            match token {
                Token::Literal(c) => self.push_literal(c),
                Token::Union => self.push_union(pos)?,
                Token::Concat => self.push_concat(pos)?,
                Token::Star => self.push_star(pos)?,
                Token::LParen | Token::RParen => return Err(UnbalancedParenthesis { pos }),
            }
        }

        if self.stack.len() > 1 {
            return Err(DanglingOperands {
                count: self.stack.len(),
            });
        }
        match self.stack.pop() {
            Some(fragment) => Ok(NFA::new(fragment.into_automaton())),
            None => Err(EmptyExpression),
        }
    }

    fn allocate_states(&mut self) -> (State, State) {
        let start = State::new(self.next_state);
        let accept = State::new(self.next_state + 1);
        self.next_state += 2;
        (start, accept)
    }

    fn pop_operand(&mut self, operator: char, pos: usize) -> Result<Fragment> {
        self.stack.pop().ok_or(MissingOperand { operator, pos })
    }

    // n -c-> n+1
    fn push_literal(&mut self, c: char) {
        let (start, accept) = self.allocate_states();
        let mut fragment = Fragment::new(start, accept);
        fragment.alphabet.insert(c);
        fragment.add_transition(start, Transition::new(c, accept));
        self.stack.push(fragment);
    }

    // m -> A.start, m -> B.start, A.accept -> m+1, B.accept -> m+1
    fn push_union(&mut self, pos: usize) -> Result<()> {
        let rhs = self.pop_operand('|', pos)?;
        let lhs = self.pop_operand('|', pos)?;
        let (start, accept) = self.allocate_states();

        let mut fragment = Fragment::new(start, accept);
        fragment.add_epsilon_transition(start, lhs.start);
        fragment.add_epsilon_transition(start, rhs.start);
        fragment.add_epsilon_transition(lhs.accept, accept);
        fragment.add_epsilon_transition(rhs.accept, accept);
        fragment.absorb(lhs);
        fragment.absorb(rhs);

        self.stack.push(fragment);
        Ok(())
    }

    // A.accept -> B.start
    fn push_concat(&mut self, pos: usize) -> Result<()> {
        let rhs = self.pop_operand('.', pos)?;
        let mut lhs = self.pop_operand('.', pos)?;

        lhs.add_epsilon_transition(lhs.accept, rhs.start);
        lhs.accept = rhs.accept;
        lhs.absorb(rhs);

        self.stack.push(lhs);
        Ok(())
    }

    // m -> A.start, m -> m+1, A.accept -> A.start, A.accept -> m+1
    fn push_star(&mut self, pos: usize) -> Result<()> {
        let inner = self.pop_operand('*', pos)?;
        let (start, accept) = self.allocate_states();

        let mut fragment = Fragment::new(start, accept);
        fragment.add_epsilon_transition(start, inner.start);
        fragment.add_epsilon_transition(start, accept);
        fragment.add_epsilon_transition(inner.accept, inner.start);
        fragment.add_epsilon_transition(inner.accept, accept);
        fragment.absorb(inner);

        self.stack.push(fragment);
        Ok(())
    }
}

impl Default for ThompsonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the NFA for an expression already in postfix form.
pub fn build_nfa(postfix: &str) -> Result<NFA> {
    ThompsonBuilder::new().build(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;

    fn sorted_states(nfa: &NFA) -> Vec<usize> {
        let mut ids: Vec<usize> = nfa
            .get_automaton()
            .get_states()
            .iter()
            .map(|state| state.get_id())
            .collect();
        ids.sort();
        ids
    }

    fn edges(nfa: &NFA, from: usize) -> Vec<(Option<char>, usize)> {
        nfa.get_automaton()
            .get_transitions_from_state(State::new(from))
            .iter()
            .map(|t| (t.get_symbol(), t.get_to_state().get_id()))
            .collect()
    }

    #[test]
    fn test_literal() -> Result<()> {
        let nfa = build_nfa("a")?;
        assert_eq!(sorted_states(&nfa), vec![0, 1]);
        assert_eq!(nfa.get_start(), State::new(0));
        assert_eq!(
            nfa.get_automaton().get_final_states().iter().collect::<Vec<_>>(),
            vec![&State::new(1)]
        );
        assert_eq!(edges(&nfa, 0), vec![(Some('a'), 1)]);
        assert!(edges(&nfa, 1).is_empty());
        Ok(())
    }

    #[test]
    fn test_union() -> Result<()> {
        let nfa = build_nfa("ab|")?;
        assert_eq!(sorted_states(&nfa), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(nfa.get_start(), State::new(4));
        assert!(nfa.is_final(State::new(5)));
        assert_eq!(edges(&nfa, 4), vec![(None, 0), (None, 2)]);
        assert_eq!(edges(&nfa, 1), vec![(None, 5)]);
        assert_eq!(edges(&nfa, 3), vec![(None, 5)]);
        assert_eq!(nfa.get_automaton().get_alphabet().len(), 2);
        Ok(())
    }

    #[test]
    fn test_concat() -> Result<()> {
        let nfa = build_nfa("ab.")?;
        assert_eq!(sorted_states(&nfa), vec![0, 1, 2, 3]);
        assert_eq!(nfa.get_start(), State::new(0));
        assert_eq!(nfa.get_automaton().get_final_states().len(), 1);
        assert!(nfa.is_final(State::new(3)));
        assert_eq!(false, nfa.is_final(State::new(1)));
        assert_eq!(edges(&nfa, 1), vec![(None, 2)]);
        Ok(())
    }

    #[test]
    fn test_star() -> Result<()> {
        let nfa = build_nfa("a*")?;
        assert_eq!(sorted_states(&nfa), vec![0, 1, 2, 3]);
        assert_eq!(nfa.get_start(), State::new(2));
        assert!(nfa.is_final(State::new(3)));
        assert_eq!(edges(&nfa, 2), vec![(None, 0), (None, 3)]);
        assert_eq!(edges(&nfa, 1), vec![(None, 0), (None, 3)]);
        Ok(())
    }

    #[test]
    fn test_counter_grows_through_nested_operators() -> Result<()> {
        // a(b|c)*d: a{0,1} b{2,3} c{4,5} |{6,7} *{8,9} d{10,11}
        let nfa = build_nfa("abc|*.d.")?;
        assert_eq!(sorted_states(&nfa), (0..12).collect::<Vec<usize>>());
        assert_eq!(nfa.get_start(), State::new(0));
        assert!(nfa.is_final(State::new(11)));
        assert_eq!(edges(&nfa, 9), vec![(None, 10)]);
        assert_eq!(edges(&nfa, 7), vec![(None, 6), (None, 9)]);
        nfa.validate()?;
        Ok(())
    }

    #[test]
    fn test_every_fragment_has_one_final_state() -> Result<()> {
        for postfix in ["a", "ab|", "ab.", "a*", "ab|*c.", "abc|*.d.e*|", "a**"] {
            let nfa = build_nfa(postfix)?;
            assert_eq!(nfa.get_automaton().get_final_states().len(), 1);
            assert!(nfa.is_valid());
        }
        Ok(())
    }

    #[test]
    fn test_malformed_postfix() {
        assert!(matches!(build_nfa(""), Err(Error::EmptyExpression)));
        assert!(matches!(
            build_nfa("a|"),
            Err(Error::MissingOperand { operator: '|', pos: 1 })
        ));
        assert!(matches!(
            build_nfa("*"),
            Err(Error::MissingOperand { operator: '*', pos: 0 })
        ));
        assert!(matches!(
            build_nfa("ab.."),
            Err(Error::MissingOperand { operator: '.', pos: 3 })
        ));
        assert!(matches!(
            build_nfa("abc|"),
            Err(Error::DanglingOperands { count: 2 })
        ));
        assert!(matches!(
            build_nfa("a(b"),
            Err(Error::UnbalancedParenthesis { pos: 1 })
        ));
        assert!(matches!(
            build_nfa("a-"),
            Err(Error::UnsupportedCharacter { ch: '-', pos: 1 })
        ));
    }

    #[test]
    fn test_builds_are_independent() -> Result<()> {
        let first = build_nfa("ab|")?;
        let second = build_nfa("ab|")?;
        assert_eq!(first.get_automaton(), second.get_automaton());
        Ok(())
    }
}
