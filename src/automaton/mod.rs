mod automaton;

pub use automaton::Automaton;
pub use automaton::State;
pub use automaton::Transition;
pub use automaton::Violation;
pub use automaton::EPSILON_DISPLAY;
