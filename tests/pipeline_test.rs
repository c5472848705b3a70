use regex_dfa::automaton::{Automaton, State, Transition, Violation};
use regex_dfa::dfa::{determinize, DFA};
use regex_dfa::error_handling::{Error, Result};
use regex_dfa::nfa::build_nfa;
use regex_dfa::parser::{read_regex_from_file, to_postfix, PatternConfig};

#[test]
fn test_pattern_file_end_to_end() -> Result<()> {
    let project_root = env!("CARGO_MANIFEST_DIR");
    let config_path = std::path::Path::new(project_root)
        .join("demos")
        .join("pattern.yaml");

    let config = PatternConfig::parse_from_file(config_path.to_str().unwrap())?;
    let dfa = regex_dfa::compile(config.get_regex())?;

    let verdicts: Vec<bool> = config
        .get_words()
        .iter()
        .map(|word| dfa.check_word(word))
        .collect();
    // "ad", "abcbcd", "", "ee", "abcx", "a"
    assert_eq!(verdicts, vec![true, true, true, true, false, false]);

    Ok(())
}

#[test]
fn test_regex_file_matches_pattern_file() -> Result<()> {
    let project_root = env!("CARGO_MANIFEST_DIR");
    let demos = std::path::Path::new(project_root).join("demos");
    let regex = read_regex_from_file(demos.join("regex.txt").to_str().unwrap())?;
    let config = PatternConfig::parse_from_file(demos.join("pattern.yaml").to_str().unwrap())?;
    assert_eq!(regex, config.get_regex());
    Ok(())
}

#[test]
fn test_stage_by_stage() -> Result<()> {
    let postfix = to_postfix("a(b|c)*d")?;
    assert_eq!(postfix, "abc|*.d.");

    let nfa = build_nfa(&postfix)?;
    assert_eq!(nfa.get_automaton().get_states().len(), 12);
    assert!(nfa.is_valid());

    let dfa = determinize(&nfa);
    assert!(dfa.is_valid());
    dfa.check_determinism()?;

    let expected = vec![
        "States: 0,1,2,3,4",
        "Alphabet: a,b,c,d",
        "StartingState: 0",
        "FinalStates: 4",
        "Transitions:",
        "p(0, a) -> 1",
        "p(1, b) -> 2",
        "p(1, c) -> 3",
        "p(1, d) -> 4",
        "p(2, b) -> 2",
        "p(2, c) -> 3",
        "p(2, d) -> 4",
        "p(3, b) -> 2",
        "p(3, c) -> 3",
        "p(3, d) -> 4",
    ];
    assert_eq!(dfa.describe(), expected);

    Ok(())
}

#[test]
fn test_describe_never_shows_epsilon_for_dfa() -> Result<()> {
    for regex in ["a(b|c)*d|e*", "(a|b)*abb", "((a))", "a**b*"] {
        let dfa = regex_dfa::compile(regex)?;
        assert!(dfa.describe().iter().all(|line| !line.contains("lambda")));
    }
    Ok(())
}

#[test]
fn test_validation_catches_dangling_target() {
    let mut automaton = Automaton::new(State::new(0));
    automaton.add_state(State::new(1));
    automaton.add_symbol('a');
    automaton.add_transition(State::new(0), Transition::new('a', State::new(1)));
    automaton.add_final_state(State::new(1));
    assert!(automaton.is_valid());

    automaton.add_transition(State::new(1), Transition::new('a', State::new(2)));
    assert_eq!(false, automaton.is_valid());
    assert_eq!(
        automaton.validate(),
        Err(Violation::TransitionTargetMissing {
            from: State::new(1),
            to: State::new(2)
        })
    );
}

fn error_kind(e: &Error) -> &'static str {
    match e {
        Error::UnsupportedCharacter { .. } => "unsupported character",
        Error::UnbalancedParenthesis { .. } => "unbalanced parenthesis",
        Error::MissingOperand { .. } => "missing operand",
        Error::DanglingOperands { .. } => "dangling operands",
        Error::EmptyExpression => "empty expression",
        _ => "other",
    }
}

#[test]
fn test_malformed_regexes_are_reported() {
    let cases = [
        ("(ab", "unbalanced parenthesis"),
        ("ab)", "unbalanced parenthesis"),
        ("a|", "missing operand"),
        ("|", "missing operand"),
        ("", "empty expression"),
        ("a?", "unsupported character"),
    ];
    for (regex, expected) in cases {
        match regex_dfa::compile(regex) {
            Err(e) => {
                assert_eq!(error_kind(&e), expected, "{:?} gave {:?}", regex, e);
                assert!(e.is_malformed_regex());
            }
            Ok(_) => panic!("{:?} should not compile", regex),
        }
    }
}

#[test]
fn test_dfa_is_shareable_across_threads() -> Result<()> {
    let dfa: std::sync::Arc<DFA> = std::sync::Arc::new(regex_dfa::compile("(0|1)*1")?);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dfa = dfa.clone();
            std::thread::spawn(move || {
                let word = format!("{:b}", i * 2 + 1);
                dfa.check_word(&word) && dfa.is_valid()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    Ok(())
}
