use regex_dfa::dfa::DFA;
use regex_dfa::error_handling::Error::InvalidConfig;
use regex_dfa::error_handling::Result;
use regex_dfa::nfa::NFA;
use regex_dfa::parser::{read_regex_from_file, to_postfix, PatternConfig};

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use std::io::{self, BufRead};
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("regex-dfa")
        .version(regex_dfa::version())
        .about("Compiles a regular expression into a DFA and tests words against it")
        .arg(
            Arg::new("regex")
                .long("regex")
                .short('r')
                .help("Regular expression over letters, digits, '.', '|', '*' and parentheses")
                .value_name("REGEX"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .help("Path to a text file holding the regular expression")
                .value_name("REGEX_FILE"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a YAML pattern file (keys: regex, words, output)")
                .value_name("CONFIG_FILE"),
        )
        .group(
            ArgGroup::new("source")
                .args(["regex", "file", "config"])
                .required(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Print the postfix form and the intermediate automata")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(Command::new("postfix").about("Print the postfix form of the regex"))
        .subcommand(
            Command::new("describe")
                .about("Print the DFA and optionally write it to a file")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("File to write the DFA description to")
                        .value_name("OUTPUT_FILE"),
                ),
        )
        .subcommand(Command::new("validate").about("Check the DFA's structural invariants"))
        .subcommand(
            Command::new("check")
                .about("Test words against the DFA; reads stdin when no words are given")
                .arg(
                    Arg::new("words")
                        .help("Words to test")
                        .num_args(0..)
                        .value_name("WORD"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Report symbols outside the alphabet instead of rejecting")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<PatternConfig> {
    if let Some(regex) = matches.get_one::<String>("regex") {
        return Ok(PatternConfig::new(regex.trim().to_string()));
    }
    if let Some(path) = matches.get_one::<String>("file") {
        return Ok(PatternConfig::new(read_regex_from_file(path)?));
    }
    match matches.get_one::<String>("config") {
        Some(path) => PatternConfig::parse_from_file(path),
        None => Err(InvalidConfig("no regex source given")),
    }
}

fn describe(dfa: &DFA, output: Option<&str>) -> Result<ExitCode> {
    let lines = dfa.describe();
    for line in &lines {
        println!("{}", line);
    }
    if let Some(path) = output {
        std::fs::write(path, lines.join("\n") + "\n")?;
        println!("DFA written to {}", path);
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(dfa: &DFA) -> ExitCode {
    match dfa.validate() {
        Ok(()) => {
            println!("valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_words_from_stdin() -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in io::stdin().lock().lines() {
        words.push(line?.trim_end_matches('\r').to_string());
    }
    Ok(words)
}

fn check(dfa: &DFA, config: &PatternConfig, matches: &ArgMatches) -> Result<ExitCode> {
    let words: Vec<String> = match matches.get_many::<String>("words") {
        Some(words) => words.cloned().collect(),
        None if !config.get_words().is_empty() => config.get_words().clone(),
        None => read_words_from_stdin()?,
    };

    let strict = matches.get_flag("strict");
    let mut exit_code = ExitCode::SUCCESS;
    for word in &words {
        let verdict = if strict {
            dfa.try_check_word(word)
        } else {
            Ok(dfa.check_word(word))
        };
        match verdict {
            Ok(true) => println!("{:?}: accepted", word),
            Ok(false) => println!("{:?}: rejected", word),
            Err(e) => {
                println!("{:?}: {}", word, e);
                exit_code = ExitCode::FAILURE;
            }
        }
    }
    Ok(exit_code)
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = load_config(matches)?;
    let Some((subcommand, sub_matches)) = matches.subcommand() else {
        return Err(InvalidConfig("no subcommand given"));
    };
    let verbose = matches.get_flag("verbose") || sub_matches.get_flag("verbose");

    let postfix = to_postfix(config.get_regex())?;
    if "postfix" == subcommand {
        println!("{}", postfix);
        return Ok(ExitCode::SUCCESS);
    }
    if verbose {
        println!("Postfix: {}", postfix);
    }

    let nfa = NFA::from_postfix(&postfix)?;
    if verbose {
        println!("{:?}", nfa);
    }
    let dfa = DFA::from_nfa(&nfa);
    if verbose {
        println!("{:?}", dfa);
    }

    match subcommand {
        "describe" => {
            let output = sub_matches
                .get_one::<String>("output")
                .map(String::as_str)
                .or(config.get_output());
            describe(&dfa, output)
        }
        "validate" => Ok(validate(&dfa)),
        "check" => check(&dfa, &config, sub_matches),
        _ => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
