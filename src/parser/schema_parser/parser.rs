use crate::error_handling::Error::{IOError, InvalidConfig, MissingConfigKey, YamlParsingError};
use crate::error_handling::Result;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::io::Read;

pub struct PatternConfig {
    regex: String,
    words: Vec<String>,
    output: Option<String>,
}

impl PatternConfig {
    pub fn new(regex: String) -> PatternConfig {
        Self {
            regex,
            words: Vec::new(),
            output: None,
        }
    }

    pub fn get_regex(&self) -> &str {
        &self.regex
    }

    pub fn get_words(&self) -> &Vec<String> {
        &self.words
    }

    pub fn get_output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl PatternConfig {
    const REGEX_KEY: &'static str = "regex";
    const WORDS_KEY: &'static str = "words";
    const OUTPUT_KEY: &'static str = "output";

    pub fn parse_from_file(yaml_file_path: &str) -> Result<PatternConfig> {
        Self::parse_from_str(read_file(yaml_file_path)?.as_str())
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<PatternConfig> {
        match Self::load_kv_pairs_from_yaml_content(yaml_content) {
            Ok(kv_pairs) => Self::load_from_kv_pairs(kv_pairs),
            Err(e) => Err(YamlParsingError(e)),
        }
    }

    fn get_key_value<'a>(
        kv_map: &'a IndexMap<String, Value>,
        key: &'static str,
    ) -> Result<&'a Value> {
        kv_map.get(key).ok_or_else(|| MissingConfigKey(key))
    }

    fn load_kv_pairs_from_yaml_content(
        yaml_content: &str,
    ) -> serde_yaml::Result<IndexMap<String, Value>> {
        let kv_map_result: IndexMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(kv_map_result)
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        let regex = match Self::get_key_value(&kv_pairs, Self::REGEX_KEY)? {
            Value::String(regex) => regex.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => return Err(InvalidConfig("`regex` must be a string")),
        };

        let mut words: Vec<String> = Vec::new();
        match kv_pairs.get(Self::WORDS_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Sequence(sequence)) => {
                sequence.iter().try_for_each(|val| match val {
                    Value::String(s) => {
                        words.push(s.clone());
                        Ok(())
                    }
                    _ => Err(InvalidConfig("`words` must only contain strings")),
                })?;
            }
            Some(_) => return Err(InvalidConfig("`words` must be a sequence")),
        }

        let output = match kv_pairs.get(Self::OUTPUT_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(path)) => Some(path.clone()),
            Some(_) => return Err(InvalidConfig("`output` must be a string")),
        };

        Ok(Self {
            regex,
            words,
            output,
        })
    }
}

/// Reads a regex stored as plain text, ignoring surrounding whitespace.
pub fn read_regex_from_file(path: &str) -> Result<String> {
    Ok(read_file(path)?.trim().to_string())
}

fn read_file(path: &str) -> Result<String> {
    match std::fs::File::open(path) {
        Ok(mut file) => {
            let mut contents = String::new();
            if let Err(e) = file.read_to_string(&mut contents) {
                return Err(IOError(e));
            }
            Ok(contents)
        }
        Err(e) => Err(IOError(e)),
    }
}
