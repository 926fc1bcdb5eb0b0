//! Script-pack loading and validation.
//!
//! A script pack is a trio of YAML files per language: `rules_<lang>.yaml`,
//! `reflections_<lang>.yaml` and `messages_<lang>.yaml`. The first two are
//! compiled into an immutable [`Script`]; the third carries the console-only
//! strings ([`Messages`]) and never reaches the engine.
//!
//! Loading is strict: a pack with zero rules, a rule with zero patterns, a
//! pattern with zero reassemblies or a decomposition that fails to compile is
//! rejected up front, so the engine never discovers bad script data at match
//! time. The built-in `us` and `fr` packs are embedded in the binary and
//! parsed on demand.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::RegexBuilder;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::{normalize, strip_accents};
use crate::{DecompUnit, Rule};

/// Reserved keyword marking the catch-all fallback rule. Never a candidate
/// during keyword matching.
pub(crate) const FALLBACK_KEYWORD: &str = "@none";

/// Why a script pack failed to load.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed script yaml")]
    Parse(#[from] serde_yaml::Error),
    #[error("script defines no rules")]
    NoRules,
    #[error("rule `{keyword}` has no decomposition patterns")]
    NoUnits { keyword: String },
    #[error("rule `{keyword}` has a pattern with no reassemblies")]
    NoReassemblies { keyword: String },
    #[error("rule `{keyword}` has an unparsable decomposition pattern")]
    BadPattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },
    #[error("unknown language `{0}`, expected `us` or `fr`")]
    UnknownLanguage(String),
}

/// Built-in script-pack languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Us,
    Fr,
}

impl Language {
    /// File-name code: `rules_<code>.yaml` and friends.
    pub fn code(self) -> &'static str {
        match self {
            Language::Us => "us",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" => Ok(Language::Us),
            "fr" => Ok(Language::Fr),
            other => Err(ScriptError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Console-facing strings of a pack: greeting pool, quit words and the
/// goodbye line. The engine itself never reads these.
#[derive(Debug, Clone, Deserialize)]
pub struct Messages {
    pub greetings: Vec<String>,
    pub quit_words: Vec<String>,
    pub goodbye: String,
}

impl Messages {
    /// Built-in messages for `lang`.
    pub fn builtin(lang: Language) -> Result<Self, ScriptError> {
        let yaml = match lang {
            Language::Us => include_str!("../scripts/messages_us.yaml"),
            Language::Fr => include_str!("../scripts/messages_fr.yaml"),
        };
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read `messages_<lang>.yaml` from `dir`.
    pub fn from_dir(dir: &Path, lang: Language) -> Result<Self, ScriptError> {
        let path = dir.join(format!("messages_{}.yaml", lang.code()));
        Ok(serde_yaml::from_str(&read(&path)?)?)
    }
}

/// A compiled, immutable script: prioritized keyword rules plus the
/// reflection table. Shareable across any number of sessions.
#[derive(Debug)]
pub struct Script {
    pub(crate) rules: Vec<Rule>,
    /// Keys lowercased and accent-stripped at load.
    pub(crate) reflections: HashMap<String, String>,
    /// Index of the first `@none` rule, if the pack ships one.
    pub(crate) fallback: Option<usize>,
}

impl Script {
    /// Built-in pack for `lang`.
    pub fn builtin(lang: Language) -> Result<Self, ScriptError> {
        let (rules, reflections) = match lang {
            Language::Us => (
                include_str!("../scripts/rules_us.yaml"),
                include_str!("../scripts/reflections_us.yaml"),
            ),
            Language::Fr => (
                include_str!("../scripts/rules_fr.yaml"),
                include_str!("../scripts/reflections_fr.yaml"),
            ),
        };
        Script::from_yaml(rules, reflections)
    }

    /// Read `rules_<lang>.yaml` and `reflections_<lang>.yaml` from `dir`.
    pub fn from_dir(dir: &Path, lang: Language) -> Result<Self, ScriptError> {
        let rules_yaml = read(&dir.join(format!("rules_{}.yaml", lang.code())))?;
        let reflections_yaml = read(&dir.join(format!("reflections_{}.yaml", lang.code())))?;
        Script::from_yaml(&rules_yaml, &reflections_yaml)
    }

    /// Parse and compile a script from YAML strings.
    pub fn from_yaml(rules_yaml: &str, reflections_yaml: &str) -> Result<Self, ScriptError> {
        let raw_rules: RawRulesFile = serde_yaml::from_str(rules_yaml)?;
        let raw_reflections: RawReflectionsFile = serde_yaml::from_str(reflections_yaml)?;
        Script::compile(raw_rules, raw_reflections)
    }

    /// Number of rules, fallback sentinel included.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn compile(raw: RawRulesFile, raw_reflections: RawReflectionsFile) -> Result<Self, ScriptError> {
        if raw.rules.is_empty() {
            return Err(ScriptError::NoRules);
        }

        let mut rules = Vec::with_capacity(raw.rules.len());
        let mut fallback = None;
        for raw_rule in raw.rules {
            let RawRule { keyword, priority, insult, patterns } = raw_rule;
            if patterns.is_empty() {
                return Err(ScriptError::NoUnits { keyword });
            }

            let mut units = Vec::with_capacity(patterns.len());
            for unit in patterns {
                if unit.reassemblies.is_empty() {
                    return Err(ScriptError::NoReassemblies { keyword });
                }
                let pattern = RegexBuilder::new(&strip_accents(&unit.decomposition))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ScriptError::BadPattern { keyword: keyword.clone(), source })?;
                units.push(DecompUnit { pattern, reassemblies: unit.reassemblies });
            }

            let keyword = if keyword == FALLBACK_KEYWORD {
                if fallback.is_none() {
                    fallback = Some(rules.len());
                }
                keyword
            } else {
                normalize(&keyword)
            };
            rules.push(Rule { keyword, priority, insult, units });
        }

        let reflections = raw_reflections
            .reflections
            .into_iter()
            .map(|(key, value)| (strip_accents(&key).to_lowercase(), value))
            .collect();

        Ok(Script { rules, reflections, fallback })
    }
}

fn read(path: &Path) -> Result<String, ScriptError> {
    fs::read_to_string(path).map_err(|source| ScriptError::Io { path: path.to_path_buf(), source })
}

#[derive(Debug, Deserialize)]
struct RawRulesFile {
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    keyword: String,
    priority: i32,
    #[serde(default)]
    insult: bool,
    patterns: Vec<RawUnit>,
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    decomposition: String,
    reassemblies: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawReflectionsFile {
    reflections: HashMap<String, String>,
}
