//! Engine configuration: curated rule tables, scoring weights and the
//! ranking policy.
//!
//! Every section has a built-in default, so a TOML file only needs to name
//! what it overrides:
//!
//! ```toml
//! [weights]
//! grammar = 0.4
//! spelling = 0.3
//! content = 0.3
//!
//! [tables.misspellings]
//! recieve = ["receive"]
//! "could of" = ["could have"]
//! ```
//!
//! A configuration is loaded once and never mutated afterwards; checkers
//! borrow the tables for the duration of a call.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::issue::Severity;
use crate::ranking::RankingPolicy;
use crate::scoring::ScoringWeights;
use crate::text::letters_only;

/// Replacement candidates for a commonly confused word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confusion {
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub severity: Severity,
}

impl Confusion {
    fn new(suggestions: &[&str], severity: Severity) -> Self {
        Self {
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            severity,
        }
    }
}

/// Curated lookup tables consulted by the grammar and spelling checkers.
///
/// Keys are lower-case; single-word keys hold letters only. Misspelling keys
/// containing a space are matched as phrases against the whole text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    pub confusions: BTreeMap<String, Confusion>,
    pub misspellings: BTreeMap<String, Vec<String>>,
}

impl Default for RuleTables {
    fn default() -> Self {
        use Severity::{Low, Medium};

        let confusions = [
            ("their", Confusion::new(&["they're", "there"], Medium)),
            ("your", Confusion::new(&["you're"], Medium)),
            ("its", Confusion::new(&["it's"], Medium)),
            ("then", Confusion::new(&["than"], Low)),
            ("affect", Confusion::new(&["effect"], Low)),
            ("accept", Confusion::new(&["except"], Low)),
            ("complement", Confusion::new(&["compliment"], Low)),
            ("loose", Confusion::new(&["lose"], Low)),
            ("principle", Confusion::new(&["principal"], Low)),
            ("stationary", Confusion::new(&["stationery"], Low)),
        ];

        let misspellings: [(&str, &[&str]); 24] = [
            ("recieve", &["receive"]),
            ("seperate", &["separate"]),
            ("occured", &["occurred"]),
            ("definately", &["definitely"]),
            ("wierd", &["weird"]),
            ("grammer", &["grammar"]),
            ("arguement", &["argument"]),
            ("maintainance", &["maintenance"]),
            ("neccessary", &["necessary"]),
            ("occassion", &["occasion"]),
            ("truely", &["truly"]),
            ("alot", &["a lot"]),
            ("untill", &["until"]),
            ("pronounciation", &["pronunciation"]),
            ("dissappear", &["disappear"]),
            ("accomodate", &["accommodate"]),
            ("embarass", &["embarrass"]),
            ("mispell", &["misspell"]),
            ("could of", &["could have"]),
            ("should of", &["should have"]),
            ("would of", &["would have"]),
            ("must of", &["must have"]),
            ("for all intensive purposes", &["for all intents and purposes"]),
            ("in regards to", &["in regard to", "with regard to"]),
        ];

        Self {
            confusions: confusions
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            misspellings: misspellings
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

impl RuleTables {
    /// Fold keys the way the checkers fold tokens: phrase keys are trimmed
    /// and lower-cased, single-word keys keep only their letters.
    fn normalized(self) -> Self {
        Self {
            confusions: self
                .confusions
                .into_iter()
                .map(|(k, v)| (normalize_key(&k), v))
                .collect(),
            misspellings: self
                .misspellings
                .into_iter()
                .map(|(k, v)| (normalize_key(&k), v))
                .collect(),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        // Tokens are folded to letters before lookup, so a single-word key
        // must already be in that form to ever match.
        let unreachable =
            |k: &String| k.is_empty() || (!k.contains(' ') && normalize_key(k) != *k);
        if let Some(key) = self
            .confusions
            .keys()
            .find(|k| unreachable(*k) || k.contains(' '))
        {
            return Err(ConfigError::Invalid(format!(
                "confusion key '{key}' must be a single word of letters"
            )));
        }
        if let Some(key) = self.misspellings.keys().find(|k| unreachable(*k)) {
            return Err(ConfigError::Invalid(format!(
                "misspelling key '{key}' must be a phrase or a single word of letters"
            )));
        }
        if let Some((key, _)) = self.confusions.iter().find(|(_, c)| c.suggestions.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "confusion '{key}' has no suggestions"
            )));
        }
        if let Some((key, _)) = self.misspellings.iter().find(|(_, s)| s.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "misspelling '{key}' has no corrections"
            )));
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase();
    if key.contains(' ') {
        key
    } else {
        letters_only(&key)
    }
}

/// Everything the engine needs besides the text itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tables: RuleTables,
    pub weights: ScoringWeights,
    pub ranking: RankingPolicy,
}

impl EngineConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let mut config: EngineConfig = toml::from_str(content)?;
        config.tables = config.tables.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.tables.validate()?;
        self.weights.validate()?;
        self.ranking.validate()
    }
}
