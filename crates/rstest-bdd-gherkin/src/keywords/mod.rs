//! Localized keyword recognition.
//!
//! A [`KeywordTable`] maps a language code to the [`LanguageKeywords`] of that
//! language: one compiled pattern per [`KeywordCategory`]. Patterns are
//! anchored at the start of the candidate text, so the grammar asks "does this
//! label introduce a Scenario in Portuguese?" without caring about the
//! spelling. The built-in table is compiled once per process and shared by
//! reference; tables never change after construction.

mod builtin;
mod step;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::KeywordError;

pub use step::StepKeyword;

static BUILTIN: Lazy<KeywordTable> = Lazy::new(builtin::table);

/// Structural role a keyword plays in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordCategory {
    /// Root label, e.g. `Feature`.
    Feature,
    /// Shared setup label, e.g. `Background`.
    Background,
    /// Test case label, e.g. `Scenario`.
    Scenario,
    /// Templated test case label, e.g. `Scenario Outline`. Matching
    /// [`KeywordCategory::Scenario`] also accepts these.
    ScenarioOutline,
    /// Substitution table label, e.g. `Examples`.
    Examples,
    /// `Given` step keyword.
    Given,
    /// `When` step keyword.
    When,
    /// `Then` step keyword.
    Then,
    /// `And` step keyword.
    And,
    /// `But` step keyword.
    But,
}

impl KeywordCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Feature,
        Self::Background,
        Self::Scenario,
        Self::ScenarioOutline,
        Self::Examples,
        Self::Given,
        Self::When,
        Self::Then,
        Self::And,
        Self::But,
    ];

    /// Categories every language must define.
    pub const REQUIRED: [Self; 4] = [
        Self::Feature,
        Self::Background,
        Self::Scenario,
        Self::Examples,
    ];

    /// Return the snake-case name used in keyword tables.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::KeywordCategory;
    /// assert_eq!(KeywordCategory::ScenarioOutline.as_str(), "scenario_outline");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Background => "background",
            Self::Scenario => "scenario",
            Self::ScenarioOutline => "scenario_outline",
            Self::Examples => "examples",
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::And => "and",
            Self::But => "but",
        }
    }

    /// The step keyword this category introduces, if it is a step category.
    #[must_use]
    pub const fn step_keyword(&self) -> Option<StepKeyword> {
        match self {
            Self::Given => Some(StepKeyword::Given),
            Self::When => Some(StepKeyword::When),
            Self::Then => Some(StepKeyword::Then),
            Self::And => Some(StepKeyword::And),
            Self::But => Some(StepKeyword::But),
            _ => None,
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| value.to_string())
    }
}

/// Compiled keyword patterns for one language.
#[derive(Debug, Clone)]
pub struct LanguageKeywords {
    code: String,
    patterns: HashMap<KeywordCategory, Regex>,
}

impl LanguageKeywords {
    /// Compile one language from `(category name, regex source)` pairs.
    ///
    /// Each source is anchored at the start of the candidate text. Every
    /// category in [`KeywordCategory::REQUIRED`] must be present.
    ///
    /// # Errors
    /// Returns [`KeywordError`] for unknown category names, invalid patterns
    /// or missing required categories.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::{KeywordCategory, LanguageKeywords};
    /// let keywords = LanguageKeywords::from_patterns(
    ///     "pt-br",
    ///     [
    ///         ("feature", "Funcionalidade"),
    ///         ("background", "Contexto"),
    ///         ("scenario", "Cen[aá]rio"),
    ///         ("examples", "Exemplos"),
    ///     ],
    /// )
    /// .unwrap();
    /// assert!(keywords.matches(KeywordCategory::Scenario, "Cenário"));
    /// assert!(!keywords.matches(KeywordCategory::Feature, "Feature"));
    /// ```
    pub fn from_patterns<I, C, P>(code: impl Into<String>, entries: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (C, P)>,
        C: AsRef<str>,
        P: AsRef<str>,
    {
        let code = code.into();
        let mut patterns = HashMap::new();
        for (name, source) in entries {
            let category: KeywordCategory =
                name.as_ref()
                    .parse()
                    .map_err(|name| KeywordError::UnknownCategory {
                        language: code.clone(),
                        name,
                    })?;
            let regex = compile(&code, category, source.as_ref())?;
            patterns.insert(category, regex);
        }
        Self::checked(code, patterns)
    }

    /// Compile one language from literal keyword spellings.
    ///
    /// Label categories must match the whole label; step categories must be
    /// followed by whitespace.
    pub(crate) fn from_words(
        code: &str,
        entries: &[(KeywordCategory, &[&str])],
    ) -> Result<Self, KeywordError> {
        let mut patterns = HashMap::new();
        for (category, words) in entries {
            let alternatives = words
                .iter()
                .map(|word| regex::escape(word))
                .collect::<Vec<_>>()
                .join("|");
            let source = if category.step_keyword().is_some() {
                format!(r"(?:{alternatives})\s")
            } else {
                format!("(?:{alternatives})$")
            };
            patterns.insert(*category, compile(code, *category, &source)?);
        }
        Self::checked(code.to_string(), patterns)
    }

    fn checked(
        code: String,
        patterns: HashMap<KeywordCategory, Regex>,
    ) -> Result<Self, KeywordError> {
        if let Some(missing) = KeywordCategory::REQUIRED
            .into_iter()
            .find(|category| !patterns.contains_key(category))
        {
            return Err(KeywordError::MissingCategory {
                language: code,
                category: missing.as_str(),
            });
        }
        Ok(Self { code, patterns })
    }

    /// Language code these keywords belong to.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether `text` starts with a keyword of `category`.
    ///
    /// [`KeywordCategory::Scenario`] also accepts scenario outline keywords.
    #[must_use]
    pub fn matches(&self, category: KeywordCategory, text: &str) -> bool {
        let hit = |category| {
            self.patterns
                .get(&category)
                .is_some_and(|regex| regex.is_match(text))
        };
        match category {
            KeywordCategory::Scenario => hit(category) || hit(KeywordCategory::ScenarioOutline),
            other => hit(other),
        }
    }

    /// Whether any step keyword category is defined.
    #[must_use]
    pub fn has_step_keywords(&self) -> bool {
        self.patterns
            .keys()
            .any(|category| category.step_keyword().is_some())
    }

    /// Classify a step title by its leading keyword.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::{KeywordTable, StepKeyword};
    /// let pt = KeywordTable::builtin().language("pt-br").unwrap();
    /// assert_eq!(pt.step_keyword("Quando mordida"), Some(StepKeyword::When));
    /// assert_eq!(pt.step_keyword("mordida"), None);
    /// ```
    #[must_use]
    pub fn step_keyword(&self, text: &str) -> Option<StepKeyword> {
        KeywordCategory::ALL
            .into_iter()
            .filter(|category| self.matches(*category, text))
            .find_map(|category| category.step_keyword())
    }
}

fn compile(code: &str, category: KeywordCategory, source: &str) -> Result<Regex, KeywordError> {
    Regex::new(&format!("^(?:{source})")).map_err(|source| KeywordError::InvalidPattern {
        language: code.to_string(),
        category: category.as_str(),
        source,
    })
}

/// Keyword patterns for a set of languages.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    languages: HashMap<String, LanguageKeywords>,
}

impl KeywordTable {
    /// The process-wide built-in table, compiled on first use.
    ///
    /// Ships English (`en`), Portuguese (`pt`, `pt-br`), Spanish (`es`),
    /// French (`fr`) and German (`de`).
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a table from externally supplied regex sources, keyed by
    /// language code and then by category name.
    ///
    /// # Errors
    /// Returns the first [`KeywordError`] raised by any language.
    pub fn from_patterns<I, L, E, C, P>(entries: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (L, E)>,
        L: Into<String>,
        E: IntoIterator<Item = (C, P)>,
        C: AsRef<str>,
        P: AsRef<str>,
    {
        let mut table = Self::default();
        for (code, patterns) in entries {
            table.insert(LanguageKeywords::from_patterns(code, patterns)?);
        }
        Ok(table)
    }

    /// Decode a table from JSON shaped as
    /// `{"<language>": {"<category>": "<regex>"}}`.
    ///
    /// # Errors
    /// Returns [`KeywordError::Json`] for malformed JSON and the errors of
    /// [`KeywordTable::from_patterns`] otherwise.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::{KeywordCategory, KeywordTable};
    /// let table = KeywordTable::from_json(r#"{
    ///     "en": {"feature": "Feature", "background": "Background",
    ///            "scenario": "Scenario", "examples": "Examples"}
    /// }"#).unwrap();
    /// assert!(table.matches("en", KeywordCategory::Feature, "Feature"));
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, KeywordError> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;
        Self::from_patterns(raw)
    }

    /// Add or replace a language, returning the previous entry.
    pub fn insert(&mut self, keywords: LanguageKeywords) -> Option<LanguageKeywords> {
        self.languages.insert(keywords.code.clone(), keywords)
    }

    /// Keywords for `code`, if the table knows the language.
    #[must_use]
    pub fn language(&self, code: &str) -> Option<&LanguageKeywords> {
        self.languages.get(code)
    }

    /// Known language codes, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Whether `text` starts with a `category` keyword in `language`.
    ///
    /// Unknown languages never match.
    #[must_use]
    pub fn matches(&self, language: &str, category: KeywordCategory, text: &str) -> bool {
        self.language(language)
            .is_some_and(|keywords| keywords.matches(category, text))
    }
}

/// Match `text` against the built-in table.
///
/// # Examples
/// ```
/// use rstest_bdd_gherkin::{matches, KeywordCategory};
/// assert!(matches("en", KeywordCategory::Scenario, "Scenario Outline"));
/// assert!(matches("pt-br", KeywordCategory::Feature, "Funcionalidade"));
/// assert!(!matches("en", KeywordCategory::Feature, "Funcionalidade"));
/// ```
#[must_use]
pub fn matches(language: &str, category: KeywordCategory, text: &str) -> bool {
    KeywordTable::builtin().matches(language, category, text)
}
