//! Error types raised while building keyword tables and parsing documents.

use thiserror::Error;

/// Grammar violations reported by the [`Parser`](crate::Parser).
///
/// Every variant names the offending token text so callers can surface a
/// useful message without inspecting the token stream themselves.
///
/// # Examples
/// ```
/// use rstest_bdd_gherkin::ParseError;
/// let err = ParseError::UnexpectedLabel { label: "Background".into(), line: 7 };
/// assert_eq!(
///     err.to_string(),
///     "`Background` should not be declared here, Scenario expected (line 7)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first significant label is not the active language's "Feature".
    #[error("Feature expected at the beginning of the document, found `{found}` though (line {line})")]
    MissingFeatureLabel {
        /// Text of the token found instead.
        found: String,
        /// Line of that token.
        line: usize,
    },
    /// A label other than "Scenario" appeared among the scenarios.
    #[error("`{label}` should not be declared here, Scenario expected (line {line})")]
    UnexpectedLabel {
        /// The offending label text.
        label: String,
        /// Line of the label.
        line: usize,
    },
    /// A `# key:` directive without a value.
    #[error("no value found for the meta-field `{key}` (line {line})")]
    IncompleteMetadata {
        /// The directive key.
        key: String,
        /// Line of the directive.
        line: usize,
    },
    /// A triple-quoted block that is never closed.
    #[error("unterminated quoted text for step `{step}` (opened on line {line})")]
    MalformedQuotedText {
        /// Title of the step owning the block.
        step: String,
        /// Line of the opening delimiter.
        line: usize,
    },
    /// The requested language has no keyword table.
    #[error("no keywords registered for language `{language}`")]
    UnknownLanguage {
        /// The requested language code.
        language: String,
    },
}

impl ParseError {
    /// Source line the error points at, when it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingFeatureLabel { line, .. }
            | Self::UnexpectedLabel { line, .. }
            | Self::IncompleteMetadata { line, .. }
            | Self::MalformedQuotedText { line, .. } => Some(*line),
            Self::UnknownLanguage { .. } => None,
        }
    }
}

/// Failures while compiling a localized keyword table.
#[derive(Debug, Error)]
pub enum KeywordError {
    /// A category name that the grammar does not know.
    #[error("unknown keyword category `{name}` for language `{language}`")]
    UnknownCategory {
        /// Language the entry belongs to.
        language: String,
        /// The unrecognised category name.
        name: String,
    },
    /// A category the grammar cannot work without.
    #[error("language `{language}` is missing the `{category}` keyword category")]
    MissingCategory {
        /// Language lacking the category.
        language: String,
        /// Name of the missing category.
        category: &'static str,
    },
    /// A pattern that does not compile.
    #[error("invalid `{category}` pattern for language `{language}`: {source}")]
    InvalidPattern {
        /// Language the pattern belongs to.
        language: String,
        /// Category the pattern belongs to.
        category: &'static str,
        /// Underlying regex failure.
        #[source]
        source: regex::Error,
    },
    /// A JSON keyword table that cannot be decoded.
    #[cfg(feature = "serde")]
    #[error("invalid keyword table: {0}")]
    Json(#[from] serde_json::Error),
}
