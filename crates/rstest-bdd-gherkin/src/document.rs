//! Whole-document parsing: directives first, then the feature in the
//! language the directives select.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::ast::{Feature, Metadata};
use crate::config;
use crate::errors::ParseError;
use crate::keywords::KeywordTable;
use crate::lexer::lex;
use crate::parser::Parser;

/// Directive key selecting the document language.
pub const LANGUAGE_KEY: &str = "language";

/// A parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Document {
    /// Leading `# key: value` directives, in source order.
    pub metadata: Vec<Metadata>,
    /// Language the feature was parsed in.
    pub language: String,
    /// The feature itself.
    pub feature: Feature,
}

impl Document {
    /// Value of the first directive named `key`.
    #[must_use]
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

/// Parse `text` with the built-in keywords, falling back to
/// [`config::default_language`] when the document declares no language.
///
/// # Errors
/// Returns [`ParseError`] for malformed directives, unknown languages and
/// grammar violations.
///
/// # Examples
/// ```
/// use rstest_bdd_gherkin::parse_document;
/// let doc = parse_document("# language: pt\nFuncionalidade: Lanche\n").unwrap();
/// assert_eq!(doc.language, "pt");
/// assert_eq!(doc.feature.title.as_str(), "Lanche");
/// ```
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    parse_document_with(text, KeywordTable::builtin(), &config::default_language())
}

/// Parse `text` against `table`, using `default_language` when the document
/// declares none.
///
/// # Errors
/// See [`parse_document`].
pub fn parse_document_with(
    text: &str,
    table: &KeywordTable,
    default_language: &str,
) -> Result<Document, ParseError> {
    let tokens = lex(text);
    let mut parser = Parser::new(&tokens);
    let mut metadata = Vec::new();
    while let Some(entry) = parser.parse_metadata()? {
        metadata.push(entry);
    }
    let language = metadata
        .iter()
        .find(|entry| entry.key == LANGUAGE_KEY)
        .map_or(default_language, |entry| entry.value.as_str())
        .to_string();
    let keywords = table
        .language(&language)
        .ok_or_else(|| ParseError::UnknownLanguage {
            language: language.clone(),
        })?;
    log::debug!(
        "document language `{language}` ({} directive(s))",
        metadata.len()
    );
    parser.set_keywords(keywords);
    let feature = parser.parse_feature()?;
    Ok(Document {
        metadata,
        language,
        feature,
    })
}
