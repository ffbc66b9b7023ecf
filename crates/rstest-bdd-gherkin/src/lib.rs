//! Lexer, localized keyword matcher and recursive-descent parser for Gherkin
//! feature documents.
//!
//! The pipeline has two stages. [`lex`] turns a document into [`Token`]s and
//! never fails. [`Parser`] walks those tokens and builds a [`Feature`],
//! recognising labels through a [`KeywordTable`] so the same grammar accepts
//! `Scenario` in English and `Cenário` in Portuguese.
//!
//! ```
//! use rstest_bdd_gherkin::{parse_document, Step};
//!
//! let doc = parse_document(
//!     "Feature: Eating\n  Scenario: Lunch\n    Given a sandwich\n",
//! )
//! .unwrap();
//! assert_eq!(doc.feature.scenarios[0].steps, [Step::new("Given a sandwich")]);
//! ```

mod ast;
pub mod config;
mod document;
mod errors;
mod keywords;
mod lexer;
mod parser;
mod token;

pub use ast::{Background, Examples, Feature, Metadata, Scenario, Step, Table, Text};
pub use document::{Document, LANGUAGE_KEY, parse_document, parse_document_with};
pub use errors::{KeywordError, ParseError};
pub use keywords::{KeywordCategory, KeywordTable, LanguageKeywords, StepKeyword, matches};
pub use lexer::{Lexer, lex};
pub use parser::{Parser, parse, parse_feature};
pub use token::{Token, TokenKind};
