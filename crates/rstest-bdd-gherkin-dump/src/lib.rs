//! Inspect how `rstest-bdd-gherkin` sees a feature file.
//!
//! This library powers the `gherkin-dump` binary. It gathers `.feature`
//! files, parses each one with either the built-in keyword table or a JSON
//! table supplied by the user, and renders the result as JSON, as a token
//! listing, or as a list of steps with resolved keywords.

pub mod config;
pub mod error;
pub mod logging;
mod output;

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rstest_bdd_gherkin::{Document, KeywordTable, ParseError, lex, parse_document_with};
use walkdir::WalkDir;

use crate::config::{DumpConfig, OutputFormat};
use crate::error::DumpError;

/// Expand `paths` into the feature files to process.
///
/// Directories are walked recursively and contribute every file with a
/// `.feature` extension, sorted by path. Other paths are taken as given so a
/// missing file is reported when it is read.
///
/// # Errors
/// Returns [`DumpError::Io`] if a directory cannot be traversed.
pub fn collect_feature_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, DumpError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|source| DumpError::Io {
                path: path.clone(),
                source: source.into(),
            })?;
            if entry.file_type().is_file()
                && entry.path().extension() == Some(OsStr::new("feature"))
            {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

/// Load a keyword table from a JSON file.
///
/// # Errors
/// Returns [`DumpError::Io`] when the file cannot be read and
/// [`DumpError::Keywords`] when its content is not a valid table.
pub fn load_keywords(path: &Path) -> Result<KeywordTable, DumpError> {
    let json = fs::read_to_string(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    KeywordTable::from_json(&json).map_err(|source| DumpError::Keywords {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses feature files and writes them in the configured format.
#[derive(Debug)]
pub struct Dumper {
    table: Option<KeywordTable>,
    language: String,
    format: OutputFormat,
}

impl Dumper {
    /// Build a dumper from `config`, loading its keyword table if one is set.
    ///
    /// Without `config.language` the parser's default language applies.
    ///
    /// # Errors
    /// Fails when the keyword table cannot be loaded.
    pub fn new(config: &DumpConfig) -> Result<Self, DumpError> {
        let table = config.keywords.as_deref().map(load_keywords).transpose()?;
        let language = config
            .language
            .clone()
            .unwrap_or_else(rstest_bdd_gherkin::config::default_language);
        Ok(Self {
            table,
            language,
            format: config.format,
        })
    }

    /// Language applied to documents without a `# language:` directive.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    fn table(&self) -> &KeywordTable {
        self.table.as_ref().unwrap_or_else(|| KeywordTable::builtin())
    }

    /// Parse `path` and write it to `writer`.
    ///
    /// The token listing only lexes the file, so it also works for documents
    /// that do not parse.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, does not parse, or the
    /// output cannot be written.
    pub fn dump_file(&self, path: &Path, writer: &mut dyn Write) -> eyre::Result<()> {
        let text = fs::read_to_string(path).map_err(|source| DumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match self.format {
            OutputFormat::Tokens => output::write_tokens(writer, path, &lex(&text)),
            OutputFormat::Json => {
                let document = self.parse(path, &text)?;
                output::write_json(writer, path, &document)
            }
            OutputFormat::Steps => {
                let document = self.parse(path, &text)?;
                let keywords = self.table().language(&document.language).ok_or_else(|| {
                    DumpError::Parse {
                        path: path.to_path_buf(),
                        source: ParseError::UnknownLanguage {
                            language: document.language.clone(),
                        },
                    }
                })?;
                output::write_steps(writer, path, &document, keywords)
            }
        }
    }

    fn parse(&self, path: &Path, text: &str) -> Result<Document, DumpError> {
        let document =
            parse_document_with(text, self.table(), &self.language).map_err(|source| {
                DumpError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        tracing::debug!(
            path = %path.display(),
            language = %document.language,
            scenarios = document.feature.scenarios.len(),
            "parsed feature"
        );
        Ok(document)
    }
}
