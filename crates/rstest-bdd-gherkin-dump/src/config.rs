//! Tool configuration parsed from environment variables and flags.
//!
//! `RSTEST_BDD_GHERKIN_LOG_LEVEL` sets the log level. The default document
//! language comes from the parser's own configuration
//! (`RSTEST_BDD_GHERKIN_LANGUAGE`) unless `--language` overrides it.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::DumpError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "RSTEST_BDD_GHERKIN_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so dumps stay quiet unless something goes wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including lexer state transitions.
    Trace,
    /// Parser entry, exit and language selection.
    Debug,
    /// One line per processed file.
    Info,
    /// Problems that do not stop the run.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(DumpError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// What to print for each feature file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The parsed document as pretty-printed JSON.
    #[default]
    Json,
    /// The raw lexer output, one token per line.
    Tokens,
    /// Every step with its resolved keyword.
    Steps,
}

impl FromStr for OutputFormat {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "tokens" => Ok(Self::Tokens),
            "steps" => Ok(Self::Steps),
            _ => Err(DumpError::InvalidConfig(format!(
                "unknown format '{s}', expected one of: json, tokens, steps"
            ))),
        }
    }
}

/// Configuration for one run of the tool.
#[derive(Debug, Clone, Default)]
pub struct DumpConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Language for files without a `# language:` directive.
    pub language: Option<String>,
    /// JSON keyword table replacing the built-in one.
    pub keywords: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
}

impl DumpConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `DumpError::InvalidConfig` if `RSTEST_BDD_GHERKIN_LOG_LEVEL`
    /// holds an unknown level.
    pub fn from_env() -> Result<Self, DumpError> {
        let log_level = match env::var(LOG_LEVEL_ENV) {
            Ok(val) => val.parse()?,
            Err(_) => LogLevel::default(),
        };
        Ok(Self {
            log_level,
            ..Self::default()
        })
    }

    /// Apply command-line overrides on top of environment defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        language: Option<String>,
        keywords: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if language.is_some() {
            self.language = language;
        }
        if keywords.is_some() {
            self.keywords = keywords;
        }
        self
    }

    /// Use `format` for output.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
