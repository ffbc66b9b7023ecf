//! Token types shared by the lexer and the parser.
//!
//! A token is a `(kind, text)` pair plus the 1-based line it starts on. Tokens
//! are produced once by the lexer and only ever read afterwards.

use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Always the last token the lexer emits; its text is empty.
    Eof,
    /// A single `\n`.
    Newline,
    /// Free-form text, or the body of a triple-quoted block.
    Text,
    /// A `# ...` comment without a `key: value` shape.
    Comment,
    /// The key of a `# key: value` directive.
    MetaLabel,
    /// The value of a `# key: value` directive.
    MetaValue,
    /// Text terminated by `:`, such as `Feature` or `Scenario Outline`.
    Label,
    /// One cell of a `| ... |` table row.
    TableColumn,
    /// An opening or closing `"""` / `'''` delimiter.
    Quotes,
    /// A `@name` tag, without the leading `@`.
    Tag,
}

impl TokenKind {
    /// Return the upper-case name used in diagnostics.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::TokenKind;
    /// assert_eq!(TokenKind::TableColumn.as_str(), "TABLE_COLUMN");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Newline => "NEWLINE",
            Self::Text => "TEXT",
            Self::Comment => "COMMENT",
            Self::MetaLabel => "META_LABEL",
            Self::MetaValue => "META_VALUE",
            Self::Label => "LABEL",
            Self::TableColumn => "TABLE_COLUMN",
            Self::Quotes => "QUOTES",
            Self::Tag => "TAG",
        }
    }

    /// Whether grammar productions skip this kind of token.
    ///
    /// Comments and `# key: value` directives carry no structure for the
    /// feature grammar; only [`Parser::parse_metadata`](crate::Parser::parse_metadata)
    /// reads them.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment | Self::MetaLabel | Self::MetaValue)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Raw (possibly trimmed) source text.
    pub text: String,
    /// 1-based line on which the token starts.
    pub line: usize,
}

impl Token {
    /// Create a token on line 1.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::{Token, TokenKind};
    /// let token = Token::new(TokenKind::Label, "Feature");
    /// assert_eq!(token.text, "Feature");
    /// assert_eq!(token.line, 1);
    /// ```
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            line: 1,
        }
    }

    /// Return the same token positioned on `line`.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Whether the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at line {}", self.kind, self.text, self.line)
    }
}
