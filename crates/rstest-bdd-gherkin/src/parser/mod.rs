//! Recursive-descent parser over the lexer's token stream.
//!
//! The parser walks a borrowed token slice with the same cursor discipline as
//! the lexer: `next` consumes, `backup` undoes the last `next`, and `peek` is
//! the two combined. Grammar productions read through `next`, which steps over
//! comments and stray `# key: value` directives; only
//! [`Parser::parse_metadata`] sees those raw.
//!
//! ```text
//! feature   := tags LABEL(feature) title description background? scenarios
//! title     := TEXT*
//! background:= LABEL(background) title steps
//! steps     := (step | NEWLINE)*
//! step      := (LABEL | TEXT) (table | quoted)?
//! scenarios := (tags LABEL(scenario) title description? steps examples?)*
//! examples  := tags LABEL(examples) table?
//! metadata  := META_LABEL META_VALUE
//! ```

use crate::ast::{Background, Examples, Feature, Metadata, Scenario, Step, Table, Text};
use crate::errors::ParseError;
use crate::keywords::{KeywordCategory, KeywordTable, LanguageKeywords};
use crate::lexer::lex;
use crate::token::{Token, TokenKind};

static END: Token = Token {
    kind: TokenKind::Eof,
    text: String::new(),
    line: 0,
};

/// Saved cursor position, restored with [`Parser::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mark(usize);

/// Grammar driver for one token sequence in one language.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    keywords: Option<&'a LanguageKeywords>,
    position: usize,
    width: usize,
}

impl<'a> Parser<'a> {
    /// Parse `tokens` with the built-in English keywords.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        let keywords = KeywordTable::builtin().language("en");
        if keywords.is_none() {
            log::warn!("built-in English keywords are unavailable; no label will match");
        }
        Self {
            tokens,
            keywords,
            position: 0,
            width: 0,
        }
    }

    /// Parse `tokens` with the built-in keywords of `language`.
    ///
    /// # Errors
    /// Returns [`ParseError::UnknownLanguage`] when the built-in table does
    /// not define `language`.
    pub fn with_language(tokens: &'a [Token], language: &str) -> Result<Self, ParseError> {
        let keywords = KeywordTable::builtin().language(language).ok_or_else(|| {
            ParseError::UnknownLanguage {
                language: language.to_string(),
            }
        })?;
        Ok(Self::with_keywords(tokens, keywords))
    }

    /// Parse `tokens` with an arbitrary keyword set.
    #[must_use]
    pub fn with_keywords(tokens: &'a [Token], keywords: &'a LanguageKeywords) -> Self {
        Self {
            tokens,
            keywords: Some(keywords),
            position: 0,
            width: 0,
        }
    }

    /// Switch languages mid-stream, e.g. after reading a `# language:`
    /// directive with [`Parser::parse_metadata`].
    pub fn set_keywords(&mut self, keywords: &'a LanguageKeywords) {
        log::debug!("parser switching to language `{}`", keywords.code());
        self.keywords = Some(keywords);
    }

    // Cursor.

    fn next_raw(&mut self) -> &'a Token {
        let tokens = self.tokens;
        match tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                self.width = 1;
                token
            }
            None => {
                self.width = 0;
                &END
            }
        }
    }

    /// Consume the next significant token, stepping over trivia.
    fn next(&mut self) -> &'a Token {
        let start = self.position;
        loop {
            let token = self.next_raw();
            if !token.kind.is_trivia() {
                self.width = self.position - start;
                return token;
            }
        }
    }

    fn backup(&mut self) {
        self.position -= self.width;
        self.width = 0;
    }

    fn peek(&mut self) -> &'a Token {
        let token = self.next();
        self.backup();
        token
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.next().is(kind) {
            true
        } else {
            self.backup();
            false
        }
    }

    fn eat_newlines(&mut self) {
        while self.accept(TokenKind::Newline) {}
    }

    fn mark(&self) -> Mark {
        Mark(self.position)
    }

    fn reset(&mut self, mark: Mark) {
        self.position = mark.0;
        self.width = 0;
    }

    fn is_label(&self, token: &Token, category: KeywordCategory) -> bool {
        token.is(TokenKind::Label)
            && self
                .keywords
                .is_some_and(|keywords| keywords.matches(category, &token.text))
    }

    fn has_step_keywords(&self) -> bool {
        self.keywords.is_some_and(LanguageKeywords::has_step_keywords)
    }

    fn starts_with_step_keyword(&self, token: &Token) -> bool {
        self.keywords
            .is_some_and(|keywords| keywords.step_keyword(&token.text).is_some())
    }

    // Productions.

    /// Read one `# key: value` directive.
    ///
    /// Leading blank lines and plain comments are skipped. Returns `None`
    /// when the next token does not open a directive, leaving it unread, or
    /// when the directive key runs into the end of input.
    ///
    /// # Errors
    /// Returns [`ParseError::IncompleteMetadata`] when the key is followed by
    /// anything other than a value.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::{lex, Metadata, Parser};
    /// let tokens = lex("# language: pt-br\n");
    /// let mut parser = Parser::new(&tokens);
    /// assert_eq!(
    ///     parser.parse_metadata().unwrap(),
    ///     Some(Metadata::new("language", "pt-br"))
    /// );
    /// ```
    pub fn parse_metadata(&mut self) -> Result<Option<Metadata>, ParseError> {
        let key = loop {
            let token = self.next_raw();
            match token.kind {
                TokenKind::Newline | TokenKind::Comment => {}
                TokenKind::MetaLabel => break token,
                _ => {
                    self.backup();
                    return Ok(None);
                }
            }
        };
        let value = self.next_raw();
        match value.kind {
            TokenKind::MetaValue => Ok(Some(Metadata::new(&key.text, &value.text))),
            TokenKind::Eof => Ok(None),
            _ => Err(ParseError::IncompleteMetadata {
                key: key.text.clone(),
                line: key.line,
            }),
        }
    }

    /// Parse a whole feature.
    ///
    /// # Errors
    /// Returns [`ParseError::MissingFeatureLabel`] when the first significant
    /// token is not the feature label, and any error raised by the nested
    /// productions.
    pub fn parse_feature(&mut self) -> Result<Feature, ParseError> {
        log::debug!(
            "parsing feature with `{}` keywords",
            self.keywords.map_or("<none>", LanguageKeywords::code)
        );
        let tags = self.parse_tags();
        let label = self.next();
        if !self.is_label(label, KeywordCategory::Feature) {
            return Err(ParseError::MissingFeatureLabel {
                found: label.text.clone(),
                line: label.line,
            });
        }
        let title = self.parse_title();
        let description = self.parse_description(self.has_step_keywords());
        let background = self.parse_background()?;
        let scenarios = self.parse_scenarios()?;
        log::debug!(
            "parsed feature `{}` with {} scenario(s)",
            title.text,
            scenarios.len()
        );
        Ok(Feature {
            title,
            tags,
            description,
            background,
            scenarios,
        })
    }

    /// Collect tags, skipping blank lines between them.
    pub fn parse_tags(&mut self) -> Vec<String> {
        let mut tags = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Tag => tags.push(token.text.clone()),
                TokenKind::Newline => {}
                _ => {
                    self.backup();
                    return tags;
                }
            }
        }
    }

    /// Join the `TEXT` tokens following a label; empty when there are none.
    pub fn parse_title(&mut self) -> Text {
        let mut words = Vec::new();
        loop {
            let token = self.next();
            if token.is(TokenKind::Text) {
                words.push(token.text.as_str());
            } else {
                self.backup();
                return Text::new(words.join(" "));
            }
        }
    }

    /// Join `TEXT` lines up to the next structural token.
    ///
    /// With `stop_at_steps`, a line that opens with a step keyword of the
    /// active language also ends the description.
    fn parse_description(&mut self, stop_at_steps: bool) -> Option<Text> {
        let mut lines = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Text if stop_at_steps && self.starts_with_step_keyword(token) => {
                    self.backup();
                    break;
                }
                TokenKind::Text => lines.push(token.text.as_str()),
                TokenKind::Newline => {}
                _ => {
                    self.backup();
                    break;
                }
            }
        }
        (!lines.is_empty()).then(|| Text::new(lines.join(" ")))
    }

    /// Parse the optional background block.
    ///
    /// # Errors
    /// Propagates step errors.
    pub fn parse_background(&mut self) -> Result<Option<Background>, ParseError> {
        let label = self.next();
        if !self.is_label(label, KeywordCategory::Background) {
            self.backup();
            return Ok(None);
        }
        let title = self.parse_title();
        let steps = self.parse_steps()?;
        Ok(Some(Background { title, steps }))
    }

    /// Parse steps up to the first token that cannot start one.
    ///
    /// A `TEXT` line is always a step. A `LABEL` (a step ending in `:`) is
    /// one only when a table or quoted block follows it.
    ///
    /// # Errors
    /// Returns [`ParseError::MalformedQuotedText`] for an unterminated block.
    pub fn parse_steps(&mut self) -> Result<Vec<Step>, ParseError> {
        let mut steps = Vec::new();
        loop {
            let mark = self.mark();
            let token = self.next();
            match token.kind {
                TokenKind::Newline => {}
                TokenKind::Text | TokenKind::Label
                    if !self.is_label(token, KeywordCategory::Examples) =>
                {
                    self.eat_newlines();
                    let step = Step::new(token.text.as_str());
                    match self.peek().kind {
                        TokenKind::TableColumn => steps.push(step.with_table(self.parse_table())),
                        TokenKind::Quotes => {
                            let text = self.parse_step_text(token)?;
                            steps.push(step.with_text(text));
                        }
                        _ if token.is(TokenKind::Text) => steps.push(step),
                        _ => {
                            self.reset(mark);
                            break;
                        }
                    }
                }
                _ => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(steps)
    }

    fn parse_step_text(&mut self, step: &Token) -> Result<Text, ParseError> {
        let open = self.next();
        let malformed = || ParseError::MalformedQuotedText {
            step: step.text.clone(),
            line: open.line,
        };
        let body = self.next();
        let text = match body.kind {
            TokenKind::Quotes => return Ok(Text::default()),
            TokenKind::Text => Text::new(body.text.as_str()),
            _ => return Err(malformed()),
        };
        if self.next().is(TokenKind::Quotes) {
            Ok(text)
        } else {
            Err(malformed())
        }
    }

    /// Parse table rows. Blank lines do not produce empty rows, and a last
    /// row cut short by the end of input is kept.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::{lex, Parser, Table};
    /// let tokens = lex("| a | b |\n| c | d |\n");
    /// let table = Parser::new(&tokens).parse_table();
    /// assert_eq!(table, Table::new([["a", "b"], ["c", "d"]]));
    /// ```
    pub fn parse_table(&mut self) -> Table {
        let mut fields = Vec::new();
        let mut row = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::TableColumn => row.push(token.text.clone()),
                TokenKind::Newline => {
                    if !row.is_empty() {
                        fields.push(std::mem::take(&mut row));
                    }
                }
                _ => {
                    self.backup();
                    break;
                }
            }
        }
        if !row.is_empty() {
            fields.push(row);
        }
        Table { fields }
    }

    /// Parse an optional examples block, tags included.
    ///
    /// When no examples label follows, the cursor is restored so any tags
    /// read here stay with the next scenario.
    pub fn parse_examples(&mut self) -> Option<Examples> {
        let mark = self.mark();
        self.eat_newlines();
        let tags = self.parse_tags();
        let label = self.next();
        if !self.is_label(label, KeywordCategory::Examples) {
            self.reset(mark);
            return None;
        }
        self.eat_newlines();
        let table = self
            .peek()
            .is(TokenKind::TableColumn)
            .then(|| self.parse_table());
        Some(Examples { tags, table })
    }

    /// Parse scenarios until the end of input.
    ///
    /// # Errors
    /// Returns [`ParseError::UnexpectedLabel`] for any token that does not
    /// open a scenario, which covers a second or misplaced background.
    pub fn parse_scenarios(&mut self) -> Result<Vec<Scenario>, ParseError> {
        let with_descriptions = self.has_step_keywords();
        let mut scenarios = Vec::new();
        loop {
            self.eat_newlines();
            let tags = self.parse_tags();
            let label = self.next();
            if label.is(TokenKind::Eof) {
                return Ok(scenarios);
            }
            if !self.is_label(label, KeywordCategory::Scenario) {
                return Err(ParseError::UnexpectedLabel {
                    label: label.text.clone(),
                    line: label.line,
                });
            }
            let title = self.parse_title();
            let description = if with_descriptions {
                self.parse_description(true)
            } else {
                None
            };
            let steps = self.parse_steps()?;
            let examples = self.parse_examples();
            scenarios.push(Scenario {
                title,
                tags,
                description,
                steps,
                examples,
            });
        }
    }
}

/// Parse a lexed document in one of the built-in languages.
///
/// # Errors
/// Returns [`ParseError::UnknownLanguage`] for a language the built-in table
/// lacks, and any grammar error otherwise.
pub fn parse_feature(tokens: &[Token], language: &str) -> Result<Feature, ParseError> {
    Parser::with_language(tokens, language)?.parse_feature()
}

/// Lex and parse `text` in one of the built-in languages.
///
/// # Errors
/// See [`parse_feature`].
///
/// # Examples
/// ```
/// use rstest_bdd_gherkin::parse;
/// let feature = parse("Feature: Eat\n  Scenario: Lunch\n    Given food\n", "en").unwrap();
/// assert_eq!(feature.scenarios[0].steps[0].title.as_str(), "Given food");
/// ```
pub fn parse(text: &str, language: &str) -> Result<Feature, ParseError> {
    parse_feature(&lex(text), language)
}

#[cfg(test)]
mod tests;
