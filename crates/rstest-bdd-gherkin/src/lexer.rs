//! Character-level lexer turning a feature document into [`Token`]s.
//!
//! The lexer is a small state machine. Each state consumes characters through
//! a cursor made of `start` (beginning of the pending token), `position` (the
//! scan point) and `width` (byte length of the last consumed character, which
//! makes a single pushback exact for multi-byte input). States return the next
//! state, and [`Lexer::run`] drives them until the text state reaches the end
//! of input and emits the final [`TokenKind::Eof`].
//!
//! The lexer never fails: anything it does not recognise becomes
//! [`TokenKind::Text`].

use crate::token::{Token, TokenKind};

const BLANKS: [char; 2] = [' ', '\t'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Field,
    Comment,
    MetadataValue,
    Quotes(char),
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trim {
    Yes,
    No,
}

/// Single-use lexer over one input buffer.
///
/// # Examples
/// ```
/// use rstest_bdd_gherkin::{Lexer, TokenKind};
/// let tokens = Lexer::new("Feature: Eating").run();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [TokenKind::Label, TokenKind::Text, TokenKind::Eof]);
/// ```
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    start: usize,
    position: usize,
    width: usize,
    line: usize,
    start_line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            position: 0,
            width: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
        }
    }

    /// Lex the whole buffer and return the token sequence.
    ///
    /// The sequence always ends with exactly one [`TokenKind::Eof`] token
    /// whose text is empty.
    #[must_use]
    pub fn run(mut self) -> Vec<Token> {
        let mut state = Some(State::Text);
        while let Some(current) = state {
            state = self.step(current);
            log::trace!("lexer {current:?} -> {state:?} at byte {}", self.position);
        }
        self.tokens
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Text => self.lex_text(),
            State::Field => Some(self.lex_field()),
            State::Comment => Some(self.lex_comment()),
            State::MetadataValue => Some(self.lex_metadata_value()),
            State::Quotes(quote) => Some(self.lex_quotes(quote)),
            State::Tag => Some(self.lex_tag()),
        }
    }

    // Cursor primitives.

    fn advance(&mut self) -> Option<char> {
        let Some(ch) = self.input.get(self.position..).and_then(|rest| rest.chars().next()) else {
            self.width = 0;
            return None;
        };
        self.width = ch.len_utf8();
        self.position += self.width;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn pushback(&mut self) {
        if self.width == 0 {
            return;
        }
        self.position -= self.width;
        self.width = 0;
        if self
            .input
            .get(self.position..)
            .is_some_and(|rest| rest.starts_with('\n'))
        {
            self.line -= 1;
        }
    }

    fn accept(&mut self, valid: &[char]) -> bool {
        match self.advance() {
            Some(ch) if valid.contains(&ch) => true,
            Some(_) => {
                self.pushback();
                false
            }
            None => false,
        }
    }

    fn ignore(&mut self) {
        self.start = self.position;
        self.start_line = self.line;
    }

    fn emit(&mut self, kind: TokenKind, trim: Trim) {
        let raw = self.input.get(self.start..self.position).unwrap_or_default();
        let text = match trim {
            Trim::Yes => raw.trim(),
            Trim::No => raw,
        };
        self.tokens.push(Token::new(kind, text).at_line(self.start_line));
        self.ignore();
    }

    /// Emit the pending run unless it is empty, or blank when trimmed.
    ///
    /// A blank run (e.g. the `\r` of a CRLF ending) is discarded.
    fn emit_if_nonempty(&mut self, kind: TokenKind, trim: Trim) {
        let raw = self.input.get(self.start..self.position).unwrap_or_default();
        let blank = match trim {
            Trim::Yes => raw.trim().is_empty(),
            Trim::No => raw.is_empty(),
        };
        if blank {
            self.ignore();
        } else {
            self.emit(kind, trim);
        }
    }

    fn eat_blanks(&mut self) {
        while self.accept(&BLANKS) {
            self.ignore();
        }
    }

    /// Whether the two characters after the cursor repeat `quote`.
    fn at_quote_pair(&self, quote: char) -> bool {
        let mut rest = self.input.get(self.position..).unwrap_or_default().chars();
        rest.next() == Some(quote) && rest.next() == Some(quote)
    }

    fn consume_delimiter(&mut self) {
        for _ in 0..3 {
            self.advance();
        }
        self.emit(TokenKind::Quotes, Trim::No);
    }

    // States.

    fn lex_text(&mut self) -> Option<State> {
        self.eat_blanks();
        while let Some(ch) = self.advance() {
            match ch {
                ':' => {
                    self.pushback();
                    self.emit_if_nonempty(TokenKind::Label, Trim::Yes);
                    self.advance();
                    self.ignore();
                    return Some(State::Text);
                }
                '#' => {
                    self.pushback();
                    self.emit_if_nonempty(TokenKind::Text, Trim::Yes);
                    self.advance();
                    self.ignore();
                    return Some(State::Comment);
                }
                '|' => {
                    self.ignore();
                    return Some(State::Field);
                }
                '@' => {
                    self.ignore();
                    return Some(State::Tag);
                }
                '\n' => {
                    self.pushback();
                    self.emit_if_nonempty(TokenKind::Text, Trim::Yes);
                    self.advance();
                    self.emit(TokenKind::Newline, Trim::No);
                    return Some(State::Text);
                }
                '"' | '\'' if self.at_quote_pair(ch) => {
                    self.pushback();
                    self.emit_if_nonempty(TokenKind::Text, Trim::Yes);
                    self.consume_delimiter();
                    return Some(State::Quotes(ch));
                }
                _ => {}
            }
        }
        self.emit_if_nonempty(TokenKind::Text, Trim::Yes);
        self.emit(TokenKind::Eof, Trim::No);
        None
    }

    fn lex_field(&mut self) -> State {
        self.eat_blanks();
        while let Some(ch) = self.advance() {
            match ch {
                '\n' => {
                    self.pushback();
                    return State::Text;
                }
                '|' => {
                    self.pushback();
                    self.emit(TokenKind::TableColumn, Trim::Yes);
                    return State::Text;
                }
                _ => {}
            }
        }
        State::Text
    }

    fn lex_comment(&mut self) -> State {
        self.eat_blanks();
        while let Some(ch) = self.advance() {
            match ch {
                '\n' => {
                    self.pushback();
                    break;
                }
                ':' => {
                    self.pushback();
                    self.emit(TokenKind::MetaLabel, Trim::Yes);
                    self.advance();
                    self.ignore();
                    return State::MetadataValue;
                }
                _ => {}
            }
        }
        self.emit_if_nonempty(TokenKind::Comment, Trim::Yes);
        State::Text
    }

    fn lex_metadata_value(&mut self) -> State {
        self.eat_blanks();
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                self.pushback();
                break;
            }
        }
        self.emit_if_nonempty(TokenKind::MetaValue, Trim::Yes);
        State::Text
    }

    fn lex_quotes(&mut self, quote: char) -> State {
        while let Some(ch) = self.advance() {
            if ch == quote && self.at_quote_pair(quote) {
                self.pushback();
                self.emit_if_nonempty(TokenKind::Text, Trim::No);
                self.consume_delimiter();
                return State::Text;
            }
        }
        // Unterminated block: hand the body over and let the parser reject it.
        self.emit_if_nonempty(TokenKind::Text, Trim::No);
        State::Text
    }

    fn lex_tag(&mut self) -> State {
        while let Some(ch) = self.advance() {
            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                self.pushback();
                break;
            }
        }
        self.emit_if_nonempty(TokenKind::Tag, Trim::No);
        State::Text
    }
}

/// Lex `text` into its token sequence.
///
/// # Examples
/// ```
/// use rstest_bdd_gherkin::{lex, TokenKind};
/// let tokens = lex("@wip\n");
/// assert_eq!(tokens[0].kind, TokenKind::Tag);
/// assert_eq!(tokens[0].text, "wip");
/// ```
#[must_use]
pub fn lex(text: &str) -> Vec<Token> {
    Lexer::new(text).run()
}
