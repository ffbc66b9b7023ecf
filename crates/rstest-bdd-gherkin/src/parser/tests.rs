//! Grammar tests driven by hand-built and lexed token streams.

use rstest::rstest;

use super::{Parser, parse, parse_feature};
use crate::ast::{Background, Examples, Feature, Metadata, Scenario, Step, Table, Text};
use crate::errors::ParseError;
use crate::keywords::LanguageKeywords;
use crate::lexer::lex;
use crate::token::TokenKind::{
    self, Eof, Label, MetaLabel, MetaValue, Newline, Quotes, TableColumn, Tag, Text as TextToken,
};
use crate::token::Token;

fn tokens(entries: &[(usize, TokenKind, &str)]) -> Vec<Token> {
    entries
        .iter()
        .map(|(line, kind, text)| Token::new(*kind, *text).at_line(*line))
        .collect()
}

fn feature_of(input: &str) -> Result<Feature, ParseError> {
    parse(input, "en")
}

#[expect(clippy::expect_used, reason = "test helper with descriptive failures")]
fn parsed(input: &str) -> Feature {
    feature_of(input).expect("document should parse")
}

#[test]
fn metadata_is_absent_for_empty_input() {
    let stream = tokens(&[(1, Eof, "")]);
    assert_eq!(Parser::new(&stream).parse_metadata(), Ok(None));
}

#[test]
fn metadata_key_running_into_eof_is_absent() {
    let stream = tokens(&[(1, MetaLabel, "language"), (1, Eof, "")]);
    assert_eq!(Parser::new(&stream).parse_metadata(), Ok(None));
}

#[rstest]
#[case(Newline, "\n")]
#[case(TextToken, "pt-br")]
fn metadata_key_without_value_is_an_error(#[case] kind: TokenKind, #[case] text: &str) {
    let stream = tokens(&[(3, MetaLabel, "language"), (3, kind, text)]);
    assert_eq!(
        Parser::new(&stream).parse_metadata(),
        Err(ParseError::IncompleteMetadata {
            key: "language".into(),
            line: 3,
        })
    );
}

#[test]
fn metadata_reads_key_and_value() {
    let stream = tokens(&[(1, MetaLabel, "language"), (1, MetaValue, "pt-br")]);
    assert_eq!(
        Parser::new(&stream).parse_metadata(),
        Ok(Some(Metadata::new("language", "pt-br")))
    );
}

#[test]
fn metadata_directives_are_read_in_sequence() {
    let stream = lex("# language: pt-br\n# a note\n# encoding: utf-8\n\nFuncionalidade: x\n");
    let mut parser = Parser::new(&stream);
    assert_eq!(
        parser.parse_metadata(),
        Ok(Some(Metadata::new("language", "pt-br")))
    );
    assert_eq!(
        parser.parse_metadata(),
        Ok(Some(Metadata::new("encoding", "utf-8")))
    );
    assert_eq!(parser.parse_metadata(), Ok(None));
}

#[test]
fn empty_title_leaves_following_tokens() {
    let stream = tokens(&[(1, Newline, "\n"), (2, TextToken, "more text after title")]);
    let mut parser = Parser::new(&stream);
    assert_eq!(parser.parse_title(), Text::default());
    assert_eq!(parser.parse_tags(), Vec::<String>::new());
    assert_eq!(parser.parse_title(), Text::new("more text after title"));
}

#[test]
fn title_joins_text_on_the_label_line() {
    let stream = tokens(&[
        (1, TextToken, "Scenario"),
        (1, TextToken, "title"),
        (1, Newline, "\n"),
    ]);
    assert_eq!(Parser::new(&stream).parse_title(), Text::new("Scenario title"));
}

#[test]
fn table_collects_rows_until_a_label() {
    let stream = tokens(&[
        (1, TableColumn, "name"),
        (1, TableColumn, "email"),
        (1, Newline, "\n"),
        (2, TableColumn, "Lincoln"),
        (2, TableColumn, "lincoln@clarete.li"),
        (2, Newline, "\n"),
        (3, TableColumn, "Gabriel"),
        (3, TableColumn, "gabriel@nacaolivre.org"),
        (3, Newline, "\n"),
        (4, Label, "Scenario"),
        (4, Eof, ""),
    ]);
    let mut parser = Parser::new(&stream);
    assert_eq!(
        parser.parse_table(),
        Table::new([
            ["name", "email"],
            ["Lincoln", "lincoln@clarete.li"],
            ["Gabriel", "gabriel@nacaolivre.org"],
        ])
    );
    assert!(parser.next().is(Label));
}

#[rstest]
#[case("| a | b |\n| c | d |\n")]
#[case("| a | b |\n\n| c | d |")]
#[case("| a | b |\n| c | d |")]
#[case("| a | b |\r\n| c | d |\r\n")]
fn table_rows_survive_lexing(#[case] input: &str) {
    let stream = lex(input);
    assert_eq!(
        Parser::new(&stream).parse_table(),
        Table::new([["a", "b"], ["c", "d"]])
    );
}

#[test]
fn crlf_document_parses_like_lf() {
    let lf = "\
Feature: F
  Scenario: S
    Given rows:
      | a | b |
      | c | d |
    Then done

    Examples:
      | x |
      | 1 |
";
    let expected = Feature {
        title: Text::new("F"),
        scenarios: vec![Scenario {
            title: Text::new("S"),
            steps: vec![
                Step::new("Given rows").with_table(Table::new([["a", "b"], ["c", "d"]])),
                Step::new("Then done"),
            ],
            examples: Some(Examples {
                tags: Vec::new(),
                table: Some(Table::new([["x"], ["1"]])),
            }),
            ..Scenario::default()
        }],
        ..Feature::default()
    };
    assert_eq!(parsed(lf), expected);
    assert_eq!(parsed(&lf.replace('\n', "\r\n")), expected);
}

#[test]
fn ragged_tables_are_kept_as_is() {
    let stream = lex("| a |\n| b | c | d |\n");
    assert_eq!(
        Parser::new(&stream).parse_table(),
        Table {
            fields: vec![vec!["a".into()], vec!["b".into(), "c".into(), "d".into()]],
        }
    );
}

#[test]
fn background_steps_carry_tables() {
    let stream = tokens(&[
        (1, Label, "Background"),
        (1, TextToken, "title"),
        (1, Newline, "\n"),
        (2, Label, "Given two users in the database"),
        (2, Newline, "\n"),
        (3, TableColumn, "name"),
        (3, TableColumn, "email"),
        (3, Newline, "\n"),
        (4, TableColumn, "Lincoln"),
        (4, TableColumn, "lincoln@clarete.li"),
        (4, Newline, "\n"),
        (5, Label, "Scenario"),
    ]);
    let background = Parser::new(&stream).parse_background();
    assert_eq!(
        background,
        Ok(Some(Background {
            title: Text::new("title"),
            steps: vec![
                Step::new("Given two users in the database").with_table(Table::new([
                    ["name", "email"],
                    ["Lincoln", "lincoln@clarete.li"],
                ])),
            ],
        }))
    );
}

#[test]
fn background_is_absent_when_the_label_differs() {
    let stream = tokens(&[(1, Label, "Scenario"), (1, TextToken, "x")]);
    let mut parser = Parser::new(&stream);
    assert_eq!(parser.parse_background(), Ok(None));
    assert!(parser.next().is(Label));
}

#[test]
fn quoted_blocks_attach_to_steps() {
    let stream = tokens(&[
        (1, Label, "Given the following email template"),
        (1, Newline, "\n"),
        (2, Quotes, "'''"),
        (2, TextToken, "Here we go with a pretty\n   big block of text\n   "),
        (4, Quotes, "'''"),
        (4, Newline, "\n"),
        (5, TextToken, "And a cat picture"),
        (5, Newline, "\n"),
        (6, Quotes, "\"\"\""),
        (6, TextToken, "Now notice we didn't use (:) above\n   "),
        (7, Quotes, "\"\"\""),
        (7, Newline, "\n"),
        (8, Eof, ""),
    ]);
    assert_eq!(
        Parser::new(&stream).parse_steps(),
        Ok(vec![
            Step::new("Given the following email template")
                .with_text("Here we go with a pretty\n   big block of text\n   "),
            Step::new("And a cat picture").with_text("Now notice we didn't use (:) above\n   "),
        ])
    );
}

#[test]
fn empty_quoted_block_is_empty_text() {
    let stream = lex("Given nothing\n\"\"\"\"\"\"\n");
    assert_eq!(
        Parser::new(&stream).parse_steps(),
        Ok(vec![Step::new("Given nothing").with_text("")])
    );
}

#[test]
fn unterminated_quoted_block_names_the_step() {
    let result = feature_of("Feature: x\n  Scenario: y\n    Given a doc:\n    \"\"\"dangling\n");
    assert_eq!(
        result,
        Err(ParseError::MalformedQuotedText {
            step: "Given a doc".into(),
            line: 4,
        })
    );
}

#[test]
fn bare_label_ends_the_steps() {
    let stream = lex("Given one\nWhen something happens: later\n");
    let mut parser = Parser::new(&stream);
    assert_eq!(parser.parse_steps(), Ok(vec![Step::new("Given one")]));
    assert_eq!(parser.next().text, "When something happens");
}

#[test]
fn tags_skip_blank_lines() {
    let stream = tokens(&[
        (1, Tag, "tag1"),
        (1, Tag, "tag2"),
        (1, Newline, "\n"),
        (2, Tag, "tag3"),
        (2, Newline, "\n"),
        (3, Label, "Feature"),
    ]);
    assert_eq!(Parser::new(&stream).parse_tags(), ["tag1", "tag2", "tag3"]);
}

#[test]
fn literal_feature_document() {
    let input = "\
Feature: Feature title
  feature description
  Background: Some background
    about the problem
  Scenario: Scenario title
    Given first step
";
    assert_eq!(
        parsed(input),
        Feature {
            title: Text::new("Feature title"),
            description: Some(Text::new("feature description")),
            background: Some(Background {
                title: Text::new("Some background"),
                steps: vec![Step::new("about the problem")],
            }),
            scenarios: vec![
                Scenario::new("Scenario title").with_steps([Step::new("Given first step")]),
            ],
            ..Feature::default()
        }
    );
}

#[test]
fn feature_with_several_scenarios() {
    let stream = tokens(&[
        (1, Label, "Feature"),
        (1, TextToken, "Feature title"),
        (1, Newline, "\n"),
        (2, TextToken, "feature description"),
        (2, Newline, "\n"),
        (3, Label, "Background"),
        (3, TextToken, "Some background"),
        (3, Newline, "\n"),
        (4, TextToken, "Given the problem"),
        (4, Newline, "\n"),
        (5, Label, "Scenario"),
        (5, TextToken, "Scenario title"),
        (5, Newline, "\n"),
        (6, TextToken, "Given first step"),
        (6, Newline, "\n"),
        (7, Label, "Scenario"),
        (7, TextToken, "Another scenario"),
        (7, Newline, "\n"),
        (8, TextToken, "Given this step"),
        (8, Newline, "\n"),
        (9, TextToken, "When we take another step"),
        (9, Newline, "\n"),
        (10, Eof, ""),
    ]);
    let Ok(feature) = Parser::new(&stream).parse_feature() else {
        panic!("feature should parse");
    };
    assert_eq!(
        feature.scenarios,
        [
            Scenario::new("Scenario title").with_steps([Step::new("Given first step")]),
            Scenario::new("Another scenario").with_steps([
                Step::new("Given this step"),
                Step::new("When we take another step"),
            ]),
        ]
    );
    assert_eq!(
        feature.background.map(|background| background.steps),
        Some(vec![Step::new("Given the problem")])
    );
}

#[test]
fn multi_line_feature_description_is_joined() {
    let feature = parsed(
        "\n\nFeature: Some descriptive text\n  In order to parse a Gherkin file\n  As a parser\n\n  Even more text\n\n  Scenario: The user wants to describe a feature\n",
    );
    assert_eq!(
        feature.description,
        Some(Text::new(
            "In order to parse a Gherkin file As a parser Even more text"
        ))
    );
    assert_eq!(feature.scenarios.len(), 1);
}

#[test]
fn scenario_description_stops_at_the_first_step() {
    let feature = parsed(
        "Feature: f\n  Scenario: Scenario title\n    Scenario description More\n    description\n    Given first step\n",
    );
    let [scenario] = feature.scenarios.as_slice() else {
        panic!("expected one scenario");
    };
    assert_eq!(
        scenario.description,
        Some(Text::new("Scenario description More description"))
    );
    assert_eq!(scenario.steps, [Step::new("Given first step")]);
}

#[test]
fn scenario_outline_with_examples() {
    let feature = parsed(
        "\
Feature: gherkin has steps with examples
  Scenario Outline: Add two numbers
    Given I have <input_1> and <input_2> the calculator
    When I press \"Sum\"!
    Then the result should be <output> on the screen
  Examples:
    | input_1 | input_2 | output |
    | 20      | 30      | 50     |
    | 0       | 40      | 40     |
",
    );
    let [scenario] = feature.scenarios.as_slice() else {
        panic!("expected one scenario");
    };
    assert_eq!(scenario.title, Text::new("Add two numbers"));
    assert_eq!(scenario.steps.len(), 3);
    assert_eq!(
        scenario.examples,
        Some(Examples {
            tags: Vec::new(),
            table: Some(Table::new([
                ["input_1", "input_2", "output"],
                ["20", "30", "50"],
                ["0", "40", "40"],
            ])),
        })
    );
}

#[test]
fn examples_without_rows_have_no_table() {
    let feature = parsed("Feature: f\n  Scenario Outline: o\n    Given <x>\n  Examples:\n");
    let examples = feature
        .scenarios
        .first()
        .and_then(|scenario| scenario.examples.clone());
    assert_eq!(examples, Some(Examples::default()));
}

#[test]
fn tags_on_feature_scenario_and_examples() {
    let stream = tokens(&[
        (1, Tag, "tagged-feature"),
        (1, Newline, "\n"),
        (2, Label, "Feature"),
        (2, TextToken, "Parse tags"),
        (2, Newline, "\n"),
        (3, Tag, "tag1"),
        (3, Tag, "tag2"),
        (3, Newline, "\n"),
        (4, Label, "Scenario Outline"),
        (4, TextToken, "Test"),
        (4, Newline, "\n"),
        (5, Tag, "example-tag1"),
        (5, Newline, "\n"),
        (6, Tag, "example-tag2"),
        (6, Newline, "\n"),
        (7, Label, "Examples"),
        (7, Newline, "\n"),
        (8, TableColumn, "Header"),
        (8, Newline, "\n"),
        (9, Eof, ""),
    ]);
    let feature = Parser::new(&stream).parse_feature();
    assert_eq!(
        feature,
        Ok(Feature {
            title: Text::new("Parse tags"),
            tags: vec!["tagged-feature".into()],
            scenarios: vec![Scenario {
                title: Text::new("Test"),
                tags: vec!["tag1".into(), "tag2".into()],
                examples: Some(Examples {
                    tags: vec!["example-tag1".into(), "example-tag2".into()],
                    table: Some(Table::new([["Header"]])),
                }),
                ..Scenario::default()
            }],
            ..Feature::default()
        })
    );
}

#[test]
fn tags_without_examples_belong_to_the_next_scenario() {
    let feature = parsed(
        "Feature: f\n  Scenario: one\n    Given a\n\n  @slow\n  Scenario: two\n    Given b\n",
    );
    let tags: Vec<_> = feature
        .scenarios
        .iter()
        .map(|scenario| (scenario.title.as_str(), scenario.tags.clone()))
        .collect();
    assert_eq!(
        tags,
        [("one", Vec::new()), ("two", vec!["slow".to_string()])]
    );
    assert!(feature.scenarios.iter().all(|s| s.examples.is_none()));
}

#[test]
fn feature_description_stops_at_a_step_line() {
    let result = feature_of("Feature: f\n  some words\n  Given a stray step\n  Scenario: s\n");
    assert_eq!(
        result,
        Err(ParseError::UnexpectedLabel {
            label: "Given a stray step".into(),
            line: 3,
        })
    );
}

#[test]
fn feature_description_keeps_words_that_only_resemble_keywords() {
    let feature = parsed("Feature: f\n  Givenness matters\n  Scenario: s\n    Given a\n");
    assert_eq!(feature.description, Some(Text::new("Givenness matters")));
    assert_eq!(feature.scenarios.len(), 1);
}

#[test]
fn comments_inside_the_body_are_ignored() {
    let feature = parsed(
        "# header comment\nFeature: f # trailing\n  # note: kept out\n  Scenario: s\n    # between steps\n    Given a\n",
    );
    assert_eq!(feature.title, Text::new("f"));
    assert_eq!(
        feature.scenarios,
        [Scenario::new("s").with_steps([Step::new("Given a")])]
    );
}

#[test]
fn feature_without_scenarios_is_accepted() {
    let feature = parsed("Feature: Empty\n  nothing to see\n");
    assert_eq!(feature.description, Some(Text::new("nothing to see")));
    assert!(feature.scenarios.is_empty());
}

#[test]
fn document_must_start_with_a_feature() {
    let result = feature_of(
        "\nScenario: Scenario title\n  Given first step\n   When second step\n   Then third step\n",
    );
    assert_eq!(
        result,
        Err(ParseError::MissingFeatureLabel {
            found: "Scenario".into(),
            line: 2,
        })
    );
}

#[test]
fn empty_document_reports_an_empty_label() {
    assert!(matches!(
        feature_of(""),
        Err(ParseError::MissingFeatureLabel { found, .. }) if found.is_empty()
    ));
}

#[test]
fn second_background_is_rejected() {
    let result = feature_of(
        "\
Feature: Feature title
  feature description
  Background: Some background
    about the problem
  Background: Some other background
    will raise an exception
  Scenario: Scenario title
    Given first step
",
    );
    assert_eq!(
        result,
        Err(ParseError::UnexpectedLabel {
            label: "Background".into(),
            line: 5,
        })
    );
}

#[test]
fn background_after_a_scenario_is_rejected() {
    let result = feature_of(
        "\
Feature: Feature title
  feature description
  Scenario: Scenario title
    Given first step
     When second step
  Background: Some background
    about the problem
",
    );
    assert_eq!(
        result,
        Err(ParseError::UnexpectedLabel {
            label: "Background".into(),
            line: 6,
        })
    );
}

#[test]
fn custom_keywords_drive_label_matching() {
    let Ok(keywords) = LanguageKeywords::from_patterns(
        "pt-br",
        [
            ("feature", "Funcionalidade"),
            ("background", "Contexto"),
            ("scenario", "Cen[aá]rio"),
            ("examples", "Exemplos"),
        ],
    ) else {
        panic!("patterns should compile");
    };
    let stream = lex("Funcionalidade: X\n  Cenário: Lanche\n    Dada uma maçã\n");
    let feature = Parser::with_keywords(&stream, &keywords).parse_feature();
    assert_eq!(
        feature.map(|feature| feature.scenarios),
        Ok(vec![Scenario::new("Lanche").with_steps([Step::new("Dada uma maçã")])])
    );
    assert!(matches!(
        parse_feature(&stream, "en"),
        Err(ParseError::MissingFeatureLabel { found, .. }) if found == "Funcionalidade"
    ));
}

#[test]
fn unknown_language_is_rejected_up_front() {
    let stream = lex("Feature: x\n");
    assert_eq!(
        parse_feature(&stream, "tlh").map(|_| ()),
        Err(ParseError::UnknownLanguage {
            language: "tlh".into()
        })
    );
}

#[test]
fn hand_built_streams_without_eof_terminate() {
    let stream = tokens(&[(1, Label, "Feature"), (1, TextToken, "no end")]);
    let feature = Parser::new(&stream).parse_feature();
    assert_eq!(feature.map(|feature| feature.title), Ok(Text::new("no end")));
}
