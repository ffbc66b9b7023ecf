//! Document model produced by the [`Parser`](crate::Parser).
//!
//! Nodes are plain values with structural equality. The parser builds them
//! bottom-up and hands the finished tree to the caller; nothing in this crate
//! mutates a node afterwards.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A run of free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Text {
    /// The text, with joined lines separated by single spaces.
    pub text: String,
}

impl Text {
    /// Wrap `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A `# key: value` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Metadata {
    /// Directive name, e.g. `language`.
    pub key: String,
    /// Directive value, e.g. `pt-br`.
    pub value: String,
}

impl Metadata {
    /// Build a directive.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Rows of table cells. Row lengths are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Table {
    /// Rows in source order.
    pub fields: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from anything row-like.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_gherkin::Table;
    /// let table = Table::new([["a", "b"], ["c", "d"]]);
    /// assert_eq!(table.fields[1], ["c", "d"]);
    /// ```
    #[must_use]
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            fields: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// One step line with an optional attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Step {
    /// The whole step line, keyword included.
    pub title: Text,
    /// A data table following the step.
    pub table: Option<Table>,
    /// A triple-quoted block following the step.
    pub text: Option<Text>,
}

impl Step {
    /// A step without attachments.
    #[must_use]
    pub fn new(title: impl Into<Text>) -> Self {
        Self {
            title: title.into(),
            table: None,
            text: None,
        }
    }

    /// Attach a data table.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    /// Attach a quoted block.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<Text>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Steps shared by every scenario of a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Background {
    /// Title following the label.
    pub title: Text,
    /// Steps in source order.
    pub steps: Vec<Step>,
}

/// Substitution rows of a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Examples {
    /// Tags declared above the label.
    pub tags: Vec<String>,
    /// The rows, absent when the block has none.
    pub table: Option<Table>,
}

/// A test case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Scenario {
    /// Title following the label.
    pub title: Text,
    /// Tags declared above the label.
    pub tags: Vec<String>,
    /// Free text between the title and the first step.
    pub description: Option<Text>,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// Examples of an outline.
    pub examples: Option<Examples>,
}

impl Scenario {
    /// A scenario with only a title.
    #[must_use]
    pub fn new(title: impl Into<Text>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replace the steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }
}

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Feature {
    /// Title following the label.
    pub title: Text,
    /// Tags declared above the label.
    pub tags: Vec<String>,
    /// Free text between the title and the background or first scenario.
    pub description: Option<Text>,
    /// Shared steps, when declared.
    pub background: Option<Background>,
    /// Scenarios in source order.
    pub scenarios: Vec<Scenario>,
}
