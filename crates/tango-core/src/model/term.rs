use serde::{Deserialize, Serialize};

/// One decoded term-bank row
///
/// Tag strings and the numeric hints are carried verbatim; lookup never
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Headword, e.g. a kanji spelling
    pub expression: String,

    /// Phonetic reading
    pub reading: String,

    pub definition_tags: String,

    /// Deinflection rule identifiers
    pub rules: String,

    /// Ranking hint from the source package
    pub score: i64,

    /// Definitions, in source order
    pub glossary: Vec<String>,

    pub sequence: i64,

    pub term_tags: String,
}

impl TermEntry {
    /// Build an entry in the reduced form: only expression, reading and glossary
    pub fn new(
        expression: impl Into<String>,
        reading: impl Into<String>,
        glossary: Vec<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            reading: reading.into(),
            glossary,
            ..Self::default()
        }
    }
}

/// A lookup hit: a stored term joined with its dictionary's title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    #[serde(flatten)]
    pub entry: TermEntry,

    /// Title of the owning dictionary
    pub dictionary: String,
}

impl Term {
    pub fn expression(&self) -> &str {
        &self.entry.expression
    }

    pub fn reading(&self) -> &str {
        &self.entry.reading
    }

    pub fn glossary(&self) -> &[String] {
        &self.entry.glossary
    }
}
