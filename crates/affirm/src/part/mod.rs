//! Author-facing definition parts.

use crate::Validator;

/// One element of an assertion definition.
#[derive(Clone, Debug)]
pub enum Part {
    /// An exact phrase token: `"to be greater than"`.
    Phrase(String),
    /// Interchangeable phrase tokens: `["to contain", "to include"]`.
    Choice(Vec<String>),
    /// A typed value at this position.
    Value(Validator),
}

impl Part {
    pub fn phrase(phrase: impl Into<String>) -> Self {
        Part::Phrase(phrase.into())
    }

    pub fn choice<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Part::Choice(phrases.into_iter().map(Into::into).collect())
    }

    pub fn value(validator: Validator) -> Self {
        Part::Value(validator)
    }

    /// Whether this part is a phrase or phrase choice.
    pub fn is_phrase(&self) -> bool {
        matches!(self, Part::Phrase(_) | Part::Choice(_))
    }
}

impl From<&str> for Part {
    fn from(phrase: &str) -> Self {
        Part::Phrase(phrase.to_string())
    }
}

impl From<String> for Part {
    fn from(phrase: String) -> Self {
        Part::Phrase(phrase)
    }
}

impl<const N: usize> From<[&str; N]> for Part {
    fn from(phrases: [&str; N]) -> Self {
        Part::choice(phrases)
    }
}

impl From<Validator> for Part {
    fn from(validator: Validator) -> Self {
        Part::Value(validator)
    }
}
