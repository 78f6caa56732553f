//! Slot compiler: author-facing parts to positional matchers.
//!
//! Every call's first argument is the subject, so a definition whose first
//! part is a phrase (or phrase choice) gets an implicit loose subject slot
//! prepended.

use std::fmt;

use crate::dispatch::NEGATION_MARKER;
use crate::{DefinitionError, Part, Validator};

/// Phrases that join two values and therefore need a value after them.
const CONJUNCTIONS: &[&str] = &["and", "or"];

/// The compiled matcher for one positional argument.
#[derive(Clone, Debug)]
pub enum Slot {
    /// Accepts exactly this phrase.
    Literal(String),
    /// Accepts any one of these phrases.
    Choice(Vec<String>),
    /// Accepts values the validator accepts; `loose` slots accept anything.
    Validator { validator: Validator, loose: bool },
}

impl Slot {
    fn validator(validator: Validator) -> Self {
        let loose = validator.is_loose();
        Slot::Validator { validator, loose }
    }

    /// Whether this slot matches a phrase token.
    pub fn is_phrase(&self) -> bool {
        matches!(self, Slot::Literal(_) | Slot::Choice(_))
    }

    /// Phrases accepted by this slot.
    pub fn phrases(&self) -> &[String] {
        match self {
            Slot::Literal(phrase) => std::slice::from_ref(phrase),
            Slot::Choice(options) => options,
            Slot::Validator { .. } => &[],
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Literal(phrase) => write!(f, "{phrase:?}"),
            Slot::Choice(options) => {
                let quoted: Vec<String> = options.iter().map(|o| format!("{o:?}")).collect();
                write!(f, "[{}]", quoted.join(" | "))
            }
            Slot::Validator { validator, .. } => write!(f, "{{{}}}", validator.describe()),
        }
    }
}

fn check_phrase(index: usize, phrase: &str) -> Result<(), DefinitionError> {
    if phrase.trim().is_empty() {
        return Err(DefinitionError::EmptyPhrase { index });
    }
    if phrase.starts_with(NEGATION_MARKER) {
        return Err(DefinitionError::NegatedPhrase {
            index,
            phrase: phrase.to_string(),
        });
    }
    Ok(())
}

/// Compile definition parts into slots.
///
/// # Errors
///
/// Returns a `DefinitionError` for an empty part list, an empty phrase or
/// choice, a phrase starting with the negation marker, or a conjunction
/// phrase not followed by a value part.
pub fn compile(parts: &[Part]) -> Result<Vec<Slot>, DefinitionError> {
    let Some(first) = parts.first() else {
        return Err(DefinitionError::EmptyParts);
    };

    let mut slots = Vec::with_capacity(parts.len() + 1);
    if first.is_phrase() {
        slots.push(Slot::validator(Validator::unknown()));
    }

    for (index, part) in parts.iter().enumerate() {
        match part {
            Part::Phrase(phrase) => {
                check_phrase(index, phrase)?;
                if CONJUNCTIONS.contains(&phrase.as_str())
                    && !matches!(parts.get(index + 1), Some(Part::Value(_)))
                {
                    return Err(DefinitionError::DanglingConjunction {
                        index,
                        phrase: phrase.clone(),
                    });
                }
                slots.push(Slot::Literal(phrase.clone()));
            }
            Part::Choice(options) => {
                if options.is_empty() {
                    return Err(DefinitionError::EmptyChoice { index });
                }
                for option in options {
                    check_phrase(index, option)?;
                }
                slots.push(Slot::Choice(options.clone()));
            }
            Part::Value(validator) => slots.push(Slot::validator(validator.clone())),
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod tests;
