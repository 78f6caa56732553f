//! Error taxonomy for definitions, dispatch and check outcomes.
//!
//! Only `AssertError::Failure` is an ordinary check outcome; it is the one
//! kind a negated check swallows. Every other kind is a usage or registry
//! defect and always reaches the caller.

use std::fmt;
use std::panic::Location;
use std::sync::OnceLock;

use affirm_diagnostic::{format_failure_with, AssertionFailure, ErrorCode, FailureReport};

use crate::settings;

/// Result of a dispatched check.
pub type AssertResult = Result<(), AssertError>;

type CallerLocation = &'static Location<'static>;

/// Malformed assertion definition, raised at registration time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("assertion definition has no parts")]
    EmptyParts,
    #[error("phrase at part {index} is empty")]
    EmptyPhrase { index: usize },
    #[error("phrase choice at part {index} has no options")]
    EmptyChoice { index: usize },
    #[error("phrase {phrase:?} at part {index} begins with the negation marker \"not \"")]
    NegatedPhrase { index: usize, phrase: String },
    #[error("conjunction {phrase:?} at part {index} must be followed by a value")]
    DanglingConjunction { index: usize, phrase: String },
    #[error(
        "validator implementations take a subject and phrases only, found a value at part {index}"
    )]
    SchemaWithArguments { index: usize },
}

impl DefinitionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DefinitionError::EmptyParts => ErrorCode::A1001,
            DefinitionError::EmptyPhrase { .. } => ErrorCode::A1002,
            DefinitionError::EmptyChoice { .. } => ErrorCode::A1003,
            DefinitionError::NegatedPhrase { .. } => ErrorCode::A1004,
            DefinitionError::DanglingConjunction { .. } => ErrorCode::A1005,
            DefinitionError::SchemaWithArguments { .. } => ErrorCode::A1006,
        }
    }
}

/// One definition tried during dispatch, with why it did not match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub definition: String,
    pub reason: String,
}

/// No registered definition accepted the call.
#[derive(Clone, Debug)]
pub struct NoMatchError {
    pub phrase: Option<String>,
    pub arity: usize,
    pub attempts: Vec<Attempt>,
    /// Closest registered phrase, when the phrase looks like a typo.
    pub suggestion: Option<String>,
    location: Option<CallerLocation>,
}

impl NoMatchError {
    pub fn new(phrase: Option<String>, arity: usize, attempts: Vec<Attempt>) -> Self {
        NoMatchError {
            phrase,
            arity,
            attempts,
            suggestion: None,
            location: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.phrase {
            Some(phrase) => write!(f, "no assertion matched {phrase:?}")?,
            None => write!(f, "no assertion matched")?,
        }
        write!(f, " with {} argument(s)", self.arity)?;
        for attempt in &self.attempts {
            write!(f, "\n  {}: {}", attempt.definition, attempt.reason)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\ndid you mean {suggestion:?}?")?;
        }
        Ok(())
    }
}

impl std::error::Error for NoMatchError {}

/// Two or more definitions matched the call exactly.
#[derive(Clone, Debug, thiserror::Error)]
#[error("ambiguous assertion: {first} and {second} both match exactly")]
pub struct AmbiguousMatchError {
    pub first: String,
    pub second: String,
    location: Option<CallerLocation>,
}

impl AmbiguousMatchError {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        AmbiguousMatchError {
            first: first.into(),
            second: second.into(),
            location: None,
        }
    }
}

/// A check failed.
#[derive(Debug)]
pub struct FailureError {
    pub failure: AssertionFailure,
    /// Name of the definition that produced the failure.
    pub definition: String,
    /// Rendered on first use.
    diff: OnceLock<Option<String>>,
    location: Option<CallerLocation>,
}

impl FailureError {
    pub fn new(definition: impl Into<String>, failure: AssertionFailure) -> Self {
        FailureError {
            failure,
            definition: definition.into(),
            diff: OnceLock::new(),
            location: None,
        }
    }

    pub fn message(&self) -> &str {
        self.failure.message.as_deref().unwrap_or("Assertion failed")
    }

    /// The diff rendered with the process settings, if there is anything
    /// to show.
    pub fn diff(&self) -> Option<&str> {
        self.diff
            .get_or_init(|| format_failure_with(&self.failure, &settings().diff_options()))
            .as_deref()
    }

    pub fn location(&self) -> Option<CallerLocation> {
        self.location
    }
}

impl fmt::Display for FailureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        for issue in &self.failure.issues {
            write!(f, "\n  - {issue}")?;
        }
        if let Some(diff) = self.diff() {
            write!(f, "\n\n{diff}")?;
        }
        if let Some(location) = self.location {
            write!(f, "\n    at {location}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FailureError {}

/// A negated check passed.
#[derive(Clone, Debug, thiserror::Error)]
#[error("Assertion {definition} passed, but was expected to fail")]
pub struct NegatedAssertionError {
    pub definition: String,
    location: Option<CallerLocation>,
}

impl NegatedAssertionError {
    pub fn new(definition: impl Into<String>) -> Self {
        NegatedAssertionError {
            definition: definition.into(),
            location: None,
        }
    }
}

/// A definition's implementation misbehaved (a bug in the definition, not
/// a failed check).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("assertion implementation error: {message}")]
pub struct InternalError {
    pub message: String,
}

impl InternalError {
    pub fn new(message: impl Into<String>) -> Self {
        InternalError {
            message: message.into(),
        }
    }
}

/// Every error a check can produce.
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    NoMatch(NoMatchError),
    #[error(transparent)]
    Ambiguous(AmbiguousMatchError),
    #[error(transparent)]
    Failure(Box<FailureError>),
    #[error(transparent)]
    Negated(NegatedAssertionError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AssertError {
    /// A failed check produced by `definition`.
    #[cold]
    pub fn failure(definition: impl Into<String>, failure: AssertionFailure) -> Self {
        AssertError::Failure(Box::new(FailureError::new(definition, failure)))
    }

    /// A bug in a definition's implementation.
    #[cold]
    pub fn internal(message: impl Into<String>) -> Self {
        AssertError::Internal(InternalError::new(message))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssertError::Definition(e) => e.code(),
            AssertError::NoMatch(_) => ErrorCode::A2001,
            AssertError::Ambiguous(_) => ErrorCode::A2002,
            AssertError::Failure(_) => ErrorCode::A3001,
            AssertError::Negated(_) => ErrorCode::A3002,
            AssertError::Internal(_) => ErrorCode::A9001,
        }
    }

    /// Whether this is an ordinary failed check.
    pub fn is_failure(&self) -> bool {
        matches!(self, AssertError::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&FailureError> {
        match self {
            AssertError::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// The call site that issued the check, when recorded.
    pub fn location(&self) -> Option<CallerLocation> {
        match self {
            AssertError::NoMatch(e) => e.location,
            AssertError::Ambiguous(e) => e.location,
            AssertError::Failure(e) => e.location,
            AssertError::Negated(e) => e.location,
            AssertError::Definition(_) | AssertError::Internal(_) => None,
        }
    }

    /// Attribute the error to the caller of the dispatch entry point.
    ///
    /// Overwrites any location recorded by a nested check so that frames
    /// inside assertion implementations never appear as the origin.
    #[must_use]
    pub(crate) fn at(mut self, location: CallerLocation) -> Self {
        match &mut self {
            AssertError::NoMatch(e) => e.location = Some(location),
            AssertError::Ambiguous(e) => e.location = Some(location),
            AssertError::Failure(e) => e.location = Some(location),
            AssertError::Negated(e) => e.location = Some(location),
            AssertError::Definition(_) | AssertError::Internal(_) => {}
        }
        self
    }

    /// Stable serializable snapshot of this error.
    pub fn report(&self) -> FailureReport {
        let location = self.location().map(ToString::to_string);
        match self {
            AssertError::Failure(e) => {
                FailureReport::new(self.code(), e.message(), &e.failure, location)
            }
            _ => FailureReport::new(
                self.code(),
                self.to_string(),
                &AssertionFailure::new(),
                location,
            ),
        }
    }
}
