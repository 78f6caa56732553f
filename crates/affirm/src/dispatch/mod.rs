//! Dispatcher: picks the one definition a call matches.
//!
//! One pass per call:
//! 1. strip a leading negation marker from the phrase argument,
//! 2. ask every definition of the applicable list to parse the call,
//! 3. disambiguate: a single exact match wins, two exact matches are a
//!    registry defect, otherwise the first fallback match in registry
//!    order wins,
//! 4. execute the winner and apply negation.

mod executor;

use std::future::Future;
use std::panic::Location;
use std::sync::Arc;

use affirm_value::Value;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::errors::Attempt;
use crate::suggest::suggest_phrase;
use crate::{
    default_registry, AmbiguousMatchError, AssertError, AssertResult, Definition, NoMatchError,
    ParseOutcome, ParsedValues, Registry,
};

/// Prefix that inverts a check: `"not to equal"`.
pub const NEGATION_MARKER: &str = "not ";

/// Position of the phrase-bearing argument.
const PHRASE_INDEX: usize = 1;

/// A call after negation detection.
struct Call {
    args: Vec<Value>,
    negated: bool,
}

impl Call {
    fn new(mut args: Vec<Value>) -> Self {
        let stripped = args
            .get(PHRASE_INDEX)
            .and_then(Value::as_str)
            .and_then(|phrase| phrase.strip_prefix(NEGATION_MARKER))
            .map(Value::string);
        let negated = stripped.is_some();
        if let Some(phrase) = stripped {
            args[PHRASE_INDEX] = phrase;
        }
        Call { args, negated }
    }

    fn phrase(&self) -> Option<&str> {
        self.args.get(PHRASE_INDEX).and_then(Value::as_str)
    }
}

/// A definition that accepted the call.
struct Candidate<'r> {
    definition: &'r Arc<Definition>,
    parsed: ParsedValues,
}

/// Pick the winner among parse outcomes, in registry order.
fn resolve<'r>(
    call: &Call,
    definitions: &'r [Arc<Definition>],
    outcomes: Vec<ParseOutcome>,
) -> Result<Candidate<'r>, AssertError> {
    let mut candidates: SmallVec<[Candidate<'r>; 4]> = SmallVec::new();
    let mut attempts = Vec::new();

    for (definition, outcome) in definitions.iter().zip(outcomes) {
        match outcome {
            ParseOutcome::Match(parsed) => candidates.push(Candidate { definition, parsed }),
            ParseOutcome::Mismatch(reason) => {
                trace!(definition = definition.name(), %reason, "no match");
                attempts.push(Attempt {
                    definition: definition.name().to_string(),
                    reason,
                });
            }
        }
    }

    let exact = candidates.iter().filter(|c| c.parsed.exact_match).count();
    debug!(
        definitions = definitions.len(),
        candidates = candidates.len(),
        exact,
        negated = call.negated,
        "resolving assertion"
    );

    match exact {
        0 => {
            if candidates.is_empty() {
                return Err(no_match(call, definitions, attempts));
            }
            Ok(candidates.swap_remove(0))
        }
        1 => {
            let index = candidates
                .iter()
                .position(|c| c.parsed.exact_match)
                .unwrap_or_default();
            Ok(candidates.swap_remove(index))
        }
        _ => {
            let mut exact = candidates.iter().filter(|c| c.parsed.exact_match);
            let first = exact.next().map(|c| c.definition.name()).unwrap_or_default();
            let second = exact.next().map(|c| c.definition.name()).unwrap_or_default();
            Err(AssertError::Ambiguous(AmbiguousMatchError::new(first, second)))
        }
    }
}

#[cold]
fn no_match(call: &Call, definitions: &[Arc<Definition>], attempts: Vec<Attempt>) -> AssertError {
    let phrase = call.phrase().map(str::to_string);
    let suggestion = phrase.as_deref().and_then(|phrase| {
        suggest_phrase(phrase, definitions.iter().flat_map(|d| d.phrases())).map(str::to_string)
    });
    AssertError::NoMatch(
        NoMatchError::new(phrase, call.args.len(), attempts).with_suggestion(suggestion),
    )
}

impl Registry {
    /// Check a call against the synchronous definitions.
    ///
    /// # Errors
    ///
    /// `AssertError::Failure` when the check does not hold; no-match,
    /// ambiguity and negation errors as described on `AssertError`.
    #[track_caller]
    pub fn expect(&self, args: &[Value]) -> AssertResult {
        let location = Location::caller();
        self.dispatch(args.to_vec()).map_err(|e| e.at(location))
    }

    /// Check a call against the asynchronous definitions.
    ///
    /// The caller location is captured when this is called, not when the
    /// returned future is first polled.
    #[track_caller]
    pub fn expect_async(&self, args: Vec<Value>) -> impl Future<Output = AssertResult> + Send + '_ {
        let location = Location::caller();
        async move { self.dispatch_async(args).await.map_err(|e| e.at(location)) }
    }

    fn dispatch(&self, args: Vec<Value>) -> AssertResult {
        let call = Call::new(args);
        let definitions = self.sync_definitions();
        let outcomes = definitions
            .iter()
            .map(|d| d.parse_values(&call.args))
            .collect();
        let winner = resolve(&call, definitions, outcomes)?;
        debug!(winner = winner.definition.name(), "executing");
        let result = winner.definition.execute_in(&winner.parsed, self);
        executor::apply_negation(winner.definition, call.negated, result)
    }

    async fn dispatch_async(&self, args: Vec<Value>) -> AssertResult {
        let call = Call::new(args);
        let definitions = self.async_definitions();
        let mut outcomes = Vec::with_capacity(definitions.len());
        for definition in definitions {
            outcomes.push(definition.parse_values_async(&call.args).await);
        }
        let winner = resolve(&call, definitions, outcomes)?;
        debug!(winner = winner.definition.name(), "executing");
        let result = winner.definition.execute_async_in(winner.parsed, self).await;
        executor::apply_negation(winner.definition, call.negated, result)
    }
}

/// Check a call against the built-in synchronous vocabulary.
///
/// # Errors
///
/// As `Registry::expect`.
#[track_caller]
pub fn expect(args: &[Value]) -> AssertResult {
    default_registry().expect(args)
}

/// Check a call against the built-in asynchronous vocabulary.
#[track_caller]
pub fn expect_async(args: Vec<Value>) -> impl Future<Output = AssertResult> + Send + 'static {
    default_registry().expect_async(args)
}

#[cfg(test)]
mod tests;
