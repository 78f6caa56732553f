//! Assertion definitions: compiled slots plus an implementation.
//!
//! Parsing never fails loudly. A definition that does not accept a call
//! returns `ParseOutcome::Mismatch` with a reason, which the dispatcher
//! collects for diagnostics.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use affirm_diagnostic::AssertionFailure;
use affirm_value::Value;
use futures::future::BoxFuture;
use smallvec::SmallVec;

use crate::validator::Validation;
use crate::{
    compile, default_registry, AssertError, AssertResult, DefinitionError, Part, Registry, Slot,
    Validator,
};

/// Synchronous predicate over the parsed values (phrase tokens excluded),
/// with the registry that dispatched the call.
pub type PredicateFn =
    Arc<dyn Fn(&[Value], &Registry) -> Result<Outcome, AssertError> + Send + Sync>;

/// Suspending predicate over the parsed values (phrase tokens excluded).
pub type AsyncPredicateFn =
    Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, Result<Outcome, AssertError>> + Send + Sync>;

/// How a definition checks the parsed values.
#[derive(Clone)]
pub enum Implementation {
    /// Validate the subject directly. Only for "subject + phrases" shapes.
    Schema(Validator),
    Predicate(PredicateFn),
    AsyncPredicate(AsyncPredicateFn),
}

/// What a predicate reports.
#[derive(Debug)]
pub enum Outcome {
    Pass,
    /// Failed with the generic message.
    Fail,
    Failure(AssertionFailure),
    /// Validate the subject with this validator.
    Validate(Validator),
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

impl From<()> for Outcome {
    fn from((): ()) -> Self {
        Outcome::Pass
    }
}

impl From<AssertionFailure> for Outcome {
    fn from(failure: AssertionFailure) -> Self {
        Outcome::Failure(failure)
    }
}

impl From<Validator> for Outcome {
    fn from(validator: Validator) -> Self {
        Outcome::Validate(validator)
    }
}

/// One parsed argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Parsed {
    /// A matched phrase token. Never passed to implementations.
    Phrase(String),
    Value(Value),
}

/// A successful parse.
#[derive(Clone, Debug)]
pub struct ParsedValues {
    pub parsed: SmallVec<[Parsed; 4]>,
    /// No loose slot consumed a value.
    pub exact_match: bool,
    /// Subject validation already performed for `Schema` implementations.
    pub cached_subject: Option<Validation>,
}

impl ParsedValues {
    /// Parsed values with phrase tokens removed.
    pub fn values(&self) -> Vec<Value> {
        self.parsed
            .iter()
            .filter_map(|p| match p {
                Parsed::Value(v) => Some(v.clone()),
                Parsed::Phrase(_) => None,
            })
            .collect()
    }

    pub fn subject(&self) -> Option<&Value> {
        subject_of(&self.parsed)
    }
}

fn subject_of(parsed: &[Parsed]) -> Option<&Value> {
    parsed.iter().find_map(|p| match p {
        Parsed::Value(v) => Some(v),
        Parsed::Phrase(_) => None,
    })
}

/// Result of asking one definition to parse a call.
#[derive(Debug)]
pub enum ParseOutcome {
    Mismatch(String),
    Match(ParsedValues),
}

impl ParseOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ParseOutcome::Match(_))
    }

    pub fn into_match(self) -> Option<ParsedValues> {
        match self {
            ParseOutcome::Match(parsed) => Some(parsed),
            ParseOutcome::Mismatch(_) => None,
        }
    }
}

/// What one slot needs to do with its argument.
enum Step<'a> {
    Token(Parsed),
    Accept(Value),
    Check(&'a Validator),
}

fn step<'a>(slot: &'a Slot, arg: &Value, index: usize) -> Result<Step<'a>, String> {
    match slot {
        Slot::Literal(phrase) => match arg.as_str() {
            Some(s) if s == phrase => Ok(Step::Token(Parsed::Phrase(phrase.clone()))),
            _ => Err(format!("argument {index}: expected {phrase:?}, received {arg}")),
        },
        Slot::Choice(options) => {
            match arg
                .as_str()
                .and_then(|s| options.iter().find(|o| o.as_str() == s))
            {
                Some(option) => Ok(Step::Token(Parsed::Phrase(option.clone()))),
                None => Err(format!("argument {index}: expected {slot}, received {arg}")),
            }
        }
        Slot::Validator { loose: true, .. } => Ok(Step::Accept(arg.clone())),
        Slot::Validator { validator, .. } => Ok(Step::Check(validator)),
    }
}

fn rejection(index: usize, issues: &[affirm_diagnostic::Issue]) -> String {
    let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
    format!("argument {index}: {}", details.join("; "))
}

/// A compiled, immutable assertion definition.
pub struct Definition {
    slots: Vec<Slot>,
    implementation: Implementation,
    name: String,
    is_async: bool,
}

impl Definition {
    /// Compile a definition.
    ///
    /// # Errors
    ///
    /// Malformed parts, or a `Schema` implementation on a definition that
    /// takes arguments besides the subject.
    pub fn new(parts: &[Part], implementation: Implementation) -> Result<Self, DefinitionError> {
        let slots = compile(parts)?;

        if matches!(implementation, Implementation::Schema(_)) {
            let skip = usize::from(parts.first().is_some_and(|p| !p.is_phrase()));
            if let Some(index) = parts
                .iter()
                .enumerate()
                .skip(skip)
                .find_map(|(i, p)| (!p.is_phrase()).then_some(i))
            {
                return Err(DefinitionError::SchemaWithArguments { index });
            }
        }

        let is_async = match &implementation {
            Implementation::AsyncPredicate(_) => true,
            Implementation::Schema(schema) => schema.is_async(),
            Implementation::Predicate(_) => false,
        } || slots
            .iter()
            .any(|s| matches!(s, Slot::Validator { validator, .. } if validator.is_async()));

        let name = slots
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Definition {
            slots,
            implementation,
            name,
            is_async,
        })
    }

    /// A definition that validates the subject with `schema`.
    pub fn schema(parts: &[Part], schema: Validator) -> Result<Self, DefinitionError> {
        Definition::new(parts, Implementation::Schema(schema))
    }

    /// A definition checked by a synchronous predicate.
    pub fn predicate<F, O>(parts: &[Part], predicate: F) -> Result<Self, DefinitionError>
    where
        F: Fn(&[Value]) -> Result<O, AssertError> + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        Definition::new(
            parts,
            Implementation::Predicate(Arc::new(
                move |values: &[Value], _: &Registry| -> Result<Outcome, AssertError> {
                    predicate(values).map(Into::into)
                },
            )),
        )
    }

    /// A synchronous predicate that runs nested checks against the
    /// registry the call was dispatched through.
    pub fn delegating_predicate<F, O>(parts: &[Part], predicate: F) -> Result<Self, DefinitionError>
    where
        F: Fn(&[Value], &Registry) -> Result<O, AssertError> + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        Definition::new(
            parts,
            Implementation::Predicate(Arc::new(
                move |values: &[Value], registry: &Registry| -> Result<Outcome, AssertError> {
                    predicate(values, registry).map(Into::into)
                },
            )),
        )
    }

    /// A definition checked by a suspending predicate.
    pub fn async_predicate<F, Fut, O>(parts: &[Part], predicate: F) -> Result<Self, DefinitionError>
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, AssertError>> + Send + 'static,
        O: Into<Outcome>,
    {
        Definition::new(
            parts,
            Implementation::AsyncPredicate(Arc::new(
                move |values: Vec<Value>| -> BoxFuture<'static, Result<Outcome, AssertError>> {
                    let fut = predicate(values);
                    Box::pin(async move { fut.await.map(Into::into) })
                },
            )),
        )
    }

    /// Rendering of the compiled slots: `{unknown} "to be greater than" {number}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// The phrase vocabulary of this definition.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .flat_map(Slot::phrases)
            .map(String::as_str)
    }

    fn check_arity(&self, args: &[Value]) -> Result<(), String> {
        if args.len() == self.slots.len() {
            Ok(())
        } else {
            Err(format!(
                "expected {} arguments, received {}",
                self.slots.len(),
                args.len()
            ))
        }
    }

    /// Try to parse a call without suspending.
    ///
    /// A strict slot whose validator is async cannot be checked here and
    /// counts as a mismatch.
    pub fn parse_values(&self, args: &[Value]) -> ParseOutcome {
        if let Err(reason) = self.check_arity(args) {
            return ParseOutcome::Mismatch(reason);
        }

        let mut parsed = SmallVec::new();
        let mut exact_match = true;
        for (index, (slot, arg)) in self.slots.iter().zip(args).enumerate() {
            match step(slot, arg, index) {
                Err(reason) => return ParseOutcome::Mismatch(reason),
                Ok(Step::Token(token)) => parsed.push(token),
                Ok(Step::Accept(value)) => {
                    exact_match = false;
                    parsed.push(Parsed::Value(value));
                }
                Ok(Step::Check(validator)) => {
                    if validator.is_async() {
                        return ParseOutcome::Mismatch(format!(
                            "argument {index}: {} requires asynchronous validation",
                            validator.describe()
                        ));
                    }
                    match validator.validate(arg) {
                        Ok(value) => parsed.push(Parsed::Value(value)),
                        Err(issues) => return ParseOutcome::Mismatch(rejection(index, &issues)),
                    }
                }
            }
        }

        let cached_subject = match &self.implementation {
            Implementation::Schema(schema) if !schema.is_async() => {
                subject_of(&parsed).map(|subject| schema.validate(subject))
            }
            _ => None,
        };

        ParseOutcome::Match(ParsedValues {
            parsed,
            exact_match,
            cached_subject,
        })
    }

    /// Try to parse a call, suspending on async validators.
    pub async fn parse_values_async(&self, args: &[Value]) -> ParseOutcome {
        if let Err(reason) = self.check_arity(args) {
            return ParseOutcome::Mismatch(reason);
        }

        let mut parsed = SmallVec::new();
        let mut exact_match = true;
        for (index, (slot, arg)) in self.slots.iter().zip(args).enumerate() {
            match step(slot, arg, index) {
                Err(reason) => return ParseOutcome::Mismatch(reason),
                Ok(Step::Token(token)) => parsed.push(token),
                Ok(Step::Accept(value)) => {
                    exact_match = false;
                    parsed.push(Parsed::Value(value));
                }
                Ok(Step::Check(validator)) => match validator.validate_async(arg.clone()).await {
                    Ok(value) => parsed.push(Parsed::Value(value)),
                    Err(issues) => return ParseOutcome::Mismatch(rejection(index, &issues)),
                },
            }
        }

        let cached_subject = match (&self.implementation, subject_of(&parsed).cloned()) {
            (Implementation::Schema(schema), Some(subject)) => {
                Some(schema.validate_async(subject).await)
            }
            _ => None,
        };

        ParseOutcome::Match(ParsedValues {
            parsed,
            exact_match,
            cached_subject,
        })
    }

    /// Run the implementation without suspending, with nested checks
    /// going to the built-in registry.
    ///
    /// # Errors
    ///
    /// `AssertError::Failure` when the check does not hold; any error the
    /// implementation raised otherwise.
    pub fn execute(&self, parsed: &ParsedValues) -> AssertResult {
        self.execute_in(parsed, default_registry())
    }

    /// Run the implementation without suspending; nested checks go to
    /// `registry`.
    ///
    /// # Errors
    ///
    /// As `execute`.
    pub fn execute_in(&self, parsed: &ParsedValues, registry: &Registry) -> AssertResult {
        match &self.implementation {
            Implementation::Schema(schema) => {
                let subject = parsed.subject().cloned().unwrap_or(Value::Void);
                let validation = match &parsed.cached_subject {
                    Some(validation) => validation.clone(),
                    None if schema.is_async() => return Err(self.requires_async()),
                    None => schema.validate(&subject),
                };
                self.check_validation(schema, subject, validation)
            }
            Implementation::Predicate(predicate) => {
                let values = parsed.values();
                match predicate(&values, registry)? {
                    Outcome::Validate(validator) if validator.is_async() => {
                        Err(self.requires_async())
                    }
                    Outcome::Validate(validator) => {
                        let subject = values.first().cloned().unwrap_or(Value::Void);
                        let validation = validator.validate(&subject);
                        self.check_validation(&validator, subject, validation)
                    }
                    outcome => self.interpret(outcome),
                }
            }
            Implementation::AsyncPredicate(_) => Err(self.requires_async()),
        }
    }

    /// Run the implementation, suspending where it needs to.
    ///
    /// # Errors
    ///
    /// As `execute`.
    pub async fn execute_async(&self, parsed: ParsedValues) -> AssertResult {
        self.execute_async_in(parsed, default_registry()).await
    }

    /// As `execute_async`, with nested checks going to `registry`.
    ///
    /// # Errors
    ///
    /// As `execute`.
    pub async fn execute_async_in(&self, parsed: ParsedValues, registry: &Registry) -> AssertResult {
        let values = parsed.values();
        let outcome = match &self.implementation {
            Implementation::Schema(schema) => {
                let subject = values.first().cloned().unwrap_or(Value::Void);
                let validation = match parsed.cached_subject {
                    Some(validation) => validation,
                    None => schema.validate_async(subject.clone()).await,
                };
                return self.check_validation(schema, subject, validation);
            }
            Implementation::Predicate(predicate) => predicate(&values, registry)?,
            Implementation::AsyncPredicate(predicate) => predicate(values.clone()).await?,
        };

        match outcome {
            Outcome::Validate(validator) => {
                let subject = values.first().cloned().unwrap_or(Value::Void);
                let validation = validator.validate_async(subject.clone()).await;
                self.check_validation(&validator, subject, validation)
            }
            outcome => self.interpret(outcome),
        }
    }

    /// Interpret a non-validator outcome.
    fn interpret(&self, outcome: Outcome) -> AssertResult {
        match outcome {
            Outcome::Pass => Ok(()),
            Outcome::Fail => Err(self.fail(AssertionFailure::new())),
            Outcome::Failure(failure) => Err(self.fail(failure)),
            Outcome::Validate(validator) => Err(AssertError::internal(format!(
                "{} returned validator {validator} that was not applied",
                self.name
            ))),
        }
    }

    fn check_validation(
        &self,
        validator: &Validator,
        subject: Value,
        validation: Validation,
    ) -> AssertResult {
        match validation {
            Ok(_) => Ok(()),
            Err(issues) => Err(self.fail(
                AssertionFailure::new()
                    .with_actual(subject)
                    .with_expected(Value::string(validator.describe()))
                    .with_issues(issues),
            )),
        }
    }

    fn fail(&self, failure: AssertionFailure) -> AssertError {
        let failure = if failure.message.is_some() {
            failure
        } else {
            failure.with_message(format!("Assertion {} failed", self.name))
        };
        AssertError::failure(self.name.clone(), failure)
    }

    #[cold]
    fn requires_async(&self) -> AssertError {
        AssertError::internal(format!(
            "{} requires asynchronous execution; use expect_async",
            self.name
        ))
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("is_async", &self.is_async)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
