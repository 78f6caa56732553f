#![allow(
    clippy::result_large_err,
    reason = "AssertError is returned by every check; boxing the common variants would add indirection everywhere"
)]
//! Affirm - natural-language assertion dispatch engine.
//!
//! A check is a single variadic call: a subject, a phrase, and zero or more
//! extra arguments. The engine finds the one registered definition whose
//! slots accept the call, runs it, and reports a structured failure when
//! the check does not hold.
//!
//! ```text
//! expect!(10, "to be greater than", 5)?;
//! expect!("abc", "not to contain", "z")?;
//! expect_async!(emitter, "to emit", "ready", Value::object([("within", Value::Int(50))])).await?;
//! ```
//!
//! # Architecture
//!
//! - `slot`: compiles author-facing `Part`s into positional matchers
//! - `definition`: compiled slots plus an implementation; parses and executes
//! - `registry`: two immutable lists of definitions (sync and async)
//! - `dispatch`: negation, candidate search, disambiguation, execution
//! - `builtins`: the built-in vocabulary
//!
//! Registries are built explicitly (`Registry::builtin`) and extended by
//! returning a new registry; there is no mutable global state.

mod builtins;
mod definition;
mod dispatch;
mod errors;
mod macros;
mod part;
mod race;
mod registry;
mod settings;
mod slot;
mod suggest;
mod validator;

use std::sync::Once;

pub use affirm_diagnostic::{
    format_failure, AssertionFailure, ColorMode, DiffOptions, ErrorCode, FailureReport, Issue,
};
pub use affirm_value::{ErrorValue, Event, EventEmitter, FunctionValue, PendingValue, Value};
pub use definition::{
    AsyncPredicateFn, Definition, Implementation, Outcome, ParseOutcome, Parsed, ParsedValues,
    PredicateFn,
};
pub use dispatch::{expect, expect_async, NEGATION_MARKER};
pub use errors::{
    AmbiguousMatchError, AssertError, AssertResult, Attempt, DefinitionError, FailureError,
    InternalError, NegatedAssertionError, NoMatchError,
};
pub use part::Part;
pub use race::{race, within, Elapsed, Race};
pub use registry::{default_registry, extend, Registry};
pub use settings::{settings, Settings};
pub use slot::{compile, Slot};
pub use validator::{Validate, Validation, Validator};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // The host test harness may already have installed one.
            if let Err(err) = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
            {
                tracing::debug!(%err, "keeping the existing tracing subscriber");
            }
        }
    });
}
