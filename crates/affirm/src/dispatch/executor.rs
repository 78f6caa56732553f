//! Negation semantics applied to an executed definition.

use tracing::debug;

use crate::{AssertError, AssertResult, Definition, NegatedAssertionError};

/// Invert the outcome of a negated check.
///
/// Only a failed check is swallowed under negation; every other error is a
/// defect and propagates unchanged.
pub(super) fn apply_negation(
    definition: &Definition,
    negated: bool,
    result: AssertResult,
) -> AssertResult {
    if !negated {
        return result;
    }
    match result {
        Ok(()) => {
            debug!(definition = definition.name(), "negated assertion passed");
            Err(AssertError::Negated(NegatedAssertionError::new(
                definition.name(),
            )))
        }
        Err(AssertError::Failure(failure)) => {
            debug!(
                definition = definition.name(),
                message = failure.message(),
                "negated failure swallowed"
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}
