//! Event checks: wait for a named event within a deadline.
//!
//! The subscription is taken before anything can emit and dropped on every
//! path, so a finished check leaves no listener behind.

use affirm_value::{EventEmitter, Value};
use futures::future;
use tracing::{debug, trace};

use super::{fail, timeout_at, with_options};
use crate::{
    race, settings, within, AssertError, Definition, DefinitionError, Outcome, Part, Race,
    Validator,
};

fn emitter_at(values: &[Value], index: usize) -> Result<EventEmitter, AssertError> {
    values
        .get(index)
        .and_then(Value::as_emitter)
        .cloned()
        .ok_or_else(|| AssertError::internal("emitter slot received a non-emitter"))
}

fn event_at(values: &[Value], index: usize) -> String {
    values
        .get(index)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `[emitter, event, options?]`: the emitter emits `event` in time.
async fn emits(values: Vec<Value>) -> Result<Outcome, AssertError> {
    let emitter = emitter_at(&values, 0)?;
    let event = event_at(&values, 1);
    let limit = timeout_at(&values, 2).unwrap_or(settings().event_timeout);

    let mut subscription = emitter.subscribe();
    let received = within(limit, subscription.next_named(&event)).await;
    drop(subscription);

    Ok(match received {
        Ok(Some(_)) => Outcome::Pass,
        Ok(None) => fail(format!(
            "expected {emitter:?} to emit {event:?}, but it closed"
        )),
        Err(elapsed) => {
            debug!(event = %event, ?limit, "event wait timed out");
            fail(format!(
                "expected {emitter:?} to emit {event:?}, but it {elapsed}"
            ))
        }
    })
}

/// `[trigger, emitter, event, options?]`: calling `trigger` makes the
/// emitter emit `event` in time. A pending value returned by the trigger
/// is driven while waiting.
async fn emits_from(values: Vec<Value>) -> Result<Outcome, AssertError> {
    let trigger = values
        .first()
        .and_then(Value::as_function)
        .cloned()
        .ok_or_else(|| AssertError::internal("trigger slot received a non-function"))?;
    let emitter = emitter_at(&values, 1)?;
    let event = event_at(&values, 2);
    let limit = timeout_at(&values, 3).unwrap_or(settings().event_timeout);

    let mut subscription = emitter.subscribe();
    let pending = match trigger.call(&[]) {
        Ok(Value::Pending(pending)) => Some(pending),
        Ok(_) => None,
        Err(thrown) => {
            return Ok(fail(format!(
                "expected {emitter:?} to emit {event:?}, but the trigger threw {thrown}"
            )));
        }
    };

    let drive = async move {
        if let Some(pending) = pending {
            if let Err(reason) = pending.settle().await {
                trace!(%reason, "trigger rejected");
            }
        }
        future::pending::<()>().await;
    };
    let received = within(limit, race(subscription.next_named(&event), drive)).await;
    drop(subscription);

    Ok(match received {
        Ok(Race::First(Some(_))) => Outcome::Pass,
        Ok(Race::First(None) | Race::Second(())) => fail(format!(
            "expected {emitter:?} to emit {event:?}, but it closed"
        )),
        Err(elapsed) => {
            debug!(event = %event, ?limit, "event wait timed out");
            fail(format!(
                "expected {emitter:?} to emit {event:?} when triggered, but it {elapsed}"
            ))
        }
    })
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    let emit: [Part; 3] = [
        Validator::emitter().into(),
        "to emit".into(),
        Validator::non_empty_string().into(),
    ];
    let emit_from: [Part; 4] = [
        Validator::function().into(),
        "to emit from".into(),
        Validator::emitter().into(),
        Validator::non_empty_string().into(),
    ];

    Ok(vec![
        Definition::async_predicate(&emit, emits)?,
        Definition::async_predicate(&with_options(&emit), emits)?,
        Definition::async_predicate(&emit_from, emits_from)?,
        Definition::async_predicate(&with_options(&emit_from), emits_from)?,
    ])
}
