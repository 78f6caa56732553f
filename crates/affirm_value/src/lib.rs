//! Affirm Value - Runtime value model for the affirm assertion engine.
//!
//! This crate provides:
//! - The dynamic `Value` type every assertion argument is converted into
//! - `Heap<T>`, the enforced `Arc` wrapper behind all heap variants
//! - Callable (`FunctionValue`), suspendable (`PendingValue`) and
//!   event-emitting (`EventEmitter`) values used by behavioral checks
//! - Deterministic pretty rendering used by the diff formatter
//!
//! # Equality
//!
//! Two notions of equality are exposed:
//! - `Value::equals` is structural (deep) equality
//! - `Value::same` is strict equality: primitives by value, heap values by
//!   allocation identity

mod emitter;
mod pretty;
mod serialize;
mod value;

pub use emitter::{Event, EventEmitter, Subscription};
pub use value::{ErrorValue, FunctionValue, Heap, NativeFn, PendingValue, Value};
