//! Behavioral value types: callables and pending results.
//!
//! These values are opaque to structural comparison. Equality between two
//! of them is identity of the underlying allocation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};

use super::Value;

/// Native callable signature.
///
/// `Err` carries the thrown value, so a function "throwing" is modeled as an
/// ordinary return path.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

// FunctionValue

/// A callable value.
#[derive(Clone)]
pub struct FunctionValue {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl FunctionValue {
    /// Wrap a closure as a callable value.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        FunctionValue {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Function name used in messages; anonymous functions use `""`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    #[inline]
    pub fn call(&self, args: &[Value]) -> Result<Value, Value> {
        (self.func)(args)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "<function>")
        } else {
            write!(f, "<function {}>", self.name)
        }
    }
}

// PendingValue

type SharedSettle = Shared<BoxFuture<'static, Result<Value, Value>>>;

/// A value that settles later: fulfilled (`Ok`) or rejected (`Err`).
///
/// Settling is shared, so every clone observes the same outcome and the
/// underlying future runs at most once.
#[derive(Clone)]
pub struct PendingValue {
    inner: Arc<SharedSettle>,
}

impl PendingValue {
    /// Wrap a future as a pending value.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, Value>> + Send + 'static,
    {
        PendingValue {
            inner: Arc::new(future.boxed().shared()),
        }
    }

    /// An already-fulfilled pending value.
    pub fn resolved(value: Value) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    /// An already-rejected pending value.
    pub fn rejected(reason: Value) -> Self {
        Self::new(futures::future::ready(Err(reason)))
    }

    /// Wait for the outcome.
    pub fn settle(&self) -> impl Future<Output = Result<Value, Value>> + Send + 'static {
        (*self.inner).clone()
    }

    /// The outcome, if already settled.
    pub fn peek(&self) -> Option<Result<Value, Value>> {
        self.inner.peek().cloned()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PendingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(Ok(v)) => write!(f, "<pending fulfilled {v:?}>"),
            Some(Err(e)) => write!(f, "<pending rejected {e:?}>"),
            None => write!(f, "<pending>"),
        }
    }
}
