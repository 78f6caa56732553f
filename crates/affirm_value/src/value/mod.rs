//! Runtime values for assertion arguments.
//!
//! # Arc Enforcement Architecture
//!
//! All heap allocations go through factory methods on `Value`. The
//! `Heap<T>` wrapper has a crate-private constructor, so external code
//! cannot build heap variants directly.
//!
//! ```text
//! let s = Value::string("hello");              // OK
//! let list = Value::list(vec![]);              // OK
//! let s = Value::Str(Heap::new(...));          // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Thread Safety
//!
//! Every variant is `Send + Sync`; values may be moved into futures and
//! broadcast to other tasks through an `EventEmitter`.

mod composite;
mod error_value;
mod heap;

use std::collections::BTreeMap;
use std::fmt;

pub use composite::{FunctionValue, NativeFn, PendingValue};
pub use error_value::ErrorValue;
pub use heap::Heap;

use crate::EventEmitter;

/// A dynamically-typed assertion argument.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absent value (`undefined`).
    Void,
    /// Explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),

    // Heap Types (use Heap<T> for enforced Arc usage)
    /// String value.
    Str(Heap<String>),
    /// Ordered list of values.
    List(Heap<Vec<Value>>),
    /// Object-like map with string keys, ordered by key.
    Map(Heap<BTreeMap<String, Value>>),
    /// Thrown or rejected error object.
    Error(Heap<ErrorValue>),

    // Behavioral Types (opaque, compared by identity)
    /// Callable value.
    Function(FunctionValue),
    /// Value that settles asynchronously.
    Pending(PendingValue),
    /// Event source for trigger-style checks.
    Emitter(EventEmitter),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Create a map value from key/value pairs.
    ///
    /// ```text
    /// let opts = Value::object([("within", Value::Int(50))]);
    /// ```
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Create an error value.
    #[inline]
    pub fn error(error: ErrorValue) -> Self {
        Value::Error(Heap::new(error))
    }

    /// Create a callable value from a closure.
    pub fn function<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Value::Function(FunctionValue::new(name, func))
    }

    /// Create a pending value from a future.
    pub fn pending<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Result<Value, Value>> + Send + 'static,
    {
        Value::Pending(PendingValue::new(future))
    }
}

// Value Methods

impl Value {
    /// Truthiness in the usual scripting sense.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Void | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of ints and floats.
    #[expect(
        clippy::cast_precision_loss,
        reason = "numeric comparisons intentionally widen i64 to f64"
    )]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_pending(&self) -> Option<&PendingValue> {
        match self {
            Value::Pending(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_emitter(&self) -> Option<&EventEmitter> {
        match self {
            Value::Emitter(e) => Some(e),
            _ => None,
        }
    }

    /// Length of strings (in chars), lists and maps.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Get the type name for messages and `to be a <type>` checks.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Error(_) => "error",
            Value::Function(_) => "function",
            Value::Pending(_) => "pending",
            Value::Emitter(_) => "emitter",
        }
    }

    /// Structural (deep) equality.
    ///
    /// Floats compare by IEEE equality, so `NaN` never equals itself.
    /// Integers and floats compare numerically.
    /// Behavioral values fall back to identity.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => {
                int_equals_float(*i, *x)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.ptr_eq(b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y)))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.ptr_eq(b)
                    || (a.len() == b.len()
                        && a.iter()
                            .all(|(k, v)| b.get(k).is_some_and(|bv| v.equals(bv))))
            }
            (Value::Error(a), Value::Error(b)) => {
                a.ptr_eq(b)
                    || (a.name() == b.name()
                        && a.message() == b.message()
                        && a.props().len() == b.props().len()
                        && a.props()
                            .iter()
                            .all(|(k, v)| b.props().get(k).is_some_and(|bv| v.equals(bv))))
            }
            _ => self.same(other),
        }
    }

    /// Strict equality: primitives by value, heap values by identity.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // One number type: `1` and `1.0` are the same number.
            (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => {
                int_equals_float(*i, *x)
            }
            // Strings are immutable, so content equality is identity-equivalent.
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Pending(a), Value::Pending(b)) => a.ptr_eq(b),
            (Value::Emitter(a), Value::Emitter(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Partial deep match: every entry in `shape` must be present in `self`.
    ///
    /// Maps match when each key in `shape` matches recursively; lists must
    /// match element-wise with equal length; errors are viewed as maps of
    /// their `name`, `message` and properties. Everything else uses
    /// structural equality.
    pub fn satisfies(&self, shape: &Value) -> bool {
        match (self, shape) {
            (Value::Map(actual), Value::Map(expected)) => expected
                .iter()
                .all(|(k, v)| actual.get(k).is_some_and(|av| av.satisfies(v))),
            (Value::Error(actual), Value::Map(expected)) => {
                let actual = actual.to_map();
                expected
                    .iter()
                    .all(|(k, v)| actual.get(k).is_some_and(|av| av.satisfies(v)))
            }
            (Value::List(actual), Value::List(expected)) => {
                actual.len() == expected.len()
                    && actual.iter().zip(expected.iter()).all(|(a, e)| a.satisfies(e))
            }
            _ => self.equals(shape),
        }
    }
}

/// Exact numeric equality without rounding the integer through `f64`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the float is integral and inside the i64 range when cast"
)]
fn int_equals_float(i: i64, x: f64) -> bool {
    // 2^63; every i64 lies in [-2^63, 2^63).
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (-BOUND..BOUND).contains(&x) && x as i64 == i
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Void
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::error(e)
    }
}

impl From<FunctionValue> for Value {
    fn from(f: FunctionValue) -> Self {
        Value::Function(f)
    }
}

impl From<PendingValue> for Value {
    fn from(p: PendingValue) -> Self {
        Value::Pending(p)
    }
}

impl From<EventEmitter> for Value {
    fn from(e: EventEmitter) -> Self {
        Value::Emitter(e)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::map(map)
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "Void"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(map) => write!(f, "Map({:?})", &**map),
            Value::Error(e) => write!(f, "Error({e})"),
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::Pending(p) => write!(f, "Pending({p:?})"),
            Value::Emitter(e) => write!(f, "Emitter({e:?})"),
        }
    }
}

/// Single-line rendering used in messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
                } else {
                    write!(f, "{n:?}")
                }
            }
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                if map.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, " }}")
            }
            Value::Error(e) => write!(f, "[{e}]"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Pending(p) => write!(f, "{p:?}"),
            Value::Emitter(e) => write!(f, "{e:?}"),
        }
    }
}

/// Structural equality, matching `Value::equals`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
