//! Borrowed value types for template substitution.
//!
//! The [`Value`] enum is the runtime view of one argument handed to a template.
//! It borrows from the caller's data, so building one never allocates. The
//! [`ToValue`] trait produces a `Value` from a typed argument, and
//! [`ValueSource`] describes an indexed sequence of them.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Runtime value of a single argument, borrowed from the caller.
///
/// Rendering uses the [`Display`](fmt::Display) implementation, which is
/// locale independent: integers render in base 10, floats use Rust's
/// shortest round-trip representation, and [`Value::Null`] renders as `null`.
///
/// # Example
///
/// ```
/// use namedlog_template::{Number, Value};
///
/// assert_eq!(Value::from(i32::MIN).to_string(), "-2147483648");
/// assert_eq!(Value::from(u64::MAX).to_string(), "18446744073709551615");
/// assert_eq!(Value::Null.to_string(), "null");
/// assert_eq!(Value::Number(Number::F64(1.5)).to_string(), "1.5");
/// ```
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// String value (borrowed).
    Str(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Any other displayable value, formatted only when rendered.
    Display(&'a dyn fmt::Display),
    /// Missing value.
    Null,
}

impl<'a> Value<'a> {
    /// Wraps a displayable value without formatting it.
    pub fn from_display(value: &'a dyn fmt::Display) -> Self {
        Value::Display(value)
    }

    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the character value, if present.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Bool(b) => fmt::Display::fmt(b, f),
            Value::Char(c) => fmt::Display::fmt(c, f),
            Value::Display(d) => d.fmt(f),
            Value::Null => f.write_str("null"),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Value::Display(_) => f.write_str("Display(..)"),
            Value::Null => f.write_str("Null"),
        }
    }
}

/// Values compare by content. `Display` values are opaque and never
/// compare equal, not even to themselves; compare their rendered text instead.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => fmt::Display::fmt(n, f),
            Number::U64(n) => fmt::Display::fmt(n, f),
            Number::F64(n) => fmt::Display::fmt(n, f),
        }
    }
}

macro_rules! impl_number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value<'_> {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }

            impl ToValue for $source {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

impl_number_from!(I64 as i64: i8, i16, i32, i64, isize);
impl_number_from!(U64 as u64: u8, u16, u32, u64, usize);
impl_number_from!(F64 as f64: f32, f64);

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value<'_> {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

/// Conversion from a typed argument into a borrowed [`Value`].
///
/// Implemented for primitives, strings, `Option` (where `None` becomes
/// [`Value::Null`]) and common smart pointers. Other types can opt in by
/// returning [`Value::from_display`]:
///
/// ```
/// use namedlog_template::{ToValue, Value};
/// use std::fmt;
///
/// struct UserId(u32);
///
/// impl fmt::Display for UserId {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "user-{}", self.0)
///     }
/// }
///
/// impl ToValue for UserId {
///     fn to_value(&self) -> Value<'_> {
///         Value::from_display(self)
///     }
/// }
///
/// assert_eq!(UserId(7).to_value().to_string(), "user-7");
/// ```
pub trait ToValue {
    /// Borrows `self` as a [`Value`].
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        *self
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

/// An indexed, fixed-length sequence of values.
///
/// This is all the formatter needs from its input: a count known up front
/// and positional access for a single left-to-right pass. Slices, arrays and
/// vectors of [`ToValue`] items implement it directly.
pub trait ValueSource {
    /// Number of values in the sequence.
    fn count(&self) -> usize;

    /// Returns the value at `index`, or `None` if out of range.
    fn value_at(&self, index: usize) -> Option<Value<'_>>;
}

impl<T: ToValue> ValueSource for [T] {
    fn count(&self) -> usize {
        self.len()
    }

    fn value_at(&self, index: usize) -> Option<Value<'_>> {
        self.get(index).map(ToValue::to_value)
    }
}

impl<T: ToValue, const N: usize> ValueSource for [T; N] {
    fn count(&self) -> usize {
        N
    }

    fn value_at(&self, index: usize) -> Option<Value<'_>> {
        self.get(index).map(ToValue::to_value)
    }
}

impl<T: ToValue> ValueSource for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }

    fn value_at(&self, index: usize) -> Option<Value<'_>> {
        self.get(index).map(ToValue::to_value)
    }
}

impl<S: ValueSource + ?Sized> ValueSource for &S {
    fn count(&self) -> usize {
        (**self).count()
    }

    fn value_at(&self, index: usize) -> Option<Value<'_>> {
        (**self).value_at(index)
    }
}
