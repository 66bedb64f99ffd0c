//! Fixed-arity argument tuples.
//!
//! A message's arity is its argument tuple type. [`Args`] is implemented for
//! tuples of one to six [`ToValue`] items, so `LogMessage<(&str, u32)>` takes
//! exactly two values and the compiler rejects any other count.

use namedlog_template::{ToValue, Value};

/// A fixed-size heterogeneous tuple viewed as an indexed value sequence.
pub trait Args {
    /// Number of values in the tuple.
    const ARITY: usize;

    /// The value at `index`, or `None` past the end.
    fn value_at(&self, index: usize) -> Option<Value<'_>>;
}

macro_rules! impl_args {
    ($arity:literal => $($ty:ident . $idx:tt),+) => {
        impl<$($ty: ToValue),+> Args for ($($ty,)+) {
            const ARITY: usize = $arity;

            fn value_at(&self, index: usize) -> Option<Value<'_>> {
                match index {
                    $($idx => Some(self.$idx.to_value()),)+
                    _ => None,
                }
            }
        }
    };
}

impl_args!(1 => T1.0);
impl_args!(2 => T1.0, T2.1);
impl_args!(3 => T1.0, T2.1, T3.2);
impl_args!(4 => T1.0, T2.1, T3.2, T4.3);
impl_args!(5 => T1.0, T2.1, T3.2, T4.3, T5.4);
impl_args!(6 => T1.0, T2.1, T3.2, T4.3, T5.4, T6.5);
