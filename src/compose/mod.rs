//! Composition of fallible steps.
//!
//! Every configured combinator is a step: a function from [`Value`](crate::Value) to
//! `Result<Value>`. This module glues steps together without naming the
//! intermediate values.
//!
//! # Overview
//!
//! - [`pipe!`] / [`pipe`]: thread a value through steps, left to right
//! - [`arrow!`] / [`arrow`]: compose steps left to right into one function
//! - [`cond`], [`ifelse`], [`when`]: branch on predicates
//! - [`maybe`], [`maybe_or`], [`nothing`], [`something`]: branch on `Null`
//! - [`valmap`]: replace values through a lookup table
//! - [`tap`], [`spread`], [`fan_out`]: observe, unpack, or duplicate input
//!
//! The macros take any mix of closures, function items and configured
//! combinators. The functions take boxed [`Step`]s, for pipelines built at
//! runtime.
//!
//! # Examples
//!
//! ```
//! use shapefold::combinator::{array, filter, map};
//! use shapefold::compose::maybe_or;
//! use shapefold::shape::is_int;
//! use shapefold::{arrow, sequence, Value};
//!
//! let ints_doubled = arrow!(
//!     filter(is_int),
//!     map(|x: Value| Value::Int(x.as_int().unwrap_or(0) * 2)),
//!     array,
//! );
//! let or_empty = maybe_or(sequence![], ints_doubled);
//!
//! assert_eq!(or_empty(sequence![1, "a", 3]).unwrap(), sequence![2, 6]);
//! assert_eq!(or_empty(Value::Null).unwrap(), sequence![]);
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `arrow!(f, arrow!(g, h))` equals `arrow!(arrow!(f, g), h)`
//! - **Identity**: `arrow!(lift(identity), f)` equals `f`
//! - **Short circuit**: a step after a failing step is never called

mod arrow_macro;
mod branching;
mod chain;
mod pipe_macro;
mod utils;

pub use branching::{cond, ifelse, maybe, maybe_or, nothing, something, valmap, when};
pub use chain::{Step, arrow, fan_out, lift, pipe, spread, step, tap};
pub use utils::{constant, identity};

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::arrow;
pub use crate::pipe;
