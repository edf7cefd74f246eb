//! Curried, shape-polymorphic combinators.
//!
//! Every combinator is configured first and applied second:
//! `map(f)` returns a function from [`Value`] to `Result<Value>`. The
//! returned function accepts any container shape; mappings and records
//! contribute their values in insertion order.
//!
//! # Laziness
//!
//! The element-wise and structural combinators in [`sequence`] return lazy
//! sequences and pull nothing until consumed. The aggregating combinators
//! in [`group`], [`order`] and [`list`] consume their input eagerly; on an
//! infinite producer they never return.
//!
//! # Examples
//!
//! ```rust
//! use shapefold::combinator::{array, batch, filter};
//! use shapefold::lazy::seq;
//! use shapefold::{sequence, Value};
//!
//! let odd = filter(|x: &Value| x.as_int().is_some_and(|n| n % 2 == 1));
//! let pairs = batch(2)(odd(seq(1, 9)).unwrap()).unwrap();
//! assert_eq!(
//!     array(pairs).unwrap(),
//!     sequence![sequence![1, 3], sequence![5, 7], sequence![9]]
//! );
//! ```

pub mod group;
pub mod list;
pub mod order;
pub mod search;
pub mod sequence;
pub mod shaping;

pub use group::*;
pub use list::*;
pub use order::*;
pub use search::*;
pub use sequence::*;
pub use shaping::*;

use crate::shape::Value;

/// The chunk size used by [`batch_default`].
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// A boxed element predicate.
pub type Predicate = Box<dyn Fn(&Value) -> bool>;

/// A boxed function deriving a grouping or indexing key from an element.
pub type KeyFn = Box<dyn Fn(&Value) -> Value>;

/// Boxes a predicate, for lists of predicates.
///
/// # Examples
///
/// ```rust
/// use shapefold::combinator::{partition, predicate};
/// use shapefold::shape::{is_int, is_string};
/// use shapefold::sequence;
///
/// let split = partition([predicate(is_string), predicate(is_int)]);
/// assert_eq!(
///     split(sequence!["a", 1, "b"]).unwrap(),
///     sequence![sequence!["a", "b"], sequence![1]]
/// );
/// ```
pub fn predicate<P>(predicate: P) -> Predicate
where
    P: Fn(&Value) -> bool + 'static,
{
    Box::new(predicate)
}

/// Boxes a key function, for lists of key functions.
pub fn key_fn<F>(key: F) -> KeyFn
where
    F: Fn(&Value) -> Value + 'static,
{
    Box::new(key)
}
