//! # shapefold
//!
//! Shape-polymorphic functional combinators for Rust.
//!
//! ## Overview
//!
//! `shapefold` provides curried operations (mapping, filtering, folding,
//! grouping, flattening, mapping/record shaping) that work uniformly over a
//! dynamic [`Value`] whatever its runtime shape:
//!
//! - **Shapes**: every value classifies as a Sequence, Mapping, Record or
//!   Scalar, and operations dispatch on that classification once.
//! - **Lazy Sequences**: pull-based producers, restartable or one-shot,
//!   transformed without intermediate materialization.
//! - **Accessors**: `get`/`set`/`keys`/`entries`/`len` across shapes.
//! - **Combinators**: `group`, `partition`, `batch`, `sort`, `distinct`,
//!   association-list round trips and more.
//! - **Composition**: `pipe!`, `arrow!`, `cond`, `ifelse`, `maybe` and
//!   friends for point-free glue.
//!
//! ## Feature Flags
//!
//! - `compose`: Composition layer (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for values
//! - `fxhash`: Use `rustc-hash` for mapping indexes
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use shapefold::prelude::*;
//! use shapefold::sequence;
//!
//! let evens = filter(|x: &Value| x.as_int().is_some_and(|n| n % 2 == 0));
//! let squares = map(|x: Value| Value::from(x.as_int().unwrap_or(0).pow(2)));
//! let first_three = limit(3);
//!
//! let result = array(first_three(squares(evens(count_from(1)).unwrap()).unwrap()).unwrap()).unwrap();
//! assert_eq!(result, sequence![4, 16, 36]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the value model, the lazy engine, accessors and combinators.
///
/// # Usage
///
/// ```rust
/// use shapefold::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::*;
    pub use crate::combinator::*;
    pub use crate::error::{Error, Result};
    pub use crate::lazy::{LazySeq, count_from, iterate, repeat, seq};
    pub use crate::shape::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;
}

mod hashing;

pub mod access;
pub mod combinator;
pub mod error;
pub mod lazy;
pub mod shape;

#[cfg(feature = "compose")]
pub mod compose;

pub use error::{Error, Result};
pub use lazy::LazySeq;
pub use shape::{Key, Mapping, Record, Shape, Value, classify};

#[doc(hidden)]
pub use paste;
