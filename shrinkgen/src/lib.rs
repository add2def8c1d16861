//! # Shrinkgen - shrinkable random value generators
//!
//! Shrinkgen provides [`Gen`], a cloneable, type-erased generator of random
//! values that carry their own shrink trees, together with the primitives and
//! combinators needed to build generators for arbitrary types.
//!
//! Generators are invoked with a [`Random`] stream and a size. The same stream
//! and size always produce the same tree, and the default size is
//! [`NOMINAL_SIZE`].
//!
//! ## Quick Start
//!
//! ```rust
//! use shrinkgen::{Gen, Random, in_range};
//!
//! let digits: Gen<u8> = in_range(0u8, 10);
//! let tree = digits.generate(&Random::new(42)).unwrap();
//! assert!(*tree.value() < 10);
//!
//! // Same stream, same value
//! let again = digits.generate(&Random::new(42)).unwrap();
//! assert_eq!(tree.value(), again.value());
//! ```
//!
//! ## Imperative generators
//!
//! Inside [`exec`], any generator can be asked for a plain value with
//! [`Gen::pick`]. The picks are recorded so the combined value still shrinks.
//!
//! ```rust
//! use shrinkgen::{exec, booleans, in_range, Random};
//!
//! let signed = exec(|| {
//!     let negative = booleans().pick()?;
//!     let magnitude = in_range(1i32, 100).pick()?;
//!     Ok(if negative { -magnitude } else { magnitude })
//! });
//! let tree = signed.generate(&Random::new(3)).unwrap();
//! assert!((1..100).contains(&tree.value().abs()));
//! ```
//!
//! Calling `pick` outside of such a context returns
//! [`GenError::NoActiveContext`].

pub mod any;
pub mod arbitrary;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod generator;
pub mod primitives;
pub mod rng;
pub mod sample;
pub mod shrink;
pub mod strategy;

pub use any::Any;
pub use arbitrary::{Arbitrary, arbitrary};
pub use config::{
    ConfigError, GenConfig, get_global_config, reset_global_config, set_global_config,
};
pub use context::{GenerationHandler, has_active_context, with_handler, without_context};
pub use error::GenError;
pub use exec::{Exec, Recipe, exec, exec_with_recipe};
pub use generator::{Gen, MAX_FILTER_ATTEMPTS, NOMINAL_SIZE};
pub use primitives::*;
pub use rng::Random;
pub use sample::{sample, sample_parallel};
pub use shrink::{Shrinkable, Shrinks};
pub use strategy::Strategy;

#[cfg(feature = "derive")]
pub use shrinkgen_derive::Arbitrary;
