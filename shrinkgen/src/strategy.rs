//! The contract every generation strategy satisfies.

use crate::error::GenError;
use crate::rng::Random;
use crate::shrink::Shrinkable;

/// A concrete way of producing shrinkable values of type `T`.
///
/// Any type implementing this trait can be wrapped in a [`Gen`](crate::Gen).
/// Implementations must be `Clone` such that the clone behaves exactly like the
/// original from that point on, including any internal state. Closures taking
/// `(&Random, usize)` implement it automatically.
///
/// ```rust
/// use shrinkgen::{Gen, Random, Shrinkable};
///
/// let answer = Gen::from_fn(|_random: &Random, _size: usize| Ok(Shrinkable::just(42)));
/// let tree = answer.generate(&Random::new(0)).unwrap();
/// assert_eq!(*tree.value(), 42);
/// ```
pub trait Strategy<T>: Clone + Send + 'static {
    /// Produce one tree. Must not keep state derived from `random` past the call.
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError>;
}

impl<T, F> Strategy<T> for F
where
    F: Fn(&Random, usize) -> Result<Shrinkable<T>, GenError> + Clone + Send + 'static,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError> {
        self(random, size)
    }
}
