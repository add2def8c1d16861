//! The type-erased generator value.

use std::fmt;

use tracing::warn;

use crate::any::Any;
use crate::context;
use crate::error::GenError;
use crate::rng::Random;
use crate::shrink::Shrinkable;
use crate::strategy::Strategy;

/// The reference size.
///
/// Not a hard limit on the size parameter, only a guideline: generators with a
/// natural bound that is cheap to reach (numbers) should max out here, while
/// collection generators may keep growing past it.
pub const NOMINAL_SIZE: usize = 100;

/// Attempts made by [`Gen::filter`] before giving up
pub const MAX_FILTER_ATTEMPTS: usize = 100;

/// Internal trait for type-erased strategies
trait ErasedStrategy<T>: Send {
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError>;
    fn clone_box(&self) -> Box<dyn ErasedStrategy<T>>;
}

/// Wrapper to make any Strategy work as a trait object
struct StrategyHolder<S> {
    strategy: S,
}

impl<T, S> ErasedStrategy<T> for StrategyHolder<S>
where
    S: Strategy<T>,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError> {
        self.strategy.generate(random, size)
    }

    fn clone_box(&self) -> Box<dyn ErasedStrategy<T>> {
        Box::new(StrategyHolder {
            strategy: self.strategy.clone(),
        })
    }
}

/// A generator of shrinkable random values of type `T`.
///
/// `Gen` has value semantics: cloning one duplicates the wrapped strategy, so a
/// stateful strategy never shares its state with the clone. Invoking a generator
/// with the same stream and size always yields an equivalent tree for pure
/// strategies.
pub struct Gen<T> {
    inner: Box<dyn ErasedStrategy<T>>,
}

impl<T: 'static> Gen<T> {
    /// Wrap a strategy.
    ///
    /// `Gen` is not itself a [`Strategy`], so a generator can never end up
    /// wrapped inside another one by accident.
    pub fn new<S: Strategy<T>>(strategy: S) -> Self {
        Self {
            inner: Box::new(StrategyHolder { strategy }),
        }
    }

    /// Wrap a closure, letting the compiler infer its signature
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Random, usize) -> Result<Shrinkable<T>, GenError> + Clone + Send + 'static,
    {
        Self::new(f)
    }

    /// Generate a tree at [`NOMINAL_SIZE`]
    pub fn generate(&self, random: &Random) -> Result<Shrinkable<T>, GenError> {
        self.generate_sized(random, NOMINAL_SIZE)
    }

    /// Generate a tree. Failures of the wrapped strategy are returned unchanged.
    pub fn generate_sized(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError> {
        self.inner.generate(random, size)
    }

    /// Pick a value from this generator inside an [`exec`](crate::exec) body.
    ///
    /// The enclosing context generates a tree from this generator, records it so
    /// that the pick can be shrunk later, and the root value is returned here.
    /// Returns [`GenError::NoActiveContext`] when called anywhere else.
    pub fn pick(&self) -> Result<T, GenError>
    where
        T: Clone + fmt::Debug,
    {
        let erased = self.clone().map(Any::new);
        let value = context::pick_erased(&erased)?;
        value.get::<T>().cloned()
    }

    /// Transform every generated value, shrinks included
    pub fn map<U, F>(self, mapper: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> U + Clone + Send + 'static,
    {
        Gen::new(Map {
            source: self,
            mapper,
        })
    }

    /// Only produce values satisfying `predicate`.
    ///
    /// Each attempt uses a fresh split of the stream and one more unit of size.
    /// Fails with [`GenError::GenerationFailed`] after [`MAX_FILTER_ATTEMPTS`].
    pub fn filter<P>(self, predicate: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + Clone + Send + 'static,
    {
        Gen::new(Filter {
            source: self,
            predicate,
        })
    }
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}

impl<T> fmt::Debug for Gen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gen")
            .field("value_type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

struct Map<T, F> {
    source: Gen<T>,
    mapper: F,
}

impl<T, F: Clone> Clone for Map<T, F> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            mapper: self.mapper.clone(),
        }
    }
}

impl<T, U, F> Strategy<U> for Map<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Clone + Send + 'static,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<U>, GenError> {
        let shrinkable = self.source.generate_sized(random, size)?;
        Ok(shrinkable.map(self.mapper.clone()))
    }
}

struct Filter<T, P> {
    source: Gen<T>,
    predicate: P,
}

impl<T, P: Clone> Clone for Filter<T, P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<T, P> Strategy<T> for Filter<T, P>
where
    T: 'static,
    P: Fn(&T) -> bool + Clone + Send + 'static,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError> {
        let mut random = random.clone();
        for attempt in 0..MAX_FILTER_ATTEMPTS {
            let shrinkable = self
                .source
                .generate_sized(&random.split(), size.saturating_add(attempt))?;
            if (self.predicate)(shrinkable.value()) {
                return Ok(shrinkable.filter(self.predicate.clone()));
            }
        }

        warn!(
            attempts = MAX_FILTER_ATTEMPTS,
            value_type = std::any::type_name::<T>(),
            "filter rejected every generated value"
        );
        Err(GenError::generation_failed_with_context(
            "filter predicate rejected every generated value",
            Some(format!("{} attempts", MAX_FILTER_ATTEMPTS)),
        ))
    }
}
