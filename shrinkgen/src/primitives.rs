//! Primitive generators.

use std::fmt;

use num_traits::{CheckedSub, PrimInt};
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Standard};
use rand::{Rng, RngCore};

use crate::error::GenError;
use crate::generator::{Gen, NOMINAL_SIZE};
use crate::rng::Random;
use crate::shrink::strategies::{bool_shrink, towards};
use crate::shrink::Shrinkable;
use crate::strategy::Strategy;

/// A strategy that always produces the same value
#[derive(Debug, Clone)]
pub struct Just<T> {
    value: T,
}

impl<T: Clone + Send + 'static> Strategy<T> for Just<T> {
    fn generate(&self, _random: &Random, _size: usize) -> Result<Shrinkable<T>, GenError> {
        // A constant value cannot be shrunk
        Ok(Shrinkable::just(self.value.clone()))
    }
}

/// Generator that always produces `value`
pub fn just<T: Clone + Send + 'static>(value: T) -> Gen<T> {
    Gen::new(Just { value })
}

/// A strategy that chooses uniformly from a list of values
#[derive(Debug, Clone)]
pub struct ElementOf<T> {
    values: Vec<T>,
}

impl<T: Clone + Send + 'static> Strategy<T> for ElementOf<T> {
    fn generate(&self, random: &Random, _size: usize) -> Result<Shrinkable<T>, GenError> {
        if self.values.is_empty() {
            return Err(GenError::generation_failed(
                "element_of requires at least one value",
            ));
        }
        let index = random.clone().gen_range(0..self.values.len());
        let values = self.values.clone();
        Ok(Shrinkable::shrink_recur(index, |&i| towards(i, 0)).map(move |i| values[i].clone()))
    }
}

/// Generator choosing one of `values`, shrinking toward earlier elements
pub fn element_of<T: Clone + Send + 'static>(values: Vec<T>) -> Gen<T> {
    Gen::new(ElementOf { values })
}

/// One-bit booleans; `true` shrinks to `false`
pub fn booleans() -> Gen<bool> {
    Gen::from_fn(|random: &Random, _size: usize| {
        let value = random.clone().next_u32() & 1 == 1;
        Ok(Shrinkable::shrink_recur(value, |&v| bool_shrink(v)))
    })
}

/// A strategy for integers in a half-open range
#[derive(Debug, Clone)]
pub struct InRange<T> {
    min: T,
    max: T,
}

impl<T> Strategy<T> for InRange<T>
where
    T: PrimInt + SampleUniform + fmt::Debug + Send + 'static,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<T>, GenError> {
        if self.min >= self.max {
            return Err(GenError::generation_failed_with_context(
                "in_range requires min < max",
                Some(format!("{:?}..{:?}", self.min, self.max)),
            ));
        }
        let target = shrink_target(self.min, self.max);
        let drawn = random.clone().gen_range(self.min..self.max);
        let value = scale_toward(drawn, target, size);
        Ok(Shrinkable::shrink_recur(value, move |&v| towards(v, target)))
    }
}

/// Integers in `min..max`.
///
/// Below [`NOMINAL_SIZE`] values are pulled toward the element of the range
/// closest to zero in proportion to the size. Shrinks toward that same element.
pub fn in_range<T>(min: T, max: T) -> Gen<T>
where
    T: PrimInt + SampleUniform + fmt::Debug + Send + 'static,
{
    Gen::new(InRange { min, max })
}

/// Integers over the whole range of `T`, scaled by size, shrinking toward zero
pub fn integers<T>() -> Gen<T>
where
    T: PrimInt + Send + 'static,
    Standard: Distribution<T>,
{
    Gen::from_fn(|random: &Random, size: usize| {
        let drawn: T = random.clone().r#gen();
        let value = scale_toward(drawn, T::zero(), size);
        Ok(Shrinkable::shrink_recur(value, |&v| towards(v, T::zero())))
    })
}

/// Pairs of independently generated values
pub fn pair<A, B>(first: Gen<A>, second: Gen<B>) -> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    Gen::new(Pair { first, second })
}

#[derive(Clone)]
struct Pair<A, B> {
    first: Gen<A>,
    second: Gen<B>,
}

impl<A, B> Strategy<(A, B)> for Pair<A, B>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    fn generate(&self, random: &Random, size: usize) -> Result<Shrinkable<(A, B)>, GenError> {
        let mut random = random.clone();
        let first = self.first.generate_sized(&random.split(), size)?;
        let second = self.second.generate_sized(&random.split(), size)?;
        Ok(first.zip(second))
    }
}

/// Value in the half-open range `min..max` closest to zero
fn shrink_target<T: PrimInt>(min: T, max: T) -> T {
    if min > T::zero() {
        min
    } else if max <= T::zero() {
        max - T::one()
    } else {
        T::zero()
    }
}

/// Move `value` toward `target` in proportion to how far `size` is below
/// [`NOMINAL_SIZE`]. Values whose distance to `target` does not fit in `T`
/// are left alone.
fn scale_toward<T: PrimInt>(value: T, target: T, size: usize) -> T {
    if size >= NOMINAL_SIZE {
        return value;
    }
    let factor = size as f64 / NOMINAL_SIZE as f64;
    let scale = |offset: T| -> T {
        offset
            .to_f64()
            .map(|o| (o * factor).trunc())
            .and_then(num_traits::cast)
            .unwrap_or(offset)
    };
    if value >= target {
        match CheckedSub::checked_sub(&value, &target) {
            Some(offset) => target + scale(offset),
            None => value,
        }
    } else {
        match CheckedSub::checked_sub(&target, &value) {
            Some(offset) => target - scale(offset),
            None => value,
        }
    }
}
