//! Default generators per type.

use crate::generator::Gen;
use crate::primitives::{booleans, integers, pair};

/// Trait for types that have a canonical generator
///
/// Implement it by hand, or derive it with `#[derive(Arbitrary)]` when the
/// `derive` feature is enabled.
pub trait Arbitrary: Sized + 'static {
    /// The default generator for this type
    fn arbitrary() -> Gen<Self>;
}

/// The default generator for `T`
pub fn arbitrary<T: Arbitrary>() -> Gen<T> {
    T::arbitrary()
}

impl Arbitrary for bool {
    fn arbitrary() -> Gen<Self> {
        booleans()
    }
}

macro_rules! impl_arbitrary_int {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary() -> Gen<Self> {
                    integers::<$t>()
                }
            }
        )*
    };
}

impl_arbitrary_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<A, B> Arbitrary for (A, B)
where
    A: Arbitrary + Clone,
    B: Arbitrary + Clone,
{
    fn arbitrary() -> Gen<Self> {
        pair(A::arbitrary(), B::arbitrary())
    }
}
