//! Derive macros for the Shrinkgen generator library
//!
//! This crate provides `#[derive(Arbitrary)]`, re-exported by `shrinkgen`
//! behind its default `derive` feature.

use proc_macro::TokenStream;

mod derive;

/// Derive macro implementing `shrinkgen::Arbitrary`
///
/// The derived generator picks every field from its own generator inside
/// `shrinkgen::exec`, so derived values shrink one field at a time.
///
/// # Basic Usage
///
/// ```rust
/// use shrinkgen::Arbitrary;
///
/// #[derive(Arbitrary, Clone, Debug)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// ```
///
/// # Field attributes
///
/// - `range = "min..max"`: pick the field from `shrinkgen::in_range(min, max)`
/// - `with = "path::to::function"`: pick the field from the `Gen` returned by
///   calling the function
///
/// ```rust
/// use shrinkgen::{Arbitrary, Gen, element_of};
///
/// fn colors() -> Gen<&'static str> {
///     element_of(vec!["red", "green", "blue"])
/// }
///
/// #[derive(Arbitrary, Clone, Debug)]
/// struct Pixel {
///     #[arbitrary(range = "0..1920")]
///     x: u16,
///     #[arbitrary(with = "colors")]
///     color: &'static str,
/// }
/// ```
///
/// # Enums
///
/// Variants are chosen uniformly and shrink toward the first variant:
///
/// ```rust
/// use shrinkgen::Arbitrary;
///
/// #[derive(Arbitrary, Clone, Debug)]
/// enum Command {
///     Stop,
///     Move(i8, i8),
///     Wait { ticks: u8 },
/// }
/// ```
///
/// Generic type parameters receive `Arbitrary + Clone + Debug` bounds. Unions
/// and enums without variants are rejected.
#[proc_macro_derive(Arbitrary, attributes(arbitrary))]
pub fn derive_arbitrary(input: TokenStream) -> TokenStream {
    derive::derive_arbitrary_impl(input)
}
