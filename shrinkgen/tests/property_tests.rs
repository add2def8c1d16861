//! Property tests for shrinkgen
//!
//! Quantifies the determinism and value-semantics guarantees of `Gen` over
//! arbitrary seeds and sizes.

use proptest::prelude::*;
use shrinkgen::{Gen, NOMINAL_SIZE, Random, booleans, exec, in_range, integers, pair};

fn combined() -> Gen<(i64, bool, u16)> {
    exec(|| {
        let n = integers::<i64>().pick()?;
        let flag = booleans().pick()?;
        let small = in_range(0u16, 1000).pick()?;
        Ok((n, flag, small))
    })
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    // The same stream and size always give the same root.
    #[test]
    fn prop_same_stream_same_root(seed in any::<u64>(), size in 0usize..500) {
        let generator = combined();
        let random = Random::new(seed);
        let first = generator.generate_sized(&random, size).unwrap();
        let second = generator.generate_sized(&random, size).unwrap();
        prop_assert_eq!(first.value(), second.value());
    }

    // Re-creating the stream from its seed reproduces the first shrinks too.
    #[test]
    fn prop_shrinks_reproduce(seed in any::<u64>()) {
        let generator = pair(in_range(0u32, 100), in_range(0u32, 100));
        let first = generator.generate(&Random::new(seed)).unwrap();
        let second = generator.generate(&Random::new(seed)).unwrap();
        let a: Vec<_> = first.shrinks().take(10).map(|c| *c.value()).collect();
        let b: Vec<_> = second.shrinks().take(10).map(|c| *c.value()).collect();
        prop_assert_eq!(a, b);
    }

    // `generate` is `generate_sized` at the nominal size.
    #[test]
    fn prop_default_size_is_nominal(seed in any::<u64>()) {
        let generator = combined();
        let random = Random::new(seed);
        let default = generator.generate(&random).unwrap();
        let nominal = generator.generate_sized(&random, NOMINAL_SIZE).unwrap();
        prop_assert_eq!(default.value(), nominal.value());
    }
}

// ============================================================================
// Value semantics
// ============================================================================

proptest! {
    // A clone behaves exactly like the generator it was cloned from.
    #[test]
    fn prop_clone_is_equivalent(seed in any::<u64>(), size in 0usize..300) {
        let original = combined();
        let copy = original.clone();
        let random = Random::new(seed);
        let a = original.generate_sized(&random, size).unwrap();
        let b = copy.generate_sized(&random, size).unwrap();
        prop_assert_eq!(a.value(), b.value());
    }

    // Generated values stay in range for every size, shrinks included.
    #[test]
    fn prop_in_range_respects_bounds(
        seed in any::<u64>(),
        size in 0usize..300,
        min in -1000i32..1000,
        width in 1i32..1000,
    ) {
        let max = min + width;
        let tree = in_range(min, max).generate_sized(&Random::new(seed), size).unwrap();
        prop_assert!((min..max).contains(tree.value()));
        for child in tree.shrinks() {
            prop_assert!((min..max).contains(child.value()));
        }
    }
}
