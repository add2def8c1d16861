//! Lazy shrink trees produced by every generator invocation.

use std::fmt;
use std::rc::Rc;

/// Lazy sequence of child trees
pub type Shrinks<T> = Box<dyn Iterator<Item = Shrinkable<T>>>;

/// A generated value together with its lazily computed simplifications.
///
/// The root value is computed eagerly. Children are produced on demand by calling
/// [`Shrinkable::shrinks`], which starts a fresh sequence every time it is called.
/// Each child is itself a `Shrinkable`, so the whole structure is a tree that is
/// only ever materialised as far as a caller walks it.
pub struct Shrinkable<T> {
    value: T,
    shrinks: Rc<dyn Fn() -> Shrinks<T>>,
}

impl<T: 'static> Shrinkable<T> {
    /// Create a tree from a root value and a function producing its children
    pub fn new<F>(value: T, shrinks: F) -> Self
    where
        F: Fn() -> Shrinks<T> + 'static,
    {
        Self {
            value,
            shrinks: Rc::new(shrinks),
        }
    }

    /// A tree with no children
    pub fn just(value: T) -> Self {
        Self::new(value, || Box::new(std::iter::empty()))
    }

    /// A tree whose children at every level are `shrink(&node_value)`
    pub fn shrink_recur<F>(value: T, shrink: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> Box<dyn Iterator<Item = T>> + 'static,
    {
        Self::shrink_recur_rc(value, Rc::new(shrink))
    }

    fn shrink_recur_rc(value: T, shrink: Rc<dyn Fn(&T) -> Box<dyn Iterator<Item = T>>>) -> Self
    where
        T: Clone,
    {
        let seed = value.clone();
        Self::new(value, move || {
            let shrink_children = Rc::clone(&shrink);
            Box::new(
                shrink(&seed)
                    .map(move |child| Self::shrink_recur_rc(child, Rc::clone(&shrink_children))),
            )
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Start a new pass over the children of this node
    pub fn shrinks(&self) -> Shrinks<T> {
        (self.shrinks)()
    }

    /// Apply `f` to every value in the tree
    pub fn map<U, F>(self, f: F) -> Shrinkable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<U: 'static>(self, f: Rc<dyn Fn(T) -> U>) -> Shrinkable<U> {
        let Shrinkable { value, shrinks } = self;
        let mapped = f(value);
        Shrinkable::new(mapped, move || {
            let f = Rc::clone(&f);
            Box::new(shrinks().map(move |child| child.map_rc(Rc::clone(&f))))
        })
    }

    /// Remove every subtree whose root does not satisfy `predicate`.
    /// The root of `self` is kept as is.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter_rc(Rc::new(predicate))
    }

    fn filter_rc(self, predicate: Rc<dyn Fn(&T) -> bool>) -> Self {
        let Shrinkable { value, shrinks } = self;
        Self::new(value, move || {
            let keep = Rc::clone(&predicate);
            let predicate = Rc::clone(&predicate);
            Box::new(
                shrinks()
                    .filter(move |child| keep(child.value()))
                    .map(move |child| child.filter_rc(Rc::clone(&predicate))),
            )
        })
    }

    /// Combine two trees. The first component is shrunk before the second.
    pub fn zip<U>(self, other: Shrinkable<U>) -> Shrinkable<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        let first = self;
        let second = other;
        let value = (first.value.clone(), second.value.clone());
        Shrinkable::new(value, move || {
            let fixed_second = second.clone();
            let fixed_first = first.clone();
            Box::new(
                first
                    .shrinks()
                    .map(move |shrunk| shrunk.zip(fixed_second.clone()))
                    .chain(
                        second
                            .shrinks()
                            .map(move |shrunk| fixed_first.clone().zip(shrunk)),
                    ),
            )
        })
    }
}

impl<T: Clone> Clone for Shrinkable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            shrinks: Rc::clone(&self.shrinks),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shrinkable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shrinkable")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Candidate sequences used to build shrink trees
pub mod strategies {
    use num_traits::{CheckedSub, PrimInt};

    /// Integers between `target` and `value`, closest to `target` first.
    ///
    /// Each candidate halves the remaining distance to `value`; `value` itself is
    /// never yielded. When the distance does not fit in `T` only `target` is tried.
    pub fn towards<T>(value: T, target: T) -> Box<dyn Iterator<Item = T>>
    where
        T: PrimInt + 'static,
    {
        let two = T::one() + T::one();
        if value >= target {
            let Some(diff) = CheckedSub::checked_sub(&value, &target) else {
                return Box::new(std::iter::once(target));
            };
            Box::new(
                std::iter::successors(Some(diff), move |d| Some(*d / two))
                    .take_while(|d| *d != T::zero())
                    .map(move |d| value - d),
            )
        } else {
            let Some(diff) = CheckedSub::checked_sub(&target, &value) else {
                return Box::new(std::iter::once(target));
            };
            Box::new(
                std::iter::successors(Some(diff), move |d| Some(*d / two))
                    .take_while(|d| *d != T::zero())
                    .map(move |d| value + d),
            )
        }
    }

    /// `false` for `true`, nothing for `false`
    pub fn bool_shrink(value: bool) -> Box<dyn Iterator<Item = bool>> {
        if value {
            Box::new(std::iter::once(false))
        } else {
            Box::new(std::iter::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::strategies::towards;
    use super::*;

    fn child_values<T: Clone + 'static>(shrinkable: &Shrinkable<T>) -> Vec<T> {
        shrinkable.shrinks().map(|s| s.value().clone()).collect()
    }

    #[test]
    fn test_just_has_no_children() {
        let tree = Shrinkable::just(42);
        assert_eq!(*tree.value(), 42);
        assert_eq!(tree.shrinks().count(), 0);
    }

    #[test]
    fn test_towards_positive() {
        let candidates: Vec<i32> = towards(10, 0).collect();
        assert_eq!(candidates, vec![0, 5, 8, 9]);
    }

    #[test]
    fn test_towards_negative() {
        let candidates: Vec<i32> = towards(-10, 0).collect();
        assert_eq!(candidates, vec![0, -5, -8, -9]);
    }

    #[test]
    fn test_towards_non_zero_target() {
        let candidates: Vec<u8> = towards(20, 16).collect();
        assert_eq!(candidates, vec![16, 18, 19]);
        assert_eq!(towards(3u8, 3).count(), 0);
    }

    #[test]
    fn test_towards_overflowing_distance() {
        let candidates: Vec<i8> = towards(i8::MIN, i8::MAX).collect();
        assert_eq!(candidates, vec![i8::MAX]);
    }

    #[test]
    fn test_shrinks_are_restartable() {
        let tree = Shrinkable::shrink_recur(6u32, |&v| towards(v, 0));
        assert_eq!(child_values(&tree), child_values(&tree));
    }

    #[test]
    fn test_shrink_recur_descends() {
        let tree = Shrinkable::shrink_recur(6u32, |&v| towards(v, 0));
        assert_eq!(child_values(&tree), vec![0, 3, 5]);
        let three = tree.shrinks().nth(1).unwrap();
        assert_eq!(child_values(&three), vec![0, 2]);
    }

    #[test]
    fn test_map_applies_to_whole_tree() {
        let tree = Shrinkable::shrink_recur(4u32, |&v| towards(v, 0)).map(|v| v * 10);
        assert_eq!(*tree.value(), 40);
        assert_eq!(child_values(&tree), vec![0, 20, 30]);
        let twenty = tree.shrinks().nth(1).unwrap();
        assert_eq!(child_values(&twenty), vec![0, 10]);
    }

    #[test]
    fn test_filter_keeps_root_and_prunes_children() {
        let tree = Shrinkable::shrink_recur(9u32, |&v| towards(v, 0)).filter(|v| v % 2 == 1);
        assert_eq!(*tree.value(), 9);
        assert!(child_values(&tree).iter().all(|v| v % 2 == 1));
    }

    #[test]
    fn test_zip_shrinks_first_then_second() {
        let left = Shrinkable::new(true, || Box::new(std::iter::once(Shrinkable::just(false))));
        let right = Shrinkable::new(2u8, || Box::new(std::iter::once(Shrinkable::just(0))));
        let tree = left.zip(right);
        assert_eq!(*tree.value(), (true, 2));
        assert_eq!(child_values(&tree), vec![(false, 2), (true, 0)]);
    }

    #[test]
    fn test_clone_shares_children() {
        let tree = Shrinkable::shrink_recur(8i64, |&v| towards(v, 0));
        let copy = tree.clone();
        assert_eq!(child_values(&tree), child_values(&copy));
    }

    #[test]
    fn test_debug_shows_root() {
        let tree = Shrinkable::just(3);
        assert!(format!("{:?}", tree).contains("value: 3"));
    }
}
