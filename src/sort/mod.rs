//! Sorting over an owned snapshot of a sequence.
//!
//! [`Sorter`] takes elements out of any [`Enumerable`] in one traversal and hands them
//! to a [`SortStrategy`]. The sequence itself is never reordered.
//!
//! Strategies must be stable, elements the comparator reports equal keep their
//! traversal order. [`Quicksort`] is the default, [`MergeSort`] bounds the number of
//! comparisons to O(n log n). Any function with the strategy signature is a strategy too.

mod keyed;
mod merge;
mod quick;

pub use keyed::*;
pub use merge::*;
pub use quick::*;

use crate::core::{compare, natural, Enumerable, IntoOrdering, NaturalOrder, Result};
use log::*;
use std::cmp::Ordering;

/// Comparator as seen by strategies.
pub type Comparator<'c, T> = dyn FnMut(&T, &T) -> Result<Ordering> + 'c;

pub trait SortStrategy<T> {
    /// Stable sort of `items`.
    /// First comparator error aborts the sort and is returned.
    fn sort(&self, items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>>;
}

impl<T, F> SortStrategy<T> for F
where
    F: Fn(Vec<T>, &mut Comparator<'_, T>) -> Result<Vec<T>>,
{
    fn sort(&self, items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>> {
        self(items, cmp)
    }
}

/// Sorting service over any sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sorter<S = Quicksort> {
    strategy: S,
}

impl Sorter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Sorter<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Sorted copy of `sequence` by comparator.
    pub fn sort<E, R>(
        &self,
        sequence: &E,
        mut cmp: impl FnMut(&E::Item, &E::Item) -> R,
    ) -> Result<Vec<E::Item>>
    where
        E: Enumerable + ?Sized,
        R: IntoOrdering,
        S: SortStrategy<E::Item>,
    {
        let items = sequence.to_a();
        debug!(
            "Sorting {} elements of {}",
            items.len(),
            std::any::type_name::<E::Item>()
        );
        self.strategy.sort(items, &mut |a, b| compare(&mut cmp, a, b))
    }

    /// Sorted copy of `sequence` by natural order.
    pub fn sort_natural<E>(&self, sequence: &E) -> Result<Vec<E::Item>>
    where
        E: Enumerable + ?Sized,
        E::Item: NaturalOrder,
        S: SortStrategy<E::Item>,
    {
        self.sort(sequence, |a, b| natural(a, b))
    }
}

/// Sorted copy of `sequence` by comparator, with the default strategy.
pub fn sort<E, R>(
    sequence: &E,
    cmp: impl FnMut(&E::Item, &E::Item) -> R,
) -> Result<Vec<E::Item>>
where
    E: Enumerable + ?Sized,
    R: IntoOrdering,
{
    Sorter::new().sort(sequence, cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, Once, TypeInfo, Value};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Stable by construction, quadratic.
    fn insertion<T>(items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>> {
        let mut sorted: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            let mut at = sorted.len();
            while at > 0 && cmp(&sorted[at - 1], &item)? == Ordering::Greater {
                at -= 1;
            }
            sorted.insert(at, item);
        }
        Ok(sorted)
    }

    fn random_pairs(rng: &mut StdRng, len: usize) -> Vec<(u8, usize)> {
        (0..len).map(|i| (rng.gen_range(0..8), i)).collect()
    }

    fn by_key(a: &(u8, usize), b: &(u8, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn check_sorted_stable(original: &[(u8, usize)], sorted: &[(u8, usize)]) {
        let mut expected = original.to_vec();
        <[_]>::sort_by(&mut expected, by_key);
        assert_eq!(sorted, expected.as_slice());
    }

    #[test]
    fn strategies_agree_with_std_stable_sort() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [0, 1, 2, 3, 10, 100, 500] {
            let items = random_pairs(&mut rng, len);
            check_sorted_stable(&items, &Sorter::new().sort(&items, by_key).unwrap());
            check_sorted_stable(
                &items,
                &Sorter::with_strategy(MergeSort).sort(&items, by_key).unwrap(),
            );
            check_sorted_stable(
                &items,
                &Sorter::with_strategy(insertion::<(u8, usize)>)
                    .sort(&items, by_key)
                    .unwrap(),
            );
        }
    }

    #[test]
    fn idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let items = random_pairs(&mut rng, 200);
        let once = sort(&items, by_key).unwrap();
        let twice = sort(&once, by_key).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn does_not_touch_source() {
        let items = vec![3, 1, 2];
        assert_eq!(Sorter::new().sort_natural(&items), Ok(vec![1, 2, 3]));
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn single_pass_source() {
        let source = Once::new(vec!["rhea", "kea", "flea"]);
        assert_eq!(
            Sorter::new().sort_natural(&source),
            Ok(vec!["flea", "kea", "rhea"])
        );
    }

    #[test]
    fn descending_comparator() {
        let items: Vec<i32> = (1..=10).collect();
        assert_eq!(
            sort(&items, |a, b| b.cmp(a)),
            Ok((1..=10).rev().collect::<Vec<_>>())
        );
        assert_eq!(
            sort(&items, |a: &i32, b: &i32| b - a),
            sort(&items, |a, b| b.cmp(a))
        );
    }

    #[test]
    fn incomparable_elements_fail() {
        let items = vec![Value::Int(3), Value::from("x"), Value::Int(1)];
        assert_eq!(
            Sorter::new().sort_natural(&items),
            Err(Error::comparison(
                TypeInfo::named("String"),
                TypeInfo::named("Integer")
            ))
        );
        assert!(Sorter::with_strategy(MergeSort)
            .sort_natural(&items)
            .unwrap_err()
            .is_comparison());
        assert!(sort(&vec![1, 2], |_, _| None::<Ordering>)
            .unwrap_err()
            .is_comparison());
    }
}
