use super::{SortStrategy, Sorter};
use crate::core::{natural, Enumerable, NaturalOrder, Result};
use getset::Getters;
use log::*;

/// Element paired with its precomputed sort key.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct KeyedEntry<T, K> {
    value: T,
    key: K,
}

impl<T, K> KeyedEntry<T, K> {
    pub fn new(value: T, key: K) -> Self {
        KeyedEntry { value, key }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<S> Sorter<S> {
    /// Sorted copy of `sequence` ordered by natural order of `key`.
    ///
    /// `key` is called exactly once per element, the sort only compares
    /// the precomputed keys. Elements with equal keys keep traversal order.
    pub fn sort_by<E, K>(
        &self,
        sequence: &E,
        mut key: impl FnMut(&E::Item) -> K,
    ) -> Result<Vec<E::Item>>
    where
        E: Enumerable + ?Sized,
        K: NaturalOrder,
        S: SortStrategy<KeyedEntry<E::Item, K>>,
    {
        let entries = sequence.map(|item| {
            let computed = key(&item);
            KeyedEntry::new(item, computed)
        });
        trace!("Computed {} sort keys", entries.len());

        let sorted = self
            .strategy()
            .sort(entries, &mut |a, b| natural(a.key(), b.key()))?;
        Ok(sorted.into_iter().map(KeyedEntry::into_value).collect())
    }
}

/// Sorted copy of `sequence` by `key`, with the default strategy.
pub fn sort_by<E, K>(sequence: &E, key: impl FnMut(&E::Item) -> K) -> Result<Vec<E::Item>>
where
    E: Enumerable + ?Sized,
    K: NaturalOrder,
{
    Sorter::new().sort_by(sequence, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::sort::MergeSort;
    use std::cell::Cell;

    #[test]
    fn by_length() {
        let words = vec!["albatross", "dog", "horse"];
        assert_eq!(
            sort_by(&words, |w| w.len()),
            Ok(vec!["dog", "horse", "albatross"])
        );
    }

    #[test]
    fn key_computed_once_per_element() {
        let calls = Cell::new(0);
        let items: Vec<i32> = vec![5, 3, 9, 1, 7, 3, 2];
        let sorted = sort_by(&items, |x| {
            calls.set(calls.get() + 1);
            -x
        });
        assert_eq!(sorted, Ok(vec![9, 7, 5, 3, 3, 2, 1]));
        assert_eq!(calls.get(), items.len());

        calls.set(0);
        Sorter::with_strategy(MergeSort)
            .sort_by(&items, |x| {
                calls.set(calls.get() + 1);
                *x
            })
            .unwrap();
        assert_eq!(calls.get(), items.len());
    }

    #[test]
    fn equal_keys_keep_order() {
        let words = vec!["pear", "fig", "plum", "kiwi", "yam"];
        assert_eq!(
            sort_by(&words, |w| w.len()),
            Ok(vec!["fig", "yam", "pear", "plum", "kiwi"])
        );
    }

    #[test]
    fn incomparable_keys_fail() {
        let items = vec![1, 2, 3];
        let result = sort_by(&items, |x| {
            if *x == 2 {
                Value::from("two")
            } else {
                Value::Int(i64::from(*x))
            }
        });
        assert!(result.unwrap_err().is_comparison());
    }

    #[test]
    fn entry_accessors() {
        let entry = KeyedEntry::new("dog", 3);
        assert_eq!(*entry.key(), 3);
        assert_eq!(*entry.value(), "dog");
        assert_eq!(entry.into_value(), "dog");
    }
}
