use std::ops::{Range, RangeFrom, RangeInclusive, RangeTo, RangeToInclusive};

/// Case match used by `grep`.
///
/// Ranges match what they contain, references match equal elements.
pub trait Pattern<T> {
    fn matches(&self, item: &T) -> bool;
}

impl<T, V: ?Sized> Pattern<T> for &V
where
    T: PartialEq<V>,
{
    fn matches(&self, item: &T) -> bool {
        item == *self
    }
}

macro_rules! range_pattern {
    ($($range:ident),*) => {
        $(
            impl<T: PartialOrd> Pattern<T> for $range<T> {
                fn matches(&self, item: &T) -> bool {
                    self.contains(item)
                }
            }
        )*
    };
}

range_pattern!(Range, RangeInclusive, RangeFrom, RangeTo, RangeToInclusive);

/// Matches elements for which the predicate holds.
pub struct Matching<F>(pub F);

impl<T, F: Fn(&T) -> bool> Pattern<T> for Matching<F> {
    fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}
