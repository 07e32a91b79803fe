use super::{
    compare, count, natural, Error, IntoOrdering, NaturalOrder, Pattern, Result, ToCount, Truthy,
};
use crate::{
    lazy::{op, Enumerator, Operation},
    sort::{KeyedEntry, SortStrategy, Sorter},
};
use auto_enums::auto_enum;
use std::{
    cmp::Ordering,
    collections::VecDeque,
    hash::Hash,
    ops::ControlFlow::{self, *},
};

/// Keys in order of their first occurrence, each with its elements in traversal order.
pub type Groups<K, T> = indexmap::IndexMap<K, Vec<T>, ahash::RandomState>;

/// Rows of `zip`: primary element followed by the element at the same position
/// of each other sequence.
pub type ZipRow<T, U = T> = (T, Vec<Option<U>>);

/// What a callback returns to continue or stop traversal.
pub trait Flow {
    fn flow(self) -> ControlFlow<()>;
}

impl Flow for () {
    fn flow(self) -> ControlFlow<()> {
        Continue(())
    }
}

impl Flow for ControlFlow<()> {
    fn flow(self) -> ControlFlow<()> {
        self
    }
}

/// Sequence that can be visited element by element, in a fixed order.
///
/// Implementors provide [`each`](Enumerable::each), everything else is derived from it
/// without assuming indexing, size, or that a second traversal sees the same elements.
/// Operations traverse once unless they document buffering.
///
/// Callbacks of visiting operations return `()` or [`ControlFlow`], `Break` stops
/// the traversal early.
pub trait Enumerable {
    type Item;

    /// Calls `f` once per element, in order, until it breaks or elements run out.
    /// Returns `Break` if `f` did.
    fn each<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Item) -> ControlFlow<()>;

    // *------------------------------- Visiting -------------------------------* //

    fn each_entry<R: Flow>(&self, mut f: impl FnMut(Self::Item) -> R) {
        let _ = self.each(|item| f(item).flow());
    }

    /// Pairs each element with its 0-based position.
    fn each_with_index<R: Flow>(&self, f: impl FnMut(Self::Item, usize) -> R) {
        let _ = indexed(self, f);
    }

    /// Visits consecutive chunks of `n` elements, the last one possibly shorter.
    fn each_slice<R: Flow>(
        &self,
        n: impl ToCount,
        f: impl FnMut(Vec<Self::Item>) -> R,
    ) -> Result<()> {
        let n = count::size("each_slice", n, 1, "invalid slice size")?;
        let _ = slices(self, n, f);
        Ok(())
    }

    /// Visits every window of `n` consecutive elements.
    /// Nothing if there are fewer than `n`.
    fn each_cons<R: Flow>(
        &self,
        n: impl ToCount,
        f: impl FnMut(Vec<Self::Item>) -> R,
    ) -> Result<()>
    where
        Self::Item: Clone,
    {
        let n = count::size("each_cons", n, 1, "invalid size")?;
        let _ = windows(self, n, f);
        Ok(())
    }

    /// Visits all elements `n` times.
    ///
    /// Elements are buffered during the first, and only, traversal. Later rounds replay
    /// the buffer so changes to the source after the first pass have no effect.
    /// Does nothing for `n <= 0` or an empty source.
    fn cycle<R: Flow>(&self, n: impl ToCount, f: impl FnMut(Self::Item) -> R) -> Result<()>
    where
        Self::Item: Clone,
    {
        let rounds = usize::try_from(n.to_count()?.max(0))
            .map_err(|_| Error::coercion::<i64>("round count is out of range"))?;
        let _ = replay(self, Some(rounds), f);
        Ok(())
    }

    /// Visits all elements over and over until `f` breaks.
    /// Returns at once on an empty source.
    fn cycle_forever(&self, f: impl FnMut(Self::Item) -> ControlFlow<()>)
    where
        Self::Item: Clone,
    {
        let _ = replay(self, None, f);
    }

    /// Visits elements back to front, after collecting all of them.
    fn reverse_each<R: Flow>(&self, f: impl FnMut(Self::Item) -> R) {
        let _ = reversed(self, f);
    }

    // *------------------------------ Transform -------------------------------* //

    fn map<U>(&self, mut f: impl FnMut(Self::Item) -> U) -> Vec<U> {
        let mut mapped = Vec::new();
        let _ = self.each(|item| {
            mapped.push(f(item));
            Continue(())
        });
        mapped
    }

    fn collect_with<U>(&self, f: impl FnMut(Self::Item) -> U) -> Vec<U> {
        self.map(f)
    }

    fn select(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> Vec<Self::Item> {
        let mut selected = Vec::new();
        let _ = self.each(|item| {
            if predicate(&item) {
                selected.push(item);
            }
            Continue(())
        });
        selected
    }

    fn find_all(&self, predicate: impl FnMut(&Self::Item) -> bool) -> Vec<Self::Item> {
        self.select(predicate)
    }

    fn reject(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> Vec<Self::Item> {
        self.select(|item| !predicate(item))
    }

    /// Elements matched by `pattern`.
    fn grep(&self, pattern: impl Pattern<Self::Item>) -> Vec<Self::Item> {
        self.select(|item| pattern.matches(item))
    }

    /// `f` of elements matched by `pattern`.
    fn grep_map<U>(
        &self,
        pattern: impl Pattern<Self::Item>,
        mut f: impl FnMut(Self::Item) -> U,
    ) -> Vec<U> {
        let mut mapped = Vec::new();
        let _ = self.each(|item| {
            if pattern.matches(&item) {
                mapped.push(f(item));
            }
            Continue(())
        });
        mapped
    }

    fn to_a(&self) -> Vec<Self::Item> {
        self.map(|item| item)
    }

    fn entries(&self) -> Vec<Self::Item> {
        self.to_a()
    }

    // *-------------------------------- Search --------------------------------* //

    /// First element for which `predicate` holds.
    fn find(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> Option<Self::Item> {
        let mut found = None;
        let _ = self.each(|item| {
            if predicate(&item) {
                found = Some(item);
                Break(())
            } else {
                Continue(())
            }
        });
        found
    }

    fn detect(&self, predicate: impl FnMut(&Self::Item) -> bool) -> Option<Self::Item> {
        self.find(predicate)
    }

    /// As `find` but falls back to `if_none` when nothing matched.
    fn find_or_else(
        &self,
        predicate: impl FnMut(&Self::Item) -> bool,
        if_none: impl FnOnce() -> Self::Item,
    ) -> Self::Item {
        self.find(predicate).unwrap_or_else(if_none)
    }

    /// Position of the first element equal to `value`.
    fn find_index<V: ?Sized>(&self, value: &V) -> Option<usize>
    where
        Self::Item: PartialEq<V>,
    {
        self.find_index_by(|item| item == value)
    }

    /// Position of the first element for which `predicate` holds.
    fn find_index_by(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> Option<usize> {
        let mut position = None;
        let _ = indexed(self, |item, i| {
            if predicate(&item) {
                position = Some(i);
                Break(())
            } else {
                Continue(())
            }
        });
        position
    }

    fn first(&self) -> Option<Self::Item> {
        self.find(|_| true)
    }

    fn first_n(&self, n: impl ToCount) -> Result<Vec<Self::Item>> {
        self.take(n)
    }

    fn include<V: ?Sized>(&self, value: &V) -> bool
    where
        Self::Item: PartialEq<V>,
    {
        self.any(|item| item == value)
    }

    fn member<V: ?Sized>(&self, value: &V) -> bool
    where
        Self::Item: PartialEq<V>,
    {
        self.include(value)
    }

    // *------------------------------ Quantifiers -----------------------------* //

    fn all(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> bool {
        self.each(|item| if predicate(&item) { Continue(()) } else { Break(()) })
            .is_continue()
    }

    fn any(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> bool {
        self.each(|item| if predicate(&item) { Break(()) } else { Continue(()) })
            .is_break()
    }

    fn none(&self, predicate: impl FnMut(&Self::Item) -> bool) -> bool {
        !self.any(predicate)
    }

    /// Exactly one element satisfies `predicate`.
    /// Stops at the second match.
    fn one(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> bool {
        let mut found = false;
        let flow = self.each(|item| {
            if predicate(&item) {
                if found {
                    return Break(());
                }
                found = true;
            }
            Continue(())
        });
        flow.is_continue() && found
    }

    fn all_truthy(&self) -> bool
    where
        Self::Item: Truthy,
    {
        self.all(Truthy::truthy)
    }

    fn any_truthy(&self) -> bool
    where
        Self::Item: Truthy,
    {
        self.any(Truthy::truthy)
    }

    fn none_truthy(&self) -> bool
    where
        Self::Item: Truthy,
    {
        self.none(Truthy::truthy)
    }

    fn one_truthy(&self) -> bool
    where
        Self::Item: Truthy,
    {
        self.one(Truthy::truthy)
    }

    // *------------------------------- Counting -------------------------------* //

    fn count(&self) -> usize {
        self.count_by(|_| true)
    }

    fn count_of<V: ?Sized>(&self, value: &V) -> usize
    where
        Self::Item: PartialEq<V>,
    {
        self.count_by(|item| item == value)
    }

    fn count_by(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> usize {
        let mut count = 0;
        let _ = self.each(|item| {
            if predicate(&item) {
                count += 1;
            }
            Continue(())
        });
        count
    }

    // *------------------------------- Reduction ------------------------------* //

    /// Folds from the left, seeded with the first element.
    /// `op` is never called with the seed alone, `None` if empty.
    fn reduce(&self, mut op: impl FnMut(Self::Item, Self::Item) -> Self::Item) -> Option<Self::Item> {
        let mut accumulator = None;
        let _ = self.each(|item| {
            accumulator = Some(match accumulator.take() {
                None => item,
                Some(accumulator) => op(accumulator, item),
            });
            Continue(())
        });
        accumulator
    }

    /// Folds from the left, starting with `initial`.
    fn inject<A>(&self, initial: A, mut op: impl FnMut(A, Self::Item) -> A) -> A {
        let mut accumulator = Some(initial);
        let _ = self.each(|item| {
            accumulator = accumulator.take().map(|accumulator| op(accumulator, item));
            Continue(())
        });
        accumulator.expect("Should be present")
    }

    // *------------------------------- Grouping -------------------------------* //

    /// (matching, rest) both in traversal order.
    fn partition(
        &self,
        mut predicate: impl FnMut(&Self::Item) -> bool,
    ) -> (Vec<Self::Item>, Vec<Self::Item>) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let _ = self.each(|item| {
            if predicate(&item) {
                left.push(item);
            } else {
                right.push(item);
            }
            Continue(())
        });
        (left, right)
    }

    fn group_by<K: Hash + Eq>(&self, mut key: impl FnMut(&Self::Item) -> K) -> Groups<K, Self::Item> {
        let mut groups = Groups::default();
        let _ = self.each(|item| {
            groups.entry(key(&item)).or_insert_with(Vec::new).push(item);
            Continue(())
        });
        groups
    }

    /// Rows of each element with elements at the same position in `others`,
    /// `None` where one is shorter. Every one of `others` is collected first.
    fn zip<O>(&self, others: &[O]) -> Vec<ZipRow<Self::Item, O::Item>>
    where
        O: Enumerable,
        O::Item: Clone,
    {
        let mut rows = Vec::new();
        self.zip_each(others, |row| rows.push(row));
        rows
    }

    /// As `zip` but hands each row to `f` as soon as it's built.
    fn zip_each<O, R: Flow>(
        &self,
        others: &[O],
        mut f: impl FnMut(ZipRow<Self::Item, O::Item>) -> R,
    ) where
        O: Enumerable,
        O::Item: Clone,
    {
        let others = others.iter().map(|other| other.to_a()).collect::<Vec<_>>();
        self.each_with_index(|item, i| {
            let rest = others.iter().map(|other| other.get(i).cloned()).collect();
            f((item, rest))
        });
    }

    // *--------------------------- Bounded extraction -------------------------* //

    /// First `n` elements, stops traversing once they are collected.
    fn take(&self, n: impl ToCount) -> Result<Vec<Self::Item>> {
        let n = count::size("take", n, 0, "attempt to take negative size")?;
        let mut taken = Vec::new();
        if n > 0 {
            let _ = self.each(|item| {
                taken.push(item);
                if taken.len() >= n {
                    Break(())
                } else {
                    Continue(())
                }
            });
        }
        Ok(taken)
    }

    /// All but the first `n` elements.
    fn drop(&self, n: impl ToCount) -> Result<Vec<Self::Item>> {
        let n = count::size("drop", n, 0, "attempt to drop negative size")?;
        let mut seen = 0;
        Ok(self.select(|_| {
            seen += 1;
            seen > n
        }))
    }

    /// Elements before the first one for which `predicate` doesn't hold.
    fn take_while(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> Vec<Self::Item> {
        let mut taken = Vec::new();
        let _ = self.each(|item| {
            if predicate(&item) {
                taken.push(item);
                Continue(())
            } else {
                Break(())
            }
        });
        taken
    }

    /// Elements from the first one for which `predicate` doesn't hold.
    fn drop_while(&self, mut predicate: impl FnMut(&Self::Item) -> bool) -> Vec<Self::Item> {
        let mut dropping = true;
        self.select(|item| {
            dropping = dropping && predicate(item);
            !dropping
        })
    }

    // *-------------------------------- Extrema -------------------------------* //

    /// Smallest element by natural order, earliest of equals.
    fn minimum(&self) -> Result<Option<Self::Item>>
    where
        Self::Item: NaturalOrder,
    {
        extreme(self, |item, current| Ok(natural(item, current)? == Ordering::Less))
    }

    /// Largest element by natural order, earliest of equals.
    fn maximum(&self) -> Result<Option<Self::Item>>
    where
        Self::Item: NaturalOrder,
    {
        extreme(self, |item, current| {
            Ok(natural(item, current)? == Ordering::Greater)
        })
    }

    fn minimum_with<R: IntoOrdering>(
        &self,
        mut cmp: impl FnMut(&Self::Item, &Self::Item) -> R,
    ) -> Result<Option<Self::Item>> {
        extreme(self, |item, current| {
            Ok(compare(&mut cmp, item, current)? == Ordering::Less)
        })
    }

    fn maximum_with<R: IntoOrdering>(
        &self,
        mut cmp: impl FnMut(&Self::Item, &Self::Item) -> R,
    ) -> Result<Option<Self::Item>> {
        extreme(self, |item, current| {
            Ok(compare(&mut cmp, item, current)? == Ordering::Greater)
        })
    }

    /// Element with the smallest `key`, earliest of equals.
    fn min_by<K: NaturalOrder>(
        &self,
        key: impl FnMut(&Self::Item) -> K,
    ) -> Result<Option<Self::Item>> {
        extreme_by(self, key, |key, current| {
            Ok(natural(current, key)? == Ordering::Greater)
        })
    }

    /// Element with the largest `key`, earliest of equals.
    fn max_by<K: NaturalOrder>(
        &self,
        key: impl FnMut(&Self::Item) -> K,
    ) -> Result<Option<Self::Item>> {
        extreme_by(self, key, |key, current| {
            Ok(natural(current, key)? == Ordering::Less)
        })
    }

    /// (smallest, largest) in one pass.
    fn minmax(&self) -> Result<Option<(Self::Item, Self::Item)>>
    where
        Self::Item: NaturalOrder + Clone,
    {
        self.minmax_with(|a, b| natural(a, b))
    }

    fn minmax_with<R: IntoOrdering>(
        &self,
        mut cmp: impl FnMut(&Self::Item, &Self::Item) -> R,
    ) -> Result<Option<(Self::Item, Self::Item)>>
    where
        Self::Item: Clone,
    {
        let mut extremes: Option<(Self::Item, Self::Item)> = None;
        let _ = try_each(self, |item| {
            match extremes.as_mut() {
                None => extremes = Some((item.clone(), item)),
                Some((min, max)) => {
                    let below = compare(&mut cmp, min, &item)? == Ordering::Greater;
                    let above = compare(&mut cmp, max, &item)? == Ordering::Less;
                    if below {
                        *min = item.clone();
                    }
                    if above {
                        *max = item;
                    }
                }
            }
            Ok(Continue(()))
        })?;
        Ok(extremes)
    }

    /// Elements with the (smallest, largest) `key` in one pass, earliest of equals.
    fn minmax_by<K: NaturalOrder + Clone>(
        &self,
        mut key: impl FnMut(&Self::Item) -> K,
    ) -> Result<Option<(Self::Item, Self::Item)>>
    where
        Self::Item: Clone,
    {
        type Extreme<T, K> = (T, K);
        let mut extremes: Option<(Extreme<Self::Item, K>, Extreme<Self::Item, K>)> = None;
        let _ = try_each(self, |item| {
            let result = key(&item);
            match extremes.as_mut() {
                None => extremes = Some(((item.clone(), result.clone()), (item, result))),
                Some((min, max)) => {
                    let below = natural(&min.1, &result)? == Ordering::Greater;
                    let above = natural(&max.1, &result)? == Ordering::Less;
                    if below {
                        *min = (item.clone(), result.clone());
                    }
                    if above {
                        *max = (item, result);
                    }
                }
            }
            Ok(Continue(()))
        })?;
        Ok(extremes.map(|((min, _), (max, _))| (min, max)))
    }

    // *-------------------------------- Sorting -------------------------------* //

    /// Sorted copy by natural order. Stable.
    fn sort(&self) -> Result<Vec<Self::Item>>
    where
        Self::Item: NaturalOrder,
    {
        Sorter::new().sort(self, |a, b| natural(a, b))
    }

    /// Sorted copy by comparator. Stable.
    fn sort_with<R: IntoOrdering>(
        &self,
        cmp: impl FnMut(&Self::Item, &Self::Item) -> R,
    ) -> Result<Vec<Self::Item>> {
        Sorter::new().sort(self, cmp)
    }

    fn sort_using<S, R>(
        &self,
        strategy: S,
        cmp: impl FnMut(&Self::Item, &Self::Item) -> R,
    ) -> Result<Vec<Self::Item>>
    where
        S: SortStrategy<Self::Item>,
        R: IntoOrdering,
    {
        Sorter::with_strategy(strategy).sort(self, cmp)
    }

    /// Sorted copy by `key`, computed once per element. Stable.
    fn sort_by<K: NaturalOrder>(
        &self,
        key: impl FnMut(&Self::Item) -> K,
    ) -> Result<Vec<Self::Item>> {
        Sorter::new().sort_by(self, key)
    }

    fn sort_by_using<S, K>(
        &self,
        strategy: S,
        key: impl FnMut(&Self::Item) -> K,
    ) -> Result<Vec<Self::Item>>
    where
        S: SortStrategy<KeyedEntry<Self::Item, K>>,
        K: NaturalOrder,
    {
        Sorter::with_strategy(strategy).sort_by(self, key)
    }

    // *-------------------------------- Deferred ------------------------------* //

    /// Operation `op` over this sequence, performed once driven.
    /// Nothing is traversed until then.
    fn to_enum<O: Operation<Self>>(&self, op: O) -> Enumerator<'_, Self, O> {
        Enumerator::new(self, op)
    }

    fn lazy(&self) -> Enumerator<'_, Self, op::Each> {
        self.to_enum(op::Each)
    }
}

/// Traverses while `f` succeeds, aborting at the first error.
pub(crate) fn try_each<E: Enumerable + ?Sized>(
    source: &E,
    mut f: impl FnMut(E::Item) -> Result<ControlFlow<()>>,
) -> Result<ControlFlow<()>> {
    let mut error = None;
    let flow = source.each(|item| match f(item) {
        Ok(flow) => flow,
        Err(e) => {
            error = Some(e);
            Break(())
        }
    });
    match error {
        Some(error) => Err(error),
        None => Ok(flow),
    }
}

pub(crate) fn indexed<E: Enumerable + ?Sized, R: Flow>(
    source: &E,
    mut f: impl FnMut(E::Item, usize) -> R,
) -> ControlFlow<()> {
    let mut i = 0;
    source.each(|item| {
        let flow = f(item, i).flow();
        i += 1;
        flow
    })
}

pub(crate) fn slices<E: Enumerable + ?Sized, R: Flow>(
    source: &E,
    n: usize,
    mut f: impl FnMut(Vec<E::Item>) -> R,
) -> ControlFlow<()> {
    let mut slice = Vec::new();
    source.each(|item| {
        slice.push(item);
        if slice.len() == n {
            f(std::mem::take(&mut slice)).flow()
        } else {
            Continue(())
        }
    })?;
    if !slice.is_empty() {
        f(slice).flow()?;
    }
    Continue(())
}

pub(crate) fn windows<E: Enumerable + ?Sized, R: Flow>(
    source: &E,
    n: usize,
    mut f: impl FnMut(Vec<E::Item>) -> R,
) -> ControlFlow<()>
where
    E::Item: Clone,
{
    let mut window = VecDeque::new();
    source.each(|item| {
        window.push_back(item);
        if window.len() > n {
            window.pop_front();
        }
        if window.len() == n {
            f(window.iter().cloned().collect()).flow()
        } else {
            Continue(())
        }
    })
}

/// `rounds` of `None` replays until `f` breaks.
pub(crate) fn replay<E: Enumerable + ?Sized, R: Flow>(
    source: &E,
    rounds: Option<usize>,
    mut f: impl FnMut(E::Item) -> R,
) -> ControlFlow<()>
where
    E::Item: Clone,
{
    if rounds == Some(0) {
        return Continue(());
    }

    let mut buffer = Vec::new();
    source.each(|item| {
        buffer.push(item.clone());
        f(item).flow()
    })?;
    if buffer.is_empty() {
        return Continue(());
    }

    for _ in later_rounds(rounds) {
        for item in &buffer {
            f(item.clone()).flow()?;
        }
    }
    Continue(())
}

#[auto_enum(Iterator)]
fn later_rounds(rounds: Option<usize>) -> impl Iterator<Item = usize> {
    match rounds {
        Some(rounds) => 1..rounds,
        None => 1..,
    }
}

pub(crate) fn reversed<E: Enumerable + ?Sized, R: Flow>(
    source: &E,
    mut f: impl FnMut(E::Item) -> R,
) -> ControlFlow<()> {
    for item in source.to_a().into_iter().rev() {
        f(item).flow()?;
    }
    Continue(())
}

/// Running extreme, replaced only when `better(item, current)`.
fn extreme<E: Enumerable + ?Sized>(
    source: &E,
    mut better: impl FnMut(&E::Item, &E::Item) -> Result<bool>,
) -> Result<Option<E::Item>> {
    let mut current = None;
    let _ = try_each(source, |item| {
        let replace = match &current {
            None => true,
            Some(current) => better(&item, current)?,
        };
        if replace {
            current = Some(item);
        }
        Ok(Continue(()))
    })?;
    Ok(current)
}

/// Running extreme of keys, replaced only when `better(key, current_key)`.
fn extreme_by<E: Enumerable + ?Sized, K>(
    source: &E,
    mut key: impl FnMut(&E::Item) -> K,
    mut better: impl FnMut(&K, &K) -> Result<bool>,
) -> Result<Option<E::Item>> {
    let mut current: Option<(E::Item, K)> = None;
    let _ = try_each(source, |item| {
        let result = key(&item);
        let replace = match &current {
            None => true,
            Some((_, current)) => better(&result, current)?,
        };
        if replace {
            current = Some((item, result));
        }
        Ok(Continue(()))
    })?;
    Ok(current.map(|(item, _)| item))
}
