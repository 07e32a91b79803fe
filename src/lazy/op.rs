//! Operations [`Enumerator`] can defer.
//!
//! Each operation is a value carrying its arguments. Operations whose callback
//! receives plain elements traverse the origin unchanged when used as sequences.

use super::{Enumerator, Operation};
use crate::core::{
    count, indexed, replay, reversed, slices, windows, Enumerable, Error, Flow, Groups,
    NaturalOrder, Result, ToCount,
};
use std::{hash::Hash, ops::ControlFlow};

macro_rules! element_ops {
    ($($op:ident => $name:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $op;

            impl<S: Enumerable + ?Sized> Operation<S> for $op {
                type Yield = S::Item;

                const NAME: &'static str = $name;

                fn traverse<F>(&self, origin: &S, f: F) -> ControlFlow<()>
                where
                    F: FnMut(S::Item) -> ControlFlow<()>,
                {
                    origin.each(f)
                }
            }
        )*
    };
}

element_ops!(
    Each => "each",
    Map => "map",
    Select => "select",
    Reject => "reject",
    Find => "find",
    FindIndex => "find_index",
    Partition => "partition",
    GroupBy => "group_by",
    TakeWhile => "take_while",
    DropWhile => "drop_while",
    SortBy => "sort_by",
    MinBy => "min_by",
    MaxBy => "max_by",
    MinmaxBy => "minmax_by",
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EachWithIndex;

impl<S: Enumerable + ?Sized> Operation<S> for EachWithIndex {
    type Yield = (S::Item, usize);

    const NAME: &'static str = "each_with_index";

    fn traverse<F>(&self, origin: &S, mut f: F) -> ControlFlow<()>
    where
        F: FnMut((S::Item, usize)) -> ControlFlow<()>,
    {
        indexed(origin, |item, i| f((item, i)))
    }
}

/// Consecutive chunks of `size` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EachSlice {
    size: usize,
}

impl EachSlice {
    /// Fails for sizes below 1.
    pub fn new(size: impl ToCount) -> Result<Self> {
        Ok(EachSlice {
            size: count::size("each_slice", size, 1, "invalid slice size")?,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<S: Enumerable + ?Sized> Operation<S> for EachSlice {
    type Yield = Vec<S::Item>;

    const NAME: &'static str = "each_slice";

    fn traverse<F>(&self, origin: &S, f: F) -> ControlFlow<()>
    where
        F: FnMut(Vec<S::Item>) -> ControlFlow<()>,
    {
        slices(origin, self.size, f)
    }
}

/// Windows of `size` consecutive elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EachCons {
    size: usize,
}

impl EachCons {
    /// Fails for sizes below 1.
    pub fn new(size: impl ToCount) -> Result<Self> {
        Ok(EachCons {
            size: count::size("each_cons", size, 1, "invalid size")?,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<S> Operation<S> for EachCons
where
    S: Enumerable + ?Sized,
    S::Item: Clone,
{
    type Yield = Vec<S::Item>;

    const NAME: &'static str = "each_cons";

    fn traverse<F>(&self, origin: &S, f: F) -> ControlFlow<()>
    where
        F: FnMut(Vec<S::Item>) -> ControlFlow<()>,
    {
        windows(origin, self.size, f)
    }
}

/// Repeats the origin's elements, `None` rounds meaning forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    rounds: Option<usize>,
}

impl Cycle {
    /// Non-positive `n` yields nothing.
    pub fn times(n: impl ToCount) -> Result<Self> {
        let rounds = usize::try_from(n.to_count()?.max(0))
            .map_err(|_| Error::coercion::<i64>("round count is out of range"))?;
        Ok(Cycle {
            rounds: Some(rounds),
        })
    }

    pub fn forever() -> Self {
        Cycle { rounds: None }
    }

    pub fn rounds(&self) -> Option<usize> {
        self.rounds
    }
}

impl<S> Operation<S> for Cycle
where
    S: Enumerable + ?Sized,
    S::Item: Clone,
{
    type Yield = S::Item;

    const NAME: &'static str = "cycle";

    fn traverse<F>(&self, origin: &S, f: F) -> ControlFlow<()>
    where
        F: FnMut(S::Item) -> ControlFlow<()>,
    {
        replay(origin, self.rounds, f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseEach;

impl<S: Enumerable + ?Sized> Operation<S> for ReverseEach {
    type Yield = S::Item;

    const NAME: &'static str = "reverse_each";

    fn traverse<F>(&self, origin: &S, f: F) -> ControlFlow<()>
    where
        F: FnMut(S::Item) -> ControlFlow<()>,
    {
        reversed(origin, f)
    }
}

// *------------------------------- Driving --------------------------------* //

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, Each> {
    pub fn drive<R: Flow>(&self, f: impl FnMut(S::Item) -> R) {
        self.log_drive();
        self.origin.each_entry(f)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, EachWithIndex> {
    pub fn drive<R: Flow>(&self, f: impl FnMut(S::Item, usize) -> R) {
        self.log_drive();
        self.origin.each_with_index(f)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, Map> {
    pub fn drive<U>(&self, f: impl FnMut(S::Item) -> U) -> Vec<U> {
        self.log_drive();
        self.origin.map(f)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, Select> {
    pub fn drive(&self, predicate: impl FnMut(&S::Item) -> bool) -> Vec<S::Item> {
        self.log_drive();
        self.origin.select(predicate)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, Reject> {
    pub fn drive(&self, predicate: impl FnMut(&S::Item) -> bool) -> Vec<S::Item> {
        self.log_drive();
        self.origin.reject(predicate)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, Find> {
    pub fn drive(&self, predicate: impl FnMut(&S::Item) -> bool) -> Option<S::Item> {
        self.log_drive();
        self.origin.find(predicate)
    }

    pub fn drive_or_else(
        &self,
        predicate: impl FnMut(&S::Item) -> bool,
        if_none: impl FnOnce() -> S::Item,
    ) -> S::Item {
        self.log_drive();
        self.origin.find_or_else(predicate, if_none)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, FindIndex> {
    pub fn drive(&self, predicate: impl FnMut(&S::Item) -> bool) -> Option<usize> {
        self.log_drive();
        self.origin.find_index_by(predicate)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, Partition> {
    pub fn drive(
        &self,
        predicate: impl FnMut(&S::Item) -> bool,
    ) -> (Vec<S::Item>, Vec<S::Item>) {
        self.log_drive();
        self.origin.partition(predicate)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, GroupBy> {
    pub fn drive<K: Hash + Eq>(&self, key: impl FnMut(&S::Item) -> K) -> Groups<K, S::Item> {
        self.log_drive();
        self.origin.group_by(key)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, TakeWhile> {
    pub fn drive(&self, predicate: impl FnMut(&S::Item) -> bool) -> Vec<S::Item> {
        self.log_drive();
        self.origin.take_while(predicate)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, DropWhile> {
    pub fn drive(&self, predicate: impl FnMut(&S::Item) -> bool) -> Vec<S::Item> {
        self.log_drive();
        self.origin.drop_while(predicate)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, EachSlice> {
    pub fn drive<R: Flow>(&self, f: impl FnMut(Vec<S::Item>) -> R) {
        self.log_drive();
        let _ = slices(self.origin, self.op.size, f);
    }
}

impl<'a, S> Enumerator<'a, S, EachCons>
where
    S: Enumerable + ?Sized,
    S::Item: Clone,
{
    pub fn drive<R: Flow>(&self, f: impl FnMut(Vec<S::Item>) -> R) {
        self.log_drive();
        let _ = windows(self.origin, self.op.size, f);
    }
}

impl<'a, S> Enumerator<'a, S, Cycle>
where
    S: Enumerable + ?Sized,
    S::Item: Clone,
{
    /// Unbounded cycles run until `f` breaks.
    pub fn drive<R: Flow>(&self, f: impl FnMut(S::Item) -> R) {
        self.log_drive();
        let _ = replay(self.origin, self.op.rounds, f);
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, ReverseEach> {
    pub fn drive<R: Flow>(&self, f: impl FnMut(S::Item) -> R) {
        self.log_drive();
        self.origin.reverse_each(f)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, SortBy> {
    pub fn drive<K: NaturalOrder>(&self, key: impl FnMut(&S::Item) -> K) -> Result<Vec<S::Item>> {
        self.log_drive();
        self.origin.sort_by(key)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, MinBy> {
    pub fn drive<K: NaturalOrder>(
        &self,
        key: impl FnMut(&S::Item) -> K,
    ) -> Result<Option<S::Item>> {
        self.log_drive();
        self.origin.min_by(key)
    }
}

impl<'a, S: Enumerable + ?Sized> Enumerator<'a, S, MaxBy> {
    pub fn drive<K: NaturalOrder>(
        &self,
        key: impl FnMut(&S::Item) -> K,
    ) -> Result<Option<S::Item>> {
        self.log_drive();
        self.origin.max_by(key)
    }
}

impl<'a, S> Enumerator<'a, S, MinmaxBy>
where
    S: Enumerable + ?Sized,
    S::Item: Clone,
{
    pub fn drive<K: NaturalOrder + Clone>(
        &self,
        key: impl FnMut(&S::Item) -> K,
    ) -> Result<Option<(S::Item, S::Item)>> {
        self.log_drive();
        self.origin.minmax_by(key)
    }
}
