//! Traversal over std collections and iterators.

use super::Enumerable;
use log::*;
use std::{
    cell::Cell,
    collections::VecDeque,
    fmt,
    ops::ControlFlow,
};

impl<T: Clone> Enumerable for [T] {
    type Item = T;

    fn each<F: FnMut(T) -> ControlFlow<()>>(&self, mut f: F) -> ControlFlow<()> {
        for item in self {
            f(item.clone())?;
        }
        ControlFlow::Continue(())
    }
}

impl<T: Clone, const N: usize> Enumerable for [T; N] {
    type Item = T;

    fn each<F: FnMut(T) -> ControlFlow<()>>(&self, f: F) -> ControlFlow<()> {
        self.as_slice().each(f)
    }
}

impl<T: Clone> Enumerable for Vec<T> {
    type Item = T;

    fn each<F: FnMut(T) -> ControlFlow<()>>(&self, f: F) -> ControlFlow<()> {
        self.as_slice().each(f)
    }
}

impl<T: Clone> Enumerable for VecDeque<T> {
    type Item = T;

    fn each<F: FnMut(T) -> ControlFlow<()>>(&self, mut f: F) -> ControlFlow<()> {
        for item in self {
            f(item.clone())?;
        }
        ControlFlow::Continue(())
    }
}

impl<E: Enumerable + ?Sized> Enumerable for &E {
    type Item = E::Item;

    fn each<F: FnMut(E::Item) -> ControlFlow<()>>(&self, f: F) -> ControlFlow<()> {
        (**self).each(f)
    }
}

/// Multi pass source over a clonable iterator, ranges included.
/// Each traversal runs a fresh clone.
#[derive(Debug, Clone)]
pub struct Source<I>(I);

impl<I: Iterator + Clone> Source<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Source(iter.into_iter())
    }
}

impl<I: Iterator + Clone> Enumerable for Source<I> {
    type Item = I::Item;

    fn each<F: FnMut(I::Item) -> ControlFlow<()>>(&self, f: F) -> ControlFlow<()> {
        self.0.clone().try_for_each(f)
    }
}

/// Single pass source.
///
/// Elements are consumed as they are visited. Elements left after an early exit
/// are visited by the next traversal. Traversing an exhausted source visits nothing.
pub struct Once<I>(Cell<Option<I>>);

impl<I: Iterator> Once<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Once(Cell::new(Some(iter.into_iter())))
    }
}

impl<I: Iterator> fmt::Debug for Once<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once")
            .field("item", &std::any::type_name::<I::Item>())
            .finish()
    }
}

impl<I: Iterator> Enumerable for Once<I> {
    type Item = I::Item;

    fn each<F: FnMut(I::Item) -> ControlFlow<()>>(&self, f: F) -> ControlFlow<()> {
        match self.0.take() {
            Some(mut iter) => {
                let flow = iter.try_for_each(f);
                if flow.is_break() {
                    self.0.set(Some(iter));
                }
                flow
            }
            None => {
                warn!(
                    "Traversing exhausted single pass source of {}",
                    std::any::type_name::<I::Item>()
                );
                ControlFlow::Continue(())
            }
        }
    }
}

/// Source defined directly by its traversal.
///
/// ```
/// use enumerable::{Enumerable, FromEach};
/// use std::ops::ControlFlow;
///
/// let squares = FromEach::new(|f: &mut dyn FnMut(u32) -> ControlFlow<()>| {
///     for i in 1..=3 {
///         f(i * i)?;
///     }
///     ControlFlow::Continue(())
/// });
/// assert_eq!(squares.to_a(), vec![1, 4, 9]);
/// ```
pub struct FromEach<T, E>(E, std::marker::PhantomData<fn(T)>)
where
    E: Fn(&mut dyn FnMut(T) -> ControlFlow<()>) -> ControlFlow<()>;

impl<T, E> FromEach<T, E>
where
    E: Fn(&mut dyn FnMut(T) -> ControlFlow<()>) -> ControlFlow<()>,
{
    pub fn new(each: E) -> Self {
        FromEach(each, std::marker::PhantomData)
    }
}

impl<T, E> Enumerable for FromEach<T, E>
where
    E: Fn(&mut dyn FnMut(T) -> ControlFlow<()>) -> ControlFlow<()>,
{
    type Item = T;

    fn each<F: FnMut(T) -> ControlFlow<()>>(&self, mut f: F) -> ControlFlow<()> {
        (self.0)(&mut f)
    }
}
