//! Deferred operations.
//!
//! [`Enumerable::to_enum`] wraps a sequence and an operation into an [`Enumerator`]
//! without visiting anything. The handle is driven later with the callback the
//! operation needs, or is used as a sequence of its own whose elements are what
//! the operation would hand to that callback.

pub mod op;

use crate::core::Enumerable;
use getset::Getters;
use log::*;
use std::{fmt, ops::ControlFlow};

/// Operation that can be deferred over sequences of type `S`.
pub trait Operation<S: Enumerable + ?Sized> {
    /// What the operation hands to its callback.
    type Yield;

    const NAME: &'static str;

    /// Visits what the operation would hand to its callback, in order.
    fn traverse<F>(&self, origin: &S, f: F) -> ControlFlow<()>
    where
        F: FnMut(Self::Yield) -> ControlFlow<()>;
}

/// Deferred operation `op` over `origin`.
#[derive(Getters)]
pub struct Enumerator<'a, S: ?Sized, O> {
    origin: &'a S,
    #[getset(get = "pub")]
    op: O,
}

impl<'a, S, O> Enumerator<'a, S, O>
where
    S: Enumerable + ?Sized,
    O: Operation<S>,
{
    pub fn new(origin: &'a S, op: O) -> Self {
        debug!(
            "Deferred {} over {}",
            O::NAME,
            std::any::type_name::<S>()
        );
        Enumerator { origin, op }
    }

    pub fn origin(&self) -> &'a S {
        self.origin
    }

    pub fn name(&self) -> &'static str {
        O::NAME
    }

    fn log_drive(&self) {
        debug!("Driving {} over {}", O::NAME, std::any::type_name::<S>());
    }
}

impl<'a, S, O> Enumerable for Enumerator<'a, S, O>
where
    S: Enumerable + ?Sized,
    O: Operation<S>,
{
    type Item = O::Yield;

    fn each<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(O::Yield) -> ControlFlow<()>,
    {
        self.op.traverse(self.origin, f)
    }
}

impl<'a, S: ?Sized, O: Clone> Clone for Enumerator<'a, S, O> {
    fn clone(&self) -> Self {
        Enumerator {
            origin: self.origin,
            op: self.op.clone(),
        }
    }
}

impl<'a, S: ?Sized, O: fmt::Debug> fmt::Debug for Enumerator<'a, S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator")
            .field("origin", &std::any::type_name::<S>())
            .field("op", &self.op)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FromEach, Once};
    use crate::lazy::op::*;
    use std::{cell::Cell, ops::ControlFlow::*};

    fn counted<'a>(
        items: &'a [i32],
        passes: &'a Cell<usize>,
    ) -> FromEach<i32, impl Fn(&mut dyn FnMut(i32) -> ControlFlow<()>) -> ControlFlow<()> + 'a>
    {
        FromEach::new(move |f: &mut dyn FnMut(i32) -> ControlFlow<()>| {
            passes.set(passes.get() + 1);
            for &item in items {
                f(item)?;
            }
            Continue(())
        })
    }

    #[test]
    fn construction_does_not_traverse() {
        let passes = Cell::new(0);
        let source = counted(&[1, 2, 3], &passes);
        let handle = source.to_enum(Select);
        let _ = source.to_enum(EachSlice::new(2).unwrap());
        let _ = source.to_enum(Cycle::forever());
        let _ = source.lazy();
        assert_eq!(passes.get(), 0);

        assert_eq!(handle.drive(|x| x % 2 == 1), vec![1, 3]);
        assert_eq!(passes.get(), 1);
    }

    #[test]
    fn handle_knows_its_operation() {
        let v = vec![1, 2];
        let handle = v.to_enum(EachSlice::new(3).unwrap());
        assert_eq!(handle.name(), "each_slice");
        assert_eq!(handle.op().size(), 3);
        assert_eq!(handle.origin(), &v);
        assert_eq!(v.lazy().name(), "each");
    }

    #[test]
    fn invalid_counts_fail_at_construction() {
        assert!(EachSlice::new(0).unwrap_err().is_argument());
        assert!(EachCons::new(-1).unwrap_err().is_argument());
        assert!(EachCons::new(f64::INFINITY).unwrap_err().is_coercion());
        assert_eq!(Cycle::times(-3).unwrap().rounds(), Some(0));
    }

    #[test]
    fn drive_returns_operation_result() {
        let v = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(v.to_enum(Map).drive(|x| x * 2), vec![2, 4, 6, 8, 10, 12]);
        assert_eq!(v.to_enum(Reject).drive(|x| *x > 2), vec![1, 2]);
        assert_eq!(v.to_enum(Find).drive(|x| *x > 4), Some(5));
        assert_eq!(v.to_enum(Find).drive_or_else(|x| *x > 9, || 0), 0);
        assert_eq!(v.to_enum(FindIndex).drive(|x| *x == 3), Some(2));
        assert_eq!(
            v.to_enum(Partition).drive(|x| *x > 3),
            (vec![4, 5, 6], vec![1, 2, 3])
        );
        assert_eq!(v.to_enum(GroupBy).drive(|x| x % 3).len(), 3);
        assert_eq!(v.to_enum(TakeWhile).drive(|x| *x < 3), vec![1, 2]);
        assert_eq!(v.to_enum(DropWhile).drive(|x| *x < 5), vec![5, 6]);
        assert_eq!(v.to_enum(SortBy).drive(|x| -x), Ok(vec![6, 5, 4, 3, 2, 1]));
        assert_eq!(v.to_enum(MinBy).drive(|x| x % 4), Ok(Some(4)));
        assert_eq!(v.to_enum(MaxBy).drive(|x| x % 4), Ok(Some(3)));
        assert_eq!(v.to_enum(MinmaxBy).drive(|x| x % 4), Ok(Some((4, 3))));
    }

    #[test]
    fn drive_visiting_operations() {
        let v = vec!['a', 'b', 'c'];

        let mut seen = Vec::new();
        v.lazy().drive(|c| seen.push(c));
        assert_eq!(seen, v);

        let mut seen = Vec::new();
        v.to_enum(EachWithIndex).drive(|c, i| seen.push((c, i)));
        assert_eq!(seen, vec![('a', 0), ('b', 1), ('c', 2)]);

        let mut seen = Vec::new();
        v.to_enum(EachSlice::new(2).unwrap())
            .drive(|s| seen.push(s));
        assert_eq!(seen, vec![vec!['a', 'b'], vec!['c']]);

        let mut seen = Vec::new();
        v.to_enum(EachCons::new(2).unwrap()).drive(|s| seen.push(s));
        assert_eq!(seen, vec![vec!['a', 'b'], vec!['b', 'c']]);

        let mut seen = Vec::new();
        v.to_enum(ReverseEach).drive(|c| seen.push(c));
        assert_eq!(seen, vec!['c', 'b', 'a']);

        let mut seen = Vec::new();
        v.to_enum(Cycle::times(2).unwrap()).drive(|c| seen.push(c));
        assert_eq!(seen.len(), 6);

        let mut seen = Vec::new();
        v.to_enum(Cycle::forever()).drive(|c| {
            seen.push(c);
            if seen.len() == 7 {
                Break(())
            } else {
                Continue(())
            }
        });
        assert_eq!(seen, vec!['a', 'b', 'c', 'a', 'b', 'c', 'a']);
    }

    #[test]
    fn handles_are_sequences() {
        let v = vec![10, 20, 30];
        assert_eq!(
            v.to_enum(EachWithIndex).to_a(),
            vec![(10, 0), (20, 1), (30, 2)]
        );
        assert_eq!(
            v.to_enum(EachSlice::new(2).unwrap()).to_a(),
            vec![vec![10, 20], vec![30]]
        );
        assert_eq!(v.to_enum(Select).to_a(), v);
        assert_eq!(v.to_enum(ReverseEach).first(), Some(30));
        assert_eq!(
            v.to_enum(Cycle::forever()).take(5),
            Ok(vec![10, 20, 30, 10, 20])
        );
    }

    #[test]
    fn chained_handles() {
        let v = vec!["a", "b", "c", "d"];
        let odd = v
            .to_enum(EachWithIndex)
            .to_enum(Select)
            .drive(|(_, i)| i % 2 == 1);
        assert_eq!(odd, vec![("b", 1), ("d", 3)]);

        let mapped = v
            .to_enum(EachWithIndex)
            .to_enum(Map)
            .drive(|(s, i)| format!("{}{}", s, i));
        assert_eq!(mapped, vec!["a0", "b1", "c2", "d3"]);
    }

    #[test]
    fn chained_handles_traverse_once() {
        let passes = Cell::new(0);
        let source = counted(&[1, 2, 3, 4, 5], &passes);
        let slices = source
            .to_enum(EachSlice::new(2).unwrap())
            .to_enum(Map)
            .drive(|s| s.iter().sum::<i32>());
        assert_eq!(slices, vec![3, 7, 5]);
        assert_eq!(passes.get(), 1);
    }

    #[test]
    fn single_pass_origin() {
        let source = Once::new(vec![1, 2, 3]);
        let handle = source.to_enum(Map);
        assert_eq!(handle.drive(|x| x + 1), vec![2, 3, 4]);
        assert_eq!(handle.drive(|x| x + 1), Vec::<i32>::new());
    }
}
