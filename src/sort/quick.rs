use super::{Comparator, SortStrategy};
use crate::core::Result;
use log::*;
use std::cmp::Ordering;

/// Three way partitioning quicksort.
///
/// Pivot is the first element. Every element lands in the less, equal, or greater
/// bucket in encounter order, the pivot in equal without being compared to itself,
/// and result is `sorted(less) ++ equal ++ sorted(greater)`.
///
/// Stable. Quadratic for already sorted input since the pivot is then an extreme,
/// though pending partitions live on the heap so no input is too long to sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quicksort;

impl<T> SortStrategy<T> for Quicksort {
    fn sort(&self, items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>> {
        quicksort(items, cmp)
    }
}

/// Pending work, processed last in first out.
enum Task<T> {
    Sort(Vec<T>),
    Emit(Vec<T>),
}

/// Partitions run off a heap stack so sorted input costs time, not call depth.
fn quicksort<T>(items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>> {
    let mut sorted = Vec::with_capacity(items.len());
    let mut tasks = vec![Task::Sort(items)];
    while let Some(task) = tasks.pop() {
        let items = match task {
            Task::Emit(mut items) => {
                sorted.append(&mut items);
                continue;
            }
            Task::Sort(items) => items,
        };

        let mut items = items.into_iter();
        let pivot = match items.next() {
            Some(pivot) => pivot,
            None => continue,
        };

        let mut less = Vec::new();
        let mut equal = vec![pivot];
        let mut greater = Vec::new();
        for item in items {
            match cmp(&item, &equal[0])? {
                Ordering::Less => less.push(item),
                Ordering::Equal => equal.push(item),
                Ordering::Greater => greater.push(item),
            }
        }
        trace!(
            "Partitioned into {} less, {} equal, {} greater with {} pending",
            less.len(),
            equal.len(),
            greater.len(),
            tasks.len()
        );

        tasks.push(Task::Sort(greater));
        tasks.push(Task::Emit(equal));
        tasks.push(Task::Sort(less));
    }
    Ok(sorted)
}
