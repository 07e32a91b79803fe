use super::{Comparator, SortStrategy};
use crate::core::Result;
use std::cmp::Ordering;

/// Top down merge sort.
/// Stable, O(n log n) comparisons regardless of input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl<T> SortStrategy<T> for MergeSort {
    fn sort(&self, items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>> {
        merge_sort(items, cmp)
    }
}

fn merge_sort<T>(mut items: Vec<T>, cmp: &mut Comparator<'_, T>) -> Result<Vec<T>> {
    if items.len() <= 1 {
        return Ok(items);
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp)?;
    let right = merge_sort(right, cmp)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties go left.
        if cmp(l, r)? == Ordering::Greater {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
