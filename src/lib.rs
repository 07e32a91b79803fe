//! # Goal
//! The main goal of this library is to provide a full set of enumeration algorithms
//! for any sequence that can do one thing: visit its elements once, in order.
//!
//! Nothing else is assumed of a sequence. No indexing, no size, and no guarantee that a
//! second traversal sees the same elements. Operations that need more than one look at
//! the elements buffer them and document so.
//!
//! # Features
//! - Derived algorithms, through [`Enumerable`].
//!      - Mapping, filtering, searching, quantifiers, counting, folding, grouping,
//!        windowing, zipping, extrema.
//! - Sorting, through [`Sorter`] and pluggable [`SortStrategy`]s.
//!      - Stable, never touches the sequence.
//!      - Key sort computes each key exactly once.
//! - Deferred operations, through [`Enumerator`].
//!      - Created without traversing, driven later or used as a sequence of their own.
//!
//! # Architecture
//! - Core - the traversal primitive, derived algorithms, ordering and count coercion.
//! - Sort - strategies and the sorting service on top of them.
//! - Lazy - deferred operation handles.
//!
//! ```
//! use enumerable::Enumerable;
//!
//! let words = vec!["albatross", "dog", "horse"];
//! assert_eq!(words.sort_by(|w| w.len()), Ok(vec!["dog", "horse", "albatross"]));
//! assert_eq!(words.min_by(|w| w.len()), Ok(Some("dog")));
//! ```

//? Important decisions:
//? - Errors abort the traversal they are detected in. There are no partial results.
//? - Single threaded. Sequences are borrowed shared for the duration of an operation.

pub mod core;
pub mod lazy;
pub mod sort;

pub use crate::core::{
    Enumerable, Error, Flow, FromEach, Groups, IntoOrdering, Matching, NaturalOrder, Once,
    Pattern, Result, Source, ToCount, Truthy, TypeInfo, Value, ZipRow,
};
pub use lazy::{op, Enumerator, Operation};
pub use sort::{sort, sort_by, Comparator, KeyedEntry, MergeSort, Quicksort, SortStrategy, Sorter};
