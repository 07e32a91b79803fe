use super::{Error, Result, TypeInfo};
use std::cmp::{Ordering, Reverse};

/// Result of a comparator that can be read as negative/zero/positive.
///
/// `Ok(None)` means the comparator answered but not with an ordering,
/// which operations report as [`Error::Comparison`].
pub trait IntoOrdering {
    fn into_ordering(self) -> Result<Option<Ordering>>;
}

impl IntoOrdering for Ordering {
    fn into_ordering(self) -> Result<Option<Ordering>> {
        Ok(Some(self))
    }
}

impl IntoOrdering for Option<Ordering> {
    fn into_ordering(self) -> Result<Option<Ordering>> {
        Ok(self)
    }
}

impl<R: IntoOrdering> IntoOrdering for Result<R> {
    fn into_ordering(self) -> Result<Option<Ordering>> {
        self?.into_ordering()
    }
}

macro_rules! signed_ordering {
    ($($ty:ty),*) => {
        $(
            impl IntoOrdering for $ty {
                fn into_ordering(self) -> Result<Option<Ordering>> {
                    Ok(Some(self.cmp(&0)))
                }
            }
        )*
    };
}

signed_ordering!(i8, i16, i32, i64, i128, isize);

/// Per type default total order.
///
/// Returns `None` for operands that have no ordering between them,
/// like NaN floats or [`Value`](super::Value)s of different kinds.
pub trait NaturalOrder {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering>;

    /// Name reported when comparison with this operand fails.
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }
}

/// Compares with natural order, failing with [`Error::Comparison`].
pub fn natural<T: NaturalOrder + ?Sized>(a: &T, b: &T) -> Result<Ordering> {
    a.natural_cmp(b)
        .ok_or_else(|| Error::comparison(a.type_info(), b.type_info()))
}

/// Runs comparator on `a` and `b`, failing with [`Error::Comparison`] on a non-ordering answer.
///
/// Operands are named by their Rust type. Unlike [`natural`] this doesn't consult
/// [`NaturalOrder::type_info`], so a failing comparator over [`Value`](super::Value)s
/// reports the `Value` type rather than the kinds of the two operands.
pub fn compare<T: ?Sized, R: IntoOrdering>(
    cmp: &mut impl FnMut(&T, &T) -> R,
    a: &T,
    b: &T,
) -> Result<Ordering> {
    cmp(a, b)
        .into_ordering()?
        .ok_or_else(|| Error::comparison(TypeInfo::of::<T>(), TypeInfo::of::<T>()))
}

macro_rules! total_order {
    ($($ty:ty),*) => {
        $(
            impl NaturalOrder for $ty {
                fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(Ord::cmp(self, other))
                }
            }
        )*
    };
}

total_order!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    str,
    String
);

impl NaturalOrder for f32 {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }
}

impl NaturalOrder for f64 {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }
}

#[cfg(feature = "float")]
total_order!(
    ordered_float::OrderedFloat<f32>,
    ordered_float::OrderedFloat<f64>,
    ordered_float::NotNan<f32>,
    ordered_float::NotNan<f64>
);

impl<T: NaturalOrder + ?Sized> NaturalOrder for &T {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).natural_cmp(*other)
    }

    fn type_info(&self) -> TypeInfo {
        (**self).type_info()
    }
}

impl<T: NaturalOrder + ?Sized> NaturalOrder for Box<T> {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).natural_cmp(&**other)
    }

    fn type_info(&self) -> TypeInfo {
        (**self).type_info()
    }
}

impl<T: NaturalOrder> NaturalOrder for Reverse<T> {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        other.0.natural_cmp(&self.0)
    }
}

impl<T: NaturalOrder> NaturalOrder for Option<T> {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Some(a), Some(b)) => a.natural_cmp(b),
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
        }
    }
}

impl<T: NaturalOrder> NaturalOrder for [T] {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.iter().zip(other) {
            match a.natural_cmp(b)? {
                Ordering::Equal => continue,
                ordering => return Some(ordering),
            }
        }
        Some(self.len().cmp(&other.len()))
    }
}

impl<T: NaturalOrder> NaturalOrder for Vec<T> {
    fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().natural_cmp(other.as_slice())
    }
}

macro_rules! tuple_order {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: NaturalOrder),+> NaturalOrder for ($($name,)+) {
            fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
                $(
                    match self.$idx.natural_cmp(&other.$idx)? {
                        Ordering::Equal => (),
                        ordering => return Some(ordering),
                    }
                )+
                Some(Ordering::Equal)
            }
        }
    };
}

tuple_order!(A 0);
tuple_order!(A 0, B 1);
tuple_order!(A 0, B 1, C 2);
tuple_order!(A 0, B 1, C 2, D 3);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    #[test]
    fn strings_lexicographic() {
        assert_eq!(natural("albatross", "dog"), Ok(Ordering::Less));
        assert_eq!(
            natural(&"horse".to_string(), &"dog".to_string()),
            Ok(Ordering::Greater)
        );
    }

    #[test]
    fn nan_is_incomparable() {
        let error = natural(&f64::NAN, &1.0).unwrap_err();
        assert_eq!(
            error,
            Error::comparison(TypeInfo::of::<f64>(), TypeInfo::of::<f64>())
        );
    }

    #[test]
    fn signed_comparator_results() {
        let mut by_difference = |a: &i64, b: &i64| a - b;
        assert_eq!(compare(&mut by_difference, &1, &5), Ok(Ordering::Less));
        assert_eq!(compare(&mut by_difference, &5, &5), Ok(Ordering::Equal));
        assert_eq!(compare(&mut by_difference, &9, &5), Ok(Ordering::Greater));
    }

    #[test]
    fn non_ordering_comparator_fails() {
        let mut never = |_: &u8, _: &u8| -> Option<Ordering> { None };
        assert!(compare(&mut never, &1, &2).unwrap_err().is_comparison());
    }

    #[test]
    fn failing_comparator_names_rust_type() {
        let mut never = |_: &Value, _: &Value| None::<Ordering>;
        assert_eq!(
            compare(&mut never, &Value::Int(1), &Value::from("a")),
            Err(Error::comparison(
                TypeInfo::of::<Value>(),
                TypeInfo::of::<Value>()
            ))
        );
        assert_eq!(
            natural(&Value::Int(1), &Value::from("a")),
            Err(Error::comparison(
                TypeInfo::named("Integer"),
                TypeInfo::named("String")
            ))
        );
    }

    #[test]
    fn comparator_error_propagates() {
        let mut failing =
            |_: &u8, _: &u8| -> Result<Ordering> { Err(Error::argument("cmp", "boom")) };
        assert_eq!(
            compare(&mut failing, &1, &2),
            Err(Error::argument("cmp", "boom"))
        );
    }

    #[test]
    fn sequences_and_tuples() {
        assert_eq!(natural(&vec![1, 2], &vec![1, 2, 0]), Ok(Ordering::Less));
        assert_eq!(natural(&(1, "b"), &(1, "a")), Ok(Ordering::Greater));
        assert!(natural(&vec![1.0, f64::NAN], &vec![1.0, 2.0]).is_err());
        assert_eq!(natural(&Reverse(1), &Reverse(2)), Ok(Ordering::Greater));
    }
}
