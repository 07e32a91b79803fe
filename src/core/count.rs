use super::{Error, Result};

/// Count-like argument coercible to an integer.
pub trait ToCount {
    fn to_count(&self) -> Result<i64>;
}

macro_rules! lossless_count {
    ($($ty:ty),*) => {
        $(
            impl ToCount for $ty {
                fn to_count(&self) -> Result<i64> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

lossless_count!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! bounded_count {
    ($($ty:ty),*) => {
        $(
            impl ToCount for $ty {
                fn to_count(&self) -> Result<i64> {
                    i64::try_from(*self)
                        .map_err(|_| Error::coercion::<$ty>(format!("{} is out of range", self)))
                }
            }
        )*
    };
}

bounded_count!(i128, isize, u64, u128, usize);

macro_rules! float_count {
    ($($ty:ty),*) => {
        $(
            impl ToCount for $ty {
                /// Truncates toward zero.
                fn to_count(&self) -> Result<i64> {
                    if self.is_nan() {
                        Err(Error::coercion::<$ty>("NaN"))
                    } else if self.is_infinite() {
                        Err(Error::coercion::<$ty>(format!("{}", self)))
                    } else if (*self as f64) >= i64::MAX as f64 || (*self as f64) < i64::MIN as f64 {
                        Err(Error::coercion::<$ty>(format!("{} is out of range", self)))
                    } else {
                        Ok(self.trunc() as i64)
                    }
                }
            }
        )*
    };
}

float_count!(f32, f64);

impl<T: ToCount + ?Sized> ToCount for &T {
    fn to_count(&self) -> Result<i64> {
        (**self).to_count()
    }
}

/// Coerces `n` for operation `op`, which accepts sizes of at least `min`.
pub(crate) fn size(op: &'static str, n: impl ToCount, min: i64, what: &str) -> Result<usize> {
    let n = n.to_count()?;
    if n < min {
        return Err(Error::argument(op, format!("{}: {}", what, n)));
    }
    usize::try_from(n).map_err(|_| Error::coercion::<i64>(format!("{} is out of range", n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(3u8.to_count(), Ok(3));
        assert_eq!((-7i32).to_count(), Ok(-7));
        assert!(usize::MAX.to_count().unwrap_err().is_coercion());
    }

    #[test]
    fn floats_truncate() {
        assert_eq!(2.9f64.to_count(), Ok(2));
        assert_eq!((-2.9f32).to_count(), Ok(-2));
        assert!(f64::NAN.to_count().unwrap_err().is_coercion());
        assert!(f64::INFINITY.to_count().unwrap_err().is_coercion());
        assert!(1e300f64.to_count().unwrap_err().is_coercion());
    }

    #[test]
    fn size_bounds() {
        assert_eq!(size("take", 0, 0, "attempt to take negative size"), Ok(0));
        assert_eq!(
            size("take", -1, 0, "attempt to take negative size"),
            Err(Error::argument("take", "attempt to take negative size: -1"))
        );
        assert!(size("each_slice", 0, 1, "invalid slice size")
            .unwrap_err()
            .is_argument());
    }
}
