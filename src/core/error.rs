use getset::CopyGetters;
use std::fmt::Display;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Usage errors.
/// Raised where detected, they abort the traversal in progress and no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Size or count argument is out of range for the operation.
    #[error("invalid argument to {op}: {message}")]
    Argument { op: &'static str, message: String },
    /// No ordering could be established between two operands.
    #[error("comparison of {left} with {right} failed")]
    Comparison { left: TypeInfo, right: TypeInfo },
    /// Count-like argument can't be turned into an integer.
    #[error("can't convert {from} into an integer: {reason}")]
    TypeCoercion { from: TypeInfo, reason: String },
}

impl Error {
    pub fn argument(op: &'static str, message: impl Into<String>) -> Self {
        Self::Argument {
            op,
            message: message.into(),
        }
    }

    pub fn comparison(left: TypeInfo, right: TypeInfo) -> Self {
        Self::Comparison { left, right }
    }

    pub fn coercion<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::TypeCoercion {
            from: TypeInfo::of::<T>(),
            reason: reason.into(),
        }
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Comparison { .. })
    }

    pub fn is_coercion(&self) -> bool {
        matches!(self, Self::TypeCoercion { .. })
    }
}

/// Name of an operand type as reported by errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct TypeInfo {
    ty_name: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized>() -> Self {
        Self {
            ty_name: std::any::type_name::<T>(),
        }
    }

    /// For dynamically typed values whose kind isn't their Rust type.
    pub fn named(ty_name: &'static str) -> Self {
        Self { ty_name }
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ty_name)
    }
}
