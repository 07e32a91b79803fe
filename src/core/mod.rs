pub(crate) mod count;
mod enumerable;
mod error;
mod ordering;
mod pattern;
mod source;
mod truthy;
mod value;

pub use count::*;
pub use enumerable::*;
pub use error::*;
pub use ordering::*;
pub use pattern::*;
pub use source::*;
pub use truthy::*;
pub use value::*;
