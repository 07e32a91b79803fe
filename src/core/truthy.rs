/// Truth value of an element, for quantifiers used without a predicate.
pub trait Truthy {
    fn truthy(&self) -> bool;
}

impl Truthy for bool {
    fn truthy(&self) -> bool {
        *self
    }
}

/// Only absence is falsey, whatever is inside.
impl<T> Truthy for Option<T> {
    fn truthy(&self) -> bool {
        self.is_some()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn truthy(&self) -> bool {
        (**self).truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn truthy(&self) -> bool {
        (**self).truthy()
    }
}
