use alloc::boxed::Box;

use crate::Recast;
use crate::info::Typed;
use crate::registry::FromType;

/// Constructs a default instance of a registered type.
///
/// The object factory needs this to build a struct before its fields are
/// filled in from a document.
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Recast>,
}

impl TypeTraitDefault {
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Recast> {
        (self.func)()
    }
}

impl<T: Default + Typed> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
