use alloc::boxed::Box;
use core::fmt;

use recast_document::Value;

use crate::Recast;

/// A slot whose concrete type is only known at runtime.
///
/// Values in an `Object` slot are encoded by their runtime type and decoded
/// by the shape of the stored value: scalars come back as their natural
/// Rust type, arrays as `Vec<Object>`, and documents carrying a
/// discriminator as the registered type it names.
///
/// An empty slot holds [`Value::Null`].
///
/// ```
/// use recast_codec::Object;
///
/// let slot = Object::new(7_i32);
/// assert_eq!(slot.downcast_ref::<i32>(), Some(&7));
/// assert!(Object::null().is_null());
/// ```
pub struct Object(Box<dyn Recast>);

impl Object {
    #[inline]
    pub fn new<T: Recast>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    /// Wraps a boxed value. A boxed `Object` is unwrapped, not nested.
    pub fn from_boxed(value: Box<dyn Recast>) -> Self {
        match value.take::<Object>() {
            Ok(object) => object,
            Err(value) => Self(value),
        }
    }

    #[inline]
    pub fn null() -> Self {
        Self(Box::new(Value::Null))
    }

    #[inline]
    pub fn get(&self) -> &dyn Recast {
        &*self.0
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut dyn Recast {
        &mut *self.0
    }

    #[inline]
    pub fn into_inner(self) -> Box<dyn Recast> {
        self.0
    }

    pub fn is_null(&self) -> bool {
        matches!(self.0.downcast_ref::<Value>(), Some(Value::Null))
    }

    #[inline]
    pub fn is<T: Recast>(&self) -> bool {
        self.0.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Recast>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Recast>(&mut self) -> Option<&mut T> {
        self.0.downcast_mut::<T>()
    }

    #[inline]
    pub fn take<T: Recast>(self) -> Result<T, Self> {
        self.0.take::<T>().map_err(Self)
    }
}

impl Default for Object {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::Object;

    #[test]
    fn nested_object_is_flattened() {
        let inner = Object::new(String::from("a"));
        let outer = Object::new(inner);
        assert!(outer.is::<String>());
        assert_eq!(outer.take::<String>().unwrap(), "a");
    }

    #[test]
    fn default_is_null() {
        assert!(Object::default().is_null());
        assert!(!Object::new(0_i32).is_null());
    }
}
