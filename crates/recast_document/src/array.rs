use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Value;

/// An unboxed primitive array stored as one value.
///
/// This is the storage form of primitive arrays: encoders hand over the
/// contents as-is instead of producing one [`Value`] per element.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveArray {
    Bytes(Box<[u8]>),
    Ints(Box<[i32]>),
    Longs(Box<[i64]>),
    Doubles(Box<[f64]>),
}

impl PrimitiveArray {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(v) => v.len(),
            Self::Ints(v) => v.len(),
            Self::Longs(v) => v.len(),
            Self::Doubles(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the element type, used in error messages.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "byte",
            Self::Ints(_) => "int",
            Self::Longs(_) => "long",
            Self::Doubles(_) => "double",
        }
    }

    /// Returns the element at `index` boxed into a [`Value`].
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::Bytes(v) => v.get(index).map(|x| Value::Byte(*x)),
            Self::Ints(v) => v.get(index).map(|x| Value::Int(*x)),
            Self::Longs(v) => v.get(index).map(|x| Value::Long(*x)),
            Self::Doubles(v) => v.get(index).map(|x| Value::Double(*x)),
        }
    }

    /// Iterates over the elements boxed into [`Value`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Value> + '_ {
        (0..self.len()).map(move |index| self.get(index).unwrap_or(Value::Null))
    }

    /// Copies the elements out as a sequence of [`Value`]s.
    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).filter_map(|index| self.get(index)).collect()
    }
}

macro_rules! impl_from_boxed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Box<[$ty]>> for PrimitiveArray {
                #[inline]
                fn from(value: Box<[$ty]>) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<Vec<$ty>> for PrimitiveArray {
                #[inline]
                fn from(value: Vec<$ty>) -> Self {
                    Self::$variant(value.into_boxed_slice())
                }
            }
        )*
    };
}

impl_from_boxed!(u8 => Bytes, i32 => Ints, i64 => Longs, f64 => Doubles);

#[cfg(test)]
mod tests {
    use super::PrimitiveArray;
    use crate::Value;

    #[test]
    fn elements_are_boxed_in_order() {
        let array = PrimitiveArray::from(vec![1_u8, 2, 3]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.element_name(), "byte");
        assert_eq!(
            array.to_values(),
            [Value::Byte(1), Value::Byte(2), Value::Byte(3)]
        );
        assert_eq!(array.get(3), None);
    }

    #[test]
    fn empty_array() {
        let array = PrimitiveArray::Doubles(Box::new([]));
        assert!(array.is_empty());
        assert_eq!(array.iter().count(), 0);
    }
}
