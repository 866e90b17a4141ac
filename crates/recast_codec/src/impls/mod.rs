//! Built-in implementations of [`Recast`](crate::Recast).
//!
//! - leaves: `bool` `u8` `i16` `char` `i32` `i64` `f32` `f64` `String`,
//!   [`Date`](recast_document::Date), `DateTime<Utc>`, `NaiveDateTime`,
//!   `NaiveTime`, [`Value`](recast_document::Value) and
//!   [`Document`](recast_document::Document)
//! - `Option<T>`
//! - iterables: `Vec<T>` `VecDeque<T>` `Box<[T]>` `BTreeSet<T>`, std and
//!   hashbrown `HashSet<T, S>`
//! - maps: `BTreeMap<K, V>`, std and hashbrown `HashMap<K, V, S>`
//! - [`Object`](crate::Object)
//! - protobuf well-known types, see [`impl_recast_message`](crate::impl_recast_message)

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Recast;

// -----------------------------------------------------------------------------
// Modules

mod leaf;
mod map;
mod message;
mod object;
mod option;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use message::parse_message;

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the casting methods of `Recast` for a kind.
macro_rules! impl_recast_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn recast_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        #[inline]
        fn recast_ref(&self) -> $crate::ops::RecastRef<'_> {
            $crate::ops::RecastRef::$kind(self)
        }

        #[inline]
        fn recast_mut(&mut self) -> $crate::ops::RecastMut<'_> {
            $crate::ops::RecastMut::$kind(self)
        }

        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Recast>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Recast>> {
            *self = value.take::<Self>()?;
            Ok(())
        }
    };
}

pub(crate) use impl_recast_cast_fn;

/// Unboxes every item, handing back the first one of the wrong type.
pub(crate) fn take_all<T: Recast>(items: Vec<Box<dyn Recast>>) -> Result<Vec<T>, Box<dyn Recast>> {
    items.into_iter().map(<dyn Recast>::take::<T>).collect()
}
