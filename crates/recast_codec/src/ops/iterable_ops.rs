use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Recast;

/// A homogeneous collection.
///
/// Sets, sequences and boxed slices all go through this trait; the
/// iteration order is the collection's own.
pub trait Iterable: Recast {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Recast> + '_>;

    /// Appends all `items` at once.
    ///
    /// Every item is checked before the collection is touched; on mismatch
    /// the first offending item is handed back and `self` is unchanged.
    fn extend_boxed(&mut self, items: Vec<Box<dyn Recast>>) -> Result<(), Box<dyn Recast>>;
}
