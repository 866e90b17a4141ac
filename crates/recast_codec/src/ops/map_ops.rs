use alloc::boxed::Box;

use crate::Recast;

/// A key/value map.
pub trait Map: Recast {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Recast, &dyn Recast)> + '_>;

    /// Inserts an entry, replacing any previous value for an equal key.
    ///
    /// Hands both halves back if either has the wrong type.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Recast>,
        value: Box<dyn Recast>,
    ) -> Result<(), (Box<dyn Recast>, Box<dyn Recast>)>;
}
