use alloc::boxed::Box;

use crate::Recast;

/// A struct with named fields.
///
/// Fields are addressed by their declaration index; the names live in the
/// [`StructInfo`](crate::info::StructInfo).
pub trait Struct: Recast {
    fn field_len(&self) -> usize;

    fn field_at(&self, index: usize) -> Option<&dyn Recast>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Recast>;

    /// Replaces the field at `index`, handing `value` back on type mismatch
    /// or a bad index.
    fn set_field_at(&mut self, index: usize, value: Box<dyn Recast>) -> Result<(), Box<dyn Recast>>;

    /// The field stored as `name`.
    fn field(&self, name: &str) -> Option<&dyn Recast> {
        let (index, _) = self.recast_type_info().as_struct()?.field(name)?;
        self.field_at(index)
    }
}
