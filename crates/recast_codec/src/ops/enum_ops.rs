use crate::Recast;

/// A fieldless enum value.
pub trait Enum: Recast {
    /// Name the current variant is stored as.
    fn variant_name(&self) -> &'static str;

    /// Declaration index of the current variant.
    fn variant_index(&self) -> usize;
}
