use alloc::boxed::Box;
use core::fmt;

use crate::Recast;
use crate::info::{Type, Typed};

/// A fieldless enum, stored as the name of its variant.
pub struct EnumInfo {
    ty: Type,
    alias: Option<&'static str>,
    variants: &'static [&'static str],
    from_name: fn(&str) -> Option<Box<dyn Recast>>,
}

impl EnumInfo {
    pub fn new<T: Typed>(
        type_path: &'static str,
        variants: &'static [&'static str],
        from_name: fn(&str) -> Option<Box<dyn Recast>>,
    ) -> Self {
        Self {
            ty: Type::with_path::<T>(type_path),
            alias: None,
            variants,
            from_name,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Stores the type under `alias` instead of its path.
    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    #[inline]
    pub fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    /// Name stored under the discriminator key: the alias if there is one,
    /// the type path otherwise.
    #[inline]
    pub fn discriminator(&self) -> &'static str {
        self.alias.unwrap_or(self.ty.path())
    }

    /// Stored names of all variants, in declaration order.
    #[inline]
    pub fn variant_names(&self) -> &'static [&'static str] {
        self.variants
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    pub fn contains_variant(&self, name: &str) -> bool {
        self.variants.contains(&name)
    }

    /// The variant stored as `name`, or `None` if there is no such variant.
    #[inline]
    pub fn from_name(&self, name: &str) -> Option<Box<dyn Recast>> {
        (self.from_name)(name)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("variants", &self.variants)
            .finish()
    }
}
