use alloc::boxed::Box;

use crate::info::{CastedField, Type, Typed};

/// A struct with named fields, stored as a document.
///
/// Fields are kept in declaration order, which is also the order they are
/// written to the document.
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    alias: Option<&'static str>,
    fields: Box<[CastedField]>,
}

impl StructInfo {
    /// `type_path` is `module::Name` for derived types.
    pub fn new<T: Typed>(type_path: &'static str, fields: &[CastedField]) -> Self {
        Self {
            ty: Type::with_path::<T>(type_path),
            alias: None,
            fields: fields.into(),
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

    #[inline]
    pub fn fields(&self) -> &[CastedField] {
        &self.fields
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&CastedField> {
        self.fields.get(index)
    }

    /// Index and description of the field stored as `name`.
    pub fn field(&self, name: &str) -> Option<(usize, &CastedField)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name() == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
