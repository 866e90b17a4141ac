use alloc::boxed::Box;

use recast_document::Document;

use crate::error::{ReconstructionError, Result};
use crate::factory::ObjectFactory;
use crate::info::{TypeInfo, Typed};
use crate::ops::RecastRef;
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::transform::{self, Context, CustomTransformer, Direction, Dispatcher, TransformerRegistry};
use crate::{DISCRIMINATOR_KEY, ENCODED_VALUE_KEY, Recast, RecastOptions};

// -----------------------------------------------------------------------------
// Recaster

/// Converts typed values to documents and back.
///
/// A `Recaster` owns the type registry, the leaf transformers and the
/// options. It is immutable once built and can be shared between threads.
///
/// # Examples
///
/// ```
/// use recast_codec::{Recast, Recaster};
///
/// #[derive(Recast, Default, Debug, PartialEq)]
/// #[recast(alias = "point")]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let recaster = Recaster::builder().register::<Point>().build();
///
/// let document = recaster.to_document(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(document.get_str("__recast"), Some("point"));
///
/// let point: Point = recaster.from_document(&document).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
#[derive(Debug)]
pub struct Recaster {
    types: TypeRegistry,
    transformers: TransformerRegistry,
    options: RecastOptions,
}

impl Default for Recaster {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Recaster {
    /// A recaster with default options and auto-registered types.
    pub fn new() -> Self {
        RecasterBuilder::new().build()
    }

    #[inline]
    pub fn builder() -> RecasterBuilder {
        RecasterBuilder::new()
    }

    #[inline]
    pub fn options(&self) -> &RecastOptions {
        &self.options
    }

    #[inline]
    pub fn type_registry(&self) -> &TypeRegistry {
        &self.types
    }

    #[inline]
    pub fn transformers(&self) -> &TransformerRegistry {
        &self.transformers
    }

    #[inline]
    pub fn factory(&self) -> ObjectFactory<'_> {
        ObjectFactory::new(&self.types)
    }

    #[inline]
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self)
    }

    /// Encodes `value` as a root document.
    ///
    /// A struct becomes a document with its discriminator and fields. Any
    /// other value is wrapped as `{ __recast: <type>, __encodedValue: <value> }`.
    /// An [`Object`](crate::Object) root is encoded as its content.
    pub fn to_document(&self, value: &dyn Recast) -> Result<Document> {
        let mut cx = Context::new(self, Direction::Encode);
        match value.recast_ref() {
            RecastRef::Struct(value) => transform::encode_struct(&mut cx, value),
            RecastRef::Object(object) => self.to_document(object.get()),
            _ => {
                let encoded = transform::encode_value(&mut cx, value, None)?;
                let mut document = Document::with_capacity(2);
                document.insert(DISCRIMINATOR_KEY, value.recast_type_info().discriminator());
                document.insert(ENCODED_VALUE_KEY, encoded);
                Ok(document)
            }
        }
    }

    /// Decodes a root document as `T`.
    ///
    /// The discriminator, if present, must name `T`.
    pub fn from_document<T: Typed>(&self, document: &Document) -> Result<T> {
        self.from_document_dyn(document, Some(T::type_info()))?
            .take::<T>()
            .map_err(|found| {
                ReconstructionError::TypeMismatch {
                    expected: T::type_info().type_path(),
                    found: found.type_path(),
                }
                .into()
            })
    }

    /// Decodes a root document as `target`, or as whatever its
    /// discriminator names when no target is given.
    pub fn from_document_dyn(
        &self,
        document: &Document,
        target: Option<&'static TypeInfo>,
    ) -> Result<Box<dyn Recast>> {
        let mut cx = Context::new(self, Direction::Decode);
        match target {
            Some(TypeInfo::Object(_)) => {
                let object = transform::decode_natural(&mut cx, &document.clone().into())?;
                Ok(Box::new(object))
            }
            _ => transform::decode_document(&mut cx, document, target),
        }
    }

    /// Decodes the fields of `document` into an existing struct.
    ///
    /// Fields absent from the document keep their value.
    pub fn merge_document(&self, document: &Document, target: &mut dyn Recast) -> Result<()> {
        let info = target.recast_type_info();
        self.factory().resolve_document(document, Some(info))?;
        let mut cx = Context::new(self, Direction::Decode);
        match target.recast_mut().as_struct() {
            Some(target) => transform::merge_struct(&mut cx, document, target),
            None => Err(ReconstructionError::NotMergeable {
                type_path: info.type_path(),
            }
            .into()),
        }
    }
}

// -----------------------------------------------------------------------------
// RecasterBuilder

/// Configures a [`Recaster`].
///
/// ```
/// use recast_codec::{RecastOptions, Recaster};
///
/// let recaster = Recaster::builder()
///     .options(RecastOptions::new().with_store_empties(true))
///     .auto_register(false)
///     .build();
/// assert!(recaster.options().store_empties());
/// ```
pub struct RecasterBuilder {
    types: TypeRegistry,
    transformers: TransformerRegistry,
    options: RecastOptions,
    auto_register: bool,
}

impl Default for RecasterBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl RecasterBuilder {
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            transformers: TransformerRegistry::new(),
            options: RecastOptions::new(),
            auto_register: true,
        }
    }

    /// Registers `T` and the types it is built from.
    pub fn register<T: GetTypeMeta>(mut self) -> Self {
        self.types.register::<T>();
        self
    }

    /// Whether `build` collects types marked `#[recast(auto_register)]`.
    /// On by default.
    pub fn auto_register(mut self, enabled: bool) -> Self {
        self.auto_register = enabled;
        self
    }

    /// Handles `T` with `transformer` instead of the built-in conversion.
    pub fn with_transformer<T: Typed>(mut self, transformer: impl CustomTransformer) -> Self {
        self.transformers.insert_custom::<T>(transformer);
        self
    }

    pub fn options(mut self, options: RecastOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn type_registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    #[inline]
    pub fn transformers_mut(&mut self) -> &mut TransformerRegistry {
        &mut self.transformers
    }

    pub fn build(mut self) -> Recaster {
        if self.auto_register && !self.types.auto_register() {
            log::debug!("auto registration is unavailable, only explicitly registered types are known");
        }
        log::debug!(
            "recaster ready with {} types and {} leaf transformers",
            self.types.len(),
            self.transformers.len(),
        );
        Recaster {
            types: self.types,
            transformers: self.transformers,
            options: self.options,
        }
    }
}
