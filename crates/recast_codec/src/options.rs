/// Immutable settings of a [`Recaster`](crate::Recaster).
///
/// # Examples
///
/// ```
/// use recast_codec::RecastOptions;
///
/// let options = RecastOptions::new().with_store_empties(true);
/// assert!(options.store_empties());
/// assert!(!options.store_nulls());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecastOptions {
    store_empties: bool,
    store_nulls: bool,
    max_depth: usize,
}

impl RecastOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Empties and nulls are dropped, depth is limited to
    /// [`DEFAULT_MAX_DEPTH`](Self::DEFAULT_MAX_DEPTH).
    pub const fn new() -> Self {
        Self {
            store_empties: false,
            store_nulls: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Store empty maps as empty documents instead of null.
    pub const fn with_store_empties(mut self, store_empties: bool) -> Self {
        self.store_empties = store_empties;
        self
    }

    /// Keep struct fields that encode to null instead of omitting them.
    pub const fn with_store_nulls(mut self, store_nulls: bool) -> Self {
        self.store_nulls = store_nulls;
        self
    }

    /// Maximum nesting of fields, elements and entries in either direction.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub const fn store_empties(&self) -> bool {
        self.store_empties
    }

    #[inline]
    pub const fn store_nulls(&self) -> bool {
        self.store_nulls
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for RecastOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
