use crate::Recast;

/// A value that may be absent.
pub trait Optional: Recast {
    fn get(&self) -> Option<&dyn Recast>;

    #[inline]
    fn is_none(&self) -> bool {
        self.get().is_none()
    }
}

impl dyn Optional {
    #[inline]
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}
