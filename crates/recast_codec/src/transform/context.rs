use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::{self, Write};

use recast_utils::hash::HashSet;

use crate::error::{DecodeError, EncodeError, RecastError, Result};
use crate::{Recast, Recaster};

// -----------------------------------------------------------------------------
// PathSegment

/// One step from the root document to the value being transformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PathSegment {
    Field(&'static str),
    Index(usize),
    Key(String),
}

struct DisplayPath<'a>(&'a [PathSegment]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name) if position == 0 => f.write_str(name)?,
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Field(name) => {
                    f.write_char('.')?;
                    f.write_str(name)?;
                }
                PathSegment::Key(key) => {
                    f.write_char('.')?;
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Context

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Encode,
    Decode,
}

/// State threaded through one `to_document` or `from_document` call.
///
/// Tracks the document path for error reporting, bounds the nesting depth
/// and, on encode, remembers which containers are currently being visited.
pub(crate) struct Context<'a> {
    pub(crate) recaster: &'a Recaster,
    direction: Direction,
    path: Vec<PathSegment>,
    active: HashSet<(usize, TypeId)>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(recaster: &'a Recaster, direction: Direction) -> Self {
        Self {
            recaster,
            direction,
            path: Vec::new(),
            active: HashSet::default(),
        }
    }

    /// Runs `f` one level deeper, at `segment`.
    ///
    /// Errors coming out of `f` are tagged with the path of the innermost
    /// failing value.
    pub(crate) fn nest<T>(
        &mut self,
        segment: PathSegment,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let max_depth = self.recaster.options().max_depth();
        if self.path.len() >= max_depth {
            let error = match self.direction {
                Direction::Encode => RecastError::from(EncodeError::DepthLimitExceeded(max_depth)),
                Direction::Decode => RecastError::from(DecodeError::DepthLimitExceeded(max_depth)),
            };
            return Err(self.locate(error));
        }
        self.path.push(segment);
        let result = f(self).map_err(|error| self.locate(error));
        self.path.pop();
        result
    }

    /// Runs `f` with `value` marked as being encoded.
    ///
    /// Reaching the same value again before `f` returns means the graph
    /// loops back on itself.
    pub(crate) fn guard<T>(
        &mut self,
        value: &dyn Recast,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let key = (core::ptr::from_ref(value).cast::<()>().addr(), value.ty_id());
        if !self.active.insert(key) {
            return Err(self.locate(
                EncodeError::Cycle {
                    type_path: value.type_path(),
                }
                .into(),
            ));
        }
        let result = f(self);
        self.active.remove(&key);
        result
    }

    fn locate(&self, error: RecastError) -> RecastError {
        match error {
            located @ RecastError::Located { .. } => located,
            _ if self.path.is_empty() => error,
            _ => RecastError::Located {
                path: DisplayPath(&self.path).to_string(),
                source: Box::new(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{DisplayPath, PathSegment};

    #[test]
    fn path_rendering() {
        let path = [
            PathSegment::Field("rows"),
            PathSegment::Index(0),
            PathSegment::Key("k".to_string()),
            PathSegment::Field("at"),
        ];
        assert_eq!(DisplayPath(&path).to_string(), "rows[0].k.at");
        assert_eq!(DisplayPath(&[PathSegment::Index(3)]).to_string(), "[3]");
    }
}
