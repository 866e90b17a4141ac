//! Error types.
//!
//! - [`DecodeError`]: a stored value does not fit the declared target type.
//! - [`ReconstructionError`]: the concrete type of a document can't be
//!   resolved or constructed.
//! - [`EncodeError`]: a value can't be turned into a document value.
//!
//! [`RecastError`] wraps all three and, once a failure happens below the
//! root, the document path of the failing field.

use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

/// A stored value is structurally incompatible with its target type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("can't convert to {target} from {found}")]
    Incompatible {
        target: &'static str,
        found: &'static str,
    },
    #[error("can't parse `{text}` as {target}")]
    Parse { target: &'static str, text: String },
    #[error("`{variant}` is not a variant of {target}")]
    UnknownVariant {
        target: &'static str,
        variant: String,
    },
    #[error("decoded {found} where {target} was expected")]
    TypeMismatch {
        target: &'static str,
        found: &'static str,
    },
    #[error("null element for non-nullable {target}")]
    NullElement { target: &'static str },
    #[error("map key decoded to null for key type {target}")]
    NullKey { target: &'static str },
    #[error("invalid message JSON for {target}: {message}")]
    Message {
        target: &'static str,
        message: String,
    },
    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),
}

/// The concrete type behind a document can't be established.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReconstructionError {
    #[error("no registered type is named `{0}`")]
    UnknownDiscriminator(String),
    #[error("{type_path} has no registered constructor")]
    NotConstructible { type_path: &'static str },
    #[error("discriminator must be a string, found {found}")]
    InvalidDiscriminator { found: &'static str },
    #[error("document has no discriminator and no target type was given")]
    MissingDiscriminator,
    #[error("document describes {found} but {expected} was requested")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{type_path} is not a struct and can't be merged into")]
    NotMergeable { type_path: &'static str },
}

/// A value can't be encoded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("cycle detected at a value of type {type_path}")]
    Cycle { type_path: &'static str },
    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),
    #[error("no transformer applies to {type_path}")]
    Unsupported { type_path: &'static str },
    #[error("map key encoded to {found}, which has no string form")]
    InvalidMapKey { found: &'static str },
    #[error("can't print message {type_path}: {message}")]
    Message {
        type_path: &'static str,
        message: String,
    },
}

/// Any failure of a recast operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecastError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),
    /// The wrapped error happened at `path`, e.g. `rows[0].k`.
    #[error("at `{path}`: {source}")]
    Located {
        path: String,
        #[source]
        source: Box<RecastError>,
    },
}

impl RecastError {
    /// Document path of the failing field, `None` for failures at the root.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Located { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The error without its location.
    pub fn kind(&self) -> &RecastError {
        match self {
            Self::Located { source, .. } => source.kind(),
            other => other,
        }
    }

    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self.kind() {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_encode(&self) -> Option<&EncodeError> {
        match self.kind() {
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_reconstruction(&self) -> Option<&ReconstructionError> {
        match self.kind() {
            Self::Reconstruction(e) => Some(e),
            _ => None,
        }
    }
}

/// `Result` with [`RecastError`] as the default error.
pub type Result<T, E = RecastError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::ToString;

    use super::{DecodeError, RecastError};

    #[test]
    fn located_display_and_kind() {
        let error = RecastError::Located {
            path: "rows[0].k".into(),
            source: Box::new(
                DecodeError::Incompatible {
                    target: "Instant",
                    found: "string",
                }
                .into(),
            ),
        };
        assert_eq!(
            error.to_string(),
            "at `rows[0].k`: can't convert to Instant from string"
        );
        assert_eq!(error.path(), Some("rows[0].k"));
        assert!(matches!(
            error.as_decode(),
            Some(DecodeError::Incompatible { .. })
        ));
        assert!(error.as_encode().is_none());
    }
}
