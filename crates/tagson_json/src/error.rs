use alloc::string::String;

use tagson_reflect::ops::ConstructError;
use thiserror::Error;

/// Errors raised by the codec.
///
/// Strict-mode variants (`MissingMember`, `CircularReference`,
/// `MaxDepthExceeded`) are only produced when the matching setting is on.
/// Everything else always aborts the call.
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("`{ty}` has no member matching key `{key}`")]
    MissingMember { ty: &'static str, key: String },

    #[error("circular reference on `{ty}`")]
    CircularReference { ty: &'static str },

    #[error("maximum depth of {depth} exceeded")]
    MaxDepthExceeded { depth: usize },

    #[error("cannot resolve type name `{name}`")]
    TypeResolution { name: String },

    #[error("unknown global type ordinal {ordinal}")]
    UnknownTypeOrdinal { ordinal: u64 },

    #[error("unknown reference id {id}")]
    UnknownReference { id: u64 },

    #[error("expected `{expected}`, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("cannot construct `{ty}`: {reason}")]
    ConstructorBinding { ty: &'static str, reason: String },

    #[error("`{ty}` has no JSON form")]
    Unsupported { ty: &'static str },

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Reflect(#[from] ConstructError),
}

impl JsonError {
    #[inline]
    pub(crate) fn mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.into(),
        }
    }
}
