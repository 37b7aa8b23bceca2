use core::{error, fmt};

/// Error returned by the constructor functions stored in
/// [`TypeInfo`](crate::info::TypeInfo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// The type exposes no constructor for this operation.
    NoConstructor { type_path: &'static str },
    /// The wrong number of arguments was supplied.
    ArgumentCount { expected: usize, found: usize },
    /// An argument has the wrong type.
    ArgumentType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    /// The element count does not match the product of the dimensions, or the
    /// rank is wrong.
    DimensionMismatch { expected: usize, found: usize },
    /// The value cannot be built at runtime, e.g. a read-only view.
    Unsupported { type_path: &'static str },
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConstructor { type_path } => {
                write!(f, "`{type_path}` exposes no constructor")
            }
            Self::ArgumentCount { expected, found } => {
                write!(f, "expected {expected} arguments, found {found}")
            }
            Self::ArgumentType {
                index,
                expected,
                found,
            } => write!(
                f,
                "argument {index} has type `{found}`, expected `{expected}`"
            ),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "expected {expected} elements, found {found}")
            }
            Self::Unsupported { type_path } => {
                write!(f, "`{type_path}` cannot be constructed at runtime")
            }
        }
    }
}

impl error::Error for ConstructError {}
