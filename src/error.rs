//! Error types.

use core::{error, fmt};

/// Scalar parameter of a constructor or slicing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// Starting element position in a linear backing.
    Offset,
    /// Starting row.
    Row,
    /// Starting column.
    Column,
    /// Number of rows.
    Height,
    /// Number of columns.
    Width,
    /// Elements skipped between rows.
    Pitch,
    /// Depth slice of a 3D buffer.
    Depth,
}

impl Param {
    /// Returns the parameter name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::Row => "row",
            Self::Column => "column",
            Self::Height => "height",
            Self::Width => "width",
            Self::Pitch => "pitch",
            Self::Depth => "depth",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised when building, slicing, copying or pinning a 2D view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A scalar parameter is outside its valid domain.
    ///
    /// `limit` is the first invalid value for the parameter, or `usize::MAX`
    /// when the failure comes from an arithmetic overflow.
    OutOfRange {
        param: Param,
        value: usize,
        limit: usize,
    },

    /// The requested element span exceeds what remains in the backing store.
    AreaMismatch { area: usize, available: usize },

    /// The backing store holds elements of another type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The element type cannot be pinned.
    UnsupportedPin { element: &'static str },

    /// The destination of a copy is too small or has another shape.
    ShapeMismatch {
        required: (usize, usize),
        available: (usize, usize),
    },
}

impl Error {
    pub(crate) const fn out_of_range(param: Param, value: usize, limit: usize) -> Self {
        Self::OutOfRange {
            param,
            value,
            limit,
        }
    }

    pub(crate) const fn overflow(param: Param, value: usize) -> Self {
        Self::out_of_range(param, value, usize::MAX)
    }

    pub(crate) fn type_mismatch<Expected, Found>() -> Self {
        Self::TypeMismatch {
            expected: core::any::type_name::<Expected>(),
            found: core::any::type_name::<Found>(),
        }
    }

    /// Returns the parameter at fault, if any.
    #[must_use]
    pub const fn param(&self) -> Option<Param> {
        match self {
            Self::OutOfRange { param, .. } => Some(*param),
            _ => None,
        }
    }

    /// Returns a static message for the error.
    #[must_use]
    pub const fn const_message(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "parameter out of range",
            Self::AreaMismatch { .. } => "area exceeds the backing store",
            Self::TypeMismatch { .. } => "element type mismatch",
            Self::UnsupportedPin { .. } => "element type cannot be pinned",
            Self::ShapeMismatch { .. } => "destination shape mismatch",
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                param,
                value,
                limit: usize::MAX,
            } => write!(f, "{param} {value} overflows the addressable range"),
            Self::OutOfRange {
                param,
                value,
                limit,
            } => write!(f, "{param} {value} is out of range (must be less than {limit})"),
            Self::AreaMismatch { area, available } => write!(
                f,
                "area of {area} elements exceeds the {available} elements available"
            ),
            Self::TypeMismatch { expected, found } => write!(
                f,
                "backing store holds `{found}` elements, expected `{expected}`"
            ),
            Self::UnsupportedPin { element } => {
                write!(f, "`{element}` elements cannot be pinned")
            }
            Self::ShapeMismatch {
                required,
                available,
            } => write!(
                f,
                "destination of shape [{}, {}] cannot hold [{}, {}]",
                available.0, available.1, required.0, required.1
            ),
        }
    }
}
