use std::fmt;

/// Rejected plane input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The normal vector has zero length.
    ZeroNormal,
    /// An input coordinate is NaN or infinite.
    NonFinite,
    /// The three points are coincident or collinear and span no plane.
    Degenerate,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ZeroNormal => write!(f, "plane normal cannot be the zero vector"),
            GeometryError::NonFinite => write!(f, "plane input contains a non-finite coordinate"),
            GeometryError::Degenerate => {
                write!(f, "plane points are collinear or coincident")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
