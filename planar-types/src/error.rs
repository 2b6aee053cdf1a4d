use crate::{Coord, CoordNum};
use std::fmt;

/// Errors surfaced by geometry construction and by the topology algorithms
/// built on these types.
///
/// `Topology` is the "this input/precision combination is unprocessable"
/// signal: it carries the coordinate at which the inconsistency was observed,
/// so that failures can be localised while debugging geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An input violated a structural invariant (unclosed ring, stray hole on
    /// an empty shell, mismatched ordinate payloads, ...).
    InvalidArgument(String),
    /// The planar-graph labelling was inconsistent.
    Topology {
        message: String,
        location: Option<(f64, f64)>,
    },
    /// The operation is not defined for the geometry it was invoked on.
    UnsupportedOperation(String),
    /// A conversion expected one geometry variant but found another.
    MismatchedGeometry {
        expected: &'static str,
        found: &'static str,
    },
    /// An installed interrupt handle was raised mid-computation.
    Interrupted,
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedOperation(message.into())
    }

    pub fn topology(message: impl Into<String>) -> Self {
        Error::Topology {
            message: message.into(),
            location: None,
        }
    }

    /// A topology error pinned to the coordinate where it was detected.
    pub fn topology_at<T: CoordNum>(message: impl Into<String>, coord: Coord<T>) -> Self {
        let location = match (coord.x.to_f64(), coord.y.to_f64()) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };
        Error::Topology {
            message: message.into(),
            location,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Error::Topology {
                message,
                location: Some((x, y)),
            } => {
                write!(f, "topology error: {} at or near ({} {})", message, x, y)
            }
            Error::Topology {
                message,
                location: None,
            } => write!(f, "topology error: {}", message),
            Error::UnsupportedOperation(message) => {
                write!(f, "unsupported operation: {}", message)
            }
            Error::MismatchedGeometry { expected, found } => {
                write!(f, "expected a {}, but found a {}", expected, found)
            }
            Error::Interrupted => write!(f, "operation was interrupted"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn topology_error_display_carries_location() {
        let err = Error::topology_at("side location conflict", coord! { x: 2.5, y: -3.0 });
        assert_eq!(
            err.to_string(),
            "topology error: side location conflict at or near (2.5 -3)"
        );
    }
}
