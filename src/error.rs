use std::error;
use std::fmt;

use crate::sys::{self, igraph_error_t, igraph_integer_t};

/// Errors surfaced by the owning wrappers.
///
/// Using a view after its owner reallocated is not represented here: views
/// borrow their owner, so the compiler rejects any reallocating call while a
/// view is still alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The library could not allocate storage for `operation`.
    AllocationFailure {
        operation: &'static str,
        code: igraph_error_t,
    },
    /// Checked element access past the end.
    IndexOutOfRange { index: usize, len: usize },
    /// The library rejected the arguments of `operation`.
    InvalidArgument {
        operation: &'static str,
        code: igraph_error_t,
    },
    /// Any other status code reported by the library.
    Foreign {
        operation: &'static str,
        code: igraph_error_t,
    },
}

impl Error {
    /// Status code reported by the library, if the error came from it.
    pub fn code(&self) -> Option<igraph_error_t> {
        match self {
            Error::AllocationFailure { code, .. }
            | Error::InvalidArgument { code, .. }
            | Error::Foreign { code, .. } => Some(*code),
            Error::IndexOutOfRange { .. } => None,
        }
    }

    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Error::AllocationFailure { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure { operation, code } => write!(
                f,
                "failed to {}: {} (igraph error {})",
                operation,
                sys::igraph_strerror(*code),
                code
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of range for length {}", index, len)
            }
            Error::InvalidArgument { operation, code } | Error::Foreign { operation, code } => {
                write!(
                    f,
                    "failed to {}: {} (igraph error {})",
                    operation,
                    sys::igraph_strerror(*code),
                    code
                )
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Turn a status code from the library into a `Result`.
pub fn check_code(code: igraph_error_t, operation: &'static str) -> Result<()> {
    let err = match code {
        sys::IGRAPH_SUCCESS => return Ok(()),
        sys::IGRAPH_ENOMEM | sys::IGRAPH_EOVERFLOW => Error::AllocationFailure { operation, code },
        sys::IGRAPH_EINVAL | sys::IGRAPH_EINVVID => Error::InvalidArgument { operation, code },
        _ => Error::Foreign { operation, code },
    };
    log::debug!("{}", err);
    Err(err)
}

/// Convert a Rust length into the library's signed size type.
pub(crate) fn foreign_size(n: usize, operation: &'static str) -> Result<igraph_integer_t> {
    igraph_integer_t::try_from(n).map_err(|_| Error::AllocationFailure {
        operation,
        code: sys::IGRAPH_EOVERFLOW,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_variants() {
        assert!(check_code(sys::IGRAPH_SUCCESS, "noop").is_ok());
        assert!(check_code(sys::IGRAPH_ENOMEM, "grow").unwrap_err().is_allocation_failure());
        assert!(matches!(
            check_code(sys::IGRAPH_EINVVID, "create graph"),
            Err(Error::InvalidArgument { code: sys::IGRAPH_EINVVID, .. })
        ));
        assert!(matches!(
            check_code(sys::IGRAPH_FAILURE, "anything"),
            Err(Error::Foreign { .. })
        ));
    }

    #[test]
    fn display_names_the_operation() {
        let err = check_code(sys::IGRAPH_ENOMEM, "resize vector").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to resize vector: out of memory (igraph error 2)"
        );
        assert_eq!(err.code(), Some(sys::IGRAPH_ENOMEM));
    }
}
