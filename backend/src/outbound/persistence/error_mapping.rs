//! Shared mapping from driver errors to repository error constructors.

use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};
use tracing::debug;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Whether the driver reported a unique index violation.
pub(super) fn is_duplicate_key(error: &DriverError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

/// Map driver failures into query/connection constructors.
///
/// Server selection, I/O, and pool failures mean the store is unreachable;
/// everything else is reported as a query failure.
pub(super) fn map_driver_error<E, Q, C>(error: DriverError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "document store operation failed");
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => connection(error.to_string()),
        _ => query(error.to_string()),
    }
}
