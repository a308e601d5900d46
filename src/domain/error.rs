//! The closed error taxonomy shared by every layer.
//!
//! The engine and the stores only ever return `CarError`; the transport
//! layer maps each variant to exactly one status code. Anything the
//! backing store fails with that is not a duplicate id or a missing row
//! becomes `Storage`, tagged with the operation that failed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarError {
    /// Input violated a field-level rule. Always a client fault.
    #[error("{0}")]
    Validation(String),

    /// Create hit an already-used id (primary key collision).
    #[error("car with this ID already exists")]
    DuplicateId,

    /// The targeted car does not exist.
    #[error("car not found")]
    NotFound,

    /// Any other backing-store failure. Opaque to callers; the detail is
    /// logged at the transport layer, never serialized into a response.
    #[error("storage failure in {op}: {cause}")]
    Storage {
        op: &'static str,
        cause: anyhow::Error,
    },
}

impl CarError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CarError::Validation(msg.into())
    }

    /// Wraps an opaque storage fault with the name of the failing operation.
    pub fn storage(op: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        CarError::Storage {
            op,
            cause: cause.into(),
        }
    }
}
