//! Status codes reported by navigation backends
//!
//! Query builders and crowd factories report failures with a [`Status`]. The
//! context carries the code through to its own error type untouched so the
//! caller can tell an exhausted node budget from an invalid mesh.

/// Failure status for backend construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Operation failed due to an unknown reason
    Failure,
    /// Provided parameter was invalid
    InvalidParam,
    /// Operation ran out of memory
    OutOfMemory,
    /// Navigation mesh data is invalid
    NavMeshInvalid,
    /// The navigation mesh has already been released
    NavMeshDisposed,
    /// Crowd manager encountered an error
    CrowdError,
    /// Slot index is outside the supported range
    SlotOutOfRange,
}

impl std::error::Error for Status {}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Failure => write!(f, "Failure"),
            Status::InvalidParam => write!(f, "Invalid parameter"),
            Status::OutOfMemory => write!(f, "Out of memory"),
            Status::NavMeshInvalid => write!(f, "Invalid navigation mesh"),
            Status::NavMeshDisposed => write!(f, "Navigation mesh disposed"),
            Status::CrowdError => write!(f, "Crowd error"),
            Status::SlotOutOfRange => write!(f, "Slot out of range"),
        }
    }
}
