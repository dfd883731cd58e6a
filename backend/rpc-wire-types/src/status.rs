use std::fmt;

/// Canonical status codes with gRPC-compatible wire values.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Success (not an error)
    Ok = 0,
    /// Operation was cancelled by the caller
    Cancelled = 1,
    /// Error of an unknown or unmapped category
    Unknown = 2,
    /// Malformed request
    InvalidArgument = 3,
    /// Deadline passed before completion
    DeadlineExceeded = 4,
    /// Entity not found
    NotFound = 5,
    /// Entity already exists
    AlreadyExists = 6,
    /// Caller lacks permission
    PermissionDenied = 7,
    /// Out of quota, slots, etc.
    ResourceExhausted = 8,
    /// System not in required state
    FailedPrecondition = 9,
    /// Operation aborted (conflict, etc.)
    Aborted = 10,
    /// Value out of valid range
    OutOfRange = 11,
    /// Method not implemented or not registered
    Unimplemented = 12,
    /// Internal error (bug)
    Internal = 13,
    /// Service temporarily unavailable
    Unavailable = 14,
    /// Unrecoverable data loss
    DataLoss = 15,
    /// Missing or invalid credentials
    Unauthenticated = 16,
}

impl StatusCode {
    /// Resolve a wire value to a status code.
    ///
    /// Total: integers outside the registered table resolve to
    /// [`StatusCode::Unknown`], never an error.
    pub fn from_wire(val: u32) -> Self {
        match val {
            0 => StatusCode::Ok,
            1 => StatusCode::Cancelled,
            2 => StatusCode::Unknown,
            3 => StatusCode::InvalidArgument,
            4 => StatusCode::DeadlineExceeded,
            5 => StatusCode::NotFound,
            6 => StatusCode::AlreadyExists,
            7 => StatusCode::PermissionDenied,
            8 => StatusCode::ResourceExhausted,
            9 => StatusCode::FailedPrecondition,
            10 => StatusCode::Aborted,
            11 => StatusCode::OutOfRange,
            12 => StatusCode::Unimplemented,
            13 => StatusCode::Internal,
            14 => StatusCode::Unavailable,
            15 => StatusCode::DataLoss,
            16 => StatusCode::Unauthenticated,
            _ => StatusCode::Unknown,
        }
    }

    /// Convert to the u32 wire value.
    pub fn wire_value(self) -> u32 {
        self as u32
    }

    /// Get a human-readable description of this status code.
    pub fn description(self) -> &'static str {
        match self {
            StatusCode::Ok => "ok",
            StatusCode::Cancelled => "operation was cancelled",
            StatusCode::Unknown => "unknown error",
            StatusCode::InvalidArgument => "invalid argument",
            StatusCode::DeadlineExceeded => "deadline exceeded",
            StatusCode::NotFound => "not found",
            StatusCode::AlreadyExists => "already exists",
            StatusCode::PermissionDenied => "permission denied",
            StatusCode::ResourceExhausted => "resource exhausted",
            StatusCode::FailedPrecondition => "failed precondition",
            StatusCode::Aborted => "operation aborted",
            StatusCode::OutOfRange => "out of range",
            StatusCode::Unimplemented => "not implemented",
            StatusCode::Internal => "internal error",
            StatusCode::Unavailable => "service unavailable",
            StatusCode::DataLoss => "data loss",
            StatusCode::Unauthenticated => "unauthenticated",
        }
    }

    /// Check if this code indicates a client-side problem.
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            StatusCode::InvalidArgument
                | StatusCode::NotFound
                | StatusCode::AlreadyExists
                | StatusCode::PermissionDenied
                | StatusCode::OutOfRange
                | StatusCode::Unauthenticated
        )
    }

    /// Check if this code indicates a server-side problem.
    pub fn is_server_error(self) -> bool {
        matches!(
            self,
            StatusCode::Unimplemented | StatusCode::Internal | StatusCode::DataLoss
        )
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> u32 {
        code.wire_value()
    }
}

impl From<u32> for StatusCode {
    fn from(val: u32) -> StatusCode {
        StatusCode::from_wire(val)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.wire_value())
    }
}
