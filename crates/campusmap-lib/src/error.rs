use thiserror::Error;

/// Convenient result alias for the campus map library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No session token is available; the caller must authenticate first.
    #[error("no session credential available; log in first")]
    MissingCredential,

    /// A candidate location failed local validation. No network call was
    /// made for the attempt.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The directory service rejected the request or returned a non-ok
    /// response. Terminal for the attempt; the library never retries.
    #[error("directory service error: {message}")]
    Service { message: String },

    /// An add-location flow is already pending; adds are serialized.
    #[error("another add-location attempt is already in progress")]
    AddInFlight,

    /// Raised when an add flow method is called outside its expected phase.
    #[error("add-location flow is not in the {expected} phase")]
    FlowOutOfPhase { expected: &'static str },

    /// Raised when the directory service response body could not be decoded.
    #[error("failed to decode directory response: {message}")]
    MalformedResponse { message: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for IO errors (session token cache).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No suitable config directory could be resolved for the session cache.
    #[error("failed to resolve config directory for session storage")]
    ConfigDirsUnavailable,
}

/// Local validation failures for a candidate location.
///
/// All variants are detected before any directory call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Location names must be non-empty.
    #[error("location name must not be empty")]
    EmptyName,

    /// Names are unique case-insensitively within the current location set.
    #[error("a location named '{name}' already exists")]
    DuplicateName { name: String },

    /// Category is outside the closed set of five values.
    #[error("unknown location category '{value}' (expected one of: building, library, cafeteria, gym, hostel)")]
    UnknownCategory { value: String },

    /// Position falls outside the map viewport.
    #[error("position ({x}, {y}) is outside the map viewport")]
    OutOfBounds { x: f64, y: f64 },
}
