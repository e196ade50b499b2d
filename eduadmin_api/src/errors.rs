//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unexpected response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned 401; the stored session is no longer valid.
    #[error("Session expired")]
    SessionExpired,
    /// The API returned a non-success status, with the `message` field of the
    /// body when one was present (a body snippet otherwise).
    #[error("Request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    /// A wrapped endpoint answered 200 with `success: false`.
    #[error("{message}")]
    Rejected { message: String },
    /// The response body did not match the expected shape.
    #[error("Failed to decode response body")]
    Decode,
}
