//! Error types for the plants API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the plant does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging.
//!
//! Causes are carried as strings so an `ApiError` can be cloned, compared and
//! stored inside a `NetworkResponse` next to the body that produced it.

/// Errors surfaced by `Network`, `NetworkParser` and `NetworkService`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested plant does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The HTTP client failed before a response arrived (DNS, connect, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body did not match the expected envelope, light level or
    /// timestamp profile.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The plant id cannot name a member of the collection (`""`, `.`, `..`).
    #[error("invalid plant id `{0}`")]
    InvalidId(String),

    /// The configured base URL cannot address the plants collection.
    #[error("invalid base url `{0}`")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::HttpError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn display_not_found() {
        assert_eq!(ApiError::NotFound.to_string(), "resource not found");
    }
}
