//! Error types for the vehicle inventory client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! vehicle does not exist" from "the server returned an unexpected status"
//! and from "the server could not be reached". Schema problems surface as
//! `MissingField` naming the offending key.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response: connection refused, timeout,
    /// unreadable body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned 404; the requested vehicle does not exist.
    #[error("vehicle not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A vehicle field was absent from a response, a filter named a key the
    /// schema does not have, or an update carried no id.
    #[error("missing field: {0}")]
    MissingField(String),

    /// A filter criterion names a known field with a value of the wrong type.
    #[error("invalid criterion for {field}: {reason}")]
    InvalidCriterion { field: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A nearest-vehicle search had no candidate besides the reference.
    #[error("no candidate vehicles besides the reference")]
    EmptySet,
}
