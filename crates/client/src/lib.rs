//! Async client for visual-acuity observations.
//!
//! This crate is the integration point of the workspace: it carries the HTTP
//! transport collaborator and the [`ObservationGateway`] that records and
//! retrieves visual-acuity measurements against a FHIR server.
//!
//! Handles:
//! - request construction and retried delivery ([`transport`])
//! - gateway configuration (base address, bearer credential, extra headers)
//! - translation of transport/protocol failures into one uniform error
//!
//! Pure domain logic (scales, conversion, normalization) lives in
//! `acuity-scale` and `acuity-fhir`; nothing here blocks a thread, and
//! suspension happens only at the network call boundary.

pub mod gateway;
pub mod transport;

pub use gateway::ObservationGateway;
pub use transport::{HttpTransport, RetryPolicy, Transport, TransportError, TransportRequest};

use acuity_fhir::FhirError;

/// Errors returned by gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An operation was attempted before the server base address was set.
    #[error("server base address has not been configured")]
    NotConfigured,

    /// The transport failed; the message carries the server's joined
    /// operation-outcome diagnostics when it sent any.
    #[error("observation request failed: {0}")]
    Transport(String),

    /// The server's response did not match the expected resource shape.
    #[error("unexpected response shape: {0}")]
    InvalidResponse(#[from] FhirError),
}

/// Type alias for Results that can fail with a [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;
