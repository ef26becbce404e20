//! FHIR wire/boundary support for visual-acuity observations.
//!
//! This crate provides **wire models** and **translation helpers** for the
//! subset of the FHIR `Observation` resource this library reads and writes:
//! - serde wire structs for `Observation`, search `Bundle`s and
//!   `OperationOutcome` diagnostics
//! - the fixed coding systems used for the exam category, eye body sites and
//!   the LogMAR method codes
//! - a payload builder for new visual-acuity observations
//! - normalization of an `Observation` into a flat [`VisualAcuityReading`]
//!
//! The resource schema is externally defined and versioned; wire structs are
//! deliberately lenient on read (unknown fields are ignored) and only the
//! fields this library consumes are modeled.

pub mod codings;
pub mod observation;
pub mod reading;

// Re-export public surface
pub use codings::BodySite;
pub use observation::{
    Bundle, BundleEntry, CodeableConcept, Coding, Observation, OperationOutcome, OutcomeIssue,
    Quantity, Reference,
};
pub use reading::VisualAcuityReading;

/// Errors returned by the FHIR boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    /// A payload did not match the expected resource shape.
    #[error("resource schema mismatch: {0}")]
    Translation(#[from] serde_json::Error),

    /// A resource carried an unexpected `resourceType`.
    #[error("expected resourceType '{expected}', got '{actual}'")]
    UnexpectedResourceType { expected: &'static str, actual: String },
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
