//! # Visual Acuity
//!
//! Client-side helper library for recording and retrieving visual-acuity
//! measurements as FHIR `Observation` resources, with conversion between
//! Snellen fractions (foot and metre charts) and LogMAR.
//!
//! The workspace splits into three members, re-exported here:
//! - `acuity-scale`: static scale tables and the Snellen/LogMAR conversion
//! - `acuity-fhir`: the consumed `Observation` wire subset, payload
//!   building and normalization into [`VisualAcuityReading`]
//! - `acuity-client`: the HTTP transport collaborator and the
//!   [`ObservationGateway`]
//!
//! ```rust,no_run
//! use visual_acuity::{BodySite, ObservationGateway, UnitSystem};
//!
//! # async fn example() -> Result<(), visual_acuity::ClientError> {
//! let mut gateway = ObservationGateway::new();
//! gateway.configure("https://fhir.example.org/r4", "token");
//!
//! let log_mar = visual_acuity::snellen_to_log_mar(20.0, 40.0).unwrap();
//! gateway
//!     .create_reading("Patient/42", None, BodySite::LeftEye, log_mar)
//!     .await?;
//!
//! let _readings = gateway
//!     .get_readings_with_scale(UnitSystem::Foot, "Patient/42", BodySite::LeftEye)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub use acuity_client::{
    ClientError, ClientResult, HttpTransport, ObservationGateway, RetryPolicy, Transport,
    TransportError, TransportRequest,
};
pub use acuity_fhir::{
    BodySite, Bundle, FhirError, FhirResult, Observation, OperationOutcome, VisualAcuityReading,
};
pub use acuity_scale::{
    log_mar_to_display, scales_for, snellen_to_log_mar, snellen_to_log_mar_with_correction,
    ScaleEntry, ScaleError, ScaleResult, UnitSystem, DEFAULT_OPTOTYPES_READ,
};
