//! Gateway for recording and retrieving visual-acuity observations.
//!
//! One [`ObservationGateway`] instance holds a transport plus mutable
//! configuration (server base address, opaque bearer credential, extra
//! headers). Configuration may be changed between calls; the gateway assumes
//! serialized use per instance and adds no synchronization of its own.
//!
//! Every operation either fully succeeds or fully fails: transport and
//! protocol failures are caught and re-raised as one uniform
//! [`ClientError`].

use acuity_fhir::{BodySite, Bundle, Observation, VisualAcuityReading};
use acuity_fhir::codings::CATEGORY_EXAM_CODE;
use acuity_scale::UnitSystem;
use reqwest::Method;

use crate::transport::{HttpTransport, RetryPolicy, Transport, TransportError, TransportRequest};
use crate::{ClientError, ClientResult};

const OBSERVATION_PATH: &str = "Observation";

/// Client for visual-acuity `Observation` resources.
pub struct ObservationGateway<T: Transport = HttpTransport> {
    transport: T,
    base_address: Option<String>,
    credential: Option<String>,
    headers: Vec<(String, String)>,
}

impl ObservationGateway<HttpTransport> {
    /// Gateway over an HTTP transport with the default retry policy.
    ///
    /// The gateway is not usable until [`configure`](Self::configure) has
    /// set the server base address.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }

    /// Gateway over an HTTP transport with an explicit retry policy.
    pub fn with_retry_policy(retry: RetryPolicy) -> Self {
        Self::with_transport(HttpTransport::with_retry_policy(retry))
    }
}

impl Default for ObservationGateway<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ObservationGateway<T> {
    /// Gateway over a caller-supplied transport.
    pub fn with_transport(transport: T) -> Self {
        ObservationGateway {
            transport,
            base_address: None,
            credential: None,
            headers: Vec::new(),
        }
    }

    /// Set the server base address and credential.
    pub fn configure(&mut self, base_address: impl Into<String>, credential: impl Into<String>) {
        self.base_address = Some(base_address.into());
        self.credential = Some(credential.into());
    }

    /// Replace the stored credential (opaque bearer token).
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = Some(credential.into());
    }

    /// Replace the extra headers sent with every request.
    pub fn set_headers(&mut self, headers: Vec<(String, String)>) {
        self.headers = headers;
    }

    /// Record a new visual-acuity measurement.
    ///
    /// Returns the server-assigned observation.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotConfigured`] before [`configure`](Self::configure);
    /// [`ClientError::Transport`] on delivery failure.
    pub async fn create_reading(
        &self,
        subject_ref: &str,
        encounter_ref: Option<&str>,
        body_site: BodySite,
        log_mar: f64,
    ) -> ClientResult<Observation> {
        let observation = Observation::visual_acuity(subject_ref, encounter_ref, body_site, log_mar);
        let response = self
            .send(
                Method::POST,
                vec![("category".to_string(), CATEGORY_EXAM_CODE.to_string())],
                Some(serde_json::to_value(&observation).map_err(acuity_fhir::FhirError::from)?),
            )
            .await?;
        Ok(Observation::from_json(response)?)
    }

    /// Record a measurement, replacing any existing one for the subject.
    ///
    /// Issues an update filtered by subject reference; the server is
    /// expected to upsert the matching record(s).
    ///
    /// # Errors
    ///
    /// As for [`create_reading`](Self::create_reading).
    pub async fn create_or_update_reading(
        &self,
        subject_ref: &str,
        encounter_ref: Option<&str>,
        body_site: BodySite,
        log_mar: f64,
    ) -> ClientResult<Observation> {
        let observation = Observation::visual_acuity(subject_ref, encounter_ref, body_site, log_mar);
        let response = self
            .send(
                Method::PUT,
                vec![
                    ("category".to_string(), CATEGORY_EXAM_CODE.to_string()),
                    ("subject".to_string(), subject_ref.to_string()),
                ],
                Some(serde_json::to_value(&observation).map_err(acuity_fhir::FhirError::from)?),
            )
            .await?;
        Ok(Observation::from_json(response)?)
    }

    /// Retrieve a subject's readings for one eye, in bundle order.
    ///
    /// Bundle entries without an embedded resource are dropped; the rest are
    /// normalized with the plain `"{value} {unit}"` display rule.
    ///
    /// # Errors
    ///
    /// As for [`create_reading`](Self::create_reading).
    pub async fn get_readings(
        &self,
        subject_ref: &str,
        body_site: BodySite,
    ) -> ClientResult<Vec<VisualAcuityReading>> {
        let observations = self.fetch_observations(subject_ref, body_site).await?;
        Ok(observations
            .iter()
            .map(VisualAcuityReading::from_observation)
            .collect())
    }

    /// Retrieve a subject's readings for one eye with Snellen displays.
    ///
    /// As [`get_readings`](Self::get_readings), but each reading's display
    /// is resolved against the given unit system's scale table, falling back
    /// to `"{value} {unit}"` on a lookup miss.
    ///
    /// # Errors
    ///
    /// As for [`create_reading`](Self::create_reading).
    pub async fn get_readings_with_scale(
        &self,
        unit: UnitSystem,
        subject_ref: &str,
        body_site: BodySite,
    ) -> ClientResult<Vec<VisualAcuityReading>> {
        let observations = self.fetch_observations(subject_ref, body_site).await?;
        Ok(observations
            .iter()
            .map(|obs| VisualAcuityReading::from_observation_with_scale(unit, obs))
            .collect())
    }

    async fn fetch_observations(
        &self,
        subject_ref: &str,
        body_site: BodySite,
    ) -> ClientResult<Vec<Observation>> {
        let response = self
            .send(
                Method::GET,
                vec![
                    ("category".to_string(), CATEGORY_EXAM_CODE.to_string()),
                    ("subject".to_string(), subject_ref.to_string()),
                    ("code".to_string(), body_site.method_code().to_string()),
                ],
                None,
            )
            .await?;
        Ok(Bundle::from_json(response)?.resources())
    }

    async fn send(
        &self,
        method: Method,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> ClientResult<serde_json::Value> {
        let base_address = self
            .base_address
            .clone()
            .ok_or(ClientError::NotConfigured)?;

        let request = TransportRequest {
            method,
            base_address,
            path: OBSERVATION_PATH.to_string(),
            headers: self.request_headers(),
            query,
            body,
        };

        self.transport
            .request(request)
            .await
            .map_err(|err| ClientError::Transport(transport_message(err)))
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        if let Some(credential) = &self.credential {
            headers.push(("Authorization".to_string(), format!("Bearer {credential}")));
        }
        headers
    }
}

/// Human-readable message for a transport failure: the server's joined
/// operation-outcome diagnostics when present, else the generic description.
fn transport_message(err: TransportError) -> String {
    if let TransportError::Status {
        outcome: Some(outcome),
        ..
    } = &err
    {
        if let Some(diagnostics) = outcome.joined_diagnostics() {
            return diagnostics;
        }
    }
    err.to_string()
}
