//! Wire models for the consumed `Observation` subset.
//!
//! These structs cover exactly the fields this library reads and writes:
//! `resourceType`, `status`, the first category/code/bodySite codings, the
//! subject and encounter references, `valueQuantity` and
//! `effectiveDateTime`. Resources routinely carry more; unknown fields are
//! ignored on read and never written.

use crate::codings::{
    BodySite, CATEGORY_EXAM_CODE, CATEGORY_EXAM_DISPLAY, CATEGORY_SYSTEM, LOG_MAR_UNIT,
    SNOMED_SYSTEM,
};
use crate::{FhirError, FhirResult};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Status carried by every observation this library writes.
pub const STATUS_FINAL: &str = "final";

/// A coded value drawn from a terminology system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept expressed through one or more codings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,
}

impl CodeableConcept {
    /// The concept's first coding, where positional extraction applies.
    pub fn first_coding(&self) -> Option<&Coding> {
        self.coding.first()
    }

    fn single(system: &str, code: &str, display: &str) -> Self {
        CodeableConcept {
            coding: vec![Coding {
                system: Some(system.to_string()),
                code: Some(code.to_string()),
                display: Some(display.to_string()),
            }],
        }
    }
}

/// A reference to another resource, e.g. `Patient/123`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A measured value with its unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Wire representation of the consumed `Observation` subset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(default)]
    pub code: CodeableConcept,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(rename = "bodySite", default, skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    #[serde(
        rename = "effectiveDateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date_time: Option<String>,

    #[serde(
        rename = "valueQuantity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub value_quantity: Option<Quantity>,
}

impl Observation {
    /// Build the payload for a new visual-acuity measurement.
    ///
    /// The observation always carries `status: final`, the exam category and
    /// the body-site-specific LogMAR method coding; the quantity is
    /// `(log_mar, "LogMAR")` and `effectiveDateTime` is stamped at build
    /// time (UTC, RFC 3339).
    pub fn visual_acuity(
        subject_ref: &str,
        encounter_ref: Option<&str>,
        body_site: BodySite,
        log_mar: f64,
    ) -> Self {
        Observation {
            resource_type: "Observation".to_string(),
            id: None,
            status: Some(STATUS_FINAL.to_string()),
            category: vec![CodeableConcept::single(
                CATEGORY_SYSTEM,
                CATEGORY_EXAM_CODE,
                CATEGORY_EXAM_DISPLAY,
            )],
            code: CodeableConcept::single(
                SNOMED_SYSTEM,
                body_site.method_code(),
                body_site.method_display(),
            ),
            subject: Some(Reference {
                reference: Some(subject_ref.to_string()),
            }),
            encounter: encounter_ref.map(|r| Reference {
                reference: Some(r.to_string()),
            }),
            body_site: Some(CodeableConcept::single(
                SNOMED_SYSTEM,
                body_site.structure_code(),
                body_site.structure_display(),
            )),
            effective_date_time: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            value_quantity: Some(Quantity {
                value: Some(log_mar),
                unit: Some(LOG_MAR_UNIT.to_string()),
            }),
        }
    }

    /// Parse an observation from a JSON value, checking `resourceType`.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] when the payload does not match
    /// the wire shape and [`FhirError::UnexpectedResourceType`] when it is a
    /// different resource.
    pub fn from_json(value: serde_json::Value) -> FhirResult<Self> {
        let observation: Observation = serde_json::from_value(value)?;
        if observation.resource_type != "Observation" {
            return Err(FhirError::UnexpectedResourceType {
                expected: "Observation",
                actual: observation.resource_type,
            });
        }
        Ok(observation)
    }
}

/// One entry of a search bundle. Entries may lack an embedded resource
/// (e.g. outcome-only entries); those are dropped during normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Observation>,
}

/// A search result bundle of observations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Parse a bundle from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] when the payload does not match
    /// the bundle wire shape.
    pub fn from_json(value: serde_json::Value) -> FhirResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The bundle's embedded observations, in entry order, dropping entries
    /// without a resource.
    pub fn resources(self) -> Vec<Observation> {
        self.entry.into_iter().filter_map(|e| e.resource).collect()
    }
}

/// The record system's structured error payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issue: Vec<OutcomeIssue>,
}

/// One diagnostic issue of an operation outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeIssue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl OperationOutcome {
    /// Join the outcome's diagnostic strings into one message.
    ///
    /// Returns `None` when no issue carries diagnostics.
    pub fn joined_diagnostics(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .issue
            .iter()
            .filter_map(|i| i.diagnostics.as_deref())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}
