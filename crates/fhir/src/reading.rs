//! Normalization of observations into flat visual-acuity readings.
//!
//! A [`VisualAcuityReading`] is a transient, immutable value object built
//! from one `Observation`. Extraction is positional: the first code coding,
//! the first body-site coding and the quantity value/unit are consulted;
//! missing strings default to empty and missing coded displays to `None`.

use crate::codings::BodySite;
use crate::observation::Observation;
use acuity_scale::{scales_for, UnitSystem};

/// Flat, normalized view of one visual-acuity observation.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualAcuityReading {
    /// Resource identifier; empty when the source had none.
    pub id: String,

    /// Reference to the patient/subject, e.g. `Patient/42`.
    pub subject_reference: String,

    /// Method coding identifier (left- or right-eye LogMAR code).
    pub code: String,

    /// Human-readable label of the method coding, when present.
    pub code_name: Option<String>,

    /// Eye the reading refers to.
    ///
    /// Derived from the first body-site coding: the left-eye structure code
    /// maps to [`BodySite::LeftEye`], anything else (including an absent
    /// body site) to [`BodySite::RightEye`].
    pub body_site: BodySite,

    /// ISO 8601 timestamp of the measurement; empty when absent upstream.
    pub effective_date_time: String,

    /// Human-facing result: a resolved Snellen fraction or a
    /// `"{value} {unit}"` fallback, empty when neither is available.
    pub display: String,

    /// Raw measurement value.
    pub result: Option<f64>,

    /// Unit of the measurement, when present.
    pub unit: Option<String>,
}

impl VisualAcuityReading {
    /// Normalize an observation.
    ///
    /// `display` is `"{value} {unit}"` when the quantity carries both a
    /// value and a unit, otherwise empty.
    pub fn from_observation(observation: &Observation) -> Self {
        Self::build(observation, None)
    }

    /// Normalize an observation, resolving the Snellen display.
    ///
    /// When the quantity value exactly matches a LogMAR entry of the given
    /// unit system's scale, `display` is that entry's fraction string;
    /// otherwise this falls back to the `"{value} {unit}"` rule. A lookup
    /// miss is not an error.
    pub fn from_observation_with_scale(unit: UnitSystem, observation: &Observation) -> Self {
        Self::build(observation, Some(unit))
    }

    fn build(observation: &Observation, scale: Option<UnitSystem>) -> Self {
        let code_coding = observation.code.first_coding();
        let body_site_code = observation
            .body_site
            .as_ref()
            .and_then(|site| site.first_coding())
            .and_then(|coding| coding.code.as_deref());

        let result = observation
            .value_quantity
            .as_ref()
            .and_then(|quantity| quantity.value);
        let unit = observation
            .value_quantity
            .as_ref()
            .and_then(|quantity| quantity.unit.clone());

        let display = scale
            .and_then(|u| result.and_then(|value| snellen_display(u, value)))
            .unwrap_or_else(|| fallback_display(result, unit.as_deref()));

        VisualAcuityReading {
            id: observation.id.clone().unwrap_or_default(),
            subject_reference: observation
                .subject
                .as_ref()
                .and_then(|s| s.reference.clone())
                .unwrap_or_default(),
            code: code_coding
                .and_then(|coding| coding.code.clone())
                .unwrap_or_default(),
            code_name: code_coding.and_then(|coding| coding.display.clone()),
            body_site: BodySite::from_structure_code(body_site_code),
            effective_date_time: observation.effective_date_time.clone().unwrap_or_default(),
            display,
            result,
            unit,
        }
    }
}

/// Exact-match Snellen display for a LogMAR value, if on the chart grid.
fn snellen_display(unit: UnitSystem, value: f64) -> Option<String> {
    scales_for(unit)
        .iter()
        .find(|entry| entry.log_mar == value)
        .map(|entry| entry.display.to_string())
}

/// `"{value} {unit}"` when both are present, empty otherwise.
fn fallback_display(value: Option<f64>, unit: Option<&str>) -> String {
    match (value, unit) {
        (Some(value), Some(unit)) => format!("{value} {unit}"),
        _ => String::new(),
    }
}
