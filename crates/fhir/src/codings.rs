//! Fixed coding systems and codes used by visual-acuity observations.

use serde::{Deserialize, Serialize};

/// Observation category coding system.
pub const CATEGORY_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/observation-category";

/// Category code for examination findings.
pub const CATEGORY_EXAM_CODE: &str = "exam";

/// Human-readable display for the exam category.
pub const CATEGORY_EXAM_DISPLAY: &str = "Exam";

/// SNOMED CT coding system, used for body sites and method codes.
pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";

/// SNOMED CT code for the left eye structure.
pub const LEFT_EYE_STRUCTURE_CODE: &str = "8966001";

/// SNOMED CT code for the right eye structure.
pub const RIGHT_EYE_STRUCTURE_CODE: &str = "18944008";

/// SNOMED CT code for LogMAR visual acuity of the left eye.
pub const LOG_MAR_LEFT_EYE_CODE: &str = "413077008";

/// SNOMED CT code for LogMAR visual acuity of the right eye.
pub const LOG_MAR_RIGHT_EYE_CODE: &str = "413078003";

/// Unit string carried by LogMAR quantities.
pub const LOG_MAR_UNIT: &str = "LogMAR";

/// Eye a visual-acuity observation refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodySite {
    LeftEye,
    RightEye,
}

impl BodySite {
    /// The wire/key form of the body site.
    pub fn as_str(self) -> &'static str {
        match self {
            BodySite::LeftEye => "left-eye",
            BodySite::RightEye => "right-eye",
        }
    }

    /// SNOMED CT code for the eye structure.
    pub fn structure_code(self) -> &'static str {
        match self {
            BodySite::LeftEye => LEFT_EYE_STRUCTURE_CODE,
            BodySite::RightEye => RIGHT_EYE_STRUCTURE_CODE,
        }
    }

    /// Display text for the eye structure coding.
    pub fn structure_display(self) -> &'static str {
        match self {
            BodySite::LeftEye => "Left eye structure",
            BodySite::RightEye => "Right eye structure",
        }
    }

    /// SNOMED CT code for the eye's LogMAR method.
    pub fn method_code(self) -> &'static str {
        match self {
            BodySite::LeftEye => LOG_MAR_LEFT_EYE_CODE,
            BodySite::RightEye => LOG_MAR_RIGHT_EYE_CODE,
        }
    }

    /// Display text for the eye's LogMAR method coding.
    pub fn method_display(self) -> &'static str {
        match self {
            BodySite::LeftEye => "LogMAR visual acuity left eye",
            BodySite::RightEye => "LogMAR visual acuity right eye",
        }
    }

    /// Classify a body-site structure code.
    ///
    /// The left eye structure code maps to [`BodySite::LeftEye`]; anything
    /// else, including an absent code, maps to [`BodySite::RightEye`]. This
    /// binary fallback is deliberate; callers needing to
    /// distinguish "unknown" must inspect the raw resource.
    pub fn from_structure_code(code: Option<&str>) -> Self {
        match code {
            Some(LEFT_EYE_STRUCTURE_CODE) => BodySite::LeftEye,
            _ => BodySite::RightEye,
        }
    }
}

impl std::fmt::Display for BodySite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_left_eye_structure_code() {
        assert_eq!(
            BodySite::from_structure_code(Some(LEFT_EYE_STRUCTURE_CODE)),
            BodySite::LeftEye
        );
    }

    #[test]
    fn everything_else_falls_back_to_right_eye() {
        assert_eq!(
            BodySite::from_structure_code(Some(RIGHT_EYE_STRUCTURE_CODE)),
            BodySite::RightEye
        );
        assert_eq!(
            BodySite::from_structure_code(Some("not-a-code")),
            BodySite::RightEye
        );
        assert_eq!(BodySite::from_structure_code(None), BodySite::RightEye);
    }

    #[test]
    fn method_codes_differ_per_eye() {
        assert_ne!(
            BodySite::LeftEye.method_code(),
            BodySite::RightEye.method_code()
        );
    }
}
