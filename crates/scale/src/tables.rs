//! Static visual-acuity scale tables.
//!
//! One table per unit system, ordered from worst acuity (highest LogMAR) to
//! best. The entries reproduce the clinically standard chart; LogMAR values
//! are unique within a table and expressed to one decimal place, which is
//! what makes the exact-match lookups in the rest of the workspace sound.

use serde::{Deserialize, Serialize};

/// Unit system of a Snellen chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Foot chart (test distance 20 ft, e.g. `20/40`).
    Foot,
    /// Metre chart (test distance 6 m, e.g. `6/12`).
    Metre,
}

impl UnitSystem {
    /// The wire/key form of the unit system.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Foot => "foot",
            UnitSystem::Metre => "metre",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a visual-acuity chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleEntry {
    /// Canonical fraction string, e.g. `"20/40"` or `"6/12"`.
    pub display: &'static str,
    /// Test distance (Snellen numerator).
    pub numerator: f64,
    /// Distance at which a normal eye reads the line (Snellen denominator).
    pub denominator: f64,
    /// LogMAR value of the line, one decimal place.
    #[serde(rename = "logMAR")]
    pub log_mar: f64,
}

const fn entry(display: &'static str, numerator: f64, denominator: f64, log_mar: f64) -> ScaleEntry {
    ScaleEntry {
        display,
        numerator,
        denominator,
        log_mar,
    }
}

static FOOT_SCALE: [ScaleEntry; 14] = [
    entry("20/200", 20.0, 200.0, 1.0),
    entry("20/160", 20.0, 160.0, 0.9),
    entry("20/125", 20.0, 125.0, 0.8),
    entry("20/100", 20.0, 100.0, 0.7),
    entry("20/80", 20.0, 80.0, 0.6),
    entry("20/63", 20.0, 63.0, 0.5),
    entry("20/50", 20.0, 50.0, 0.4),
    entry("20/40", 20.0, 40.0, 0.3),
    entry("20/32", 20.0, 32.0, 0.2),
    entry("20/25", 20.0, 25.0, 0.1),
    entry("20/20", 20.0, 20.0, 0.0),
    entry("20/16", 20.0, 16.0, -0.1),
    entry("20/12.5", 20.0, 12.5, -0.2),
    entry("20/10", 20.0, 10.0, -0.3),
];

static METRE_SCALE: [ScaleEntry; 14] = [
    entry("6/60", 6.0, 60.0, 1.0),
    entry("6/48", 6.0, 48.0, 0.9),
    entry("6/38", 6.0, 38.0, 0.8),
    entry("6/30", 6.0, 30.0, 0.7),
    entry("6/24", 6.0, 24.0, 0.6),
    entry("6/18", 6.0, 18.0, 0.5),
    entry("6/15", 6.0, 15.0, 0.4),
    entry("6/12", 6.0, 12.0, 0.3),
    entry("6/9.5", 6.0, 9.5, 0.2),
    entry("6/7.5", 6.0, 7.5, 0.1),
    entry("6/6", 6.0, 6.0, 0.0),
    entry("6/4.8", 6.0, 4.8, -0.1),
    entry("6/3.8", 6.0, 3.8, -0.2),
    entry("6/3", 6.0, 3.0, -0.3),
];

/// The chart for a unit system, worst acuity first.
///
/// Pure and total; the returned slice is shared static data.
pub fn scales_for(unit: UnitSystem) -> &'static [ScaleEntry] {
    match unit {
        UnitSystem::Foot => &FOOT_SCALE,
        UnitSystem::Metre => &METRE_SCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_ordered_worst_to_best() {
        for unit in [UnitSystem::Foot, UnitSystem::Metre] {
            let scale = scales_for(unit);
            for pair in scale.windows(2) {
                assert!(
                    pair[0].log_mar > pair[1].log_mar,
                    "{} should sort before {}",
                    pair[0].display,
                    pair[1].display
                );
                assert!(
                    pair[0].denominator > pair[1].denominator,
                    "{} should sort before {}",
                    pair[0].display,
                    pair[1].display
                );
            }
        }
    }

    #[test]
    fn displays_match_their_ratio() {
        for unit in [UnitSystem::Foot, UnitSystem::Metre] {
            for entry in scales_for(unit) {
                let (num, den) = entry
                    .display
                    .split_once('/')
                    .expect("display is a fraction");
                assert_eq!(num.parse::<f64>().unwrap(), entry.numerator);
                assert_eq!(den.parse::<f64>().unwrap(), entry.denominator);
            }
        }
    }

    #[test]
    fn entries_serialize_with_wire_casing() {
        let twenty_forty = scales_for(UnitSystem::Foot)
            .iter()
            .find(|entry| entry.display == "20/40")
            .expect("20/40 is on the foot chart");
        let value = serde_json::to_value(twenty_forty).expect("entry serializes");

        assert_eq!(value["display"], "20/40");
        assert_eq!(value["numerator"], 20.0);
        assert_eq!(value["denominator"], 40.0);
        assert_eq!(value["logMAR"], 0.3);
    }

    #[test]
    fn unit_system_round_trips_through_serde() {
        assert_eq!(
            serde_json::to_value(UnitSystem::Foot).expect("serializes"),
            serde_json::json!("foot")
        );
        let parsed: UnitSystem =
            serde_json::from_value(serde_json::json!("metre")).expect("deserializes");
        assert_eq!(parsed, UnitSystem::Metre);
    }

    #[test]
    fn log_mar_values_are_unique_within_a_table() {
        for unit in [UnitSystem::Foot, UnitSystem::Metre] {
            let scale = scales_for(unit);
            for (i, a) in scale.iter().enumerate() {
                for b in &scale[i + 1..] {
                    assert_ne!(a.log_mar, b.log_mar, "{} vs {}", a.display, b.display);
                }
            }
        }
    }
}
