//! Extraction of single measurements from the plain text `/metrics` output
//! of a meter gateway.
//!
//! Each measurement line looks like `<name> <value> [<more tokens>]` where the
//! name carries the configured identifier as well as a `serial` marker.

use log::debug;

pub mod utils;

/// Outcome of looking up one identifier in a payload.
///
/// An empty identifier, a missing line and a value that is not a number all
/// end up as `Absent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    Found(f64),
    Absent,
}

impl Measurement {
    pub fn value(self) -> Option<f64> {
        match self {
            Measurement::Found(v) => Some(v),
            Measurement::Absent => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Measurement::Found(_))
    }
}

impl From<Option<f64>> for Measurement {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Measurement::Found(v),
            None => Measurement::Absent,
        }
    }
}

/// Looks up the value for `identifier` in `payload`.
///
/// Only the first line containing both the identifier and the serial marker
/// is considered. If its second space separated token is missing or not a
/// number the result is `Absent`, later lines are never inspected.
pub fn extract(payload: &str, identifier: &str) -> Measurement {
    if identifier.is_empty() {
        return Measurement::Absent;
    }

    let line = match payload
        .split('\n')
        .find(|line| utils::is_candidate_line(line, identifier))
    {
        Some(line) => line,
        None => {
            debug!("No line found for identifier '{}'", identifier);
            return Measurement::Absent;
        }
    };

    debug!("Identifier '{}' matched line '{}'", identifier, line);

    let token = match utils::value_token(line) {
        Some(token) => token,
        None => {
            debug!("Line '{}' has no value token", line);
            return Measurement::Absent;
        }
    };

    let measurement = Measurement::from(utils::parse_value(token));
    if !measurement.is_found() {
        debug!("Value '{}' for identifier '{}' is not numeric", token, identifier);
    }
    measurement
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "# gateway metrics
power_l1_serial 230.5 W
power_l2_serial 120 W
voltage_l1_serial_1ESY1160 231.2 V
energy_in_serial 000123.456 kWh
power_total 999
";

    #[test]
    fn test_extract_found() {
        assert_eq!(extract(PAYLOAD, "power_l1"), Measurement::Found(230.5));
        assert_eq!(extract(PAYLOAD, "power_l2"), Measurement::Found(120.0));
        assert_eq!(extract(PAYLOAD, "1ESY1160"), Measurement::Found(231.2));
        assert_eq!(extract(PAYLOAD, "energy_in"), Measurement::Found(123.456));
    }

    #[test]
    fn test_extract_empty_identifier() {
        assert_eq!(extract(PAYLOAD, ""), Measurement::Absent);
        assert_eq!(extract("", ""), Measurement::Absent);
    }

    #[test]
    fn test_extract_requires_serial_marker() {
        // the line exists but has no serial marker
        assert_eq!(extract(PAYLOAD, "power_total"), Measurement::Absent);
        assert_eq!(extract(PAYLOAD, "does_not_exist"), Measurement::Absent);
        assert_eq!(extract("", "power_l1"), Measurement::Absent);
    }

    #[test]
    fn test_extract_skips_line_without_serial_marker() {
        let payload = "energy 5\nenergy_serial 7\n";
        assert_eq!(extract(payload, "energy"), Measurement::Found(7.0));
    }

    #[test]
    fn test_extract_marker_order_irrelevant() {
        let payload = "serial_4711_grid_power 42.5 W\n";
        assert_eq!(extract(payload, "grid_power"), Measurement::Found(42.5));
    }

    #[test]
    fn test_extract_substring_match() {
        // "power" is contained in the first serial line, which wins
        assert_eq!(extract(PAYLOAD, "power"), Measurement::Found(230.5));
        // the marker itself is a valid identifier
        assert_eq!(extract(PAYLOAD, "serial"), Measurement::Found(230.5));
    }

    #[test]
    fn test_extract_not_numeric() {
        let payload = "energy_serial notanumber\n";
        assert_eq!(extract(payload, "energy"), Measurement::Absent);
    }

    #[test]
    fn test_extract_first_candidate_wins_on_failure() {
        let payload = "energy_serial broken kWh\nenergy_serial 12.5 kWh\n";
        assert_eq!(extract(payload, "energy"), Measurement::Absent);
    }

    #[test]
    fn test_extract_first_candidate_wins() {
        let payload = "energy_serial 1.5 kWh\nenergy_serial 12.5 kWh\n";
        assert_eq!(extract(payload, "energy"), Measurement::Found(1.5));
    }

    #[test]
    fn test_extract_missing_value_token() {
        let payload = "energy_serial\nenergy_serial 12.5\n";
        assert_eq!(extract(payload, "energy"), Measurement::Absent);
    }

    #[test]
    fn test_extract_carriage_return_not_stripped() {
        assert_eq!(extract("energy_serial 12.5\r\n", "energy"), Measurement::Absent);
        assert_eq!(extract("energy_serial 12.5 kWh\r\n", "energy"), Measurement::Found(12.5));
    }

    #[test]
    fn test_extract_zero_is_found() {
        assert_eq!(extract("export_serial 0 W\n", "export"), Measurement::Found(0.0));
    }

    #[test]
    fn test_extract_idempotent() {
        let first = extract(PAYLOAD, "power_l2");
        let second = extract(PAYLOAD, "power_l2");
        assert_eq!(first, second);
    }

    #[test]
    fn test_measurement_value() {
        assert_eq!(Measurement::Found(1.0).value(), Some(1.0));
        assert_eq!(Measurement::Absent.value(), None);
        assert_eq!(Measurement::from(None), Measurement::Absent);
        assert!(Measurement::from(Some(2.0)).is_found());
    }
}
