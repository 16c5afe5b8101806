use log::debug;

/// Marker every measurement line of the device output carries next to its name.
pub const SERIAL_MARKER: &str = "serial";

pub fn is_candidate_line(line: &str, identifier: &str) -> bool {
    line.contains(identifier) && line.contains(SERIAL_MARKER)
}

pub fn value_token(line: &str) -> Option<&str> {
    // Example formats:
    // power_l1_serial 230.5 W
    // 1.8.0_serial_12345 000123.456 kWh
    line.split(' ').nth(1)
}

pub fn parse_value(token: &str) -> Option<f64> {
    // inf, nan and overflowing exponents are not plain decimal numbers
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(value) => {
            debug!("Ignoring non finite value {} parsed from '{}'", value, token);
            None
        }
        Err(_) => None,
    }
}
