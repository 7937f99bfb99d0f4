use std::f64::consts::PI;

/// Multiplier turning radians into degrees.
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Multiplier turning degrees into radians.
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Convert an angle in radians to degrees.
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

/// Convert an angle in degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

/// Whether keyed values on this attribute are stored in radians by the host.
///
/// Curves carry no unit information of their own; rotation channels are recognized by name.
pub fn is_rotation_attribute(name: &str) -> bool {
    name.contains("rotate")
}

/// Convert a raw curve value into the unit reported in the document.
pub fn keyed_value(attribute: &str, raw: f64) -> f64 {
    if is_rotation_attribute(attribute) {
        rad_to_deg(raw)
    } else {
        raw
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/units.rs"]
mod tests;
