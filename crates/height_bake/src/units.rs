//! Unit conversions between meters and world units.
//!
//! World space is measured in centimeters throughout the crate. Configuration is
//! authored in meters and converted on the way in.

/// Centimeters per meter.
pub const CM_PER_METER: f32 = 100.0;

#[inline]
pub fn cm_to_meters(cm: f32) -> f32 {
    cm / CM_PER_METER
}

#[inline]
pub fn meters_to_cm(meters: f32) -> f32 {
    meters * CM_PER_METER
}
