// Dimming intensity range shared by the slider, the preference fallback and
// the overlay background alpha.

/// Lowest intensity the slider can reach.
pub const MIN_INTENSITY: f64 = 0.1;

/// Highest intensity the slider can reach. Never fully black.
pub const MAX_INTENSITY: f64 = 0.9;

/// Used when no positive value has been persisted yet.
pub const DEFAULT_INTENSITY: f64 = 0.5;

/// Clamp a user-supplied intensity into the slider range.
/// NaN is treated as "no opinion" and maps to the default.
pub fn clamp_intensity(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_INTENSITY;
    }
    value.clamp(MIN_INTENSITY, MAX_INTENSITY)
}
