//! Common types used across the relay

/// Milliseconds since the Unix epoch, as reported by the upstream feed
pub type EpochMillis = i64;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
