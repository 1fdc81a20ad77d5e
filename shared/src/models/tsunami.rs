//! Tsunami alert models

use serde::{Deserialize, Serialize};

use crate::types::EpochMillis;

/// Tsunami alert derived from a tsunami-flagged earthquake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsunamiAlert {
    /// Same identifier as the originating earthquake
    pub id: String,
    pub event: String,
    pub severity: TsunamiSeverity,
    pub areas: Vec<String>,
    pub issue_time: EpochMillis,
    /// Always null; the feed carries no expiry data
    pub expires: Option<EpochMillis>,
    pub wave_height: Option<String>,
    pub message: String,
    pub url: String,
}

/// Alert tier, from most to least severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TsunamiSeverity {
    /// Magnitude 7.5 and above
    Warning,
    /// 7.0 to 7.5
    Watch,
    /// 6.5 to 7.0
    Advisory,
    /// Below 6.5, or magnitude unknown
    Information,
}

impl TsunamiSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            TsunamiSeverity::Warning => "warning",
            TsunamiSeverity::Watch => "watch",
            TsunamiSeverity::Advisory => "advisory",
            TsunamiSeverity::Information => "information",
        }
    }
}

impl std::fmt::Display for TsunamiSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify alert severity from the event magnitude
pub fn classify_severity(magnitude: Option<f64>) -> TsunamiSeverity {
    match magnitude {
        Some(m) if m >= 7.5 => TsunamiSeverity::Warning,
        Some(m) if m >= 7.0 => TsunamiSeverity::Watch,
        Some(m) if m >= 6.5 => TsunamiSeverity::Advisory,
        _ => TsunamiSeverity::Information,
    }
}

/// Descriptive wave height band for a magnitude
///
/// Uses the upper two severity tiers; everything else falls in the lowest band.
pub fn wave_height_band(magnitude: Option<f64>) -> &'static str {
    match magnitude {
        Some(m) if m >= 7.5 => "3-10m",
        Some(m) if m >= 7.0 => "1-3m",
        _ => "0.5-1m",
    }
}
