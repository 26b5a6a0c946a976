// ── Operational settings ──
//
// Agency display metadata plus the toggles and thresholds the dispatcher
// consults. Pure configuration: loading and merging live in the CLI's
// config layer, core only consumes the resolved struct.

use serde::{Deserialize, Serialize};

/// Default reference position used when geolocation is unavailable and no
/// position has been persisted (lower Manhattan).
pub const DEFAULT_POSITION: (f64, f64) = (40.7128, -74.006);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Agency display name.
    pub agency_name: String,
    /// Coverage region label.
    pub region: String,
    /// Consult the triage collaborator for new reports. When off (or when
    /// the collaborator fails) new incidents default to MEDIUM severity.
    pub auto_triage: bool,
    /// Operator notification toggle (consumed by the rendering layer).
    pub notifications: bool,

    // Emergency contact numbers shown alongside resources.
    pub hospital_number: String,
    pub fire_number: String,
    pub police_number: String,

    /// Directory search radius in meters.
    pub search_radius_m: u32,
    /// Resource refresh interval in seconds.
    pub refresh_interval_secs: u64,

    /// Fallback reference position (lat, lng).
    pub default_lat: f64,
    pub default_lng: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            agency_name: "RescueNet Global".into(),
            region: "Auto-Detected".into(),
            auto_triage: true,
            notifications: true,
            hospital_number: "102".into(),
            fire_number: "101".into(),
            police_number: "100".into(),
            search_radius_m: 10_000,
            refresh_interval_secs: 60,
            default_lat: DEFAULT_POSITION.0,
            default_lng: DEFAULT_POSITION.1,
        }
    }
}
