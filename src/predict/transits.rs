use crate::predict::error::PredictError;

/// Observer location: geodetic latitude/longitude in degrees, altitude in
/// kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 0.0,
        }
    }
}

/// One raw visibility window as reported by the propagation engine.
/// Times are Unix milliseconds, duration is seconds, angles are degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit {
    pub start_ms: i64,
    pub end_ms: i64,
    pub duration_s: f64,
    pub max_elevation_deg: f64,
    pub apex_azimuth_deg: f64,
    pub max_azimuth_deg: f64,
    pub min_azimuth_deg: f64,
}

/// Propagation collaborator: computes visibility windows for a 3-line TLE
/// string as seen from an observer. Implementations own TLE validation and
/// reject malformed element sets; this crate passes them through untouched.
pub trait TransitProvider: Send + Sync {
    fn transits(
        &self,
        tle: &str,
        observer: &Observer,
        start_ms: i64,
        end_ms: i64,
        min_elevation_deg: f64,
    ) -> Result<Vec<Transit>, PredictError>;
}
