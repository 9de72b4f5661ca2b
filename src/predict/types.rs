use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

/// Display format for pass timestamps.
pub const TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A timestamp paired with its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTime {
    pub timestamp: DateTime<Utc>,
    pub formatted: String,
}

impl FormattedTime {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            formatted: timestamp.format(TIME_FORMAT).to_string(),
            timestamp,
        }
    }
}

/// Sixteen-wind compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum CompassBearing {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassBearing {
    const WINDS: [CompassBearing; 16] = [
        CompassBearing::N,
        CompassBearing::NNE,
        CompassBearing::NE,
        CompassBearing::ENE,
        CompassBearing::E,
        CompassBearing::ESE,
        CompassBearing::SE,
        CompassBearing::SSE,
        CompassBearing::S,
        CompassBearing::SSW,
        CompassBearing::SW,
        CompassBearing::WSW,
        CompassBearing::W,
        CompassBearing::WNW,
        CompassBearing::NW,
        CompassBearing::NNW,
    ];

    /// Nearest wind for an azimuth in degrees; the value is wrapped into
    /// [0, 360) first.
    pub fn from_degrees(degrees: f64) -> Self {
        let wrapped = degrees.rem_euclid(360.0);
        let index = (wrapped / 22.5).round() as usize % 16;
        Self::WINDS[index]
    }
}

/// An azimuth in degrees paired with its compass bearing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedAzimuth {
    pub degrees: f64,
    pub bearing: CompassBearing,
}

impl FormattedAzimuth {
    pub fn new(degrees: f64) -> Self {
        Self {
            degrees,
            bearing: CompassBearing::from_degrees(degrees.round()),
        }
    }
}

/// Pass length in raw seconds plus a humanized rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassDuration {
    pub seconds: f64,
    pub humanized: String,
}

impl PassDuration {
    pub fn from_seconds(seconds: f64) -> Self {
        let whole = std::time::Duration::from_secs(seconds.max(0.0).round() as u64);
        Self {
            seconds,
            humanized: humantime::format_duration(whole).to_string(),
        }
    }
}

/// One predicted pass, reshaped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassWindow {
    pub start: FormattedTime,
    pub end: FormattedTime,
    pub max_elevation_time: FormattedTime,
    pub apex_azimuth: FormattedAzimuth,
    pub max_azimuth: FormattedAzimuth,
    pub min_azimuth: FormattedAzimuth,
    pub duration: PassDuration,
    pub max_elevation_deg: f64,
}
