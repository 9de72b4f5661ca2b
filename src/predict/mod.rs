mod error;
mod facade;
mod transits;
mod types;

pub use error::PredictError;
pub use facade::{PassPredictor, PredictOptions, DEFAULT_MIN_ELEVATION_DEG};
pub use transits::{Observer, Transit, TransitProvider};
pub use types::{
    CompassBearing, FormattedAzimuth, FormattedTime, PassDuration, PassWindow, TIME_FORMAT,
};
