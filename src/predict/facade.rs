use chrono::{DateTime, Duration, Utc};

use crate::catalog::ElementSet;
use crate::predict::error::PredictError;
use crate::predict::transits::{Observer, Transit, TransitProvider};
use crate::predict::types::{FormattedAzimuth, FormattedTime, PassDuration, PassWindow};

pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 10.0;

/// Query window and geometry for a pass prediction. Omitted fields fall
/// back to: one hour ago, 24 hours ahead, 10 degrees, and the predictor's
/// default observer.
#[derive(Debug, Clone, Default)]
pub struct PredictOptions {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub min_elevation_deg: Option<f64>,
    pub observer: Option<Observer>,
}

/// Reshapes the propagation collaborator's raw transits into display-ready
/// pass windows. No filtering, reordering, or deduplication happens here;
/// output order matches the provider's, and an empty result is a valid
/// answer, not an error.
pub struct PassPredictor {
    provider: Box<dyn TransitProvider>,
    default_observer: Observer,
}

impl PassPredictor {
    pub fn new(provider: Box<dyn TransitProvider>, default_observer: Observer) -> Self {
        Self {
            provider,
            default_observer,
        }
    }

    pub fn predict_passes(
        &self,
        elements: &ElementSet,
        options: &PredictOptions,
    ) -> Result<Vec<PassWindow>, PredictError> {
        let now = Utc::now();
        let start = options.start.unwrap_or_else(|| now - Duration::hours(1));
        let end = options.end.unwrap_or_else(|| now + Duration::hours(24));
        let min_elevation = options
            .min_elevation_deg
            .unwrap_or(DEFAULT_MIN_ELEVATION_DEG);
        let observer = options.observer.unwrap_or(self.default_observer);

        let transits = self.provider.transits(
            &elements.as_tle(),
            &observer,
            start.timestamp_millis(),
            end.timestamp_millis(),
            min_elevation,
        )?;

        transits.iter().map(reshape).collect()
    }
}

fn reshape(transit: &Transit) -> Result<PassWindow, PredictError> {
    // The provider reports no apex time of its own; take the window midpoint.
    let midpoint_ms = transit.start_ms + (transit.duration_s * 1000.0 / 2.0) as i64;

    Ok(PassWindow {
        start: FormattedTime::new(timestamp(transit.start_ms)?),
        end: FormattedTime::new(timestamp(transit.end_ms)?),
        max_elevation_time: FormattedTime::new(timestamp(midpoint_ms)?),
        apex_azimuth: FormattedAzimuth::new(transit.apex_azimuth_deg),
        max_azimuth: FormattedAzimuth::new(transit.max_azimuth_deg),
        min_azimuth: FormattedAzimuth::new(transit.min_azimuth_deg),
        duration: PassDuration::from_seconds(transit.duration_s),
        max_elevation_deg: transit.max_elevation_deg,
    })
}

fn timestamp(ms: i64) -> Result<DateTime<Utc>, PredictError> {
    DateTime::from_timestamp_millis(ms).ok_or(PredictError::TimestampOutOfRange(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type SeenCall = (i64, i64, f64, Observer);

    struct FixedProvider {
        transits: Vec<Transit>,
        seen: Arc<Mutex<Vec<SeenCall>>>,
    }

    impl FixedProvider {
        fn new(transits: Vec<Transit>) -> Self {
            Self {
                transits,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl TransitProvider for FixedProvider {
        fn transits(
            &self,
            _tle: &str,
            observer: &Observer,
            start_ms: i64,
            end_ms: i64,
            min_elevation_deg: f64,
        ) -> Result<Vec<Transit>, PredictError> {
            self.seen
                .lock()
                .unwrap()
                .push((start_ms, end_ms, min_elevation_deg, *observer));
            Ok(self.transits.clone())
        }
    }

    struct BrokenProvider;

    impl TransitProvider for BrokenProvider {
        fn transits(
            &self,
            _tle: &str,
            _observer: &Observer,
            _start_ms: i64,
            _end_ms: i64,
            _min_elevation_deg: f64,
        ) -> Result<Vec<Transit>, PredictError> {
            Err(PredictError::Propagation("decayed orbit".to_string()))
        }
    }

    fn meteor() -> ElementSet {
        ElementSet {
            name: "METEOR-M 1".to_string(),
            line1: "1 35865U 09049A   21041.93769902  .00000004".to_string(),
            line2: "2 35865  98.4653  25.1408 0001811 188.3566".to_string(),
        }
    }

    fn sample_transit() -> Transit {
        Transit {
            // 2020-09-13 12:26:40 UTC
            start_ms: 1_600_000_000_000,
            end_ms: 1_600_000_330_000,
            duration_s: 330.0,
            max_elevation_deg: 47.3,
            apex_azimuth_deg: 0.0,
            max_azimuth_deg: 90.0,
            min_azimuth_deg: 247.0,
        }
    }

    #[test]
    fn reshapes_a_transit_into_a_pass_window() {
        let predictor = PassPredictor::new(
            Box::new(FixedProvider::new(vec![sample_transit()])),
            Observer::default(),
        );

        let passes = predictor
            .predict_passes(&meteor(), &PredictOptions::default())
            .unwrap();
        assert_eq!(passes.len(), 1);

        let pass = &passes[0];
        assert_eq!(pass.start.formatted, "13/09/2020 12:26:40");
        assert_eq!(pass.end.formatted, "13/09/2020 12:32:10");
        // Midpoint of the window: start + 165 s.
        assert_eq!(pass.max_elevation_time.formatted, "13/09/2020 12:29:25");
        assert_eq!(pass.apex_azimuth.bearing.to_string(), "N");
        assert_eq!(pass.max_azimuth.bearing.to_string(), "E");
        assert_eq!(pass.min_azimuth.bearing.to_string(), "WSW");
        assert_eq!(pass.min_azimuth.degrees, 247.0);
        assert_eq!(pass.duration.seconds, 330.0);
        assert_eq!(pass.duration.humanized, "5m 30s");
        assert_eq!(pass.max_elevation_deg, 47.3);
    }

    #[test]
    fn preserves_provider_order() {
        let mut second = sample_transit();
        second.start_ms += 5_400_000;
        second.end_ms += 5_400_000;
        let predictor = PassPredictor::new(
            Box::new(FixedProvider::new(vec![second, sample_transit()])),
            Observer::default(),
        );

        let passes = predictor
            .predict_passes(&meteor(), &PredictOptions::default())
            .unwrap();
        assert_eq!(passes.len(), 2);
        assert!(passes[0].start.timestamp > passes[1].start.timestamp);
    }

    #[test]
    fn empty_result_is_ok() {
        let predictor =
            PassPredictor::new(Box::new(FixedProvider::new(Vec::new())), Observer::default());
        let passes = predictor
            .predict_passes(&meteor(), &PredictOptions::default())
            .unwrap();
        assert!(passes.is_empty());
    }

    #[test]
    fn provider_errors_propagate() {
        let predictor = PassPredictor::new(Box::new(BrokenProvider), Observer::default());
        let err = predictor
            .predict_passes(&meteor(), &PredictOptions::default())
            .unwrap_err();
        assert!(matches!(err, PredictError::Propagation(_)));
    }

    #[test]
    fn defaults_fill_window_elevation_and_observer() {
        let kolomyia = Observer {
            latitude_deg: 48.522034,
            longitude_deg: 25.036870,
            altitude_km: 0.1,
        };
        let provider = FixedProvider::new(Vec::new());
        let seen = Arc::clone(&provider.seen);
        let predictor = PassPredictor::new(Box::new(provider), kolomyia);

        let before = Utc::now();
        predictor
            .predict_passes(&meteor(), &PredictOptions::default())
            .unwrap();
        let after = Utc::now();

        let (start_ms, end_ms, min_elevation, observer) = seen.lock().unwrap()[0];

        assert_eq!(min_elevation, DEFAULT_MIN_ELEVATION_DEG);
        assert_eq!(observer, kolomyia);
        assert!(start_ms >= (before - Duration::hours(1)).timestamp_millis());
        assert!(start_ms <= (after - Duration::hours(1)).timestamp_millis());
        assert!(end_ms >= (before + Duration::hours(24)).timestamp_millis());
        assert!(end_ms <= (after + Duration::hours(24)).timestamp_millis());
    }

    #[test]
    fn explicit_options_override_defaults() {
        let provider = FixedProvider::new(Vec::new());
        let seen = Arc::clone(&provider.seen);
        let predictor = PassPredictor::new(Box::new(provider), Observer::default());

        let start = DateTime::from_timestamp_millis(1_600_000_000_000).unwrap();
        let end = DateTime::from_timestamp_millis(1_600_086_400_000).unwrap();
        predictor
            .predict_passes(
                &meteor(),
                &PredictOptions {
                    start: Some(start),
                    end: Some(end),
                    min_elevation_deg: Some(15.0),
                    observer: None,
                },
            )
            .unwrap();

        let (start_ms, end_ms, min_elevation, _) = seen.lock().unwrap()[0];
        assert_eq!(start_ms, 1_600_000_000_000);
        assert_eq!(end_ms, 1_600_086_400_000);
        assert_eq!(min_elevation, 15.0);
    }
}
