use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("invalid TLE: {0}")]
    InvalidTle(String),
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}
