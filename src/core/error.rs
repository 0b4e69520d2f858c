use thiserror::Error;

#[derive(Debug, Error)]
pub enum DischargeError {
    #[error("no rate data available")]
    DataUnavailable,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
