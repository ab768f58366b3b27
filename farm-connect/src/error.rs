//! Vendor client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Missing credentials for {0}")]
    MissingCredentials(String),

    #[error("Vendor unavailable: {0}")]
    VendorUnavailable(String),

    #[error("Vendor request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid vendor response: {0}")]
    InvalidResponse(String),
}

pub type ConnectResult<T> = Result<T, ConnectError>;
