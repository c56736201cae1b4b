use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcceptError {
    /// Network or connection failure, propagated unchanged from reqwest.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("Gateway rejection: {status}: {body}")]
    Gateway { status: u16, body: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Valid JSON response missing a field the operation contracts to return.
    #[error("Gateway response missing field `{0}`")]
    MissingField(&'static str),

    /// A required billing or card field is absent or empty in the
    /// caller-supplied record. Raised before any request is issued.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Accept specific Result type for gateway operations.
pub type AcceptResult<T> = Result<T, AcceptError>;
