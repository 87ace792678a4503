use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid credentials : {0}")]
    Config(#[from] ConfigError),
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("signed header is not a valid header value : {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    /// The resource server rejected the signature or the credentials.
    #[error("request was not authorized (401) : {body}")]
    Unauthorized { body: String },
    #[error("request failed with status {status} : {body}")]
    Status {
        status: http::StatusCode,
        body: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("credential {0} must not be empty")]
    MissingCredential(&'static str),
    #[error("environment variable {name} is not available : {reason}")]
    EnvVar { name: &'static str, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("secure random source is unavailable : {0}")]
    EntropyUnavailable(String),
    #[error("system clock is set before the unix epoch")]
    ClockBeforeEpoch,
    #[error("HMAC-SHA1 could not be keyed : {0}")]
    Hmac(String),
    #[error("url must not carry a query string, but {0} has one. pass the query as parameters instead.")]
    QueryInUrl(String),
}
