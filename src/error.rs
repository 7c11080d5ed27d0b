//! Error types for itemdesk

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported route: \"{0}\"")]
    UnsupportedRoute(String),

    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),

    #[error("Missing request body")]
    MissingBody,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status reported to the caller when this error ends an invocation.
    ///
    /// Every failure is reported as a client error, including store
    /// failures that are transient on the server side.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::UnsupportedRoute(_)
            | Error::MissingPathParameter(_)
            | Error::MissingBody
            | Error::InvalidBody(_)
            | Error::InvalidItem(_)
            | Error::Store(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Toml(_) => 400,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidBody(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidBody(err.to_string())
    }
}

impl<E, R> From<aws_sdk_dynamodb::error::SdkError<E, R>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(err: aws_sdk_dynamodb::error::SdkError<E, R>) -> Self {
        Error::Store(aws_sdk_dynamodb::error::DisplayErrorContext(err).to_string())
    }
}
