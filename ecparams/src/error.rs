//! Error types

/// Result type with the `ecparams` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Domain parameter and point codec errors
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input is well-formed but names a curve, field or curve family
    /// that is not supported or not known.
    #[error("unknown curve: {0}")]
    UnknownCurve(String),

    /// The binary or textual structure violates the expected grammar.
    #[error("malformed encoding: {0}")]
    Malformed(String),

    /// A caller-supplied argument is outside its accepted set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn unknown_curve(msg: impl Into<String>) -> Self {
        Self::UnknownCurve(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Is this an [`Error::UnknownCurve`]?
    pub fn is_unknown_curve(&self) -> bool {
        matches!(self, Self::UnknownCurve(_))
    }

    /// Is this an [`Error::Malformed`]?
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Is this an [`Error::InvalidArgument`]?
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[cfg(feature = "pem")]
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[cfg(feature = "pem")]
impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Self {
        Self::Malformed(format!("PEM Base64 error: {err}"))
    }
}
