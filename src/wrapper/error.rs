pub use crate::repository::RowError;
use anyhow::Error;
use serde::*;
use std::any::Any;

/// What a caller should do with the record that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Data-quality problem local to one record. Skip it and keep going.
    SkipRecord,
    /// Contract violation or corrupt upstream data.
    Abort,
}

pub trait IFormatError: Any {
    fn error_type(&self) -> String {
        "internal_error".to_string()
    }

    fn disposition(&self) -> Disposition {
        Disposition::Abort
    }

    /// Whether the detail may carry raw input and must stay out of logs.
    fn redacted(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct FormatError {
    type_id: std::any::TypeId,
    error_type: String,
    disposition: Disposition,
    redacted: bool,
    inner: Error,
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    error_type: String,
    disposition: Disposition,
    error: String,
}

impl ErrorReport {
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    /// Error detail; empty when the error is redacted.
    pub fn error(&self) -> &str {
        &self.error
    }
}

impl FormatError {
    pub fn new<E>(err: impl IFormatError, detail: E) -> FormatError
    where
        Error: From<E>,
    {
        FormatError {
            type_id: err.type_id(),
            error_type: err.error_type(),
            disposition: err.disposition(),
            redacted: err.redacted(),
            inner: From::from(detail),
        }
    }

    pub fn only(err: impl IFormatError) -> FormatError {
        let error_type = err.error_type();
        FormatError {
            type_id: err.type_id(),
            disposition: err.disposition(),
            redacted: err.redacted(),
            inner: Error::msg(error_type.clone()),
            error_type,
        }
    }

    pub fn into_inner(self) -> Error {
        self.inner
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    pub fn error_type(&self) -> String {
        self.error_type.clone()
    }

    pub fn is_error_of(&self, err: impl IFormatError) -> bool {
        self.type_id == err.type_id() && self.error_type() == err.error_type()
    }

    pub fn to_error_report(&self) -> ErrorReport {
        ErrorReport {
            error_type: self.error_type.clone(),
            disposition: self.disposition,
            error: format!("{:#}", self.inner),
        }
    }

    // redacted categories may echo feed bytes in their detail
    pub fn to_secure_error_report(&self) -> ErrorReport {
        if self.redacted {
            ErrorReport {
                error_type: self.error_type.clone(),
                disposition: self.disposition,
                error: String::new(),
            }
        } else {
            self.to_error_report()
        }
    }

    pub fn to_log_line(&self) -> String {
        serde_json::to_string(&self.to_secure_error_report())
            .unwrap_or_else(|_| self.error_type.clone())
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.redacted {
            write!(f, "{}", self.error_type)
        } else {
            write!(f, "{}: {:#}", self.error_type, self.inner)
        }
    }
}

impl std::error::Error for FormatError {}

// anyhow::Error can be treated as FormatError
impl IFormatError for Error {}

// Errors that don't belong to one record format.
// Keep format-specific failures in their own enums next to the format.
pub enum GeneralError {
    SerializationError,
    InvalidTimestamp,
    Io,
}

impl GeneralError {
    pub fn serialization_error<E>(detail: E) -> FormatError
    where
        Error: From<E>,
    {
        FormatError::new(GeneralError::SerializationError, detail)
    }

    pub fn invalid_timestamp<E>(detail: E) -> FormatError
    where
        Error: From<E>,
    {
        FormatError::new(GeneralError::InvalidTimestamp, detail)
    }
}

impl IFormatError for GeneralError {
    fn error_type(&self) -> String {
        use GeneralError::*;

        match self {
            SerializationError => "serialization_error".to_string(),
            InvalidTimestamp => "invalid_timestamp".to_string(),
            Io => "io_error".to_string(),
        }
    }

    fn disposition(&self) -> Disposition {
        use GeneralError::*;

        match self {
            SerializationError => Disposition::SkipRecord,
            InvalidTimestamp => Disposition::SkipRecord,
            Io => Disposition::Abort,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> FormatError {
        GeneralError::serialization_error(err)
    }
}

impl From<chrono::ParseError> for FormatError {
    fn from(err: chrono::ParseError) -> FormatError {
        GeneralError::invalid_timestamp(err)
    }
}

impl From<std::num::ParseIntError> for FormatError {
    fn from(err: std::num::ParseIntError) -> FormatError {
        FormatError::new(RowError::InvalidCell, err)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> FormatError {
        FormatError::new(GeneralError::Io, err)
    }
}
