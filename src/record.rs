use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Log severity in log15's ordinal model: lower values are more severe,
/// `Critical` = 0 through `Debug` = 4. The derived order follows declaration
/// order, so `Severity::Error < Severity::Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

impl Severity {
    /// Recover a severity from the integer encoding log15 JSON logs use
    /// (0 = crit .. 4 = debug).
    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Severity::Critical),
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Four-character aligned label used in rendered output.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Critical => "crit",
            Severity::Error => "eror",
            Severity::Warning => "warn",
            Severity::Info => "info",
            Severity::Debug => "dbug",
        }
    }

    /// Uppercase form of [`label`](Self::label) for the terminal level tag.
    pub(crate) const fn tag(self) -> &'static str {
        match self {
            Severity::Critical => "CRIT",
            Severity::Error => "EROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DBUG",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Critical => "crit",
            Severity::Error => "error",
            Severity::Warning => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
        })
    }
}

/// Error produced when a level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level name {0:?}, expected one of debug, info, warn, error or crit")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Accepts the canonical names plus log15's aligned spellings
    /// (`eror`, `dbug`).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "debug" | "dbug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warning),
            "error" | "eror" => Ok(Severity::Error),
            "crit" => Ok(Severity::Critical),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// One normalized log event, ready for filtering and rendering.
///
/// Every field has a documented fallback when the source event is missing or
/// malformed: epoch timestamp, `Info` severity, empty message. `attributes`
/// holds the non-reserved key/value pairs in input order, values passed
/// through untouched.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub attributes: Vec<(String, Value)>,
}
