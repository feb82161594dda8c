use crate::decode::RawEvent;
use crate::record::{Record, Severity};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::str::FromStr;

/// Which JSON keys carry the three semantic fields. Immutable once built;
/// every other key rides through as an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl Default for FieldMapping {
    /// log15's wire defaults.
    fn default() -> Self {
        FieldMapping {
            time: "t".to_string(),
            level: "lvl".to_string(),
            message: "msg".to_string(),
        }
    }
}

/// Error produced for a time layout that chrono cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("time layout {0:?} contains an unrecognized format item")]
pub struct InvalidTimeLayout(String);

/// Strftime layout used to parse timestamp values.
///
/// The default, `%+`, is ISO 8601 / RFC 3339 with optional fractional
/// seconds and `Z`/offset — what log producers emit for `t` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLayout(String);

impl TimeLayout {
    /// Validate the layout up front: a bad layout is a configuration error,
    /// not a per-record warning.
    pub fn new(spec: &str) -> Result<Self, InvalidTimeLayout> {
        if StrftimeItems::new(spec).any(|item| matches!(item, Item::Error)) {
            return Err(InvalidTimeLayout(spec.to_string()));
        }
        Ok(TimeLayout(spec.to_string()))
    }

    pub fn spec(&self) -> &str {
        &self.0
    }

    /// Parse one timestamp value. Layouts without a timezone item are parsed
    /// as wall-clock time and taken to be UTC.
    pub fn parse(&self, raw: &str) -> chrono::ParseResult<DateTime<Utc>> {
        DateTime::parse_from_str(raw, &self.0)
            .map(|stamped| stamped.with_timezone(&Utc))
            .or_else(|err| {
                NaiveDateTime::parse_from_str(raw, &self.0)
                    .map(|naive| naive.and_utc())
                    .map_err(|_| err)
            })
    }
}

impl Default for TimeLayout {
    fn default() -> Self {
        TimeLayout("%+".to_string())
    }
}

impl FromStr for TimeLayout {
    type Err = InvalidTimeLayout;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        TimeLayout::new(spec)
    }
}

/// Non-fatal problem found while mapping one event. The record is still
/// produced; the offending field keeps its default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapWarning {
    #[error("level key {key:?} did not hold an integer between 0 and 4")]
    InvalidLevel { key: String, raw: Value },
    #[error("message key {key:?} did not hold a string")]
    InvalidMessage { key: String, raw: Value },
    #[error("time key {key:?} did not hold a parseable timestamp")]
    InvalidTime { key: String, raw: Value },
}

impl MapWarning {
    /// The reserved key that carried the offending value.
    pub fn key(&self) -> &str {
        match self {
            MapWarning::InvalidLevel { key, .. }
            | MapWarning::InvalidMessage { key, .. }
            | MapWarning::InvalidTime { key, .. } => key,
        }
    }

    /// The offending value, exactly as decoded.
    pub fn raw(&self) -> &Value {
        match self {
            MapWarning::InvalidLevel { raw, .. }
            | MapWarning::InvalidMessage { raw, .. }
            | MapWarning::InvalidTime { raw, .. } => raw,
        }
    }

    /// JSON type of the offending value, for diagnostics.
    pub fn raw_type(&self) -> &'static str {
        json_type_name(self.raw())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Turns decoded events into [`Record`]s according to a [`FieldMapping`].
///
/// Reserved keys are matched in the fixed order level → message → time, so if
/// two configured keys collide on the same literal name the earlier branch
/// consumes it. Exactly one extraction attempt is made per reserved field;
/// every other pair lands in `attributes` unchanged, in input order.
pub struct RecordMapper {
    keys: FieldMapping,
    layout: TimeLayout,
}

impl RecordMapper {
    pub fn new(keys: FieldMapping, layout: TimeLayout) -> Self {
        RecordMapper { keys, layout }
    }

    /// Map one event to a record.
    ///
    /// Warnings are data, not control flow: each malformed reserved field
    /// yields at most one warning, the field keeps its default, and mapping
    /// continues with the remaining keys. The returned record is always
    /// fully populated.
    pub fn map(&self, event: RawEvent) -> (Record, Vec<MapWarning>) {
        let mut record = Record::default();
        let mut warnings = Vec::new();

        for (key, value) in event {
            if key == self.keys.level {
                // Non-numbers, non-integer numbers and out-of-range integers
                // all fall back to the Info default.
                match value.as_i64().and_then(Severity::from_int) {
                    Some(severity) => record.severity = severity,
                    None => warnings.push(MapWarning::InvalidLevel { key, raw: value }),
                }
            } else if key == self.keys.message {
                match value {
                    Value::String(text) => record.message = text,
                    raw => warnings.push(MapWarning::InvalidMessage { key, raw }),
                }
            } else if key == self.keys.time {
                match value.as_str().map(|text| self.layout.parse(text)) {
                    Some(Ok(timestamp)) => record.timestamp = timestamp,
                    Some(Err(_)) | None => {
                        warnings.push(MapWarning::InvalidTime { key, raw: value })
                    }
                }
            } else {
                record.attributes.push((key, value));
            }
        }

        (record, warnings)
    }
}
