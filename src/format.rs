use crate::mapping::FieldMapping;
use crate::record::{Record, Severity};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Write as _;
use termion::color;

/// Message column width in the terminal format; shorter messages are padded
/// so the attribute columns line up across records.
const MSG_JUST: usize = 40;

/// Renders one record as a single output line, without the trailing newline.
pub trait LineFormat {
    fn format_line(&self, record: &Record) -> String;
}

/// The human-friendly terminal format: a four-character level tag, a compact
/// timestamp, the message justified to a fixed column, then `key=value`
/// attribute pairs.
///
/// With color enabled the level tag and attribute keys are painted in the
/// severity's color (crit magenta, error red, warn yellow, info green,
/// debug cyan).
#[derive(Debug, Clone, Copy)]
pub struct TermFormat {
    color: bool,
}

impl TermFormat {
    pub fn new(color: bool) -> Self {
        TermFormat { color }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => color::Magenta.fg_str(),
            Severity::Error => color::Red.fg_str(),
            Severity::Warning => color::Yellow.fg_str(),
            Severity::Info => color::Green.fg_str(),
            Severity::Debug => color::Cyan.fg_str(),
        }
    }
}

impl LineFormat for TermFormat {
    fn format_line(&self, record: &Record) -> String {
        let time = record.timestamp.format("%m-%d|%H:%M:%S");
        let paint = Self::severity_color(record.severity);
        let reset = color::Reset.fg_str();

        let mut line = if self.color {
            format!(
                "{paint}{tag}{reset}[{time}] {msg} ",
                tag = record.severity.tag(),
                msg = record.message,
            )
        } else {
            format!(
                "[{tag}] [{time}] {msg} ",
                tag = record.severity.tag(),
                msg = record.message,
            )
        };

        if !record.attributes.is_empty() && record.message.len() < MSG_JUST {
            for _ in record.message.len()..MSG_JUST {
                line.push(' ');
            }
        }

        for (i, (key, value)) in record.attributes.iter().enumerate() {
            if i != 0 {
                line.push(' ');
            }
            if self.color {
                let _ = write!(line, "{paint}{key}{reset}={}", format_value(value));
            } else {
                let _ = write!(line, "{key}={}", format_value(value));
            }
        }

        line
    }
}

/// The machine-friendlier logfmt format, used when output is piped.
///
/// The three leading pairs use the *configured* reserved key names, so the
/// output round-trips under the same `--time-key`/`--level-key`/
/// `--message-key` flags it was produced with.
#[derive(Debug, Clone)]
pub struct LogfmtFormat {
    keys: FieldMapping,
}

impl LogfmtFormat {
    pub fn new(keys: FieldMapping) -> Self {
        LogfmtFormat { keys }
    }
}

impl LineFormat for LogfmtFormat {
    fn format_line(&self, record: &Record) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "{}={} {}={} {}={}",
            self.keys.time,
            record.timestamp.format("%Y-%m-%dT%H:%M:%S%z"),
            self.keys.level,
            record.severity.label(),
            self.keys.message,
            escape(&record.message),
        );
        for (key, value) in &record.attributes {
            let _ = write!(line, " {key}={}", format_value(value));
        }
        line
    }
}

/// Attribute values render in logfmt's conventions: `nil` for null, bare
/// booleans, numbers as their exact decimal text (every digit intact), and
/// strings quoted only when they need it. Arrays and objects pass through
/// opaquely as compact JSON.
fn format_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed("nil"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(number) => Cow::Owned(number.to_string()),
        Value::String(text) => escape(text),
        compound => Cow::Owned(escape(&compound.to_string()).into_owned()),
    }
}

/// Quote and escape a string if it holds whitespace/control characters, `=`,
/// `"`, or `\`; leave it bare otherwise.
fn escape(text: &str) -> Cow<'_, str> {
    let plain = !text
        .chars()
        .any(|c| c <= ' ' || matches!(c, '=' | '"' | '\\'));
    if plain {
        return Cow::Borrowed(text);
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' | '"' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}
