use crate::mapping::{FieldMapping, TimeLayout};
use crate::record::Severity;
use clap::{Parser, ValueEnum};

/// Displays log15-compatible JSON logs as human-friendly terminal lines.
#[derive(Parser, Debug)]
#[command(name = "json-log-term", version, about, long_about = None)]
pub struct Cli {
    /// Which JSON key contains the timestamp
    #[arg(short = 't', long, default_value = "t")]
    pub time_key: String,

    /// What layout the time is in, as a chrono strftime string. The default
    /// accepts ISO 8601 / RFC 3339 with optional fractional seconds
    #[arg(short = 'a', long, default_value = "%+")]
    pub time_layout: TimeLayout,

    /// Which JSON key contains the level. The level value must be an integer
    /// from 0 to 4, with 0 being 'crit' and 4 being 'debug'
    #[arg(short = 'v', long, default_value = "lvl")]
    pub level_key: String,

    /// Which JSON key contains the message
    #[arg(short = 'm', long, default_value = "msg")]
    pub message_key: String,

    /// Minimum log level to output (debug, info, warn, error or crit)
    #[arg(short = 'l', long, default_value = "info")]
    pub min_level: Severity,

    /// Output line format
    #[arg(long, value_enum, default_value_t = FormatChoice::Auto)]
    pub format: FormatChoice,

    /// When to color the terminal format
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl Cli {
    pub fn field_mapping(&self) -> FieldMapping {
        FieldMapping {
            time: self.time_key.clone(),
            level: self.level_key.clone(),
            message: self.message_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatChoice {
    /// Terminal format on a TTY, logfmt when piped
    Auto,
    /// The colored/justified terminal format
    Term,
    /// Plain `key=value` lines
    Logfmt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// ANSI colors iff stdout is a TTY
    Auto,
    Always,
    Never,
}
