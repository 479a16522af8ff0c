//! Best-effort structured parsing of log lines.
//!
//! Each line is tried as a JSON object. Objects become
//! [`ParseResult::Structured`] with the well-known `timestamp`, `level` and
//! `message` fields lifted out; everything else degrades to
//! [`ParseResult::Raw`]. Parsing never fails the load.

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

// Accepted keys, first match wins. Covers the common Node/Go logger layouts.
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "time", "ts", "@timestamp"];
const LEVEL_KEYS: &[&str] = &["level", "lvl", "severity"];
const MESSAGE_KEYS: &[&str] = &["message", "msg"];

/// Width the timestamp column is padded to in [`LogRecord::summary`].
const TIMESTAMP_COLUMN: usize = 24;
/// Width the level column is padded to in [`LogRecord::summary`].
const LEVEL_COLUMN: usize = 5;

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParseResult {
    /// The line is a JSON object.
    Structured(LogRecord),
    /// Anything else; shown as plain text.
    #[default]
    Raw,
}

impl ParseResult {
    /// The structured record, if the line parsed.
    pub fn as_structured(&self) -> Option<&LogRecord> {
        match self {
            ParseResult::Structured(record) => Some(record),
            ParseResult::Raw => None,
        }
    }

    /// Severity of the line, [`Severity::Unknown`] for raw lines.
    pub fn severity(&self) -> Severity {
        match self {
            ParseResult::Structured(record) => record.severity(),
            ParseResult::Raw => Severity::Unknown,
        }
    }
}

/// Fields extracted from a structured log line.
///
/// `timestamp`, `level` and `message` are `None` when the key is absent or
/// holds a non-string value; such values stay in `extra`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogRecord {
    timestamp: Option<String>,
    level: Option<String>,
    message: Option<String>,
    extra: Map<String, Value>,
}

impl LogRecord {
    /// Raw timestamp string as written in the log.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Level string as written in the log.
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Message string.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Every top-level field other than timestamp, level and message.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Timestamp parsed as RFC 3339, if it is one.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }

    /// Classify the level string.
    pub fn severity(&self) -> Severity {
        self.level
            .as_deref()
            .map(Severity::from_level)
            .unwrap_or(Severity::Unknown)
    }

    /// One-line rendering: padded timestamp, padded level, then the message.
    ///
    /// RFC 3339 timestamps are normalized to millisecond precision so the
    /// column lines up across records.
    pub fn summary(&self) -> String {
        let timestamp = match self.parsed_timestamp() {
            Some(ts) => ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            None => self.timestamp.clone().unwrap_or_default(),
        };
        format!(
            " {:<tw$} {:<lw$} {}",
            timestamp,
            self.level.as_deref().unwrap_or(""),
            self.message.as_deref().unwrap_or(""),
            tw = TIMESTAMP_COLUMN,
            lw = LEVEL_COLUMN,
        )
    }
}

/// Coarse classification of a level string, used for row styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// error, fatal, panic, critical.
    Error,
    /// warn, warning.
    Warn,
    /// info, notice.
    Info,
    /// debug, trace.
    Debug,
    /// Raw lines and unrecognized levels.
    Unknown,
}

impl Severity {
    /// Classify a level string case-insensitively.
    pub fn from_level(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "error" | "err" | "fatal" | "panic" | "critical" | "crit" => Severity::Error,
            "warn" | "warning" => Severity::Warn,
            "info" | "notice" => Severity::Info,
            "debug" | "trace" => Severity::Debug,
            _ => Severity::Unknown,
        }
    }
}

/// Parse one line of raw bytes.
pub fn parse_line(data: &[u8]) -> ParseResult {
    // Cheap reject before handing non-JSON text to serde.
    let first = data.iter().find(|b| !b.is_ascii_whitespace());
    if first != Some(&b'{') {
        return ParseResult::Raw;
    }

    let Ok(mut fields) = serde_json::from_slice::<Map<String, Value>>(data) else {
        return ParseResult::Raw;
    };

    let timestamp = take_string(&mut fields, TIMESTAMP_KEYS);
    let level = take_string(&mut fields, LEVEL_KEYS);
    let message = take_string(&mut fields, MESSAGE_KEYS);

    ParseResult::Structured(LogRecord {
        timestamp,
        level,
        message,
        extra: fields,
    })
}

/// Remove and return the first string-valued key from `keys`.
fn take_string(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    let key = keys
        .iter()
        .find(|key| matches!(fields.get(**key), Some(Value::String(_))))?;
    match fields.remove(*key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}
