//! Base line template
//!
//! A template is plain text with `{name}`, `{level}`, `{timestamp}` and
//! `{message}` placeholders. `{{` and `}}` produce literal braces.

use std::str::FromStr;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::{LogError, LogRecord, Result};

/// Default line layout
pub const DEFAULT_FORMAT: &str = "[PII] {name} {level} {timestamp}: {message}";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Level,
    Timestamp,
    Message,
}

/// Parsed line template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(format: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, '{')) | None => return Err(LogError::UnbalancedBrace(pos)),
                            Some((_, ch)) => key.push(ch),
                        }
                    }

                    let segment = match key.trim() {
                        "name" => Segment::Name,
                        "level" => Segment::Level,
                        "timestamp" => Segment::Timestamp,
                        "message" => Segment::Message,
                        _ => return Err(LogError::UnknownPlaceholder(key)),
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => return Err(LogError::UnbalancedBrace(pos)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Interpolate `record` into the template
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        let mut line = String::with_capacity(record.message.len() + 64);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Name => line.push_str(&record.name),
                Segment::Level => line.push_str(record.level.as_str()),
                Segment::Timestamp => line.push_str(&record.timestamp.format(TIMESTAMP_FORMAT)?),
                Segment::Message => line.push_str(&record.message),
            }
        }

        Ok(line)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            segments: vec![
                Segment::Literal("[PII] ".to_string()),
                Segment::Name,
                Segment::Literal(" ".to_string()),
                Segment::Level,
                Segment::Literal(" ".to_string()),
                Segment::Timestamp,
                Segment::Literal(": ".to_string()),
                Segment::Message,
            ],
        }
    }
}

impl FromStr for Template {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
