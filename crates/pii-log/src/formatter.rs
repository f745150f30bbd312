//! Redacting formatter
//!
//! Renders a record through the base template, then passes the whole
//! rendered line through the redactor. The redactor sees logger name, level,
//! timestamp and message as one string, so a configured field appearing in
//! any of them is redacted.

use std::fmt::{self, Write as _};

use pii_redact::{PII_FIELDS, REDACTION, Redactor, SEPARATOR};
use time::OffsetDateTime;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::{LogRecord, Result, Template};

#[derive(Debug, Clone)]
pub struct RedactingFormatter {
    template: Template,
    redactor: Redactor,
}

impl RedactingFormatter {
    /// Formatter with the default template, `***` token and `;` separator
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template: Template::default(),
            redactor: Redactor::new(fields, REDACTION, SEPARATOR),
        }
    }

    /// Formatter with a custom base template
    pub fn with_template<I, S>(fields: I, format: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            template: Template::parse(format)?,
            redactor: Redactor::new(fields, REDACTION, SEPARATOR),
        })
    }

    pub fn fields(&self) -> &[String] {
        self.redactor.fields()
    }

    /// Render `record` and redact the rendered line
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        let line = self.template.render(record)?;
        Ok(self.redactor.redact(&line))
    }
}

impl Default for RedactingFormatter {
    fn default() -> Self {
        Self::new(PII_FIELDS)
    }
}

/// Collects an event's message and fields into a `field=value` line
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn new() -> Self {
        Self {
            message: String::new(),
            fields: Vec::new(),
        }
    }

    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }

        let sep = format!("{SEPARATOR} ");
        let mut line = self.message;
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&self.fields.join(&sep));
        line.push(SEPARATOR);
        line
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

impl<S, N> FormatEvent<S, N> for RedactingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::new();
        event.record(&mut visitor);

        let record = LogRecord {
            name: metadata.target().to_string(),
            level: *metadata.level(),
            timestamp: OffsetDateTime::now_utc(),
            message: visitor.finish(),
        };

        let line = self.format(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}
