//! Field-name based redaction for delimiter-joined log messages
//!
//! Messages are expected to look like `name=John;email=john@x.com;` where
//! each pair is `field=value` and pairs are joined by a single separator
//! character. Values are never escaped, so a value runs until the next
//! separator or the end of the message.
//!
//! A field name is matched literally, and only where it starts the message
//! or follows a non-word character. Free text such as `retry attempt=2 for`
//! may precede the pairs and is left alone.

use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};

/// Token substituted for every redacted value
pub const REDACTION: &str = "***";

/// Separator used between `field=value` pairs
pub const SEPARATOR: char = ';';

/// Fields treated as personally identifiable by default
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

lazy_static! {
    static ref PII_PATTERN: Regex = field_pattern(&PII_FIELDS, SEPARATOR);
}

/// Build one alternation matching `field=value` for any of `fields`.
///
/// A field name only matches at the start of the message or right after a
/// non-word character or the separator, so `username=` is never read as
/// `name=`. The boundary character is captured as `pre` and written back.
/// Field names are matched literally.
fn field_pattern<S: AsRef<str>>(fields: &[S], separator: char) -> Regex {
    let keys = fields
        .iter()
        .map(|field| regex::escape(field.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    let sep = regex::escape(separator.encode_utf8(&mut [0; 4]));
    let pattern = format!(r"(?P<pre>^|\W|{sep})(?P<key>{keys})=[^{sep}]*");

    // Every variable part is escaped and the size limit is lifted, so
    // compilation cannot fail.
    RegexBuilder::new(&pattern)
        .size_limit(usize::MAX)
        .build()
        .expect("escaped field names always form a valid pattern")
}

/// Redacts values of configured fields
///
/// The matcher is compiled once at construction; a `Redactor` can be shared
/// freely between threads.
#[derive(Debug, Clone)]
pub struct Redactor {
    fields: Vec<String>,
    token: String,
    separator: char,
    /// `None` when there is no non-empty field name to match
    pattern: Option<Regex>,
}

impl Redactor {
    pub fn new<I, S>(fields: I, token: impl Into<String>, separator: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let keys: Vec<&str> = fields
            .iter()
            .map(String::as_str)
            .filter(|field| !field.is_empty())
            .collect();

        let pattern = if keys.is_empty() {
            None
        } else if separator == SEPARATOR && keys == PII_FIELDS {
            Some(PII_PATTERN.clone())
        } else {
            Some(field_pattern(&keys, separator))
        };

        Self {
            fields,
            token: token.into(),
            separator,
            pattern,
        }
    }

    /// Redactor for [`PII_FIELDS`] with the default token and separator
    pub fn pii() -> Self {
        Self::new(PII_FIELDS, REDACTION, SEPARATOR)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Replace the value of every configured field found in `message`
    pub fn redact(&self, message: &str) -> String {
        self.redact_counted(message).0
    }

    /// Same as [`Redactor::redact`], also returning how many values were replaced
    pub fn redact_counted(&self, message: &str) -> (String, usize) {
        let Some(pattern) = &self.pattern else {
            return (message.to_string(), 0);
        };

        let mut count = 0;
        let redacted = pattern.replace_all(message, |caps: &Captures<'_>| {
            count += 1;
            format!("{}{}={}", &caps["pre"], &caps["key"], self.token)
        });

        (redacted.into_owned(), count)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::pii()
    }
}

/// One-shot redaction of `message`
///
/// Never fails: an empty field list or a message without any of the fields
/// comes back unchanged.
pub fn redact<S: AsRef<str>>(message: &str, fields: &[S], token: &str, separator: char) -> String {
    if fields.is_empty() {
        return message.to_string();
    }
    Redactor::new(fields.iter().map(|f| f.as_ref()), token, separator).redact(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference: one substitution pass per field over the accumulated result
    fn redact_sequentially(message: &str, fields: &[&str], token: &str, separator: char) -> String {
        let mut result = message.to_string();
        for field in fields {
            result = pair(field, separator)
                .replace_all(&result, |caps: &Captures<'_>| {
                    format!("{}{field}={token}", &caps[1])
                })
                .into_owned();
        }
        result
    }

    fn pair(field: &str, separator: char) -> Regex {
        let sep = regex::escape(&separator.to_string());
        Regex::new(&format!(r"(^|\W|{sep}){}=[^{sep}]*", regex::escape(field))).unwrap()
    }

    const MESSAGES: &[(char, &str)] = &[
        (';', "name=John;email=john@x.com;phone=555;"),
        (';', "retry attempt=2 for name=Jane;ip=1;"),
        (';', "[job=7] user name=Jane; email=jane@x.com; ssn=123-45-6789;"),
        (';', "lookup status=ok for email=jane@x.com;ssn=123-45-6789;"),
        (
            ';',
            "[PII] user_data INFO 2024-03-01 12:30:45,123: name=Jane; password=pw; ip=10.0.0.1;",
        ),
        ('|', "ctx id=4 name=Bob|phone=555-0100|ip=::1"),
        (',', "username=jdoe,name=Jo Ann,password=pw"),
        (';', "no pairs here at all"),
    ];

    const SUBSETS: &[&[&str]] = &[
        &[],
        &["name"],
        &["email", "ssn"],
        &["password", "phone"],
        &PII_FIELDS,
    ];

    #[test]
    fn test_matches_sequential_substitution() {
        for &(separator, message) in MESSAGES {
            for &fields in SUBSETS {
                let redacted = redact(message, fields, REDACTION, separator);

                assert_eq!(
                    redacted,
                    redact_sequentially(message, fields, REDACTION, separator),
                    "{message:?} with {fields:?}"
                );

                // Idempotent
                assert_eq!(redact(&redacted, fields, REDACTION, separator), redacted);

                // Unselected fields keep their values
                for field in PII_FIELDS.iter().filter(|f| !fields.contains(*f)) {
                    for kept in pair(field, separator).find_iter(message) {
                        assert!(
                            redacted.contains(kept.as_str()),
                            "{:?} lost from {message:?} with {fields:?}",
                            kept.as_str()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_free_text_before_fields() {
        assert_eq!(
            redact("retry attempt=2 for name=Jane;ip=1;", &["name"], "***", ';'),
            "retry attempt=2 for name=***;ip=1;"
        );
        assert_eq!(
            redact("[job=7] user name=Jane;", &PII_FIELDS, REDACTION, SEPARATOR),
            "[job=7] user name=***;"
        );
    }

    #[test]
    fn test_punctuated_field_names() {
        let redacted = redact(
            "user agent=curl;x:y=1;a+b=2;xa+b=3;",
            &["user agent", "x:y", "a+b"],
            "***",
            ';',
        );
        assert_eq!(redacted, "user agent=***;x:y=***;a+b=***;xa+b=3;");
    }

    #[test]
    fn test_empty_field_name_is_ignored() {
        assert_eq!(redact("=x;name=y;", &["", "name"], "***", ';'), "=x;name=***;");
        assert_eq!(redact("=x;", &[""], "***", ';'), "=x;");
    }

    #[test]
    fn test_redacts_selected_fields() {
        let redacted = redact(
            "name=John;email=john@x.com;phone=555;",
            &["name", "email"],
            "***",
            ';',
        );
        assert_eq!(redacted, "name=***;email=***;phone=555;");
    }

    #[test]
    fn test_end_of_string_is_a_boundary() {
        assert_eq!(
            redact("password=abc", &["password"], "***", ';'),
            "password=***"
        );
    }

    #[test]
    fn test_empty_field_list_is_identity() {
        let fields: [&str; 0] = [];
        for message in ["", "name=John;", "no pairs at all", "a=b;c=d"] {
            assert_eq!(redact(message, &fields, "***", ';'), message);
        }
    }

    #[test]
    fn test_absent_fields_leave_message_unchanged() {
        let message = "ip=10.0.0.1;user_agent=curl/8.0;";
        assert_eq!(redact(message, &PII_FIELDS, REDACTION, SEPARATOR), message);
    }

    #[test]
    fn test_value_stops_at_separator() {
        let redacted = redact("ssn=123-45-6789;phone=555-0100;", &["ssn"], "***", ';');
        assert_eq!(redacted, "ssn=***;phone=555-0100;");
    }

    #[test]
    fn test_spaces_after_separator() {
        let redacted = redact(
            "name=Jane Doe; email=jane@x.com; ip=1.2.3.4;",
            &PII_FIELDS,
            REDACTION,
            SEPARATOR,
        );
        assert_eq!(redacted, "name=***; email=***; ip=1.2.3.4;");
    }

    #[test]
    fn test_no_substring_field_match() {
        let message = "username=jdoe;surname=Doe;name=John;";
        assert_eq!(
            redact(message, &["name"], "***", ';'),
            "username=jdoe;surname=Doe;name=***;"
        );
    }

    #[test]
    fn test_case_sensitive() {
        let message = "Name=John;EMAIL=j@x.com;";
        assert_eq!(redact(message, &["name", "email"], "***", ';'), message);
    }

    #[test]
    fn test_repeated_field() {
        let redacted = redact("name=a;name=b;name=", &["name"], "***", ';');
        assert_eq!(redacted, "name=***;name=***;name=***");
    }

    #[test]
    fn test_other_separators() {
        assert_eq!(
            redact("name=John|email=j@x.com|ip=1", &["email"], "XX", '|'),
            "name=John|email=XX|ip=1"
        );
        assert_eq!(
            redact("name=John.ssn=1.ip=2", &["ssn"], "XX", '.'),
            "name=John.ssn=XX.ip=2"
        );
        assert_eq!(
            redact("name=John,phone=5", &["name"], "XX", ','),
            "name=XX,phone=5"
        );
    }

    #[test]
    fn test_token_is_literal() {
        let redacted = redact("password=hunter2;", &["password"], "$0${key}", ';');
        assert_eq!(redacted, "password=$0${key};");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        // The email value owns everything up to the separator.
        let redacted = redact("email=a=b name=x;phone=1;", &["email", "name"], "***", ';');
        assert_eq!(redacted, "email=***;phone=1;");
    }

    #[test]
    fn test_unicode_values() {
        let redacted = redact("name=Zoë Ångström;ip=::1;", &["name"], "***", ';');
        assert_eq!(redacted, "name=***;ip=::1;");
    }

    #[test]
    fn test_counts_replacements() {
        let redactor = Redactor::new(["name", "ssn"], "***", ';');
        let (redacted, count) = redactor.redact_counted("name=a;ssn=b;ip=c;name=d;");

        assert_eq!(redacted, "name=***;ssn=***;ip=c;name=***;");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_default_redactor() {
        let redactor = Redactor::default();
        assert_eq!(redactor.token(), "***");
        assert_eq!(redactor.separator(), ';');
        assert_eq!(redactor.fields().len(), 5);
    }
}
