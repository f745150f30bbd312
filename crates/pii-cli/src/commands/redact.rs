use std::io::{self, BufRead, Write};

use anyhow::Result;
use pii_config::Config;
use pii_redact::Redactor;

pub fn handle(
    message: Option<String>,
    fields: Vec<String>,
    separator: char,
    token: String,
    config: &Config,
) -> Result<()> {
    let fields = if fields.is_empty() {
        config.logging.fields.clone()
    } else {
        fields
    };
    let redactor = Redactor::new(fields, token, separator);

    match message {
        Some(message) => println!("{}", redactor.redact(&message)),
        None => redact_lines(&redactor, io::stdin().lock(), &mut io::stdout().lock())?,
    }

    Ok(())
}

fn redact_lines(redactor: &Redactor, input: impl BufRead, output: &mut impl Write) -> Result<()> {
    for line in input.lines() {
        writeln!(output, "{}", redactor.redact(&line?))?;
    }
    output.flush()?;
    Ok(())
}
