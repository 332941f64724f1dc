use rust_decimal::Decimal;
use serde_json::Value;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes one JSON Lines round file.
pub fn rounds_file(lines: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    Ok(file)
}

/// Parses the round reports printed by `dicepay play`.
pub fn reports(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("report is not JSON"))
        .collect()
}

/// Reads a decimal amount out of a report, whether encoded as a string or a number.
pub fn amount(value: &Value) -> Decimal {
    match value {
        Value::String(text) => text.parse().expect("not a decimal"),
        Value::Number(number) => number.to_string().parse().expect("not a decimal"),
        other => panic!("expected an amount, got {other}"),
    }
}
