//! Cell parsers for the steps and test data columns

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static STEP_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n;]+").expect("static regex"));
static ENUMERATION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("static regex"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("static regex"));

/// Splits a steps cell into ordered, trimmed steps.
///
/// Steps are separated by any run of newlines, carriage returns or
/// semicolons. A leading `1.`-style enumeration is removed from each step and
/// empty pieces are dropped.
pub fn parse_steps(raw: &str) -> Vec<String> {
    STEP_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| ENUMERATION_PREFIX.replace(step, "").trim().to_string())
        .filter(|step| !step.is_empty())
        .collect()
}

/// Parses `Key: value` lines into a lower-cased key map.
///
/// Only the first colon on a line separates key from value, so URLs in
/// values survive. Lines without a colon, or with an empty key, are ignored.
/// A repeated key keeps the last value.
pub fn parse_test_data(raw: &str) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();

    for line in LINE_BREAK.split(raw) {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        data.insert(key, value.trim().to_string());
    }

    data
}
