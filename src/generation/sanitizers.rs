//! Sanitizers for text that ends up inside generated Java source
//!
//! Scenario cells are free text typed by people; service replies are free
//! text typed by a model. Both pass through here before reaching a file.

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*[ \t]*\r?\n?").expect("static regex"));
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)```").expect("static regex")
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static UNICODE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2013}\u{2014}]").expect("static regex")
});

/// The code portion of a reply.
///
/// Only the first fenced block is kept, so prose around it is dropped. A
/// reply cut off inside its block keeps everything after the opening fence.
/// Text without fences is returned as is.
///
/// ```
/// use pomforge::generation::sanitizers::extract_code;
///
/// let reply = "Sure:\n```java\nclass A {}\n```\nLet me know!";
/// assert_eq!(extract_code(reply).trim(), "class A {}");
/// ```
pub fn extract_code(text: &str) -> &str {
    if let Some(block) = FENCED_BLOCK.captures(text).and_then(|caps| caps.get(1)) {
        return block.as_str();
    }
    match CODE_FENCE.find(text) {
        Some(fence) => &text[fence.end()..],
        None => text,
    }
}

/// Cleans a service reply into a Java compilation unit.
///
/// The code is extracted with [`extract_code`] and trimmed. When it does not
/// open with a package declaration, `package <package>;` is prepended.
pub fn sanitize_generated_code(text: &str, package: &str) -> String {
    let code = extract_code(text).trim();

    if code.starts_with("package ") {
        format!("{code}\n")
    } else {
        format!("package {package};\n\n{code}\n")
    }
}

/// Escapes text for use inside a Java string literal
pub fn escape_java_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in normalize_punctuation(input).chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Flattens text into a single line that is safe inside `//` and `/** */`
/// comments.
///
/// # Examples
/// ```
/// use pomforge::generation::sanitizers::sanitize_comment;
///
/// assert_eq!(sanitize_comment("Ends the */ comment\n  early"), "Ends the * / comment early");
/// ```
pub fn sanitize_comment(input: &str) -> String {
    let flat = normalize_punctuation(input);
    let flat = WHITESPACE.replace_all(flat.trim(), " ");
    // \u sequences are decoded before lexing, even inside comments
    flat.replace("*/", "* /").replace("\\u", "\\ u")
}

fn normalize_punctuation(input: &str) -> String {
    UNICODE_PUNCTUATION
        .replace_all(input, |caps: &regex::Captures| match &caps[0] {
            "\u{2018}" | "\u{2019}" => "'",
            "\u{201C}" | "\u{201D}" => "\"",
            _ => "-",
        })
        .into_owned()
}
