//! Identifier helpers for turning spreadsheet text into Java names

/// Java reserved words that can never be used as a class or method name.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

/// Splits free text into lower-cased words.
///
/// Word boundaries are any non-alphanumeric character and a lower-to-upper
/// case transition, so `PortalAuthentication`, `portal authentication` and
/// `portal_authentication` all yield `["portal", "authentication"]`.
/// Runs of capitals stay together (`SMITLogin` -> `["smitlogin"]`).
///
/// # Examples
/// ```
/// use pomforge::core::utils::split_words;
///
/// assert_eq!(split_words("searchPatient"), vec!["search", "patient"]);
/// assert_eq!(split_words("TC_SMIT_01"), vec!["tc", "smit", "01"]);
/// ```
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_is_lowercase && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_is_lowercase = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts free text to UpperCamelCase.
///
/// # Examples
/// ```
/// use pomforge::core::utils::to_upper_camel_case;
///
/// assert_eq!(to_upper_camel_case("portal authentication test"), "PortalAuthenticationTest");
/// assert_eq!(to_upper_camel_case("TC_SMIT_01"), "TcSmit01");
/// ```
pub fn to_upper_camel_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Converts free text to lowerCamelCase.
pub fn to_lower_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Returns true when `s` can be used verbatim as a Java identifier.
pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let valid_start = match chars.next() {
        Some(c) => c.is_alphabetic() || c == '_' || c == '$',
        None => false,
    };

    valid_start
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&s)
}

/// Returns true when `s` is a dotted Java package name such as `com.acme.pages`.
pub fn is_java_package(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_java_identifier)
}

/// Normalizes a target class name.
///
/// Valid identifiers are kept as written so that names like `SMITLoginTest`
/// survive untouched; anything else is UpperCamelCased. Blank input, or input
/// with no usable characters, yields `fallback`.
pub fn java_class_name(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if is_java_identifier(trimmed) {
        return trimmed.to_string();
    }

    let camel = to_upper_camel_case(trimmed);
    if is_java_identifier(&camel) {
        camel
    } else if camel.is_empty() {
        fallback.to_string()
    } else {
        format!("{fallback}{camel}")
    }
}

/// Normalizes a target method name, deriving one from the scenario id when
/// the method column is blank.
pub fn java_method_name(raw: &str, scenario_id: &str) -> String {
    let trimmed = raw.trim();
    if is_java_identifier(trimmed) {
        return trimmed.to_string();
    }

    let camel = to_lower_camel_case(trimmed);
    if is_java_identifier(&camel) {
        return camel;
    }

    format!("test{}", to_upper_camel_case(scenario_id))
}
