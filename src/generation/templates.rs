//! Embedded Tera templates for Java source and service prompts

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use crate::generation::errors::GenerationError;
use crate::generation::sanitizers::{escape_java_string, sanitize_comment};

pub const PAGE_CLASS: &str = "java/page.java";
pub const TEST_CLASS: &str = "java/test_class.java";
pub const BASE_PAGE: &str = "java/base_page.java";
pub const BASE_TEST: &str = "java/base_test.java";
pub const PAGE_PROMPT: &str = "prompts/page";
pub const TEST_CLASS_PROMPT: &str = "prompts/test_class";

const TEMPLATES: [(&str, &str); 6] = [
    (PAGE_CLASS, include_str!("../../templates/java/page.java.tera")),
    (TEST_CLASS, include_str!("../../templates/java/test_class.java.tera")),
    (BASE_PAGE, include_str!("../../templates/java/base_page.java.tera")),
    (BASE_TEST, include_str!("../../templates/java/base_test.java.tera")),
    (PAGE_PROMPT, include_str!("../../templates/prompts/page.tera")),
    (TEST_CLASS_PROMPT, include_str!("../../templates/prompts/test_class.tera")),
];

static ENGINE: OnceCell<Tera> = OnceCell::new();

/// The shared engine, parsed on first use
pub fn engine() -> Result<&'static Tera, GenerationError> {
    ENGINE.get_or_try_init(build_engine)
}

fn build_engine() -> Result<Tera, GenerationError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    tera.autoescape_on(vec![]);
    tera.register_filter("java_string", java_string_filter);
    tera.register_filter("java_comment", java_comment_filter);
    tracing::debug!(templates = TEMPLATES.len(), "Loaded embedded templates");
    Ok(tera)
}

/// Render one embedded template from any serializable view
pub fn render<T: Serialize>(name: &str, view: &T) -> Result<String, GenerationError> {
    let context = Context::from_serialize(view)?;
    engine()?
        .render(name, &context)
        .map_err(|e| GenerationError::RenderError(format!("Failed to render {name}: {e}")))
}

fn java_string_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(escape_java_string(&text_of(value))))
}

fn java_comment_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(sanitize_comment(&text_of(value))))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
