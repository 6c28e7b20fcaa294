//! Path template interpolation
//!
//! Handles `{{ variable }}` placeholders in endpoint paths, e.g.
//! `/api/v2/problem/{{ problem_id }}`. Variables come from a flat JSON
//! object or a string map. Each value fills exactly one path segment, so
//! `/`, `?` and `#` in a value are percent-encoded.

use crate::error::{Error, Result};
use crate::types::StringMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").unwrap()
});

/// Everything except RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Variables available to a template
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    vars: serde_json::Map<String, Value>,
}

impl TemplateVars {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Get a variable
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Whether no variables are set
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl From<&StringMap> for TemplateVars {
    fn from(map: &StringMap) -> Self {
        Self {
            vars: map
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        }
    }
}

/// Render a template string with the given variables
pub fn render(template: &str, vars: &TemplateVars) -> Result<String> {
    let mut result = template.to_string();
    let mut errors = Vec::new();

    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match vars.get(name) {
            Some(value) => {
                let replacement = path_segment(name, &value_to_string(value)?)?;
                result = result.replace(full_match, &replacement);
            }
            None => errors.push(name.to_string()),
        }
    }

    if errors.is_empty() {
        Ok(result)
    } else {
        Err(Error::undefined_var(errors.join(", ")))
    }
}

/// Names of the variables a template refers to, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let name = cap[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Percent-encode a value for use as a single path segment
fn path_segment(name: &str, value: &str) -> Result<String> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(Error::template(format!(
            "variable '{name}' cannot be used as a path segment: {value:?}"
        )));
    }
    Ok(utf8_percent_encode(value, PATH_SEGMENT).to_string())
}

fn value_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::template(format!(
            "cannot interpolate non-scalar value {value}"
        ))),
    }
}
