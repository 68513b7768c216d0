//! Structural validation of UI descriptions.
//!
//! Deliberately minimal: component-level interpretation is the rendering
//! backend's job, so only the shape the pipeline itself depends on is
//! checked here.

use serde_json::Value;

/// Outcome of validating a UI description
#[derive(Debug, Clone)]
pub struct Validation {
    /// True when no rule was violated
    pub valid: bool,
    /// One message per violated rule, in rule order
    pub errors: Vec<String>,
}

/// Check structural well-formedness of a parsed UI description.
///
/// Both rules are evaluated unconditionally so every violation is reported:
/// the root must be a JSON object, and a `components` array must be present
/// either at the root or nested under a `screen` key.
pub fn validate_ui(model: &Value) -> Validation {
    let mut errors = Vec::new();

    if !model.is_object() {
        errors.push("root must be an object".to_string());
    }

    let components = model
        .get("components")
        .or_else(|| model.get("screen").and_then(|screen| screen.get("components")));
    if !components.is_some_and(Value::is_array) {
        errors.push("components must be an array".to_string());
    }

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}
