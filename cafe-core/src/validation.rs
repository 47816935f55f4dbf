use std::collections::BTreeMap;

use serde::Serialize;

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Ordered collection of field errors produced when binding a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error on one field.
    pub fn single(field: &str, message: impl Into<String>, code: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message, code);
        errors
    }

    /// Collect every error of a garde report. An empty path maps to `"value"`.
    pub fn from_report(report: &garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                let field = path.to_string();
                FieldError {
                    field: if field.is_empty() { "value".to_string() } else { field },
                    message: error.message().to_string(),
                    code: "validation".to_string(),
                }
            })
            .collect();
        Self { errors }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>, code: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
            code: code.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages attached to `field`, in insertion order.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Messages grouped by field, the shape templates consume.
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for e in &self.errors {
            grouped.entry(e.field.clone()).or_default().push(e.message.clone());
        }
        grouped
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for e in &self.errors {
            write!(f, "\n  - {}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
