//! Field registry and example-data fill
//!
//! The registry says which payload key feeds which form field and how the
//! value is converted. Filling is all-or-nothing: every value is converted
//! first and the form is only touched once they all succeeded.

use crate::state::{ids, TriageForm};
use serde_json::{Map, Value};
use thiserror::Error;

/// How a payload value lands in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBinding {
    /// Numeric input with the given field id
    Number(String),
    /// Radio group; the value selects the option with that value
    Radio(String),
    /// Checkbox with the given field id
    Checkbox(String),
    /// Free-text input, filled with the string as is
    Text(String),
}

impl FieldBinding {
    pub fn field_id(&self) -> &str {
        match self {
            Self::Number(id) | Self::Radio(id) | Self::Checkbox(id) | Self::Text(id) => id,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FillError {
    #[error("example data is not a JSON object")]
    NotAnObject,
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("no option '{value}' in {key}")]
    UnknownOption { key: String, value: String },
    #[error("form has no field '{0}'")]
    MissingField(String),
}

/// Converted value waiting to be written
#[derive(Debug)]
enum Staged {
    Text(String),
    Radio(String),
    Checked(bool),
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    bindings: Vec<(String, FieldBinding)>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings for the triage form; payload keys equal field ids
    pub fn triage() -> Self {
        let mut registry = Self::new();
        for id in [
            ids::AGE,
            ids::SYSTOLIC,
            ids::DIASTOLIC,
            ids::HEART_RATE,
            ids::OXYGEN_SATURATION,
            ids::TEMPERATURE,
        ] {
            registry.register(id, FieldBinding::Number(id.to_string()));
        }
        registry.register(ids::SEX, FieldBinding::Radio(ids::SEX.to_string()));
        for id in ids::SYMPTOMS {
            registry.register(id, FieldBinding::Checkbox(id.to_string()));
        }
        registry.register(
            ids::CHIEF_COMPLAINT,
            FieldBinding::Text(ids::CHIEF_COMPLAINT.to_string()),
        );
        registry
    }

    pub fn register(&mut self, key: &str, binding: FieldBinding) {
        self.bindings.retain(|(k, _)| k != key);
        self.bindings.push((key.to_string(), binding));
    }

    pub fn binding(&self, key: &str) -> Option<&FieldBinding> {
        self.bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, b)| b)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Write `payload` into `form`.
    ///
    /// Keys without a binding are ignored. Returns the ids of the fields that
    /// were written. On error the form is left untouched.
    pub fn fill(&self, form: &mut TriageForm, payload: &Value) -> Result<Vec<String>, FillError> {
        let object = payload.as_object().ok_or(FillError::NotAnObject)?;
        let staged = self.stage(form, object)?;

        let mut touched = Vec::with_capacity(staged.len());
        for (field_id, value) in staged {
            let Some(field) = form.field_mut(&field_id) else {
                continue;
            };
            match value {
                Staged::Text(text) => field.set_text(text),
                Staged::Checked(checked) => field.set_checked(checked),
                Staged::Radio(value) => {
                    if let Some(group) = field.radio_group_mut() {
                        group.check_value(&value);
                    }
                }
            }
            touched.push(field_id);
        }
        tracing::debug!(fields = touched.len(), "example data applied");
        Ok(touched)
    }

    fn stage(
        &self,
        form: &TriageForm,
        object: &Map<String, Value>,
    ) -> Result<Vec<(String, Staged)>, FillError> {
        let mut staged = Vec::new();
        for (key, value) in object {
            let Some(binding) = self.binding(key) else {
                continue;
            };
            let field_id = binding.field_id();
            let field = form
                .field(field_id)
                .ok_or_else(|| FillError::MissingField(field_id.to_string()))?;

            let invalid = || FillError::InvalidValue {
                key: key.clone(),
                value: value.to_string(),
            };

            let converted = match binding {
                FieldBinding::Number(_) => Staged::Text(number_text(value).ok_or_else(invalid)?),
                FieldBinding::Checkbox(_) => Staged::Checked(truthy(value).ok_or_else(invalid)?),
                FieldBinding::Text(_) => {
                    Staged::Text(value.as_str().ok_or_else(invalid)?.to_string())
                }
                FieldBinding::Radio(_) => {
                    let choice = value.as_str().ok_or_else(invalid)?.trim();
                    let known = field
                        .radio_group()
                        .is_some_and(|g| g.options.iter().any(|o| o.value == choice));
                    if !known {
                        return Err(FillError::UnknownOption {
                            key: key.clone(),
                            value: choice.to_string(),
                        });
                    }
                    Staged::Radio(choice.to_string())
                }
            };
            staged.push((field_id.to_string(), converted));
        }
        Ok(staged)
    }
}

/// Numbers and numeric strings, rendered the way a user would type them
fn number_text(value: &Value) -> Option<String> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then(|| format!("{number}"))
}

/// Booleans, plus 0/1 as some generators emit them
fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        },
        _ => None,
    }
}
