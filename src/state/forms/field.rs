//! Form field value objects

use super::radio::RadioGroup;

/// Declared input type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Checkbox,
    Radio,
}

/// Constraint whose outcome depends on another field's current value
#[derive(Debug, Clone, PartialEq)]
pub enum CrossFieldRule {
    /// This field's number must be strictly lower than the other field's number
    LessThan {
        other: String,
        message: String,
    },
}

/// Declared constraints of a field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub cross_field: Option<CrossFieldRule>,
}

impl Constraints {
    /// Required field with no range
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Required numeric field bounded to `[min, max]`
    pub fn required_range(min: f64, max: f64) -> Self {
        Self {
            required: true,
            min: Some(min),
            max: Some(max),
            cross_field: None,
        }
    }

    pub fn with_cross_field(mut self, rule: CrossFieldRule) -> Self {
        self.cross_field = Some(rule);
        self
    }
}

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Number(String),
    Checkbox(bool),
    Radio(RadioGroup),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub value: FieldValue,
    pub constraints: Constraints,
    /// Unit shown next to the input, e.g. "mmHg"
    pub unit: Option<String>,
}

impl FormField {
    /// Create a new text field
    pub fn text(id: &str, label: &str, constraints: Constraints) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            constraints,
            unit: None,
        }
    }

    /// Create a new numeric field
    pub fn number(id: &str, label: &str, unit: &str, constraints: Constraints) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: FieldValue::Number(String::new()),
            constraints,
            unit: (!unit.is_empty()).then(|| unit.to_string()),
        }
    }

    /// Create a new unchecked checkbox
    pub fn checkbox(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: FieldValue::Checkbox(false),
            constraints: Constraints::default(),
            unit: None,
        }
    }

    /// Create a new radio group field; the field id is the group name
    pub fn radio(group: RadioGroup, label: &str, constraints: Constraints) -> Self {
        Self {
            id: group.name.clone(),
            label: label.to_string(),
            value: FieldValue::Radio(group),
            constraints,
            unit: None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self.value {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Checkbox(_) => FieldKind::Checkbox,
            FieldValue::Radio(_) => FieldKind::Radio,
        }
    }

    /// Raw value as the validator sees it.
    ///
    /// Checkboxes read as `"on"` when checked, radio groups as the checked
    /// option's value, empty otherwise.
    pub fn raw_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s,
            FieldValue::Checkbox(true) => "on",
            FieldValue::Checkbox(false) => "",
            FieldValue::Radio(group) => group.checked_value().unwrap_or(""),
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.value, FieldValue::Checkbox(true))
    }

    pub fn radio_group(&self) -> Option<&RadioGroup> {
        match &self.value {
            FieldValue::Radio(group) => Some(group),
            _ => None,
        }
    }

    pub fn radio_group_mut(&mut self) -> Option<&mut RadioGroup> {
        match &mut self.value {
            FieldValue::Radio(group) => Some(group),
            _ => None,
        }
    }

    /// Returns true if the field accepts typed characters
    pub fn accepts_text(&self) -> bool {
        matches!(self.value, FieldValue::Text(_) | FieldValue::Number(_))
    }

    /// Set the text value (no-op for checkboxes and radio groups)
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) | FieldValue::Number(s) = &mut self.value {
            *s = value;
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        if let FieldValue::Checkbox(c) = &mut self.value {
            *c = checked;
        }
    }

    /// Flip a checkbox, returns the new state
    pub fn toggle(&mut self) -> bool {
        match &mut self.value {
            FieldValue::Checkbox(c) => {
                *c = !*c;
                *c
            }
            _ => false,
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) | FieldValue::Number(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) | FieldValue::Number(s) = &mut self.value {
            s.pop();
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s.clear(),
            FieldValue::Checkbox(c) => *c = false,
            FieldValue::Radio(group) => group.reset(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s.clone(),
            FieldValue::Checkbox(true) => "[x]".to_string(),
            FieldValue::Checkbox(false) => "[ ]".to_string(),
            FieldValue::Radio(group) => group
                .checked_option()
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        }
    }
}
