//! Triage form state and the common form trait

use super::field::{Constraints, CrossFieldRule, FormField};
use super::radio::{RadioGroup, RadioOption};
use crate::state::{FieldValues, PatientData};
use thiserror::Error;

/// Field identifiers shared with the triage service payloads
pub mod ids {
    pub const AGE: &str = "idade";
    pub const SEX: &str = "sexo";
    pub const SYSTOLIC: &str = "pressao_sistolica";
    pub const DIASTOLIC: &str = "pressao_diastolica";
    pub const HEART_RATE: &str = "frequencia_cardiaca";
    pub const OXYGEN_SATURATION: &str = "saturacao_oxigenio";
    pub const TEMPERATURE: &str = "temperatura";
    pub const CHEST_PAIN: &str = "dor_peito";
    pub const BREATHING_DIFFICULTY: &str = "dificuldade_respiratoria";
    pub const FEVER: &str = "febre";
    pub const DIZZINESS: &str = "tontura";
    pub const VOMITING: &str = "vomito";
    pub const ABDOMINAL_PAIN: &str = "dor_abdominal";
    pub const CHIEF_COMPLAINT: &str = "queixa_principal";

    /// Symptom checkboxes in display order
    pub const SYMPTOMS: [&str; 6] = [
        CHEST_PAIN,
        BREATHING_DIFFICULTY,
        FEVER,
        DIZZINESS,
        VOMITING,
        ABDOMINAL_PAIN,
    ];
}

pub const DIASTOLIC_ABOVE_SYSTOLIC: &str =
    "Diastolic pressure must be lower than systolic pressure";

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Buttons on the last row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Submit,
    LoadExample,
    Clear,
}

impl FormButton {
    pub const ALL: [FormButton; 3] = [Self::Submit, Self::LoadExample, Self::Clear];

    pub fn next(&self) -> Self {
        match self {
            Self::Submit => Self::LoadExample,
            Self::LoadExample => Self::Clear,
            Self::Clear => Self::Submit,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Submit => Self::Clear,
            Self::LoadExample => Self::Submit,
            Self::Clear => Self::LoadExample,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Classify risk",
            Self::LoadExample => "Load example",
            Self::Clear => "Clear",
        }
    }
}

/// Errors turning a form into a service payload
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field {field} has a non-numeric value '{value}'")]
    NotANumber { field: String, value: String },
}

/// The patient intake form
#[derive(Debug, Clone)]
pub struct TriageForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    pub selected_button: FormButton,
}

impl TriageForm {
    pub fn new() -> Self {
        let sex = RadioGroup::new(
            ids::SEX,
            vec![
                RadioOption::new("sexo-M", "M", "Male"),
                RadioOption::new("sexo-F", "F", "Female"),
                RadioOption::new("sexo-O", "O", "Other"),
            ],
        );

        let fields = vec![
            FormField::number(
                ids::AGE,
                "Age",
                "years",
                Constraints::required_range(0.0, 120.0),
            ),
            FormField::radio(sex, "Sex", Constraints::required()),
            FormField::number(
                ids::SYSTOLIC,
                "Systolic pressure",
                "mmHg",
                Constraints::required_range(50.0, 250.0),
            ),
            FormField::number(
                ids::DIASTOLIC,
                "Diastolic pressure",
                "mmHg",
                Constraints::required_range(30.0, 150.0).with_cross_field(
                    CrossFieldRule::LessThan {
                        other: ids::SYSTOLIC.to_string(),
                        message: DIASTOLIC_ABOVE_SYSTOLIC.to_string(),
                    },
                ),
            ),
            FormField::number(
                ids::HEART_RATE,
                "Heart rate",
                "bpm",
                Constraints::required_range(30.0, 200.0),
            ),
            FormField::number(
                ids::OXYGEN_SATURATION,
                "Oxygen saturation",
                "%",
                Constraints::required_range(50.0, 100.0),
            ),
            FormField::number(
                ids::TEMPERATURE,
                "Temperature",
                "°C",
                Constraints::required_range(30.0, 45.0),
            ),
            FormField::checkbox(ids::CHEST_PAIN, "Chest pain"),
            FormField::checkbox(ids::BREATHING_DIFFICULTY, "Breathing difficulty"),
            FormField::checkbox(ids::FEVER, "Fever"),
            FormField::checkbox(ids::DIZZINESS, "Dizziness"),
            FormField::checkbox(ids::VOMITING, "Vomiting"),
            FormField::checkbox(ids::ABDOMINAL_PAIN, "Abdominal pain"),
            FormField::text(ids::CHIEF_COMPLAINT, "Chief complaint", Constraints::default()),
        ];

        Self {
            fields,
            active_field_index: 0,
            selected_button: FormButton::default(),
        }
    }

    /// Index of the buttons row, one past the last field
    pub fn buttons_row_index(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.buttons_row_index()
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Id of the focused field, `None` on the buttons row
    pub fn active_field_id(&self) -> Option<&str> {
        self.fields
            .get(self.active_field_index)
            .map(|f| f.id.as_str())
    }

    /// Move focus to the field with `id`
    pub fn focus_field(&mut self, id: &str) {
        if let Some(index) = self.index_of(id) {
            self.active_field_index = index;
        }
    }

    /// Ids of every required field, in display order
    pub fn required_field_ids(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.constraints.required)
            .map(|f| f.id.clone())
            .collect()
    }

    /// Clear every value and move focus back to the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
        self.selected_button = FormButton::default();
    }

    fn number(&self, id: &str) -> Result<f64, FormError> {
        let raw = self
            .field(id)
            .map(|f| f.raw_value().trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| FormError::MissingField(id.to_string()))?;
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| FormError::NotANumber {
                field: id.to_string(),
                value: raw.to_string(),
            })
    }

    fn checked(&self, id: &str) -> bool {
        self.field(id).is_some_and(|f| f.is_checked())
    }

    /// Build the service payload. Call after a successful validation.
    pub fn to_patient(&self) -> Result<PatientData, FormError> {
        let sexo = self
            .field(ids::SEX)
            .map(|f| f.raw_value())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| FormError::MissingField(ids::SEX.to_string()))?
            .to_string();

        Ok(PatientData {
            pressao_sistolica: self.number(ids::SYSTOLIC)?,
            pressao_diastolica: self.number(ids::DIASTOLIC)?,
            frequencia_cardiaca: self.number(ids::HEART_RATE)?,
            saturacao_oxigenio: self.number(ids::OXYGEN_SATURATION)?,
            temperatura: self.number(ids::TEMPERATURE)?,
            idade: self.number(ids::AGE)?.round() as u32,
            sexo,
            dor_peito: self.checked(ids::CHEST_PAIN),
            dificuldade_respiratoria: self.checked(ids::BREATHING_DIFFICULTY),
            febre: self.checked(ids::FEVER),
            tontura: self.checked(ids::DIZZINESS),
            vomito: self.checked(ids::VOMITING),
            dor_abdominal: self.checked(ids::ABDOMINAL_PAIN),
            queixa_principal: self
                .field(ids::CHIEF_COMPLAINT)
                .map(|f| f.raw_value().trim().to_string())
                .unwrap_or_default(),
        })
    }
}

impl Default for TriageForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for TriageForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.buttons_row_index());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

impl FieldValues for TriageForm {
    fn raw_value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|f| f.raw_value())
    }
}
