//! Shared fixtures for state tests

use super::{ids, TriageForm, TriageResult};

/// A form where every required field holds a valid value
pub fn filled_form() -> TriageForm {
    let mut form = TriageForm::new();
    for (id, value) in [
        (ids::AGE, "45"),
        (ids::SYSTOLIC, "120"),
        (ids::DIASTOLIC, "80"),
        (ids::HEART_RATE, "72"),
        (ids::OXYGEN_SATURATION, "98"),
        (ids::TEMPERATURE, "36.5"),
    ] {
        if let Some(field) = form.field_mut(id) {
            field.set_text(value.to_string());
        }
    }
    if let Some(group) = form.field_mut(ids::SEX).and_then(|f| f.radio_group_mut()) {
        group.check_value("F");
    }
    form
}

/// A red-tier classification as the service returns it
pub fn sample_result() -> TriageResult {
    TriageResult {
        classification: "Emergência".to_string(),
        risk_color: "VERMELHO".to_string(),
        confidence: 0.87,
        reasoning: "SpO2 below 90%".to_string(),
        recommendations: vec!["Immediate care".to_string()],
        timestamp: "2026-10-19T10:00:00".to_string(),
    }
}
