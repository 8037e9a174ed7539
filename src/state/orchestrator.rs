//! Form orchestration
//!
//! Wires validation, error presentation and announcements to the form's
//! submit, blur and input events. Each field moves through a small phase
//! machine: blur validates it, input returns it to pristine.

use crate::state::{
    validate, Announcer, FormDocument, FormError, PatientData, TriageForm, ValidationResult,
};
use std::collections::HashMap;
use std::time::Instant;

/// Announced once when a submit is rejected
pub const SUBMIT_ERROR_SUMMARY: &str =
    "The form has errors. Please review the highlighted fields.";

/// Validation phase of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPhase {
    #[default]
    Pristine,
    Validated {
        valid: bool,
    },
}

/// What a submit attempt produced
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every required field passed; the payload is ready to send
    Ready(PatientData),
    /// Submission cancelled; focus was moved to `first_invalid`
    Rejected { first_invalid: String },
}

#[derive(Debug, Default)]
pub struct FormOrchestrator {
    phases: HashMap<String, FieldPhase>,
}

impl FormOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn phase(&self, field_id: &str) -> FieldPhase {
        self.phases.get(field_id).copied().unwrap_or_default()
    }

    fn check(
        &mut self,
        form: &TriageForm,
        doc: &mut FormDocument,
        field_id: &str,
    ) -> ValidationResult {
        let Some(field) = form.field(field_id) else {
            return ValidationResult::valid();
        };
        let result = validate(field, form);
        doc.present(field_id, &result);
        self.phases.insert(
            field_id.to_string(),
            FieldPhase::Validated {
                valid: result.is_valid,
            },
        );
        result
    }

    /// Focus left `field_id`: validate it and show the outcome
    pub fn on_blur(
        &mut self,
        form: &TriageForm,
        doc: &mut FormDocument,
        field_id: &str,
    ) -> ValidationResult {
        let result = self.check(form, doc, field_id);
        tracing::debug!(field = field_id, valid = result.is_valid, "blur");
        result
    }

    /// The user edited `field_id`: hide its error until the next blur
    pub fn on_input(&mut self, doc: &mut FormDocument, field_id: &str) {
        doc.present(field_id, &ValidationResult::valid());
        self.phases.insert(field_id.to_string(), FieldPhase::Pristine);
    }

    /// Validate every required field.
    ///
    /// On failure the errors are presented, one summary is announced and focus
    /// moves to the first invalid field. On success the payload is returned;
    /// sending it is up to the caller.
    pub fn on_submit(
        &mut self,
        form: &mut TriageForm,
        doc: &mut FormDocument,
        announcer: &mut Announcer,
        now: Instant,
    ) -> Result<SubmitOutcome, FormError> {
        let mut first_invalid = None;
        for id in form.required_field_ids() {
            let result = self.check(form, doc, &id);
            if !result.is_valid && first_invalid.is_none() {
                first_invalid = Some(id);
            }
        }

        match first_invalid {
            Some(id) => {
                tracing::info!(first_invalid = %id, "submit rejected");
                announcer.announce(SUBMIT_ERROR_SUMMARY, now);
                form.focus_field(&id);
                Ok(SubmitOutcome::Rejected { first_invalid: id })
            }
            None => form.to_patient().map(SubmitOutcome::Ready),
        }
    }

    /// Return every field to pristine, e.g. after the form was cleared or
    /// refilled
    pub fn reset(&mut self) {
        self.phases.clear();
    }

    /// Mark the given fields pristine and hide their errors
    pub fn clear_fields<'a>(
        &mut self,
        doc: &mut FormDocument,
        field_ids: impl IntoIterator<Item = &'a str>,
    ) {
        for id in field_ids {
            self.on_input(doc, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::filled_form;
    use crate::state::{ids, DocNode, ERROR_CLASS, REQUIRED_MESSAGE};
    use pretty_assertions::assert_eq;

    fn setup(form: &TriageForm) -> (FormOrchestrator, FormDocument, Announcer) {
        (
            FormOrchestrator::new(),
            FormDocument::from_form(form),
            Announcer::new(),
        )
    }

    mod phases {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fields_start_pristine() {
            let orchestrator = FormOrchestrator::new();
            assert_eq!(orchestrator.phase(ids::AGE), FieldPhase::Pristine);
        }

        #[test]
        fn test_blur_then_input_cycle() {
            let form = TriageForm::new();
            let (mut orchestrator, mut doc, _) = setup(&form);

            let result = orchestrator.on_blur(&form, &mut doc, ids::AGE);
            assert_eq!(result.message, REQUIRED_MESSAGE);
            assert_eq!(
                orchestrator.phase(ids::AGE),
                FieldPhase::Validated { valid: false }
            );
            assert!(doc.error_marker(ids::AGE).is_some());

            orchestrator.on_input(&mut doc, ids::AGE);
            assert_eq!(orchestrator.phase(ids::AGE), FieldPhase::Pristine);
            assert!(doc.error_marker(ids::AGE).is_none());
        }

        #[test]
        fn test_input_does_not_revalidate() {
            let mut form = TriageForm::new();
            let (mut orchestrator, mut doc, _) = setup(&form);
            orchestrator.on_blur(&form, &mut doc, ids::HEART_RATE);

            form.field_mut(ids::HEART_RATE)
                .unwrap()
                .set_text("9999".to_string());
            orchestrator.on_input(&mut doc, ids::HEART_RATE);

            let node = doc.field_node(ids::HEART_RATE).unwrap();
            assert!(!node.has_class(ERROR_CLASS));
            assert!(doc.error_marker(ids::HEART_RATE).is_none());
        }

        #[test]
        fn test_valid_blur() {
            let form = filled_form();
            let (mut orchestrator, mut doc, _) = setup(&form);
            assert!(orchestrator.on_blur(&form, &mut doc, ids::AGE).is_valid);
            assert_eq!(
                orchestrator.phase(ids::AGE),
                FieldPhase::Validated { valid: true }
            );
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_form_yields_payload() {
            let mut form = filled_form();
            let (mut orchestrator, mut doc, mut announcer) = setup(&form);
            let outcome = orchestrator
                .on_submit(&mut form, &mut doc, &mut announcer, Instant::now())
                .unwrap();
            match outcome {
                SubmitOutcome::Ready(patient) => assert_eq!(patient.idade, 45),
                other => panic!("expected payload, got {other:?}"),
            }
            assert_eq!(announcer.history().count(), 0);
            assert!(doc.invalid_fields().is_empty());
        }

        #[test]
        fn test_one_empty_field_announces_once_and_focuses_it() {
            let mut form = filled_form();
            form.field_mut(ids::TEMPERATURE).unwrap().clear();
            form.active_field_index = 0;
            let (mut orchestrator, mut doc, mut announcer) = setup(&form);

            let outcome = orchestrator
                .on_submit(&mut form, &mut doc, &mut announcer, Instant::now())
                .unwrap();

            assert_eq!(
                outcome,
                SubmitOutcome::Rejected {
                    first_invalid: ids::TEMPERATURE.to_string()
                }
            );
            let summaries: Vec<_> = announcer.history().map(|a| a.message.clone()).collect();
            assert_eq!(summaries, vec![SUBMIT_ERROR_SUMMARY.to_string()]);
            assert_eq!(announcer.text(), SUBMIT_ERROR_SUMMARY);
            assert_eq!(form.active_field_id(), Some(ids::TEMPERATURE));
        }

        #[test]
        fn test_all_invalid_fields_are_presented() {
            let mut form = TriageForm::new();
            let (mut orchestrator, mut doc, mut announcer) = setup(&form);
            orchestrator
                .on_submit(&mut form, &mut doc, &mut announcer, Instant::now())
                .unwrap();

            assert_eq!(doc.invalid_fields().len(), form.required_field_ids().len());
            assert_eq!(announcer.history().count(), 1);
            assert_eq!(form.active_field_id(), Some(ids::AGE));
            assert!(matches!(
                doc.node_after(ids::SEX),
                Some(DocNode::ErrorMarker(_))
            ));
        }

        #[test]
        fn test_cross_field_failure_rejects_submit() {
            let mut form = filled_form();
            form.field_mut(ids::DIASTOLIC)
                .unwrap()
                .set_text("120".to_string());
            let (mut orchestrator, mut doc, mut announcer) = setup(&form);
            let outcome = orchestrator
                .on_submit(&mut form, &mut doc, &mut announcer, Instant::now())
                .unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::Rejected {
                    first_invalid: ids::DIASTOLIC.to_string()
                }
            );
        }

        #[test]
        fn test_resubmit_keeps_single_marker_per_field() {
            let mut form = TriageForm::new();
            let (mut orchestrator, mut doc, mut announcer) = setup(&form);
            let now = Instant::now();
            orchestrator
                .on_submit(&mut form, &mut doc, &mut announcer, now)
                .unwrap();
            orchestrator
                .on_submit(&mut form, &mut doc, &mut announcer, now)
                .unwrap();
            assert_eq!(doc.marker_count(ids::AGE), 1);
        }
    }

    #[test]
    fn test_clear_fields_resets_phase_and_errors() {
        let form = TriageForm::new();
        let (mut orchestrator, mut doc, _) = setup(&form);
        orchestrator.on_blur(&form, &mut doc, ids::AGE);
        orchestrator.on_blur(&form, &mut doc, ids::SYSTOLIC);
        orchestrator.clear_fields(&mut doc, [ids::AGE, ids::SYSTOLIC]);
        assert!(doc.invalid_fields().is_empty());
        assert_eq!(orchestrator.phase(ids::SYSTOLIC), FieldPhase::Pristine);
    }
}
