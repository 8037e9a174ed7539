//! Error presentation
//!
//! The form document is the accessible model the UI renders from: one node
//! per field, with error markers placed directly after the field they
//! describe. `present` computes the patches that bring a field's error
//! display in line with a validation result; `FormDocument::apply` executes
//! them. Presenting the same result twice yields the same document.

use crate::state::{FieldKind, TriageForm, ValidationResult};
use std::collections::BTreeSet;

/// Class set on a field that currently shows an error
pub const ERROR_CLASS: &str = "error";

/// Role given to error markers
pub const ALERT_ROLE: &str = "alert";

/// Id of the error marker attached to `field_id`
pub fn error_marker_id(field_id: &str) -> String {
    format!("{field_id}-error")
}

/// Id of the static hint attached to `field_id`
pub fn hint_id(field_id: &str) -> String {
    format!("{field_id}-hint")
}

/// Inline error element shown after a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMarker {
    pub id: String,
    pub field_id: String,
    pub message: String,
    pub role: &'static str,
}

/// Accessible state of a field element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNode {
    pub id: String,
    pub classes: BTreeSet<String>,
    /// `aria-invalid`; `None` until the field has been presented once
    pub aria_invalid: Option<bool>,
    /// `aria-describedby` id tokens, in attribute order
    pub described_by: Vec<String>,
    /// Text of the field's hint element, if it has one
    pub hint: Option<String>,
}

impl FieldNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// `aria-describedby` as it would appear on the element, absent when empty
    #[cfg(test)]
    pub fn described_by_attr(&self) -> Option<String> {
        (!self.described_by.is_empty()).then(|| self.described_by.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    Field(FieldNode),
    ErrorMarker(ErrorMarker),
}

/// Mutation instruction against the form document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocPatch {
    InsertErrorMarker { field_id: String, message: String },
    UpdateErrorMarker { field_id: String, message: String },
    RemoveErrorMarker { field_id: String },
    AddClass { field_id: String, class: String },
    RemoveClass { field_id: String, class: String },
    SetAriaInvalid { field_id: String, value: bool },
    AddDescribedBy { field_id: String, token: String },
    RemoveDescribedBy { field_id: String, token: String },
}

/// Ordered accessible model of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDocument {
    nodes: Vec<DocNode>,
}

impl FormDocument {
    /// One node per form field; numeric fields get a range hint referenced
    /// from `aria-describedby`
    pub fn from_form(form: &TriageForm) -> Self {
        let nodes = form
            .fields
            .iter()
            .map(|field| {
                let mut node = FieldNode {
                    id: field.id.clone(),
                    ..Default::default()
                };
                if field.kind() == FieldKind::Number {
                    if let (Some(min), Some(max)) = (field.constraints.min, field.constraints.max) {
                        let unit = field.unit.as_deref().unwrap_or("");
                        node.hint = Some(format!("{min}–{max} {unit}").trim_end().to_string());
                        node.described_by.push(hint_id(&field.id));
                    }
                }
                DocNode::Field(node)
            })
            .collect();
        Self { nodes }
    }

    fn field_position(&self, field_id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n, DocNode::Field(f) if f.id == field_id))
    }

    pub fn field_node(&self, field_id: &str) -> Option<&FieldNode> {
        self.nodes.iter().find_map(|n| match n {
            DocNode::Field(f) if f.id == field_id => Some(f),
            _ => None,
        })
    }

    fn field_node_mut(&mut self, field_id: &str) -> Option<&mut FieldNode> {
        self.nodes.iter_mut().find_map(|n| match n {
            DocNode::Field(f) if f.id == field_id => Some(f),
            _ => None,
        })
    }

    pub fn error_marker(&self, field_id: &str) -> Option<&ErrorMarker> {
        self.nodes.iter().find_map(|n| match n {
            DocNode::ErrorMarker(m) if m.field_id == field_id => Some(m),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn marker_count(&self, field_id: &str) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, DocNode::ErrorMarker(m) if m.field_id == field_id))
            .count()
    }

    /// The node right after the field, used to check marker placement
    #[cfg(test)]
    pub fn node_after(&self, field_id: &str) -> Option<&DocNode> {
        self.field_position(field_id)
            .and_then(|pos| self.nodes.get(pos + 1))
    }

    /// Fields currently flagged invalid, in document order
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                DocNode::Field(f) if f.aria_invalid == Some(true) => Some(f.id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Execute patches in order. Patches naming unknown fields are skipped.
    pub fn apply(&mut self, patches: Vec<DocPatch>) {
        for patch in patches {
            match patch {
                DocPatch::InsertErrorMarker { field_id, message } => {
                    self.remove_markers(&field_id);
                    if let Some(pos) = self.field_position(&field_id) {
                        self.nodes.insert(
                            pos + 1,
                            DocNode::ErrorMarker(ErrorMarker {
                                id: error_marker_id(&field_id),
                                field_id,
                                message,
                                role: ALERT_ROLE,
                            }),
                        );
                    }
                }
                DocPatch::UpdateErrorMarker { field_id, message } => {
                    for node in &mut self.nodes {
                        if let DocNode::ErrorMarker(m) = node {
                            if m.field_id == field_id {
                                m.message = message.clone();
                            }
                        }
                    }
                }
                DocPatch::RemoveErrorMarker { field_id } => self.remove_markers(&field_id),
                DocPatch::AddClass { field_id, class } => {
                    if let Some(node) = self.field_node_mut(&field_id) {
                        node.classes.insert(class);
                    }
                }
                DocPatch::RemoveClass { field_id, class } => {
                    if let Some(node) = self.field_node_mut(&field_id) {
                        node.classes.remove(&class);
                    }
                }
                DocPatch::SetAriaInvalid { field_id, value } => {
                    if let Some(node) = self.field_node_mut(&field_id) {
                        node.aria_invalid = Some(value);
                    }
                }
                DocPatch::AddDescribedBy { field_id, token } => {
                    if let Some(node) = self.field_node_mut(&field_id) {
                        if !node.described_by.contains(&token) {
                            node.described_by.push(token);
                        }
                    }
                }
                DocPatch::RemoveDescribedBy { field_id, token } => {
                    if let Some(node) = self.field_node_mut(&field_id) {
                        node.described_by.retain(|t| *t != token);
                    }
                }
            }
        }
    }

    fn remove_markers(&mut self, field_id: &str) {
        self.nodes
            .retain(|n| !matches!(n, DocNode::ErrorMarker(m) if m.field_id == field_id));
    }

    /// Compute and apply the patches for one field
    pub fn present(&mut self, field_id: &str, result: &ValidationResult) {
        let patches = present(self, field_id, result);
        self.apply(patches);
    }
}

/// Patches that make `field_id`'s error display match `result`.
///
/// Pure: reads the document, never mutates it.
pub fn present(doc: &FormDocument, field_id: &str, result: &ValidationResult) -> Vec<DocPatch> {
    let Some(node) = doc.field_node(field_id) else {
        return Vec::new();
    };
    let token = error_marker_id(field_id);
    let has_marker = doc.error_marker(field_id).is_some();
    let mut patches = Vec::new();

    if result.is_valid {
        if has_marker {
            patches.push(DocPatch::RemoveErrorMarker {
                field_id: field_id.to_string(),
            });
        }
        if node.has_class(ERROR_CLASS) {
            patches.push(DocPatch::RemoveClass {
                field_id: field_id.to_string(),
                class: ERROR_CLASS.to_string(),
            });
        }
        patches.push(DocPatch::SetAriaInvalid {
            field_id: field_id.to_string(),
            value: false,
        });
        if node.described_by.contains(&token) {
            patches.push(DocPatch::RemoveDescribedBy {
                field_id: field_id.to_string(),
                token,
            });
        }
    } else {
        let message = result.message.clone();
        patches.push(if has_marker {
            DocPatch::UpdateErrorMarker {
                field_id: field_id.to_string(),
                message,
            }
        } else {
            DocPatch::InsertErrorMarker {
                field_id: field_id.to_string(),
                message,
            }
        });
        if !node.has_class(ERROR_CLASS) {
            patches.push(DocPatch::AddClass {
                field_id: field_id.to_string(),
                class: ERROR_CLASS.to_string(),
            });
        }
        patches.push(DocPatch::SetAriaInvalid {
            field_id: field_id.to_string(),
            value: true,
        });
        if !node.described_by.contains(&token) {
            patches.push(DocPatch::AddDescribedBy {
                field_id: field_id.to_string(),
                token,
            });
        }
    }

    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ids;
    use pretty_assertions::assert_eq;

    fn document() -> FormDocument {
        FormDocument::from_form(&TriageForm::new())
    }

    fn invalid(message: &str) -> ValidationResult {
        ValidationResult::invalid(message)
    }

    mod from_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_numeric_fields_reference_their_hint() {
            let doc = document();
            let node = doc.field_node(ids::HEART_RATE).unwrap();
            assert_eq!(node.described_by, vec![hint_id(ids::HEART_RATE)]);
            assert_eq!(node.hint.as_deref(), Some("30–200 bpm"));
            assert_eq!(node.aria_invalid, None);
        }

        #[test]
        fn test_checkboxes_have_no_hint() {
            let doc = document();
            let node = doc.field_node(ids::FEVER).unwrap();
            assert!(node.described_by_attr().is_none());
        }
    }

    mod invalid_result {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_marker_follows_field() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("This field is required"));

            match doc.node_after(ids::AGE) {
                Some(DocNode::ErrorMarker(marker)) => {
                    assert_eq!(marker.id, "idade-error");
                    assert_eq!(marker.message, "This field is required");
                    assert_eq!(marker.role, ALERT_ROLE);
                }
                other => panic!("expected marker after field, got {other:?}"),
            }
        }

        #[test]
        fn test_field_marked_invalid_and_linked() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("x"));
            let node = doc.field_node(ids::AGE).unwrap();
            assert!(node.has_class(ERROR_CLASS));
            assert_eq!(node.aria_invalid, Some(true));
            assert_eq!(
                node.described_by_attr().as_deref(),
                Some("idade-hint idade-error")
            );
        }

        #[test]
        fn test_presenting_twice_keeps_one_marker() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("x"));
            let once = doc.clone();
            doc.present(ids::AGE, &invalid("x"));
            assert_eq!(doc.marker_count(ids::AGE), 1);
            assert_eq!(doc, once);
        }

        #[test]
        fn test_new_message_replaces_old() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("first"));
            doc.present(ids::AGE, &invalid("second"));
            assert_eq!(doc.marker_count(ids::AGE), 1);
            assert_eq!(doc.error_marker(ids::AGE).unwrap().message, "second");
        }

        #[test]
        fn test_second_present_emits_update_not_insert() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("x"));
            let patches = present(&doc, ids::AGE, &invalid("x"));
            assert!(matches!(patches[0], DocPatch::UpdateErrorMarker { .. }));
            assert!(!patches
                .iter()
                .any(|p| matches!(p, DocPatch::AddDescribedBy { .. } | DocPatch::AddClass { .. })));
        }
    }

    mod valid_result {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_clears_marker_and_flags() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("x"));
            doc.present(ids::AGE, &ValidationResult::valid());

            let node = doc.field_node(ids::AGE).unwrap();
            assert_eq!(doc.marker_count(ids::AGE), 0);
            assert!(!node.has_class(ERROR_CLASS));
            assert_eq!(node.aria_invalid, Some(false));
        }

        #[test]
        fn test_only_error_token_is_stripped() {
            let mut doc = document();
            doc.present(ids::AGE, &invalid("x"));
            doc.present(ids::AGE, &ValidationResult::valid());
            let node = doc.field_node(ids::AGE).unwrap();
            assert_eq!(node.described_by_attr().as_deref(), Some("idade-hint"));
        }

        #[test]
        fn test_attribute_dropped_when_no_token_left() {
            let mut doc = document();
            doc.present(ids::FEVER, &invalid("x"));
            assert_eq!(
                doc.field_node(ids::FEVER).unwrap().described_by_attr().as_deref(),
                Some("febre-error")
            );
            doc.present(ids::FEVER, &ValidationResult::valid());
            assert!(doc.field_node(ids::FEVER).unwrap().described_by_attr().is_none());
        }

        #[test]
        fn test_valid_on_clean_field_only_sets_aria_invalid() {
            let doc = document();
            let patches = present(&doc, ids::AGE, &ValidationResult::valid());
            assert_eq!(
                patches,
                vec![DocPatch::SetAriaInvalid {
                    field_id: ids::AGE.to_string(),
                    value: false
                }]
            );
        }
    }

    #[test]
    fn test_unknown_field_yields_no_patches() {
        let doc = document();
        assert!(present(&doc, "nope", &invalid("x")).is_empty());
    }

    #[test]
    fn test_markers_do_not_leak_between_fields() {
        let mut doc = document();
        doc.present(ids::AGE, &invalid("a"));
        doc.present(ids::SYSTOLIC, &invalid("b"));
        doc.present(ids::AGE, &ValidationResult::valid());
        assert_eq!(doc.marker_count(ids::SYSTOLIC), 1);
        assert_eq!(doc.invalid_fields(), vec![ids::SYSTOLIC]);
    }
}
