//! Form domain layer
//!
//! Field values, radio groups and the triage intake form.

mod field;
mod form_state;
mod radio;

pub use field::{CrossFieldRule, FieldKind, FormField};
pub use form_state::{ids, Form, FormButton, FormError, TriageForm};
pub use radio::{Direction, RadioGroup};

#[cfg(test)]
pub use field::Constraints;
#[cfg(test)]
pub use form_state::DIASTOLIC_ABOVE_SYSTOLIC;
#[cfg(test)]
pub use radio::RadioOption;
