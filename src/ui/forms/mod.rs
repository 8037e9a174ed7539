//! Form rendering module
//!
//! - `field_renderer`: single field with its error marker and hint
//! - `triage_form`: the patient intake form

mod field_renderer;
mod triage_form;

pub use triage_form::draw_triage_form;
