//! Application state module

mod announcer;
mod app_state;
mod forms;
mod keyboard;
mod orchestrator;
mod presenter;
mod registry;
mod triage;
mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use announcer::*;
pub use app_state::*;
pub use forms::*;
pub use keyboard::*;
pub use orchestrator::*;
pub use presenter::*;
pub use registry::*;
pub use triage::*;
pub use validation::*;
