//! Triage service client module for HTTP JSON communication

mod client;
mod error;
mod traits;

pub use client::HttpTriageService;
pub use error::{ServiceError, ServiceResult};
pub use traits::TriageService;

#[cfg(test)]
pub use traits::MockTriageService;
