pub mod commands;
mod error;
pub mod report;
pub mod validation;
mod workflow;

pub use error::{ClaimError, ClaimResult};
pub use workflow::{ClaimWorkflow, SubmittedClaim};
