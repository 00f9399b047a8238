//! Seeds the personnel API with demo departments, salary grades and a
//! hundred employees arranged in a reporting hierarchy.

pub mod catalog;
pub mod names;
pub mod report;
pub mod roster;
pub mod seeder;
pub mod tier;

use platform_client::ClientError;
use thiserror::Error;

pub use report::{DryRunPlan, Summary};
pub use seeder::{SeedSettings, Seeder};
pub use tier::Tier;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("personnel API is not available")]
    Unhealthy(#[source] ClientError),
}
