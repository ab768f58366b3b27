//! Table repositories

mod call_repo;
mod credentials_repo;
mod credit_repo;
mod farmer_repo;
mod insight_repo;

pub use call_repo::*;
pub use credentials_repo::*;
pub use credit_repo::*;
pub use farmer_repo::*;
pub use insight_repo::*;

use serde::Deserialize;

/// Row shape for count() queries
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}
