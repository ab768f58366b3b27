//! Storage entity types
//!
//! One struct per table. Entities keep enumerated fields as plain
//! strings and decimal amounts as strings; conversion to domain types
//! happens in the service layer.

mod call;
mod credentials;
mod credit;
mod farmer;
mod insight;

pub use call::*;
pub use credentials::*;
pub use credit::*;
pub use farmer::*;
pub use insight::*;

use farm_core::types::TenantId;

/// Common entity contract
pub trait Entity {
    /// Table the entity is stored in
    const TABLE: &'static str;

    /// Natural key, unique within the table
    fn key(&self) -> &str;

    /// Owning tenant
    fn tenant(&self) -> &TenantId;
}
