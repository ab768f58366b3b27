//! Core type definitions for the farmbase platform
//!
//! All types follow these naming conventions:
//! - snake_case for field names
//! - *_id suffix for primary keys
//! - *_ref suffix for vendor-side references

mod call;
mod common;
mod credentials;
mod credit;
mod farmer;
mod insight;

pub use call::*;
pub use common::*;
pub use credentials::*;
pub use credit::*;
pub use farmer::*;
pub use insight::*;
