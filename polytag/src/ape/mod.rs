//! APE specific items
//!
//! ## File notes
//!
//! Only APEv2 tags are written. An APEv1 tag (footer only) is read, and upgraded when saving.
pub(crate) mod constants;
pub(crate) mod header;
pub(crate) mod tag;

// Exports

pub use tag::ApeTag;
pub use tag::item::{ApeItem, ApeItemValue};
