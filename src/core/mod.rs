//! Core data types shared by the analyses.

pub mod address_range;

pub use address_range::AddressRange;
