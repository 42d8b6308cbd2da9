//! GoldCatalog Library
//!
//! Jewelry catalog priced live from the spot gold price

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod pricing;
pub mod types;
