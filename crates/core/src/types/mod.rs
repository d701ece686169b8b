//! Core types for Paw Haven.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod donation;
pub mod id;
pub mod status;

pub use amount::{Amount, CurrencyCode};
pub use donation::DonationRecord;
pub use id::*;
pub use status::*;
