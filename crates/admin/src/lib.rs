//! Paw Haven Admin library.
//!
//! This crate provides the admin donation analytics API as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate holds the backend service-role key, which bypasses row-level
//! security. Only deploy behind an authenticating proxy.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod supabase;
