//! Smart Shipping Core - Shared types library.
//!
//! This crate provides common types used across all Smart Shipping components:
//! - `server` - JSON API for booking, journeys, finance, customs and documents
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain rules - no I/O, no
//! database access, no HTTP. Enable the `postgres` feature to get sqlx
//! encode/decode impls for IDs and status enums.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, contact identifiers, statuses and the journey step model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
