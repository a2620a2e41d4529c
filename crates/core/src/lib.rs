//! Souq Core - Shared types library.
//!
//! This crate provides common types used across all Souq client components:
//! - `client` - API client, cart engine, and service wrappers
//! - `cli` - Command-line tool for cart management and API access
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, API envelopes, and domain records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
