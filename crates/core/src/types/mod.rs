//! Core types for the Souq client SDK.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the wire shapes of the Souq REST API.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod order;

pub use analytics::*;
pub use api::*;
pub use auth::*;
pub use cart::CartLine;
pub use catalog::*;
pub use order::*;

mod id;

pub use id::*;
