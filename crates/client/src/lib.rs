//! Souq Client - API client, cart engine, and service wrappers.
//!
//! This crate is the single gateway between a Souq frontend and the Souq
//! REST API, plus the local cart state that does not live on the server.
//!
//! # Components
//!
//! - [`http`] - Authenticated API client: cookie-carried identity, CSRF
//!   header echo on mutating verbs, and a single silent refresh-and-retry
//!   on `401 Unauthorized`.
//! - [`cart`] - Local cart engine: durable product-id/quantity aggregation
//!   with derived totals, behind an injectable [`cart::CartStore`].
//! - [`services`] - Thin typed façades over the API client for categories,
//!   tags, products, orders, reviews, images, auth, and analytics.
//! - [`config`] - Client configuration loaded from environment variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use souq_client::config::ClientConfig;
//! use souq_client::http::ApiClient;
//! use souq_client::services::ProductService;
//!
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(&config);
//! let products = ProductService::new(client.clone());
//!
//! let page = products.list(&Default::default()).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod services;

pub use cart::Cart;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::ApiClient;
