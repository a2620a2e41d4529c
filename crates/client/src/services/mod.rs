//! Typed service façades over the API client.
//!
//! Each service translates a domain operation (e.g., "create category")
//! into one API call: it picks the verb and endpoint, serializes the form,
//! and unwraps the response envelope. Auth mechanics and error shaping
//! live entirely in [`crate::http::ApiClient`]; services never handle a
//! 401 themselves.

mod analytics;
mod auth;
mod categories;
mod images;
mod orders;
mod products;
mod reviews;
mod tags;

pub use analytics::AnalyticsService;
pub use auth::{AuthService, LoginForm, RegisterForm};
pub use categories::{CategoryForm, CategoryService};
pub use images::{DeleteAck, ImageService};
pub use orders::{OrderForm, OrderItemForm, OrderPage, OrderService, StatusUpdateAck};
pub use products::{ProductForm, ProductPage, ProductQuery, ProductService, ProductSort, SortOrder};
pub use reviews::{ReviewForm, ReviewPage, ReviewService};
pub use tags::{TagForm, TagService};
