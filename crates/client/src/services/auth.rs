//! Authentication service.
//!
//! Login and logout set or clear HttpOnly session cookies on the shared
//! cookie jar; nothing here stores a token. Admin and customer accounts
//! authenticate against separate endpoint families.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use souq_core::{Admin, ApiEnvelope, AuthResponse, Customer};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Login credentials. The password is wrapped in [`SecretString`] so it
/// never appears in debug output or logs.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Registration payload.
#[derive(Debug)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Deserialize)]
struct AdminData {
    admin: Admin,
}

#[derive(Deserialize)]
struct CustomerData {
    customer: Customer,
}

/// Thin façade for auth endpoints.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // Admin accounts
    // =========================================================================

    /// Sign in an admin. On success the server sets the session cookies.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on bad credentials or request failure.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn admin_login(&self, form: &LoginForm) -> Result<AuthResponse, ApiError> {
        let body = json!({
            "email": form.email,
            "password": form.password.expose_secret(),
        });
        let env: ApiEnvelope<AuthResponse> = self.client.post("/admin/login", Some(&body)).await?;
        Ok(env.data)
    }

    /// Register a new admin account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn admin_register(&self, form: &RegisterForm) -> Result<AuthResponse, ApiError> {
        let body = json!({
            "name": form.name,
            "email": form.email,
            "password": form.password.expose_secret(),
        });
        let env: ApiEnvelope<AuthResponse> =
            self.client.post("/admin/register", Some(&body)).await?;
        Ok(env.data)
    }

    /// Sign out the current admin, clearing the session server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_logout(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.post::<_, ()>("/admin/logout", None).await?;
        Ok(())
    }

    /// Fetch the signed-in admin's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SessionExpired`] when not signed in, or another
    /// [`ApiError`] on request failure.
    #[instrument(skip(self))]
    pub async fn admin_profile(&self) -> Result<Admin, ApiError> {
        let env: ApiEnvelope<AdminData> = self.client.get("/admin/profile").await?;
        Ok(env.data.admin)
    }

    /// Explicitly refresh the admin session.
    ///
    /// The client already does this transparently on a 401; calling it
    /// directly is only useful for keep-alive schemes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the session cannot be refreshed.
    #[instrument(skip(self))]
    pub async fn admin_refresh(&self) -> Result<AuthResponse, ApiError> {
        let env: ApiEnvelope<AuthResponse> = self
            .client
            .post::<_, ()>("/admin/refresh-token", None)
            .await?;
        Ok(env.data)
    }

    // =========================================================================
    // Customer accounts
    // =========================================================================

    /// Sign in a customer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on bad credentials or request failure.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn customer_login(&self, form: &LoginForm) -> Result<Customer, ApiError> {
        let body = json!({
            "email": form.email,
            "password": form.password.expose_secret(),
        });
        let env: ApiEnvelope<CustomerData> = self.client.post("/auth/login", Some(&body)).await?;
        Ok(env.data.customer)
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn customer_register(&self, form: &RegisterForm) -> Result<Customer, ApiError> {
        let body = json!({
            "name": form.name,
            "email": form.email,
            "password": form.password.expose_secret(),
        });
        let env: ApiEnvelope<CustomerData> =
            self.client.post("/auth/register", Some(&body)).await?;
        Ok(env.data.customer)
    }

    /// Sign out the current customer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn customer_logout(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.post::<_, ()>("/auth/logout", None).await?;
        Ok(())
    }
}
