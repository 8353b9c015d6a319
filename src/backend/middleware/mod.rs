//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! - **`auth`** - Authentication middleware and the `AuthUser` / `AdminUser`
//!   extractors
//! - **`extract`** - `ApiJson`, `ApiQuery` and `ApiPath`, whose rejections
//!   render as JSON errors
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use scoutlink::backend::middleware::auth_middleware;
//!
//! let protected = protected_routes
//!     .route_layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;
pub mod extract;

pub use auth::{
    auth_middleware, authenticate, bearer_token, extract_authenticated_user, AdminUser, AuthUser,
    AuthenticatedUser,
};
pub use extract::{ApiJson, ApiPath, ApiQuery};
