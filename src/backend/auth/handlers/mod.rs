//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication and account
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── me.rs       - Get current user handler
//! └── account.rs  - Profile, password and public profile handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`get_me`** - GET /api/auth/me
//! - **`update_me`** - PUT /api/users/me
//! - **`change_password`** - PUT /api/users/me/password
//! - **`get_user_profile`** - GET /api/users/{id}

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Account maintenance handlers
pub mod account;

pub use types::{
    AuthResponse, ChangePasswordRequest, LoginRequest, SignupRequest, UpdateProfileRequest,
    UserResponse,
};

pub use account::{change_password, get_user_profile, update_me};
pub use login::login;
pub use me::get_me;
pub use signup::signup;
