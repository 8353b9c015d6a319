//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication and account endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: User provides profile and password → User created → JWT token returned
//! 2. **Login**: User provides username or email and password → Credentials verified → JWT token returned
//! 3. **Get Me**: User provides JWT token → Token verified → User info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens carry the user id, email and role
//! - Token lifetime comes from `JWT_TTL_DAYS` (30 days by default)
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::{change_password, get_me, get_user_profile, login, signup, update_me};
