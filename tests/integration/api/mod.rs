//! API integration tests
//!
//! These run against a router without a database, so they cover routing,
//! authentication and the error envelope.

mod auth_test;
mod routing_test;
