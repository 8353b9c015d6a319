//! Database-backed flows
//!
//! Each test empties the database first, so they run serially.

mod advertisement_test;
mod marketplace_test;
mod messaging_test;
