//! Integration tests

mod api;
mod database;
mod realtime;
