//! Real-time delivery tests

mod hub_test;
mod socket_test;
