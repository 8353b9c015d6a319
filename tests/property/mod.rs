//! Property-based tests

mod chat_proptest;
mod csv_proptest;
mod salary_proptest;
