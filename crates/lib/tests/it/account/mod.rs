//! Account module integration tests

mod lifecycle_tests;
mod persistence_tests;
