//! Store integration tests

mod json_file_tests;
