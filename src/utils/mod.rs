//! Shared path helpers

pub mod path_resolver;

pub use path_resolver::{is_source_file, is_test_file, package_key};
