//! # Crate test-utils
//!
//! Shared fixtures for the workspace tests:
//! - [`EventRecorder`], a sink recording every stream event it is notified of.
//! - [`csv_loader`], loading numeric fixtures from `test_data/`.

pub mod csv_loader;
pub mod recorder;

pub use recorder::EventRecorder;

/// Absolute path of a file stored in `test-utils/test_data`.
pub fn test_data_path(file_name: &str) -> String {
    format!("{}/test_data/{}", env!("CARGO_MANIFEST_DIR"), file_name)
}
