//! Shared utilities across relpack modules.

pub mod files;

pub use files::{copy_file, write_file_with_dirs};
