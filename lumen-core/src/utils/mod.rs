//! General utilities for Lumen core.
//!
//! - [`fs`]: filesystem helpers such as ensuring a directory exists.
//! - [`paths`]: platform directory resolution for Lumen's config and state.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
