//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, preferences_path, DATA_DIR_ENV, PREFERENCES_FILE};
