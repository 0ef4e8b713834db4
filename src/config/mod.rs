//! Configuration: data paths and persisted settings

pub mod paths;
pub mod settings;

pub use paths::{ClubPaths, DATA_DIR_ENV};
pub use settings::Settings;
