//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::TrailPaths;
pub use settings::Settings;
