//! Loader facade and configuration

mod config;
mod loader;
mod manifest;

pub use config::{ConfigError, LoaderConfig};
pub use loader::{AssetLoader, AssetRef, Stored};
pub use manifest::{AssetManifest, FontEntry, ManifestEntry};
