pub mod client;
pub mod config;
pub mod image;
pub mod params;
pub mod provider;

pub use cinescope_core::error::ApiError;
pub use client::TmdbClient;
pub use config::{ConfigError, TmdbConfig};
pub use image::{ImageSize, PLACEHOLDER_IMAGE, image_url};
pub use params::{DiscoverParams, QueryParams};
pub use provider::MovieSource;
