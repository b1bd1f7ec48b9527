//! HTTP client for the external image-synthesis API.

mod client;

pub use client::{
    is_valid_endpoint, DiffusionClient, DiffusionConfig, DiffusionError, UpstreamResponse,
    GENERATION_ENDPOINTS,
};
