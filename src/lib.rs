//! Cultural Data Explorer - data layer shared by the dashboard and the image fetcher

pub mod constants;
pub mod data;
pub mod error;
pub mod fetcher;
pub mod filters;
pub mod gallery;
pub mod geo;
pub mod settings;
pub mod summary;
pub mod types;
pub mod utils;
