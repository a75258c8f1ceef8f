pub mod config;
pub mod product;
pub mod scoring;
