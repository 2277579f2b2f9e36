pub mod browse;
pub mod config;
pub mod export;
pub mod list;
