pub mod board;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod types;
