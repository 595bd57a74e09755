pub mod analyzer;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod store;
