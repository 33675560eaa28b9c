//! Configuration file loading and application onto CLI arguments.
mod apply;
mod loader;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
