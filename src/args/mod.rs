//! CLI argument types, parsing helpers, and resolution into run settings.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod resolve;
mod types;


pub use cli::LoadArgs;
pub use resolve::RunSettings;
pub use types::{DispatchMode, PositiveUsize};

pub use defaults::DEFAULT_CONFIG_FILES;
pub(crate) use defaults::{DEFAULT_USER_AGENT, default_window_size};
