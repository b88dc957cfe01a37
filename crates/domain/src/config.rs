pub mod blocklist;
pub mod errors;
pub mod logging;
pub mod root;

pub use blocklist::{BlocklistConfig, ExtendedErrorConfig};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
