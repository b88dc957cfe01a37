//! Blockgate Domain Layer
pub mod client_info;
pub mod config;
pub mod ede_text;
pub mod errors;
pub mod match_result;

pub use client_info::ClientInfo;
pub use config::{BlocklistConfig, CliOverrides, Config, ConfigError, ExtendedErrorConfig};
pub use ede_text::{parse_ede_text, EdeField, EdeSegment};
pub use errors::DomainError;
pub use match_result::MatchResult;
