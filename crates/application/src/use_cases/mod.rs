pub mod dns;

pub use dns::{BlocklistOptions, BlocklistResolver};
