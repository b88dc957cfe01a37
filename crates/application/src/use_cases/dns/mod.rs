mod blocklist_resolver;

pub use blocklist_resolver::{BlocklistOptions, BlocklistResolver};
