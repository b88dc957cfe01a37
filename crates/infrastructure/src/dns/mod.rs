pub mod ede_template;

pub use ede_template::EdeTemplate;
