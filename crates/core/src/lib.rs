pub mod config;
pub mod line_item;

pub use config::{ConfigError, ParserConfig, PipelineConfig, RecognitionMode};
pub use line_item::LineItem;
