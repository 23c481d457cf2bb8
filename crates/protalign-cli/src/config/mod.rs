mod builder;
mod defaults;
mod file;

pub use builder::load_pipeline_config;
pub use file::FileConfig;
