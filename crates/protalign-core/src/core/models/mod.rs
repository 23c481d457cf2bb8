pub mod chain;
pub mod properties;
